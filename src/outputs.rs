use std::collections::HashMap;

/// Aggregated fuzzy set of one output variable and its crisp value.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedOutput {
    pub value: f64,
    /// Sample points of the output universe
    pub samples: Vec<f64>,
    /// Aggregated membership at each sample point
    pub membership: Vec<f64>,
    /// True when no rule fired and `value` is the caller-requested fallback
    pub fallback: bool,
}

/// Result of one evaluation. Crisp values by output name plus the diagnostics
/// that produced them.
#[derive(Clone, Debug)]
pub struct InferenceResult {
    outputs: HashMap<String, AggregatedOutput>,
    firing_strengths: Vec<f64>,
}

impl InferenceResult {
    pub(crate) fn new(outputs: HashMap<String, AggregatedOutput>, firing_strengths: Vec<f64>) -> Self {
        Self {
            outputs,
            firing_strengths,
        }
    }

    /// Crisp value of the named output.
    pub fn get(&self, output: &str) -> Option<f64> {
        self.outputs.get(output).map(|o| o.value)
    }

    pub fn aggregated(&self, output: &str) -> Option<&AggregatedOutput> {
        self.outputs.get(output)
    }

    /// Firing strength of every rule, in rule order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.outputs.iter().map(|(name, o)| (name.as_str(), o.value))
    }
}
