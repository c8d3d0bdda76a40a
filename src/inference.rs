use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

use crate::dsl::TermRef;
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::knowledge_base::KnowledgeBase;
use crate::ops::*;
use crate::outputs::{AggregatedOutput, InferenceResult};
use crate::variable::{Role, VariableKey};

/// Operators used by the pipeline. The default is Zadeh logic with Mamdani
/// clipping and centroid defuzzification. Aggregation is always pointwise max.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub implication: ImplicationOp,
    pub defuzzification: DefuzzificationOp,
}

/// What to do with an output no rule fired for.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Silence {
    Fail,
    Midpoint,
}

/// Mamdani inference over a shared, immutable [`KnowledgeBase`].
///
/// Each call to [`evaluate`](Self::evaluate) is an independent run of
/// fuzzify → fire → implicate → aggregate → defuzzify; the engine keeps no state
/// between calls and can be shared across threads freely.
#[derive(Clone, Debug)]
pub struct InferenceEngine {
    kb: Arc<KnowledgeBase>,
    config: EngineConfig,
}

impl InferenceEngine {
    pub fn new(kb: impl Into<Arc<KnowledgeBase>>) -> Self {
        Self::with_config(kb, EngineConfig::default())
    }

    pub fn with_config(kb: impl Into<Arc<KnowledgeBase>>, config: EngineConfig) -> Self {
        Self { kb: kb.into(), config }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline. Fails with `NoRuleFired` if any output ends up with
    /// an all-zero aggregated curve.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<InferenceResult> {
        self.run(inputs, Silence::Fail)
    }

    /// Like [`evaluate`](Self::evaluate), but an output no rule fired for takes the
    /// midpoint of its universe (flagged via [`AggregatedOutput::fallback`]).
    pub fn evaluate_or_midpoint(&self, inputs: &Inputs) -> Result<InferenceResult> {
        self.run(inputs, Silence::Midpoint)
    }

    /// Evaluate many rows in parallel. Results are in row order.
    pub fn evaluate_batch(&self, rows: &[Inputs]) -> Vec<Result<InferenceResult>> {
        rows.par_iter().map(|row| self.evaluate(row)).collect()
    }

    fn run(&self, inputs: &Inputs, silence: Silence) -> Result<InferenceResult> {
        let kb = &*self.kb;
        let facts = self.fuzzify(inputs)?;

        for &key in kb.referenced_inputs() {
            if !facts.contains_key(key) {
                return Err(FuzzyError::MissingInput(kb.get(key).name().to_owned()));
            }
        }

        let and_op = self.config.and_op;
        let or_op = self.config.or_op;
        let degree = |t: &TermRef| facts[t.variable][t.term];
        let firing_strengths: Vec<f64> = kb
            .compiled_rules()
            .par_iter()
            .map(|rule| rule.antecedent.eval(&degree, and_op, or_op))
            .collect();

        for (i, strength) in firing_strengths.iter().enumerate() {
            if *strength > 0. {
                tracing::trace!(rule = i, strength, "rule fired");
            }
        }

        let aggregated: Vec<Result<(String, AggregatedOutput)>> = kb
            .output_keys()
            .par_iter()
            .map(|&key| self.aggregate(key, &firing_strengths, silence))
            .collect();
        let outputs = aggregated.into_iter().collect::<Result<HashMap<_, _>>>()?;

        Ok(InferenceResult::new(outputs, firing_strengths))
    }

    /// Degree tables for every supplied input, indexed by term id.
    fn fuzzify(&self, inputs: &Inputs) -> Result<SecondaryMap<VariableKey, Vec<f64>>> {
        let kb = &*self.kb;
        let mut names: Vec<&String> = inputs.0.keys().collect();
        let mut facts = SecondaryMap::with_capacity(names.len());

        // Sorted so the reported error doesn't depend on hash order
        names.sort_unstable();

        for name in names {
            let value = inputs.0[name];
            let key = kb.key(name).map_err(|_| FuzzyError::UnknownInput(name.clone()))?;
            let variable = kb.get(key);

            if variable.role() != Role::Input {
                return Err(FuzzyError::UnknownInput(name.clone()));
            }
            if !value.is_finite() {
                return Err(FuzzyError::NonFiniteInput {
                    variable: name.clone(),
                    value,
                });
            }

            facts.insert(key, variable.fuzzify_indexed(value));
        }

        Ok(facts)
    }

    /// Clip every consequent aimed at `output` by its rule's strength and take the
    /// pointwise max, then defuzzify.
    fn aggregate(&self, output: VariableKey, firing_strengths: &[f64], silence: Silence) -> Result<(String, AggregatedOutput)> {
        let variable = self.kb.get(output);
        let samples = variable.samples();
        let mut membership = vec![0.; samples.len()];

        for (rule, &strength) in self.kb.compiled_rules().iter().zip(firing_strengths) {
            if strength <= 0. {
                continue;
            }

            for consequent in rule.consequents.iter().filter(|c| c.variable == output) {
                let term = variable.sampled_term(consequent.term);

                for (agg, &mu) in membership.iter_mut().zip(term) {
                    *agg = f64::max(*agg, self.config.implication.call(strength, mu));
                }
            }
        }

        let value = match self.config.defuzzification.call(samples, &membership) {
            Some(value) => {
                tracing::debug!(output = variable.name(), value, "defuzzified");
                AggregatedOutput {
                    value,
                    samples: samples.to_vec(),
                    membership,
                    fallback: false,
                }
            },
            None if silence == Silence::Midpoint => {
                let value = variable.universe().midpoint();

                tracing::warn!(output = variable.name(), value, "no rule fired, using universe midpoint");
                AggregatedOutput {
                    value,
                    samples: samples.to_vec(),
                    membership,
                    fallback: true,
                }
            },
            None => {
                tracing::warn!(output = variable.name(), "no rule fired");
                return Err(FuzzyError::NoRuleFired(variable.name().to_owned()));
            },
        };

        Ok((variable.name().to_owned(), value))
    }
}
