use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Crisp input values keyed by variable name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inputs(pub(crate) HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, variable: impl Into<String>, val: f64) {
        self.0.insert(variable.into(), val);
    }

    pub fn with(mut self, variable: impl Into<String>, val: f64) -> Self {
        self.add(variable, val);
        self
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.0.get(variable).copied()
    }

    pub fn remove(&mut self, variable: &str) -> Option<f64> {
        self.0.remove(variable)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, val)| (name.as_str(), *val))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Inputs(iter.into_iter().map(|(name, val)| (name.into(), val)).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[(S, f64); N]> for Inputs {
    fn from(values: [(S, f64); N]) -> Self {
        values.into_iter().collect()
    }
}

impl From<HashMap<String, f64>> for Inputs {
    fn from(values: HashMap<String, f64>) -> Self {
        Inputs(values)
    }
}

#[test]
fn test_inputs() {
    let mut inputs = Inputs::from([("profit", 80.), ("costs", 10.)]).with("tax_rate", 10.);
    inputs.add("costs", 20.);

    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs.get("costs"), Some(20.));
    assert_eq!(inputs.remove("profit"), Some(80.));
    assert_eq!(inputs.get("profit"), None);

    let parsed: Inputs = serde_json::from_str(r#"{"profit": 80, "costs": 10.5}"#).unwrap();
    assert_eq!(parsed.get("costs"), Some(10.5));
}
