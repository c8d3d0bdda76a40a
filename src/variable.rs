use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::membership::MembershipFunction;
use crate::terms::Terms;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Input,
    Output,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Input => f.write_str("input"),
            Role::Output => f.write_str("output"),
        }
    }
}

/// Upper bound on the sample points of one universe. Every term of a variable is
/// pre-sampled, so this also bounds the memory a single term can take.
pub const MAX_SAMPLES: usize = 1 << 20;

/// Closed interval `[lo, hi]` together with the step used to sample it during
/// defuzzification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Universe {
    lo: f64,
    hi: f64,
    step: f64,
    sample_count: usize,
}

impl Universe {
    /// Fails with `InvalidUniverse` unless `lo < hi`, `step > 0`, everything is finite
    /// and the grid has at most [`MAX_SAMPLES`] points.
    pub fn new(lo: f64, hi: f64, step: f64) -> Result<Self> {
        if !(lo.is_finite() && hi.is_finite() && step.is_finite()) || lo >= hi || step <= 0. {
            return Err(FuzzyError::InvalidUniverse { lo, hi, step });
        }

        // Plain floor undercounts when the division lands just below an integer,
        // e.g. 0.3 / 0.1 == 2.9999999999999996
        let intervals = ((hi - lo) / step + 1e-9).floor();

        // `hi - lo` itself may overflow to infinity
        if !intervals.is_finite() || intervals >= MAX_SAMPLES as f64 {
            return Err(FuzzyError::InvalidUniverse { lo, hi, step });
        }

        Ok(Self {
            lo,
            hi,
            step,
            sample_count: intervals as usize + 1,
        })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn midpoint(&self) -> f64 {
        self.lo + (self.hi - self.lo) / 2.
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Number of sample points, both ends included. Never above [`MAX_SAMPLES`].
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// `sample_count` evenly spaced points from `lo` to `hi`, both exact.
    ///
    /// The spacing equals `step` only when `step` divides `hi - lo`. Otherwise the
    /// grid is stretched to end on `hi`: `[0, 10]` with step 3 samples
    /// `0, 3.33.., 6.66.., 10`.
    pub fn samples(&self) -> Linspace {
        Linspace::new(self.lo, self.hi, self.sample_count)
    }
}

/// A named linguistic variable: a universe plus its terms.
///
/// Immutable once built. Term curves are pre-sampled over the universe so the
/// implication step never re-evaluates membership functions.
#[derive(Clone, Debug)]
pub struct FuzzyVariable {
    name: String,
    role: Role,
    universe: Universe,
    samples: Vec<f64>,
    terms: Vec<SampledTerm>,
    term_index: HashMap<String, usize>,
}

#[derive(Clone, Debug)]
struct SampledTerm {
    name: String,
    membership: MembershipFunction,
    sampled: Vec<f64>,
}

impl FuzzyVariable {
    pub fn new(name: impl Into<String>, role: Role, universe: Universe, terms: Terms) -> Result<Self> {
        let name = name.into();
        let samples: Vec<f64> = universe.samples().collect();
        let mut term_index = HashMap::with_capacity(terms.len());
        let mut defs = Vec::with_capacity(terms.len());

        for (term, membership) in terms {
            if term_index.insert(term.clone(), defs.len()).is_some() {
                return Err(FuzzyError::DuplicateTerm { variable: name, term });
            }

            defs.push(SampledTerm {
                sampled: membership.sample(samples.iter().copied()),
                name: term,
                membership,
            });
        }

        Ok(Self {
            name,
            role,
            universe,
            samples,
            terms: defs,
            term_index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The discretized universe.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn term_names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.name.as_str())
    }

    pub fn term(&self, term: &str) -> Result<&MembershipFunction> {
        self.term_id(term).map(|i| &self.terms[i].membership)
    }

    pub(crate) fn term_id(&self, term: &str) -> Result<usize> {
        self.term_index.get(term).copied().ok_or_else(|| FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: term.to_owned(),
        })
    }

    pub(crate) fn sampled_term(&self, id: usize) -> &[f64] {
        &self.terms[id].sampled
    }

    /// Degree of `x` in every term, keyed by term name. `x` may lie outside the universe.
    pub fn fuzzify(&self, x: f64) -> HashMap<String, f64> {
        self.terms
            .iter()
            .map(|t| (t.name.clone(), t.membership.degree(x)))
            .collect()
    }

    /// Same as [`fuzzify`](Self::fuzzify) but indexed by term id, in definition order.
    pub(crate) fn fuzzify_indexed(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.membership.degree(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lmh() -> Terms {
        let mut terms = Terms::new();
        terms.insert("low", MembershipFunction::triangular(0., 0., 50.).unwrap());
        terms.insert("medium", MembershipFunction::triangular(25., 50., 75.).unwrap());
        terms.insert("high", MembershipFunction::triangular(50., 100., 100.).unwrap());
        terms
    }

    #[test]
    fn test_universe() {
        let u = Universe::new(0., 100., 1.).unwrap();

        assert_eq!(u.sample_count(), 101);
        assert_eq!(u.midpoint(), 50.);
        assert!(u.contains(100.));
        assert!(!u.contains(100.1));

        let samples: Vec<_> = u.samples().collect();
        assert_eq!(samples[0], 0.);
        assert_eq!(samples[37], 37.);
        assert_eq!(samples[100], 100.);

        assert_eq!(Universe::new(0., 0.3, 0.1).unwrap().sample_count(), 4);
    }

    #[test]
    fn test_invalid_universe() {
        assert!(Universe::new(10., 10., 1.).is_err());
        assert!(Universe::new(10., 0., 1.).is_err());
        assert!(Universe::new(0., 10., 0.).is_err());
        assert!(Universe::new(0., f64::INFINITY, 1.).is_err());
    }

    #[test]
    fn test_universe_sample_limit() {
        assert!(matches!(
            Universe::new(0., 100., 1e-300),
            Err(FuzzyError::InvalidUniverse { step, .. }) if step == 1e-300
        ));
        assert!(Universe::new(0., 100., 1e-10).is_err());
        assert!(Universe::new(-f64::MAX, f64::MAX, 1.).is_err());

        let widest = Universe::new(0., (MAX_SAMPLES - 1) as f64, 1.).unwrap();
        assert_eq!(widest.sample_count(), MAX_SAMPLES);
        assert!(Universe::new(0., MAX_SAMPLES as f64, 1.).is_err());
    }

    #[test]
    fn test_uneven_step_stretches_grid() {
        let samples: Vec<_> = Universe::new(0., 10., 3.).unwrap().samples().collect();

        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0.);
        assert!((samples[1] - 10. / 3.).abs() < 1e-12);
        assert_eq!(samples[3], 10.);
    }

    #[test]
    fn test_fuzzify() {
        let profit = FuzzyVariable::new("profit", Role::Input, Universe::new(0., 100., 1.).unwrap(), lmh()).unwrap();
        let degrees = profit.fuzzify(80.);

        assert_eq!(degrees["low"], 0.);
        assert_eq!(degrees["medium"], 0.);
        assert_eq!(degrees["high"], 0.6);

        // Outside the universe every term falls to zero
        let degrees = profit.fuzzify(150.);
        assert!(degrees.values().all(|d| *d == 0.));
    }

    #[test]
    fn test_duplicate_term() {
        let mut terms = lmh();
        terms.insert("low", MembershipFunction::triangular(0., 10., 20.).unwrap());

        assert!(matches!(
            FuzzyVariable::new("costs", Role::Input, Universe::new(0., 100., 1.).unwrap(), terms),
            Err(FuzzyError::DuplicateTerm { variable, term }) if variable == "costs" && term == "low"
        ));
    }

    #[test]
    fn test_term_lookup() {
        let profit = FuzzyVariable::new("profit", Role::Input, Universe::new(0., 100., 1.).unwrap(), lmh()).unwrap();

        assert_eq!(profit.term_names().collect::<Vec<_>>(), ["low", "medium", "high"]);
        assert!(profit.term("medium").is_ok());
        assert!(matches!(
            profit.term("huge"),
            Err(FuzzyError::UnknownTerm { variable, term }) if variable == "profit" && term == "huge"
        ));
        assert_eq!(profit.sampled_term(profit.term_id("medium").unwrap())[50], 1.);
    }
}
