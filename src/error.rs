use crate::variable::Role;

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

/// Everything that can go wrong while building a knowledge base or running an inference.
#[derive(Debug, thiserror::Error)]
pub enum FuzzyError {
    #[error("invalid membership shape: breakpoints ({a}, {b}, {c}, {d}) must be finite and ordered")]
    InvalidShape { a: f64, b: f64, c: f64, d: f64 },

    #[error("invalid universe [{lo}, {hi}] with step {step}")]
    InvalidUniverse { lo: f64, hi: f64, step: f64 },

    #[error("variable `{0}` is defined more than once")]
    DuplicateVariable(String),

    #[error("term `{term}` is defined more than once on variable `{variable}`")]
    DuplicateTerm { variable: String, term: String },

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("variable `{variable}` has no term `{term}`")]
    UnknownTerm { variable: String, term: String },

    #[error("variable `{variable}` must be an {expected} variable here")]
    RoleMismatch { variable: String, expected: Role },

    #[error("rule #{rule} has an empty `all` / `any` clause")]
    EmptyExpression { rule: usize },

    #[error("rule #{rule} has no consequent")]
    EmptyConsequents { rule: usize },

    #[error("no input value supplied for `{0}`")]
    MissingInput(String),

    #[error("`{0}` is not an input variable")]
    UnknownInput(String),

    #[error("input `{variable}` is not a finite number: {value}")]
    NonFiniteInput { variable: String, value: f64 },

    #[error("no rule fired for output `{0}`")]
    NoRuleFired(String),

    #[error("malformed knowledge base description: {0}")]
    Definition(#[from] serde_json::Error),
}

impl FuzzyError {
    /// Errors a caller can react to per evaluation. Everything else is raised while
    /// the knowledge base is being built and means the configuration itself is wrong.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingInput(_) | Self::UnknownInput(_) | Self::NonFiniteInput { .. } | Self::NoRuleFired(_)
        )
    }
}

#[test]
fn test_recoverable() {
    assert!(FuzzyError::NoRuleFired("efficiency".into()).is_recoverable());
    assert!(FuzzyError::MissingInput("profit".into()).is_recoverable());
    assert!(!FuzzyError::UnknownVariable("profit".into()).is_recoverable());
    assert!(!FuzzyError::InvalidShape {
        a: 1.,
        b: 0.,
        c: 2.,
        d: 2.
    }
    .is_recoverable());
}
