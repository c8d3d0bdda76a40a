//! Mamdani fuzzy inference.
//!
//! A [`KnowledgeBase`] holds the input and output [`FuzzyVariable`]s and the rules
//! between them; it is validated once when built and never changes afterwards. An
//! [`InferenceEngine`] evaluates crisp [`Inputs`] against it:
//!
//! 1. fuzzify every input against its terms,
//! 2. fire every rule (`and` = min, `or` = max, `not` = 1 - x by default),
//! 3. clip each consequent term by its rule's strength,
//! 4. aggregate per output with pointwise max,
//! 5. defuzzify by centroid.
//!
//! ```
//! use fuzzy_efficiency::{reference, Inputs};
//!
//! let engine = reference::efficiency_engine()?;
//! let inputs = Inputs::from([
//!     ("profit", 80.),
//!     ("costs", 10.),
//!     ("investments", 50.),
//!     ("market_share", 80.),
//!     ("economic_stability", 80.),
//!     ("tax_rate", 10.),
//! ]);
//! let efficiency = engine.evaluate(&inputs)?.get("efficiency");
//!
//! assert!(efficiency.is_some_and(|e| e > 60.));
//! # Ok::<(), fuzzy_efficiency::FuzzyError>(())
//! ```

mod definition;
mod dsl;
mod error;
mod inference;
mod inputs;
mod knowledge_base;
mod linspace;
mod math;
mod membership;
mod outputs;
mod rules;
mod terms;
mod variable;

pub mod ops;
pub mod recommendations;
pub mod reference;

pub use definition::{ExprDef, KnowledgeBaseDef, RuleDef, TermDef, UniverseDef};
pub use dsl::{is, Expr, Proposition, RuleExpression};
pub use error::{FuzzyError, Result};
pub use inference::{EngineConfig, InferenceEngine};
pub use inputs::Inputs;
pub use knowledge_base::{KnowledgeBase, KnowledgeBaseBuilder};
pub use linspace::Linspace;
pub use membership::MembershipFunction;
pub use outputs::{AggregatedOutput, InferenceResult};
pub use rules::{Rule, Rules};
pub use terms::Terms;
pub use variable::{FuzzyVariable, Role, Universe, MAX_SAMPLES};
