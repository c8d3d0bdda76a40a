//! The business efficiency system: six indicators on `[0, 100]` scored into one
//! `efficiency` output with six fixed rules.

use crate::dsl::{is, RuleExpression};
use crate::error::Result;
use crate::inference::InferenceEngine;
use crate::knowledge_base::KnowledgeBase;
use crate::membership::MembershipFunction;
use crate::rules::Rule;
use crate::terms::Terms;
use crate::variable::Universe;

pub const PROFIT: &str = "profit";
pub const COSTS: &str = "costs";
pub const INVESTMENTS: &str = "investments";
pub const MARKET_SHARE: &str = "market_share";
pub const ECONOMIC_STABILITY: &str = "economic_stability";
pub const TAX_RATE: &str = "tax_rate";
pub const EFFICIENCY: &str = "efficiency";

pub const INDICATORS: [&str; 6] = [PROFIT, COSTS, INVESTMENTS, MARKET_SHARE, ECONOMIC_STABILITY, TAX_RATE];

/// The same configuration as [`efficiency_knowledge_base`], as a declarative description.
pub const EFFICIENCY_JSON: &str = include_str!("../knowledge/efficiency.json");

fn low_medium_high() -> Result<Terms> {
    Ok(Terms::new()
        .with("low", MembershipFunction::triangular(0., 0., 50.)?)
        .with("medium", MembershipFunction::triangular(25., 50., 75.)?)
        .with("high", MembershipFunction::triangular(50., 100., 100.)?))
}

// Left folds, matching `Expr::all` / `Expr::any` over the same clauses.
fn all<const N: usize>((variable, term): (&str, &str), rest: [(&str, &str); N]) -> RuleExpression {
    rest.into_iter().fold(is(variable, term), |acc, (v, t)| acc.and(is(v, t)))
}

fn any<const N: usize>((variable, term): (&str, &str), rest: [(&str, &str); N]) -> RuleExpression {
    rest.into_iter().fold(is(variable, term), |acc, (v, t)| acc.or(is(v, t)))
}

pub fn efficiency_rules() -> Vec<Rule> {
    vec![
        Rule::implies(
            all(
                (PROFIT, "high"),
                [
                    (COSTS, "low"),
                    (INVESTMENTS, "medium"),
                    (MARKET_SHARE, "high"),
                    (ECONOMIC_STABILITY, "high"),
                    (TAX_RATE, "low"),
                ],
            ),
            EFFICIENCY,
            "high",
        ),
        Rule::implies(
            all(
                (PROFIT, "medium"),
                [
                    (COSTS, "medium"),
                    (INVESTMENTS, "high"),
                    (MARKET_SHARE, "medium"),
                    (ECONOMIC_STABILITY, "medium"),
                    (TAX_RATE, "medium"),
                ],
            ),
            EFFICIENCY,
            "medium",
        ),
        Rule::implies(
            any(
                (PROFIT, "low"),
                [
                    (COSTS, "high"),
                    (INVESTMENTS, "low"),
                    (MARKET_SHARE, "low"),
                    (ECONOMIC_STABILITY, "low"),
                    (TAX_RATE, "high"),
                ],
            ),
            EFFICIENCY,
            "low",
        ),
        Rule::implies(
            all((PROFIT, "high"), [(COSTS, "low"), (INVESTMENTS, "high")]),
            EFFICIENCY,
            "high",
        ),
        Rule::implies(
            all((PROFIT, "high"), [(MARKET_SHARE, "high"), (ECONOMIC_STABILITY, "medium")]),
            EFFICIENCY,
            "high",
        ),
        Rule::implies(
            is(TAX_RATE, "high") & (is(PROFIT, "medium") | is(PROFIT, "low")),
            EFFICIENCY,
            "low",
        ),
    ]
}

pub fn efficiency_knowledge_base() -> Result<KnowledgeBase> {
    let universe = Universe::new(0., 100., 1.)?;
    let mut builder = KnowledgeBase::builder();

    for indicator in INDICATORS {
        builder.input(indicator, universe, low_medium_high()?)?;
    }

    builder.output(EFFICIENCY, universe, low_medium_high()?)?;
    builder.rules(efficiency_rules());
    builder.build()
}

/// Engine over [`efficiency_knowledge_base`] with the default operators.
pub fn efficiency_engine() -> Result<InferenceEngine> {
    efficiency_knowledge_base().map(InferenceEngine::new)
}
