//! Declarative knowledge base descriptions.
//!
//! ```json
//! {
//!   "universes": [{ "name": "profit", "role": "input", "lo": 0, "hi": 100, "step": 1 }],
//!   "terms": [{ "variable": "profit", "term": "low", "a": 0, "b": 0, "c": 50 }],
//!   "rules": [{ "if": { "all": [{ "is": ["profit", "high"] }, { "is": ["costs", "low"] }] },
//!               "then": [["efficiency", "high"]] }]
//! }
//! ```
//!
//! A term with a `d` field is a trapezoid `(a, b, c, d)`. Expressions are `is`, `and`,
//! `or`, `not`, plus `all` / `any` which fold left into nested `and` / `or`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dsl::{Expr, Proposition, RuleExpression};
use crate::error::{FuzzyError, Result};
use crate::knowledge_base::KnowledgeBase;
use crate::membership::MembershipFunction;
use crate::rules::Rule;
use crate::terms::Terms;
use crate::variable::{Role, Universe};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeBaseDef {
    pub universes: Vec<UniverseDef>,
    #[serde(default)]
    pub terms: Vec<TermDef>,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniverseDef {
    pub name: String,
    pub role: Role,
    pub lo: f64,
    pub hi: f64,
    pub step: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermDef {
    pub variable: String,
    pub term: String,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDef {
    #[serde(rename = "if")]
    pub antecedent: ExprDef,
    #[serde(rename = "then")]
    pub consequents: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprDef {
    Is(String, String),
    And(Box<ExprDef>, Box<ExprDef>),
    Or(Box<ExprDef>, Box<ExprDef>),
    Not(Box<ExprDef>),
    All(Vec<ExprDef>),
    Any(Vec<ExprDef>),
}

impl ExprDef {
    fn to_expr(&self, rule: usize) -> Result<RuleExpression> {
        Ok(match self {
            ExprDef::Is(variable, term) => Expr::Is(Proposition::new(variable, term)),
            ExprDef::And(lhs, rhs) => lhs.to_expr(rule)?.and(rhs.to_expr(rule)?),
            ExprDef::Or(lhs, rhs) => lhs.to_expr(rule)?.or(rhs.to_expr(rule)?),
            ExprDef::Not(expr) => !expr.to_expr(rule)?,
            ExprDef::All(exprs) => {
                let exprs = exprs.iter().map(|e| e.to_expr(rule)).collect::<Result<Vec<_>>>()?;
                Expr::all(exprs).ok_or(FuzzyError::EmptyExpression { rule })?
            },
            ExprDef::Any(exprs) => {
                let exprs = exprs.iter().map(|e| e.to_expr(rule)).collect::<Result<Vec<_>>>()?;
                Expr::any(exprs).ok_or(FuzzyError::EmptyExpression { rule })?
            },
        })
    }
}

impl From<&RuleExpression> for ExprDef {
    fn from(expr: &RuleExpression) -> Self {
        match expr {
            Expr::Is(prop) => ExprDef::Is(prop.variable.clone(), prop.term.clone()),
            Expr::And(lhs, rhs) => ExprDef::And(Box::new((&**lhs).into()), Box::new((&**rhs).into())),
            Expr::Or(lhs, rhs) => ExprDef::Or(Box::new((&**lhs).into()), Box::new((&**rhs).into())),
            Expr::Not(expr) => ExprDef::Not(Box::new((&**expr).into())),
        }
    }
}

impl KnowledgeBaseDef {
    pub fn build(&self) -> Result<KnowledgeBase> {
        let mut terms: HashMap<&str, Terms> = HashMap::with_capacity(self.universes.len());

        for def in &self.terms {
            let membership = match def.d {
                Some(d) => MembershipFunction::trapezoidal(def.a, def.b, def.c, d)?,
                None => MembershipFunction::triangular(def.a, def.b, def.c)?,
            };

            if !self.universes.iter().any(|u| u.name == def.variable) {
                return Err(FuzzyError::UnknownVariable(def.variable.clone()));
            }

            terms.entry(def.variable.as_str()).or_default().insert(&def.term, membership);
        }

        let mut builder = KnowledgeBase::builder();

        for def in &self.universes {
            let universe = Universe::new(def.lo, def.hi, def.step)?;
            let terms = terms.remove(def.name.as_str()).unwrap_or_default();

            match def.role {
                Role::Input => builder.input(&def.name, universe, terms)?,
                Role::Output => builder.output(&def.name, universe, terms)?,
            };
        }

        for (i, def) in self.rules.iter().enumerate() {
            let consequents = def
                .consequents
                .iter()
                .map(|(variable, term)| Proposition::new(variable, term));

            builder.rule(Rule::new(def.antecedent.to_expr(i)?, consequents));
        }

        builder.build()
    }
}

impl From<&KnowledgeBase> for KnowledgeBaseDef {
    fn from(kb: &KnowledgeBase) -> Self {
        let variables = kb.inputs().chain(kb.outputs());
        let mut universes = Vec::new();
        let mut terms = Vec::new();

        for variable in variables {
            let universe = variable.universe();

            universes.push(UniverseDef {
                name: variable.name().to_owned(),
                role: variable.role(),
                lo: universe.lo(),
                hi: universe.hi(),
                step: universe.step(),
            });

            for term in variable.term_names() {
                let Ok(membership) = variable.term(term) else {
                    continue;
                };
                let (a, d) = membership.support();
                let (b, c) = membership.core();

                terms.push(if membership.is_triangular() {
                    TermDef {
                        variable: variable.name().to_owned(),
                        term: term.to_owned(),
                        a,
                        b,
                        c: d,
                        d: None,
                    }
                } else {
                    TermDef {
                        variable: variable.name().to_owned(),
                        term: term.to_owned(),
                        a,
                        b,
                        c,
                        d: Some(d),
                    }
                });
            }
        }

        let rules = kb
            .rules()
            .iter()
            .map(|rule| RuleDef {
                antecedent: rule.antecedent().into(),
                consequents: rule
                    .consequents()
                    .iter()
                    .map(|p| (p.variable.clone(), p.term.clone()))
                    .collect(),
            })
            .collect();

        Self {
            universes,
            terms,
            rules,
        }
    }
}
