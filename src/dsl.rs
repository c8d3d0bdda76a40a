use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use serde::{Deserialize, Serialize};

use crate::ops::{AndOp, OrOp};
use crate::variable::VariableKey;

/// Rule antecedent: a tree of propositions joined by fuzzy AND / OR / NOT.
///
/// `P` is the proposition type. Rules are written against [`Proposition`]s (names)
/// and compiled to [`TermRef`]s (keys) once the knowledge base is validated.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<P> {
    Is(P),
    And(Box<Expr<P>>, Box<Expr<P>>),
    Or(Box<Expr<P>>, Box<Expr<P>>),
    Not(Box<Expr<P>>),
}

/// An antecedent written by name.
pub type RuleExpression = Expr<Proposition>;

/// `variable is term`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proposition {
    pub variable: String,
    pub term: String,
}

impl Proposition {
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.variable, self.term)
    }
}

/// A proposition resolved against a knowledge base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TermRef {
    pub(crate) variable: VariableKey,
    pub(crate) term: usize,
}

/// Shorthand for `Expr::Is(Proposition::new(variable, term))`.
pub fn is(variable: impl Into<String>, term: impl Into<String>) -> RuleExpression {
    Expr::Is(Proposition::new(variable, term))
}

impl<P> Expr<P> {
    pub fn and(self, rhs: Expr<P>) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn or(self, rhs: Expr<P>) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    /// Left fold of `exprs` with AND. `None` when empty.
    pub fn all(exprs: impl IntoIterator<Item = Expr<P>>) -> Option<Self> {
        exprs.into_iter().reduce(Expr::and)
    }

    /// Left fold of `exprs` with OR. `None` when empty.
    pub fn any(exprs: impl IntoIterator<Item = Expr<P>>) -> Option<Self> {
        exprs.into_iter().reduce(Expr::or)
    }

    /// Leaves in left-to-right order.
    pub fn propositions(&self) -> Vec<&P> {
        let mut props = Vec::new();

        fn parse<'p, P>(expr: &'p Expr<P>, out: &mut Vec<&'p P>) {
            match expr {
                Expr::Is(prop) => out.push(prop),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }

    /// Rebuild the tree with every leaf converted by `f`, stopping at the first error.
    pub fn try_map<Q, E>(&self, f: &mut impl FnMut(&P) -> Result<Q, E>) -> Result<Expr<Q>, E> {
        Ok(match self {
            Expr::Is(prop) => Expr::Is(f(prop)?),
            Expr::And(lhs, rhs) => Expr::And(Box::new(lhs.try_map(f)?), Box::new(rhs.try_map(f)?)),
            Expr::Or(lhs, rhs) => Expr::Or(Box::new(lhs.try_map(f)?), Box::new(rhs.try_map(f)?)),
            Expr::Not(expr) => Expr::Not(Box::new(expr.try_map(f)?)),
        })
    }

    /// Post-order evaluation to a truth degree. NOT is always the standard complement.
    pub fn eval(&self, degree: &impl Fn(&P) -> f64, and_op: AndOp, or_op: OrOp) -> f64 {
        match self {
            Expr::Is(prop) => degree(prop),
            Expr::And(lhs, rhs) => and_op.call(lhs.eval(degree, and_op, or_op), rhs.eval(degree, and_op, or_op)),
            Expr::Or(lhs, rhs) => or_op.call(lhs.eval(degree, and_op, or_op), rhs.eval(degree, and_op, or_op)),
            Expr::Not(expr) => 1. - expr.eval(degree, and_op, or_op),
        }
    }
}

impl<P> BitAnd for Expr<P> {
    type Output = Expr<P>;

    fn bitand(self, rhs: Expr<P>) -> Expr<P> {
        self.and(rhs)
    }
}

impl<P> BitOr for Expr<P> {
    type Output = Expr<P>;

    fn bitor(self, rhs: Expr<P>) -> Expr<P> {
        self.or(rhs)
    }
}

impl<P> Not for Expr<P> {
    type Output = Expr<P>;

    fn not(self) -> Expr<P> {
        Expr::Not(Box::new(self))
    }
}

impl<P: fmt::Display> fmt::Display for Expr<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Is(prop) => write!(f, "{prop}"),
            Expr::And(lhs, rhs) => write!(f, "({lhs} and {rhs})"),
            Expr::Or(lhs, rhs) => write!(f, "({lhs} or {rhs})"),
            Expr::Not(expr) => write!(f, "not {expr}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn degrees() -> HashMap<Proposition, f64> {
        HashMap::from([
            (Proposition::new("profit", "high"), 0.6),
            (Proposition::new("costs", "low"), 0.8),
            (Proposition::new("tax_rate", "high"), 0.25),
        ])
    }

    fn eval(expr: &RuleExpression) -> f64 {
        let degrees = degrees();
        expr.eval(&|p: &Proposition| degrees[p], AndOp::Min, OrOp::Max)
    }

    #[test]
    fn test_zadeh_operators() {
        assert_eq!(eval(&(is("profit", "high") & is("costs", "low"))), 0.6);
        assert_eq!(eval(&(is("profit", "high") | is("costs", "low"))), 0.8);
        assert_eq!(eval(&!is("tax_rate", "high")), 0.75);
        assert_eq!(eval(&(is("tax_rate", "high") & (is("profit", "high") | is("costs", "low")))), 0.25);
    }

    #[test]
    fn test_all_any() {
        let all = Expr::all([is("profit", "high"), is("costs", "low"), is("tax_rate", "high")]).unwrap();
        let any = Expr::any([is("profit", "high"), is("costs", "low"), is("tax_rate", "high")]).unwrap();

        assert_eq!(eval(&all), 0.25);
        assert_eq!(eval(&any), 0.8);
        assert!(Expr::<Proposition>::all([]).is_none());
        assert_eq!(
            all.to_string(),
            "((profit is high and costs is low) and tax_rate is high)"
        );
    }

    #[test]
    fn test_propositions_and_try_map() {
        let expr = is("profit", "high") & !(is("costs", "low") | is("profit", "high"));
        let vars: Vec<_> = expr.propositions().iter().map(|p| p.variable.as_str()).collect();

        assert_eq!(vars, ["profit", "costs", "profit"]);

        let lengths = expr.try_map(&mut |p: &Proposition| Ok::<_, ()>(p.term.len())).unwrap();
        assert_eq!(lengths.propositions(), [&4, &3, &4]);

        let failed = expr.try_map(&mut |p: &Proposition| if p.variable == "costs" { Err(p.term.clone()) } else { Ok(()) });
        assert_eq!(failed, Err("low".to_owned()));
    }
}
