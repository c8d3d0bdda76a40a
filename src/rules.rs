use crate::dsl::{Expr, Proposition, RuleExpression};

/// `if antecedent then consequents`, generic over the proposition type like [`Expr`].
#[derive(Clone, Debug, PartialEq)]
pub struct Rule<P = Proposition> {
    pub(crate) antecedent: Expr<P>,
    pub(crate) consequents: Vec<P>,
}

impl<P> Rule<P> {
    pub fn new(antecedent: Expr<P>, consequents: impl IntoIterator<Item = P>) -> Self {
        Self {
            antecedent,
            consequents: consequents.into_iter().collect(),
        }
    }

    pub fn antecedent(&self) -> &Expr<P> {
        &self.antecedent
    }

    pub fn consequents(&self) -> &[P] {
        &self.consequents
    }
}

impl Rule {
    /// Rule with a single `variable is term` consequent.
    pub fn implies(antecedent: RuleExpression, variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self::new(antecedent, [Proposition::new(variable, term)])
    }
}

/// Ordered rule set as written by the caller.
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Rules(iter.into_iter().collect())
    }
}

impl Extend<Rule> for Rules {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Rules {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[test]
fn test_rules() {
    use crate::dsl::is;

    let mut rules: Rules = [Rule::implies(is("profit", "high"), "efficiency", "high")].into_iter().collect();
    rules.push(Rule::new(
        is("costs", "high"),
        [Proposition::new("efficiency", "low"), Proposition::new("risk", "high")],
    ));
    rules.extend([Rule::implies(!is("costs", "high"), "efficiency", "medium")]);

    assert_eq!(rules.len(), 3);
    assert_eq!(rules.iter().map(|r| r.consequents().len()).collect::<Vec<_>>(), [1, 2, 1]);
    assert_eq!(rules.iter().nth(1).unwrap().consequents()[1], Proposition::new("risk", "high"));
}
