use std::collections::HashMap;
use std::io::Read;

use slotmap::SlotMap;

use crate::definition::KnowledgeBaseDef;
use crate::dsl::{Proposition, TermRef};
use crate::error::{FuzzyError, Result};
use crate::rules::{Rule, Rules};
use crate::terms::Terms;
use crate::variable::{FuzzyVariable, Role, Universe, VariableKey};

/// Variables and rules of one fuzzy system, validated and compiled.
///
/// Every rule reference has been resolved by the time a `KnowledgeBase` exists, so
/// evaluating against it can never fail with `UnknownVariable` or `UnknownTerm`.
/// There is no way to mutate it after [`KnowledgeBaseBuilder::build`].
#[derive(Clone, Debug)]
pub struct KnowledgeBase {
    variables: SlotMap<VariableKey, FuzzyVariable>,
    index: HashMap<String, VariableKey>,
    inputs: Vec<VariableKey>,
    outputs: Vec<VariableKey>,
    rules: Vec<Rule>,
    compiled: Vec<Rule<TermRef>>,
    referenced_inputs: Vec<VariableKey>,
}

impl KnowledgeBase {
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::new()
    }

    /// Load a declarative description, see [`KnowledgeBaseDef`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str::<KnowledgeBaseDef>(json)?.build()
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader::<_, KnowledgeBaseDef>(reader)?.build()
    }

    pub fn variable(&self, name: &str) -> Result<&FuzzyVariable> {
        self.key(name).map(|key| &self.variables[key])
    }

    pub fn inputs(&self) -> impl Iterator<Item = &FuzzyVariable> {
        self.inputs.iter().map(|key| &self.variables[*key])
    }

    pub fn outputs(&self) -> impl Iterator<Item = &FuzzyVariable> {
        self.outputs.iter().map(|key| &self.variables[*key])
    }

    /// Rules in the order they were added, as written.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub(crate) fn key(&self, name: &str) -> Result<VariableKey> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }

    pub(crate) fn get(&self, key: VariableKey) -> &FuzzyVariable {
        &self.variables[key]
    }

    pub(crate) fn compiled_rules(&self) -> &[Rule<TermRef>] {
        &self.compiled
    }

    pub(crate) fn output_keys(&self) -> &[VariableKey] {
        &self.outputs
    }

    /// Input variables some antecedent depends on, in first-reference order.
    pub(crate) fn referenced_inputs(&self) -> &[VariableKey] {
        &self.referenced_inputs
    }
}

#[derive(Debug, Default)]
pub struct KnowledgeBaseBuilder {
    variables: Vec<FuzzyVariable>,
    rules: Rules,
}

impl KnowledgeBaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&mut self, name: impl Into<String>, universe: Universe, terms: Terms) -> Result<&mut Self> {
        self.variables.push(FuzzyVariable::new(name, Role::Input, universe, terms)?);
        Ok(self)
    }

    pub fn output(&mut self, name: impl Into<String>, universe: Universe, terms: Terms) -> Result<&mut Self> {
        self.variables.push(FuzzyVariable::new(name, Role::Output, universe, terms)?);
        Ok(self)
    }

    pub fn variable(&mut self, variable: FuzzyVariable) -> &mut Self {
        self.variables.push(variable);
        self
    }

    pub fn rule(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&mut self, rules: impl IntoIterator<Item = Rule>) -> &mut Self {
        self.rules.extend(rules);
        self
    }

    pub fn build(self) -> Result<KnowledgeBase> {
        let mut variables: SlotMap<VariableKey, FuzzyVariable> = SlotMap::with_capacity_and_key(self.variables.len());
        let mut index = HashMap::with_capacity(self.variables.len());
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();

        for variable in self.variables {
            if index.contains_key(variable.name()) {
                return Err(FuzzyError::DuplicateVariable(variable.name().to_owned()));
            }

            let name = variable.name().to_owned();
            let role = variable.role();
            let key = variables.insert(variable);

            index.insert(name, key);
            match role {
                Role::Input => inputs.push(key),
                Role::Output => outputs.push(key),
            }
        }

        let resolve = |prop: &Proposition, expected: Role| -> Result<TermRef> {
            let key = *index
                .get(&prop.variable)
                .ok_or_else(|| FuzzyError::UnknownVariable(prop.variable.clone()))?;
            let variable: &FuzzyVariable = &variables[key];

            if variable.role() != expected {
                return Err(FuzzyError::RoleMismatch {
                    variable: prop.variable.clone(),
                    expected,
                });
            }

            Ok(TermRef {
                variable: key,
                term: variable.term_id(&prop.term)?,
            })
        };

        let mut compiled = Vec::with_capacity(self.rules.len());
        let mut referenced_inputs = Vec::new();

        for (i, rule) in self.rules.iter().enumerate() {
            if rule.consequents.is_empty() {
                return Err(FuzzyError::EmptyConsequents { rule: i });
            }

            let antecedent = rule.antecedent.try_map(&mut |prop: &Proposition| resolve(prop, Role::Input))?;
            let consequents = rule
                .consequents
                .iter()
                .map(|prop| resolve(prop, Role::Output))
                .collect::<Result<Vec<_>>>()?;

            for term_ref in antecedent.propositions() {
                if !referenced_inputs.contains(&term_ref.variable) {
                    referenced_inputs.push(term_ref.variable);
                }
            }

            compiled.push(Rule::new(antecedent, consequents));
        }

        tracing::debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            rules = compiled.len(),
            "built knowledge base"
        );

        Ok(KnowledgeBase {
            variables,
            index,
            inputs,
            outputs,
            rules: self.rules.into_iter().collect(),
            compiled,
            referenced_inputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::is;
    use crate::membership::MembershipFunction;

    fn terms() -> Terms {
        Terms::new()
            .with("low", MembershipFunction::triangular(0., 0., 50.).unwrap())
            .with("high", MembershipFunction::triangular(50., 100., 100.).unwrap())
    }

    fn builder() -> KnowledgeBaseBuilder {
        let universe = Universe::new(0., 100., 1.).unwrap();
        let mut builder = KnowledgeBase::builder();

        builder.input("profit", universe, terms()).unwrap();
        builder.input("costs", universe, terms()).unwrap();
        builder.output("efficiency", universe, terms()).unwrap();
        builder
    }

    #[test]
    fn test_build() {
        let mut builder = builder();
        builder.rule(Rule::implies(is("profit", "high") & is("costs", "low"), "efficiency", "high"));
        builder.rule(Rule::implies(is("costs", "high"), "efficiency", "low"));

        let kb = builder.build().unwrap();

        assert_eq!(kb.inputs().map(FuzzyVariable::name).collect::<Vec<_>>(), ["profit", "costs"]);
        assert_eq!(kb.outputs().map(FuzzyVariable::name).collect::<Vec<_>>(), ["efficiency"]);
        assert_eq!(kb.rules().len(), 2);
        assert_eq!(kb.referenced_inputs().len(), 2);
        assert_eq!(kb.variable("costs").unwrap().role(), Role::Input);
        assert!(matches!(kb.variable("revenue"), Err(FuzzyError::UnknownVariable(_))));
    }

    #[test]
    fn test_unknown_references() {
        let mut builder = builder();
        builder.rule(Rule::implies(is("revenue", "high"), "efficiency", "high"));
        assert!(matches!(builder.build(), Err(FuzzyError::UnknownVariable(name)) if name == "revenue"));

        let mut builder = self::builder();
        builder.rule(Rule::implies(is("profit", "medium"), "efficiency", "high"));
        assert!(matches!(
            builder.build(),
            Err(FuzzyError::UnknownTerm { variable, term }) if variable == "profit" && term == "medium"
        ));

        let mut builder = self::builder();
        builder.rule(Rule::implies(is("profit", "high"), "efficiency", "stellar"));
        assert!(matches!(builder.build(), Err(FuzzyError::UnknownTerm { .. })));
    }

    #[test]
    fn test_role_mismatch() {
        let mut builder = builder();
        builder.rule(Rule::implies(is("efficiency", "high"), "efficiency", "high"));
        assert!(matches!(
            builder.build(),
            Err(FuzzyError::RoleMismatch { expected: Role::Input, .. })
        ));

        let mut builder = self::builder();
        builder.rule(Rule::implies(is("profit", "high"), "costs", "low"));
        assert!(matches!(
            builder.build(),
            Err(FuzzyError::RoleMismatch { expected: Role::Output, .. })
        ));
    }

    #[test]
    fn test_duplicates_and_empty_consequents() {
        let mut builder = builder();
        builder.input("profit", Universe::new(0., 10., 1.).unwrap(), terms()).unwrap();
        assert!(matches!(builder.build(), Err(FuzzyError::DuplicateVariable(name)) if name == "profit"));

        let mut builder = self::builder();
        builder.rule(Rule::new(is("profit", "high"), []));
        assert!(matches!(builder.build(), Err(FuzzyError::EmptyConsequents { rule: 0 })));
    }
}
