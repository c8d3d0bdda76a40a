use crate::membership::MembershipFunction;

/// Ordered term definitions for one variable. Duplicate names are rejected when the
/// variable is built, not here.
#[derive(Clone, Debug, Default)]
pub struct Terms(pub(crate) Vec<(String, MembershipFunction)>);

impl Terms {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, term: impl Into<String>, membership: MembershipFunction) {
        self.0.push((term.into(), membership));
    }

    pub fn with(mut self, term: impl Into<String>, membership: MembershipFunction) -> Self {
        self.insert(term, membership);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Terms {
    type Item = (String, MembershipFunction);
    type IntoIter = std::vec::IntoIter<(String, MembershipFunction)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, MembershipFunction)> for Terms {
    fn from_iter<I: IntoIterator<Item = (S, MembershipFunction)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(term, mf)| (term.into(), mf)).collect())
    }
}
