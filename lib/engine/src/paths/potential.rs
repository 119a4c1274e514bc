use rdf_paths_model::Term;
use std::hash::{Hash, Hasher};

/// A candidate path that is explored while evaluating an unbounded path operator.
///
/// Two candidates are equal if they have the same `start` and `current` node. The length and the
/// status flags are ignored, so candidates that reach the same node from the same start collapse
/// into one.
#[derive(Debug, Clone)]
pub struct PotentialPath {
    start: Term,
    current: Term,
    length: usize,
    is_complete: bool,
    is_dead_end: bool,
    is_partial: bool,
}

impl PotentialPath {
    pub fn new(start: Term, current: Term) -> Self {
        Self {
            start,
            current,
            length: 0,
            is_complete: false,
            is_dead_end: false,
            is_partial: false,
        }
    }

    /// Creates a path of length zero.
    pub fn zero_length(node: Term) -> Self {
        Self::new(node.clone(), node)
    }

    /// Returns a new alive candidate that continues this path to `next`.
    pub fn extend(&self, next: Term) -> Self {
        Self {
            start: self.start.clone(),
            current: next,
            length: self.length + 1,
            is_complete: false,
            is_dead_end: false,
            is_partial: false,
        }
    }

    pub fn start(&self) -> &Term {
        &self.start
    }

    pub fn current(&self) -> &Term {
        &self.current
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn is_dead_end(&self) -> bool {
        self.is_dead_end
    }

    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    /// Returns `true` if the path has not been classified yet.
    pub fn is_alive(&self) -> bool {
        !self.is_complete && !self.is_dead_end && !self.is_partial
    }

    pub(crate) fn mark_complete(&mut self) {
        self.is_complete = true;
    }

    pub(crate) fn mark_partial(&mut self) {
        self.is_partial = true;
    }

    pub(crate) fn mark_dead_end(&mut self) {
        self.is_dead_end = true;
    }
}

impl PartialEq for PotentialPath {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.current == other.current
    }
}

impl Eq for PotentialPath {}

impl Hash for PotentialPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.current.hash(state);
    }
}
