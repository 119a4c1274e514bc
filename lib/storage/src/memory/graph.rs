use crate::memory::index::{TripleIndexes, TriplePosition};
use crate::{TripleIter, TripleLookup};
use rdf_paths_model::{NamedNodeRef, StorageError, Term, TermRef, Triple};
use rustc_hash::{FxHashMap, FxHashSet};

/// A graph that holds all of its triples in memory.
///
/// Triples are appended to a log and indexed by every combination of bound components that the
/// [TripleLookup] interface requires. Lookups return the triples in insertion order.
///
/// ```
/// use rdf_paths_model::{NamedNode, Triple};
/// use rdf_paths_storage::memory::MemoryGraph;
/// use rdf_paths_storage::TripleLookup;
///
/// let a = NamedNode::new("http://example.com/a")?;
/// let knows = NamedNode::new("http://example.com/knows")?;
/// let b = NamedNode::new("http://example.com/b")?;
///
/// let mut graph = MemoryGraph::new();
/// graph.insert(Triple::new(a.clone(), knows.clone(), b));
///
/// let count = graph.triples_with_subject_predicate(a.as_ref().into(), knows.as_ref())?.count();
/// assert_eq!(count, 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryGraph {
    /// The triple log. Removed triples are replaced with `None`.
    log: Vec<Option<Triple>>,
    /// The position of each live triple in the log.
    positions: FxHashMap<Triple, TriplePosition>,
    indexes: TripleIndexes,
}

impl MemoryGraph {
    /// Creates an empty [MemoryGraph].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of triples in the graph.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.positions.contains_key(triple)
    }

    /// Inserts a triple. Returns `false` if the triple was already part of the graph.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.positions.contains_key(&triple) {
            return false;
        }

        let position = self.log.len();
        self.indexes.insert(&triple, position);
        self.positions.insert(triple.clone(), position);
        self.log.push(Some(triple));
        true
    }

    /// Removes a triple. Returns `false` if the triple was not part of the graph.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        match self.positions.remove(triple) {
            Some(position) => {
                self.log[position] = None;
                true
            }
            None => false,
        }
    }

    /// Returns an iterator over the live triples at the given `positions`.
    fn resolve<'graph>(&'graph self, positions: &'graph [TriplePosition]) -> TripleIter<'graph> {
        Box::new(
            positions
                .iter()
                .filter_map(|position| self.log.get(*position).and_then(Clone::clone)),
        )
    }
}

impl Extend<Triple> for MemoryGraph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for MemoryGraph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut graph = MemoryGraph::new();
        graph.extend(iter);
        graph
    }
}

impl TripleLookup for MemoryGraph {
    fn triples_with_subject_predicate(
        &self,
        subject: TermRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> Result<TripleIter<'_>, StorageError> {
        Ok(self.resolve(self.indexes.subject_predicate(subject, predicate)))
    }

    fn triples_with_predicate_object(
        &self,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'_>,
    ) -> Result<TripleIter<'_>, StorageError> {
        Ok(self.resolve(self.indexes.predicate_object(predicate, object)))
    }

    fn triples_with_predicate(
        &self,
        predicate: NamedNodeRef<'_>,
    ) -> Result<TripleIter<'_>, StorageError> {
        Ok(self.resolve(self.indexes.predicate(predicate)))
    }

    fn triples_with_subject(&self, subject: TermRef<'_>) -> Result<TripleIter<'_>, StorageError> {
        Ok(self.resolve(self.indexes.subject(subject)))
    }

    fn triples_with_object(&self, object: TermRef<'_>) -> Result<TripleIter<'_>, StorageError> {
        Ok(self.resolve(self.indexes.object(object)))
    }

    fn triples(&self) -> Result<TripleIter<'_>, StorageError> {
        Ok(Box::new(self.log.iter().flatten().cloned()))
    }

    fn nodes(&self) -> Result<Box<dyn Iterator<Item = Term> + '_>, StorageError> {
        let mut seen = FxHashSet::default();
        let nodes = self
            .log
            .iter()
            .flatten()
            .flat_map(|triple| [Term::from(triple.subject.clone()), triple.object.clone()])
            .filter(move |term| seen.insert(term.clone()));
        Ok(Box::new(nodes))
    }
}
