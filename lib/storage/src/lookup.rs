use rdf_paths_model::{NamedNodeRef, StorageError, Term, TermRef, Triple};

/// A lazy sequence of triples returned by a [TripleLookup].
pub type TripleIter<'lookup> = Box<dyn Iterator<Item = Triple> + 'lookup>;

/// The lookup operations that the path engine requires from a graph.
///
/// Every operation returns a fresh iterator. Calling an operation twice with the same arguments
/// must yield the same triples, as the evaluator re-runs lookups for each hop of a path.
pub trait TripleLookup {
    /// Returns all triples with the given `subject` and `predicate`.
    fn triples_with_subject_predicate(
        &self,
        subject: TermRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> Result<TripleIter<'_>, StorageError>;

    /// Returns all triples with the given `predicate` and `object`.
    fn triples_with_predicate_object(
        &self,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'_>,
    ) -> Result<TripleIter<'_>, StorageError>;

    /// Returns all triples with the given `predicate`.
    fn triples_with_predicate(
        &self,
        predicate: NamedNodeRef<'_>,
    ) -> Result<TripleIter<'_>, StorageError>;

    /// Returns all triples with the given `subject`, regardless of their predicate.
    fn triples_with_subject(&self, subject: TermRef<'_>) -> Result<TripleIter<'_>, StorageError>;

    /// Returns all triples with the given `object`, regardless of their predicate.
    fn triples_with_object(&self, object: TermRef<'_>) -> Result<TripleIter<'_>, StorageError>;

    /// Returns all triples of the graph.
    fn triples(&self) -> Result<TripleIter<'_>, StorageError>;

    /// Returns every term that occurs as the subject or the object of a triple. Each term is
    /// returned exactly once.
    fn nodes(&self) -> Result<Box<dyn Iterator<Item = Term> + '_>, StorageError>;
}
