use rdf_paths_model::{NamedNode, NamedNodeRef, Term, TermRef, Triple};
use rustc_hash::FxHashMap;

/// Position of a triple in the triple log of a [MemoryGraph](super::MemoryGraph).
pub(super) type TriplePosition = usize;

/// Represents the set of access paths that are maintained for a graph. Each access path maps a
/// (partially) bound triple pattern to the positions of the matching triples.
///
/// For example, the pattern `<S> <P> ?o` is served by `by_subject_predicate`, while `?s <P> <O>`
/// is served by `by_predicate_object`. Positions are never removed from the indexes; a removed
/// triple leaves a tombstone in the log that lookups skip.
#[derive(Debug, Default)]
pub(super) struct TripleIndexes {
    by_subject_predicate: FxHashMap<(Term, NamedNode), Vec<TriplePosition>>,
    by_predicate_object: FxHashMap<(NamedNode, Term), Vec<TriplePosition>>,
    by_predicate: FxHashMap<NamedNode, Vec<TriplePosition>>,
    by_subject: FxHashMap<Term, Vec<TriplePosition>>,
    by_object: FxHashMap<Term, Vec<TriplePosition>>,
}

impl TripleIndexes {
    /// Registers the triple at `position` in all access paths.
    pub fn insert(&mut self, triple: &Triple, position: TriplePosition) {
        let subject = Term::from(triple.subject.clone());
        self.by_subject_predicate
            .entry((subject.clone(), triple.predicate.clone()))
            .or_default()
            .push(position);
        self.by_predicate_object
            .entry((triple.predicate.clone(), triple.object.clone()))
            .or_default()
            .push(position);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(position);
        self.by_subject.entry(subject).or_default().push(position);
        self.by_object
            .entry(triple.object.clone())
            .or_default()
            .push(position);
    }

    pub fn subject_predicate(
        &self,
        subject: TermRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> &[TriplePosition] {
        let key = (subject.into_owned(), predicate.into_owned());
        positions(self.by_subject_predicate.get(&key))
    }

    pub fn predicate_object(
        &self,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'_>,
    ) -> &[TriplePosition] {
        let key = (predicate.into_owned(), object.into_owned());
        positions(self.by_predicate_object.get(&key))
    }

    pub fn predicate(&self, predicate: NamedNodeRef<'_>) -> &[TriplePosition] {
        positions(self.by_predicate.get(&predicate.into_owned()))
    }

    pub fn subject(&self, subject: TermRef<'_>) -> &[TriplePosition] {
        positions(self.by_subject.get(&subject.into_owned()))
    }

    pub fn object(&self, object: TermRef<'_>) -> &[TriplePosition] {
        positions(self.by_object.get(&object.into_owned()))
    }
}

fn positions(entry: Option<&Vec<TriplePosition>>) -> &[TriplePosition] {
    entry.map_or(&[], Vec::as_slice)
}
