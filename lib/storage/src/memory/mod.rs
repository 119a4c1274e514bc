//! An in-memory graph that serves the lookups of [TripleLookup](crate::TripleLookup) from a set
//! of hash indexes.
mod graph;
mod index;

pub use graph::MemoryGraph;
