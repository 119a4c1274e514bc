//! The RDF data model used by the rdf-paths crates.
//!
//! Terms, triples and variables are the ones of [oxrdf]. They are re-exported here so that all
//! crates agree on a single version of the data model.

mod error;
pub mod vocab;

pub use error::*;

// Re-export some oxrdf types.
pub use oxiri::{Iri, IriParseError};
pub use oxrdf::{
    BlankNode, BlankNodeRef, Literal, LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNode,
    Subject, SubjectRef, Term, TermParseError, TermRef, Triple, TripleRef, Variable,
    VariableNameParseError, VariableRef,
};
