#![doc(test(attr(deny(warnings))))]

//! An in-memory RDF graph that answers SPARQL property paths.
//!
//! The entry point is the [Store](store::Store). It loads RDF files, evaluates property paths and
//! runs SPARQL `SELECT` queries that are made of basic graph patterns and property paths.

pub mod error;
pub mod sparql;
pub mod store;

pub mod model {
    pub use rdf_paths_model::*;
}

pub mod logical {
    pub use rdf_paths_logical::*;
}

pub mod engine {
    pub use rdf_paths_engine::*;
}

pub mod storage {
    pub use rdf_paths_storage::*;
}
