#![doc(test(attr(deny(warnings))))]

//! Contains the graph lookup interface that the path engine evaluates against and an in-memory
//! implementation of it.

mod lookup;
pub mod memory;

pub use lookup::{TripleIter, TripleLookup};
