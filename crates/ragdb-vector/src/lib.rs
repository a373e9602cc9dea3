#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! In-process vector storage and exact similarity search.
//!
//! [`DocumentStore`] is an append-only, insertion-ordered collection of
//! embedded chunks with a dimension fixed by its first insert.
//! [`BruteForceIndex`] scores every stored vector against a query by cosine
//! similarity; it is the only [`SimilarityIndex`] today and the seam where an
//! approximate index could be swapped in.

pub mod index;
pub mod similarity;
pub mod store;

pub use index::{BruteForceIndex, SimilarityIndex};
pub use similarity::{cosine_similarity, l2_norm};
pub use store::DocumentStore;
