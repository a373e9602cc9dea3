#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! ragdb-core
//!
//! Shared data model, error taxonomy, collaborator traits and configuration
//! for the ragdb retrieval engine. Concrete chunking, embedding, storage and
//! orchestration live in the sibling crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
