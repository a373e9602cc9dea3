#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Retrieval pipeline: orchestrates chunking, embedding, storage and search,
//! plus the excerpt/prompt glue handed to an answer composer.

pub mod compose;
pub mod pipeline;

pub use compose::{render_excerpt, render_excerpts, render_metadata_header, Answer, PromptEchoComposer, PromptTemplate};
pub use pipeline::RetrievalPipeline;
