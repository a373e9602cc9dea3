#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! ragdb-text
//!
//! Token-bounded sliding-window chunking with a pluggable tokenization
//! policy. See `chunker` for the window arithmetic and `tokenize` for the
//! available token boundary rules.

pub mod chunker;
pub mod tokenize;

pub use chunker::{window_ranges, ChunkParams, Chunker, TextWindow};
pub use tokenize::{tokenizer_for, HfTokenizer, Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
