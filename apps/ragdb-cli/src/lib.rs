#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Development helpers for the `ragdb` binary.

pub mod corpus;
