//! `ncma-linker` - NCMA catalog table tooling
//!
//! The main job is rewriting the `aaData` strain table so that every row
//! links to its page on the NCMA site. The crate also carries the FeEDTA
//! iron-buffer calculator that is published alongside the table.

pub mod calculator;
pub mod cli;
pub mod error;
pub mod observability;
pub mod rewrite;
