//! Observability module
//!
//! Structured logging for `ncma-linker` runs. Logs go to stderr so that
//! command output on stdout stays machine-readable.

pub mod logging;

pub use logging::{LogFormat, init_logging};
