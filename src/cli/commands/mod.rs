//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod calc;
pub mod completions;
pub mod rewrite;
pub mod version;

use crate::cli::args::{Cli, Commands, RewriteArgs};
use crate::error::LinkerError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// A bare invocation runs `rewrite` with its defaults.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), LinkerError> {
    match cli.command {
        None => rewrite::run(&RewriteArgs::default()),
        Some(Commands::Rewrite(args)) => rewrite::run(&args),
        Some(Commands::Calc(args)) => calc::run(&args),
        Some(Commands::Completions(args)) => {
            completions::run(&args);
            Ok(())
        }
        Some(Commands::Version(args)) => {
            version::run(&args);
            Ok(())
        }
    }
}
