//! CLI argument definitions
//!
//! All Clap derive structs for `ncma-linker` command-line parsing.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Rewrites the NCMA strain table (`ncma.txt` → `ncma.json`) with links to
/// each strain's catalog page.
///
/// Without a subcommand, runs `rewrite`.
#[derive(Parser, Debug)]
#[command(name = "ncma-linker", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to `rewrite`).
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "NCMA_LINKER_COLOR")]
    pub color: ColorChoice,

    /// Log line format on stderr.
    #[arg(
        long,
        default_value = "human",
        global = true,
        env = "NCMA_LINKER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite the link column of `ncma.txt` into `ncma.json`.
    Rewrite(RewriteArgs),

    /// Estimate the iron-buffering capacity of an FeEDTA culture medium.
    Calc(CalcArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Rewrite Command
// ============================================================================

/// Arguments for `rewrite`.
#[derive(Args, Debug, Default)]
pub struct RewriteArgs {
    /// Validate and transform in memory without writing `ncma.json`.
    #[arg(long)]
    pub check: bool,

    /// Output format for the run report.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Calc Command
// ============================================================================

/// Arguments for `calc`.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Cell diameter in micrometres.
    #[arg(long, value_name = "UM")]
    pub diameter: f64,

    /// Free EDTA concentration (mol/L).
    #[arg(long, value_name = "MOL_L")]
    pub edta: f64,

    /// FeEDTA concentration (mol/L).
    #[arg(long, value_name = "MOL_L")]
    pub fe: f64,

    /// Light intensity (uE m^-2 s^-1).
    #[arg(long, value_name = "UE")]
    pub light: f64,

    /// Hours of light per day.
    #[arg(long, value_name = "HOURS", default_value_t = 24.0)]
    pub photoperiod: f64,

    /// Include the plotted Fe' curves in the output.
    #[arg(long)]
    pub curves: bool,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for command reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
