use clap::{Parser, ValueEnum};
use lintab_config::GeneralConfig;

pub mod commands;
pub mod global;

pub use commands::{Commands, GetArgs, ListArgs};
pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `lintab` binary.
#[derive(Debug, Parser)]
#[command(name = "lintab", version, about = "Query the Linear API as relational tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (default: `general.format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve global flags, falling back to configuration for the format.
    #[must_use]
    pub fn global_flags(&self, general: &GeneralConfig) -> GlobalFlags {
        let format = self.format.unwrap_or_else(|| {
            OutputFormat::from_str(&general.format, true).unwrap_or_else(|_| {
                tracing::warn!(format = %general.format, "unknown configured format, using json");
                OutputFormat::Json
            })
        });
        GlobalFlags {
            format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
