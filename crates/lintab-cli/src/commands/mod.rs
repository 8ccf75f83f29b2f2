use lintab_config::LintabConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod catalog;
pub mod query;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    flags: &GlobalFlags,
    config: &LintabConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Tables => catalog::tables(flags),
        Commands::Columns { table } => catalog::columns(&table, flags),
        Commands::List(args) => query::list(&args, flags, config).await,
        Commands::Get(args) => query::get(&args, flags, config).await,
    }
}
