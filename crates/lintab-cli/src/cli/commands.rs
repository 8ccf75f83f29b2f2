use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the available tables
    Tables,

    /// Describe the columns of a table
    Columns {
        /// Table name, with or without the `linear_` prefix
        table: String,
    },

    /// Stream the rows of a table
    List(ListArgs),

    /// Fetch one row by id
    Get(GetArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Table name, with or without the `linear_` prefix
    pub table: String,

    /// Columns to output (comma separated, default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Predicate such as `priority<=2` or `created_at>=2024-01-01` (repeatable)
    #[arg(short = 'w', long = "where", value_name = "PREDICATE")]
    pub predicates: Vec<String>,

    /// Max rows to return
    #[arg(short, long)]
    pub limit: Option<u64>,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Table name, with or without the `linear_` prefix
    pub table: String,

    /// Entity id
    pub id: String,

    /// Columns to output (comma separated, default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub columns: Vec<String>,
}
