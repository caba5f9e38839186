//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Paginate a JSON array of records.
#[derive(Debug, Parser)]
#[command(name = "hybrid-page", version)]
#[command(about = "Paginate a JSON file of records with numbered, cursor-anchored pages", long_about = None)]
#[command(
    after_help = "Examples:\n  hybrid-page users.json --sort -created_at,id --per-page 20\n  hybrid-page users.json --url '/users?page=4&prev=1&cursor=eyJpZCI6MTB9'\n  hybrid-page users.json --config paging.toml --links\n"
)]
pub struct Cli {
    /// JSON file holding an array of objects (`-` reads stdin)
    pub input: PathBuf,

    /// Sort order, e.g. `name,-id` (`-` means descending)
    #[arg(short, long, default_value = "id")]
    pub sort: String,

    /// Items per page (defaults to the configured per_page)
    #[arg(short = 'n', long)]
    pub per_page: Option<usize>,

    /// Request target to resolve page, prev and cursor from
    #[arg(short, long, value_name = "TARGET")]
    pub url: Option<String>,

    /// Page to show, overriding the request target
    #[arg(short, long)]
    pub page: Option<u64>,

    /// Page the client came from, overriding the request target
    #[arg(long)]
    pub prev: Option<u64>,

    /// Cursor token, overriding the request target
    #[arg(long)]
    pub cursor: Option<String>,

    /// Paginator options file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base path for generated URLs
    #[arg(long)]
    pub path: Option<String>,

    /// Print only the link list
    #[arg(long)]
    pub links: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}
