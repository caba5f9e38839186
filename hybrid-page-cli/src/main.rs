//! `hybrid-page`: paginate a JSON file of records from the command line.
//!
//! Prints the page in its JSON wire form, with the URLs a client would follow
//! to reach the neighbouring pages. Feed one of those URLs back through
//! `--url` to fetch that page.

mod args;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use hybrid_page::{
    HybridPaginate, HybridPaginator, MemorySource, NoRequest, PaginateArgs, PaginatorOptions,
    RequestTarget, SortField,
};
use serde_json::Value as Json;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use args::Cli;

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        },
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<String> {
    let options = load_options(cli)?;
    let records = read_records(&cli.input)?;

    let order = SortField::parse_sort_string(&cli.sort, &[]).map_err(anyhow::Error::msg)?;
    if order.is_empty() {
        bail!("--sort must name at least one field");
    }
    tracing::debug!(records = records.len(), sort = %cli.sort, "loaded records");

    let mut source = MemorySource::new(records, order).context("records cannot be ordered")?;
    let page = paginate(cli, &mut source, options)?;

    let output = if cli.links {
        let links = page.link_collection();
        if cli.pretty {
            serde_json::to_string_pretty(&links)?
        } else {
            serde_json::to_string(&links)?
        }
    } else if cli.pretty {
        page.to_json_pretty()?
    } else {
        page.to_json()?
    };
    Ok(output)
}

fn paginate(
    cli: &Cli,
    source: &mut MemorySource<Json>,
    options: PaginatorOptions,
) -> Result<HybridPaginator<Json>> {
    let mut args = PaginateArgs::new().options(options);
    if let Some(per_page) = cli.per_page {
        args = args.per_page(per_page);
    }
    if let Some(page) = cli.page {
        args = args.page(page);
    }
    if let Some(prev) = cli.prev {
        args = args.prev_page(prev);
    }
    if let Some(cursor) = &cli.cursor {
        args = args.cursor(cursor);
    }

    let page = match &cli.url {
        Some(url) => {
            let request = RequestTarget::parse(url);
            source
                .hybrid_paginate(args, &request)?
                .with_query_string(&request)
        },
        None => source.hybrid_paginate(args, &NoRequest)?,
    };
    Ok(page)
}

fn load_options(cli: &Cli) -> Result<PaginatorOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            PaginatorOptions::from_toml_str(&source)
                .with_context(|| format!("invalid config {}", path.display()))?
        },
        None => PaginatorOptions::default(),
    };
    if let Some(path) = &cli.path {
        options.path.clone_from(path);
    }
    Ok(options)
}

fn read_records(input: &Path) -> Result<Vec<Json>> {
    let text = if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        text
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };
    serde_json::from_str(&text).context("input must be a JSON array of objects")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hybrid_page::SortDir;
    use serde_json::json;

    fn source() -> MemorySource<Json> {
        let rows = (1..=30).map(|id| json!({"id": id}));
        MemorySource::new(rows, vec![SortField::new("id", SortDir::Asc)]).unwrap()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hybrid-page").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = cli(&["users.json", "-n", "5", "-p", "3"]);
        let page = paginate(&cli, &mut source(), PaginatorOptions::default()).unwrap();
        assert_eq!(page.current_page(), 3);
        assert_eq!(page.first_item(), Some(11));
    }

    #[test]
    fn test_url_is_followed() {
        let mut source = source();
        let first_cli = cli(&["users.json", "-n", "10", "--url", "/users?sort=id"]);
        let first = paginate(&first_cli, &mut source, PaginatorOptions::default()).unwrap();
        let next = first.next_page_url().unwrap();
        assert!(next.starts_with("/users?sort=id&page=2"));

        let second_cli = cli(&["users.json", "-n", "10", "--url", next.as_str()]);
        let second = paginate(&second_cli, &mut source, PaginatorOptions::default()).unwrap();
        assert_eq!(second.first_item(), Some(11));
        assert!(second.cursor().is_some());
    }

    #[test]
    fn test_path_flag() {
        let options = load_options(&cli(&["users.json", "--path", "/people/"])).unwrap();
        assert_eq!(options.path, "/people/");
    }
}
