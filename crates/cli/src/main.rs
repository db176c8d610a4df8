//! `catalog`: browse a semicolon-delimited book catalog from the terminal.
//!
//! Without a subcommand the file is loaded once and an interactive menu is
//! shown; `list`, `search` and `category` run a single query and exit.

mod menu;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog::config::{APP_NAME, APP_VERSION};
use catalog::{filter_by_category, list_all, load_catalog, search, Category};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use render::OutputFormat;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Load a book catalog file and query it", long_about = None)]
#[command(version)]
struct Cli {
    /// Catalog file: a header line, then `title;author;year;price;category` rows
    file: PathBuf,

    /// Output format for one-shot commands
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log more detail to stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every record in file order
    List,
    /// Look up a book by title (case-insensitive, exact)
    Search {
        /// Title to look for
        title: String,
    },
    /// Print the books of one category that have a year and a price
    Category {
        /// Category name, e.g. Science or Scienza (unknown names mean Narrative)
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(app = APP_NAME, version = APP_VERSION, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, io::stdin().lock(), &mut out)?;
    out.flush()?;
    Ok(())
}

/// Load the catalog named by `cli` and run the selected command against it.
///
/// `input` feeds the interactive menu; one-shot commands ignore it.
fn run<R: BufRead, W: Write>(cli: Cli, input: R, out: &mut W) -> Result<()> {
    let report = load_catalog(&cli.file)
        .with_context(|| format!("failed to load catalog from {}", cli.file.display()))?;
    if report.truncated() {
        tracing::info!(
            stored = report.count(),
            dropped = report.dropped,
            "catalog file has more rows than the catalog holds"
        );
    }
    let catalog = report.into_catalog();

    match cli.command {
        None => menu::run(&catalog, input, out)?,
        Some(Commands::List) => {
            render::write_listing(out, list_all(&catalog), cli.format)?;
        }
        Some(Commands::Search { title }) => {
            render::write_search(out, &title, search(&catalog, &title), cli.format)?;
        }
        Some(Commands::Category { name }) => {
            let category = Category::parse(&name);
            render::write_category(out, category, filter_by_category(&catalog, category), cli.format)?;
        }
    }
    Ok(())
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_interactive_invocation() {
        let cli = Cli::try_parse_from(["catalog", "books.csv"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("books.csv"));
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_search_with_json_output() {
        let cli =
            Cli::try_parse_from(["catalog", "-vv", "--format", "json", "books.csv", "search", "Dune"])
                .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Search { ref title }) if title == "Dune"));
    }

    #[test]
    fn missing_file_argument_is_rejected() {
        assert!(Cli::try_parse_from(["catalog"]).is_err());
    }

    const LIBRARY: &str = "\
Title;Author;Year;Price;Category
Dune;Frank Herbert;1965;15.50;Science
Cosmos;Carl Sagan;1980;18.90;Scienza
Emma;Jane Austen;1815;8.00;Romanzo
Free Science;Nobody;2001;gratis;Science
";

    /// Run the CLI against a temp catalog file with `args` after the path.
    fn run_with(args: &[&str]) -> Result<String> {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("books.csv");
        std::fs::write(&path, LIBRARY).unwrap();
        let path = path.to_str().unwrap();

        let mut argv = vec!["catalog", path];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();

        let mut out = Vec::new();
        run(cli, io::Cursor::new(""), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn list_prints_every_record() {
        let text = run_with(&["list"]).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("[Title]: Dune"));
    }

    #[test]
    fn search_reports_found_and_missing() {
        let text = run_with(&["search", "COSMOS"]).unwrap();
        assert!(text.starts_with("Book found: [Title]: Cosmos"));

        let text = run_with(&["search", "Solaris"]).unwrap();
        assert_eq!(text.trim_end(), render::NOT_FOUND);
    }

    #[test]
    fn category_lists_only_priced_matches() {
        let text = run_with(&["category", "science"]).unwrap();
        let titles: Vec<_> = text.lines().collect();
        assert_eq!(titles.len(), 2);
        assert!(titles[0].starts_with("[Title]: Dune"));
        assert!(titles[1].starts_with("[Title]: Cosmos"));
    }

    #[test]
    fn category_json_output() {
        let text = run_with(&["--format", "json", "category", "Romanzo"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["category"], "Novel");
        assert_eq!(value["books"][0]["title"], "Emma");
    }

    #[test]
    fn no_subcommand_runs_menu_until_input_ends() {
        let text = run_with(&[]).unwrap();
        assert!(text.contains("[1] List catalog"));
    }

    #[test]
    fn unreadable_file_error_names_the_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("missing.csv");
        let cli = Cli::try_parse_from(["catalog", path.to_str().unwrap(), "list"]).unwrap();
        let mut out = Vec::new();
        let err = run(cli, io::Cursor::new(""), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("missing.csv"));
        assert!(out.is_empty());
    }
}
