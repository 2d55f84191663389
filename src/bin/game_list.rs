//! game-list: render the game catalog listing in the terminal.
//!
//! One-shot mode applies the flags in the same order a user would touch the
//! controls (sort, genre, page size, search, then page) and prints one page.
//! `--interactive` reads commands from stdin instead and re-renders after every
//! command that changes the view.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gamelist::{
    COMMAND_HELP, GenreFilter, ListingView, SortKey, ViewCommand, ViewSnapshot, open_listing,
    render_genre_options, render_listing, resolve_config_path, resolve_dataset_path,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "game-list",
    version,
    about = "Search, filter, sort and page through a game catalog"
)]
struct Cli {
    /// Dataset file (JSON array or NDJSON).
    ///
    /// Defaults to $GAME_LIST_DATASET, then the bundled catalog.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Listing configuration (JSON). Defaults to $GAME_LIST_CONFIG, then built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON Schema to validate the dataset against instead of the bundled one.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Case-insensitive title search.
    #[arg(long, default_value = "")]
    search: String,

    /// Genre label, or "all".
    #[arg(long, default_value = "all")]
    genre: String,

    /// Sort order: title or rating.
    #[arg(long, default_value = "title")]
    sort: String,

    /// Page size: one of the configured options, or "all".
    #[arg(long = "per-page")]
    per_page: Option<String>,

    /// Page number to show (1-based).
    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// List the genre options and exit.
    #[arg(long)]
    genres: bool,

    /// Read commands from stdin (type 'help' for the list).
    #[arg(long, conflicts_with = "genres")]
    interactive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let dataset = resolve_dataset_path(cli.dataset.as_deref());
    let config = resolve_config_path(cli.config.as_deref());
    debug!(?dataset, ?config, schema = ?cli.schema, "opening listing");

    let mut view = open_listing(
        dataset.as_deref(),
        config.as_deref(),
        cli.schema.as_deref(),
    )?;

    if cli.genres {
        let mut out = String::new();
        render_genre_options(&view, &mut out)?;
        print!("{out}");
        return Ok(());
    }

    apply_flags(&mut view, &cli)?;

    if cli.interactive {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return run_interactive(&mut view, stdin.lock(), &mut stdout.lock(), cli.format);
    }

    let mut stdout = io::stdout().lock();
    emit(&view, cli.format, &mut stdout)
}

fn apply_flags(view: &mut ListingView, cli: &Cli) -> Result<()> {
    let sort: SortKey = cli.sort.parse().context("invalid --sort")?;
    view.set_sort_key(sort);
    view.set_genre_filter(GenreFilter::from_label(&cli.genre));
    if let Some(raw) = cli.per_page.as_deref() {
        let size = view.config().page_size(raw).context("invalid --per-page")?;
        view.set_page_size(size)?;
    }
    view.set_search_term(cli.search.clone());
    if cli.page != 1 {
        view.set_current_page(cli.page).context("invalid --page")?;
    }
    Ok(())
}

/// Process commands until EOF or `quit`. Bad commands are reported on stderr
/// and leave the view unchanged.
fn run_interactive<R: BufRead, W: Write>(
    view: &mut ListingView,
    reader: R,
    writer: &mut W,
    format: OutputFormat,
) -> Result<()> {
    emit(view, format, writer)?;
    for line in reader.lines() {
        let line = line.context("reading command")?;
        let command = match ViewCommand::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                warn!(input = %line.trim(), "rejected command");
                eprintln!("error: {err}");
                continue;
            }
        };

        match command {
            ViewCommand::Quit => break,
            ViewCommand::Help => writeln!(writer, "{COMMAND_HELP}")?,
            ViewCommand::Genres => {
                let mut out = String::new();
                render_genre_options(view, &mut out)?;
                write!(writer, "{out}")?;
            }
            command if command.mutates() => match view.apply(&command) {
                Ok(()) => emit(view, format, writer)?,
                Err(err) => eprintln!("error: {err}"),
            },
            _ => emit(view, format, writer)?,
        }
        writer.flush()?;
    }
    Ok(())
}

fn emit<W: Write>(view: &ListingView, format: OutputFormat, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            render_listing(view, &mut out)?;
            write!(writer, "{out}")?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, &ViewSnapshot::capture(view))?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
