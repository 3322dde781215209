//! booksearch CLI
//!
//! Opens the book search in the terminal (default) or in a native window,
//! or runs a single search and prints the hits.

use booksearch::logging::{self, LogConfig};
use booksearch::{
    AppConfig, BookCatalog, FetchWorker, GoogleBooksClient, PreviewCard, SearchState, View,
};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// booksearch - search the Google Books catalog
#[derive(Parser)]
#[command(name = "booksearch")]
#[command(version)]
#[command(about = "Search the Google Books catalog", long_about = None)]
struct Cli {
    /// Catalog search endpoint
    #[arg(long, global = true, default_value = booksearch::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Query submitted when a view opens
    #[arg(long, global = true, default_value = booksearch::INITIAL_QUERY)]
    initial_query: String,

    /// Give up on a request after this many seconds (default: wait)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log filter, e.g. `info` or `booksearch=debug`
    #[arg(long, global = true, default_value = logging::DEFAULT_LEVEL)]
    log_level: String,

    /// Log file (default: booksearch.log next to the executable)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search in the terminal
    Tui,

    /// Interactive search in a native window
    Gui,

    /// Run one search and print the results
    Search {
        /// Search terms (use -- before terms that start with -)
        #[arg(allow_hyphen_values = true, required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        AppConfig {
            endpoint: self.endpoint.clone(),
            initial_query: self.initial_query.clone(),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
            ..Default::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: cli.log_level.clone(),
        path: cli.log_file.clone(),
    };
    // Searching still works without a log file
    let _log_guard = match logging::init(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {}", style("Warning:").yellow().bold(), e);
            None
        }
    };
    tracing::info!(version = booksearch::VERSION, "booksearch starting up");

    let result = run(cli);

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> booksearch::Result<()> {
    let config = cli.app_config();
    config.validate()?;
    let catalog: Arc<dyn BookCatalog> = Arc::new(GoogleBooksClient::new(&config));

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => booksearch::tui::run(&config, catalog),
        Commands::Gui => booksearch::gui::run(&config, catalog),
        Commands::Search { query, json } => cmd_search(catalog, &query.join(" "), json),
    }
}

/// Run one query to completion. The query field holds what was submitted.
fn fetch_once(
    catalog: Arc<dyn BookCatalog>,
    raw: &str,
    spinner: &ProgressBar,
) -> booksearch::Result<SearchState> {
    let mut state = SearchState::new(raw);
    let Some(query) = state.begin_fetch(raw) else {
        return Err(booksearch::BookSearchError::Config(
            "search terms must not be blank".into(),
        ));
    };
    spinner.set_message(format!("Searching for '{}'...", query));

    let worker = FetchWorker::new(catalog);
    worker.dispatch(query);
    while state.is_fetching() {
        if let Some(outcome) = worker.recv_timeout(Duration::from_millis(100)) {
            state.complete_fetch(outcome.result);
        }
    }
    Ok(state)
}

/// One-shot search command
fn cmd_search(catalog: Arc<dyn BookCatalog>, raw: &str, json: bool) -> booksearch::Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let fetched = fetch_once(catalog, raw, &spinner);
    spinner.finish_and_clear();
    let state = fetched?;
    let elapsed = start.elapsed();
    let query = state.previous_query().unwrap_or_default();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "query": query,
                "total": state.results().len(),
                "items": state.results(),
                "elapsed_seconds": elapsed.as_secs_f64(),
            }))?
        );
        return Ok(());
    }

    match state.view() {
        View::Results(items) => {
            println!(
                "{} Found {} books in {}:",
                style("✓").green().bold(),
                style(items.len()).green(),
                style(HumanDuration(elapsed)).cyan()
            );
            println!();
            for (i, item) in items.iter().enumerate() {
                let card = PreviewCard::from(item);
                println!(
                    "  {} {}",
                    style(format!("{:3}.", i + 1)).dim(),
                    style(card.title.unwrap_or("(untitled)")).bold()
                );
                if let Some(authors) = &card.authors {
                    println!("       {}", authors);
                }
                if let Some(link) = card.preview_link {
                    println!("       {}", style(link).cyan().underlined());
                }
            }
        }
        View::Empty(empty) => {
            println!("{} {}", style("→").yellow().bold(), empty.message());
        }
        View::Loading => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use booksearch::{ResultItem, SearchError};
    use parking_lot::Mutex;

    struct Recording {
        calls: Mutex<Vec<String>>,
    }

    impl BookCatalog for Recording {
        fn search(&self, query: &str) -> Result<Vec<ResultItem>, SearchError> {
            self.calls.lock().push(query.to_string());
            Ok(vec![ResultItem::new("d1").with_title("Dune")])
        }
    }

    fn recording() -> Arc<Recording> {
        Arc::new(Recording {
            calls: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn one_shot_search_holds_only_the_submitted_query() {
        let catalog = recording();
        let state = fetch_once(catalog.clone(), "  Dune ", &ProgressBar::hidden()).unwrap();

        assert_eq!(state.query, "  Dune ");
        assert_eq!(state.previous_query(), Some("Dune"));
        assert_eq!(state.results().len(), 1);
        assert_eq!(*catalog.calls.lock(), vec!["Dune".to_string()]);
    }

    #[test]
    fn one_shot_search_rejects_blank_terms() {
        let catalog = recording();
        let err = fetch_once(catalog.clone(), "   ", &ProgressBar::hidden()).unwrap_err();

        assert!(err.to_string().contains("must not be blank"));
        assert!(catalog.calls.lock().is_empty());
    }
}
