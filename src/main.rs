// DocWatch - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Platform path resolution and config.toml loading
// 4. Command dispatch against the document store

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use docwatch::core::{codec, dates, model::Document, query};
use docwatch::platform;
use docwatch::store::{DocumentStore, JsonStore};
use docwatch::util;
use docwatch::util::error::DocWatchError;

/// DocWatch - track documents with expiry dates.
///
/// Documents live in a local store; `list` classifies them against today's
/// date, and `import`/`export` round-trip them through CSV files.
#[derive(Parser, Debug)]
#[command(name = "docwatch", version, about)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Override the document store file path.
    #[arg(long = "store")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stored documents, optionally filtered by expiry status.
    List {
        /// Show only documents that expired before today.
        #[arg(long, conflicts_with = "expiring")]
        expired: bool,

        /// Show only documents expiring within the window (see --days).
        #[arg(long)]
        expiring: bool,

        /// Expiry window in days for --expiring (default from config.toml).
        #[arg(long, requires = "expiring")]
        days: Option<i64>,
    },

    /// Add a single document.
    Add {
        /// Document title.
        title: String,

        /// Due date (e.g. 15/03/2026, 15-03-2026 or 2026-03-15).
        #[arg(value_parser = parse_date_arg)]
        due_date: NaiveDate,

        /// Path to an attached file.
        #[arg(long)]
        attachment: Option<String>,
    },

    /// Remove a document by id.
    Remove {
        /// Store-assigned document id (see `list`).
        id: i64,
    },

    /// Import documents from a CSV file (columns selected by position).
    Import {
        /// CSV file to import.
        file: PathBuf,

        /// Zero-based index of the title column.
        #[arg(long = "title-col")]
        title_col: usize,

        /// Zero-based index of the due-date column.
        #[arg(long = "date-col")]
        date_col: usize,

        /// Zero-based index of the attachment-path column.
        #[arg(long = "path-col")]
        path_col: Option<usize>,

        /// Show headers and the first rows instead of importing.
        #[arg(long)]
        preview: bool,
    },

    /// Export all stored documents to a CSV file.
    Export {
        /// Output file path.
        file: PathBuf,

        /// Field separator to write.
        #[arg(long, default_value_t = ',', value_parser = parse_separator_arg)]
        separator: char,
    },
}

/// clap value parser for due-date arguments, sharing the import policy.
fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    dates::parse_due_date(s)
        .ok_or_else(|| format!("'{s}' is not a recognised date (try 15/03/2026 or 2026-03-15)"))
}

/// clap value parser restricting the export separator to `,` or `;`.
fn parse_separator_arg(s: &str) -> Result<char, String> {
    match s {
        "," => Ok(','),
        ";" => Ok(';'),
        other => Err(format!("separator must be ',' or ';', got '{other}'")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging init: the
    // config file may set the log level.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    for warning in &config_warnings {
        eprintln!("Warning: {warning}");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "DocWatch starting"
    );

    // Store path priority: CLI flag > config.toml > platform data dir.
    let store_path = cli
        .store
        .clone()
        .or_else(|| config.store_file.clone())
        .unwrap_or_else(|| platform_paths.store_file());

    match run(&cli, &config, &store_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    cli: &Cli,
    config: &platform::config::AppConfig,
    store_path: &PathBuf,
) -> Result<(), DocWatchError> {
    let mut store = JsonStore::open(store_path)?;

    match &cli.command {
        Command::List {
            expired,
            expiring,
            days,
        } => {
            let today = Local::now().date_naive();
            let docs = store.list();

            if *expired {
                let view = query::filter_expired(docs, today);
                println!("{} expired document(s)", view.len());
                print_table(&view);
            } else if *expiring {
                let window = days.unwrap_or(config.default_window_days);
                let view = query::filter_expiring_within(docs, window, today)?;
                println!("{} document(s) expiring within {window} day(s)", view.len());
                print_table(&view);
            } else {
                let view = query::all_sorted(docs);
                println!("{} document(s)", view.len());
                print_table(&view);
            }
        }

        Command::Add {
            title,
            due_date,
            attachment,
        } => {
            let doc = Document::new(title, *due_date, attachment.as_deref())?;
            let saved = store.insert(doc)?;
            println!(
                "Added document {} '{}' due {}",
                saved.id.unwrap_or_default(),
                saved.title,
                saved.due_date
            );
        }

        Command::Remove { id } => {
            if store.get(*id).is_none() {
                println!("No document with id {id}");
            } else {
                store.delete(*id)?;
                println!("Removed document {id}");
            }
        }

        Command::Import {
            file,
            title_col,
            date_col,
            path_col,
            preview,
        } => {
            if *preview {
                let preview = codec::load_preview(file, config.preview_rows)?;
                println!("Columns: {}", preview.headers.join(" | "));
                for (i, row) in preview.rows.iter().enumerate() {
                    println!("{:>4}  {}", i + 1, row.join(" | "));
                }
                return Ok(());
            }

            let mapping = codec::ColumnMapping {
                title: *title_col,
                due_date: *date_col,
                attachment_path: *path_col,
            };
            let docs = codec::map_file_to_documents(file, &mapping)?;
            let inserted = store.bulk_insert(docs)?;
            println!("Imported {inserted} document(s) from '{}'", file.display());
        }

        Command::Export { file, separator } => {
            let writer = std::fs::File::create(file).map_err(|source| DocWatchError::Io {
                path: file.clone(),
                operation: "create",
                source,
            })?;
            let docs = query::all_sorted(store.list());
            let owned: Vec<Document> = docs.into_iter().cloned().collect();
            let count = codec::export_documents(&owned, writer, *separator, file)?;
            println!("Exported {count} document(s) to '{}'", file.display());
        }
    }

    Ok(())
}

/// Print a fixed-width table of documents to stdout.
fn print_table(docs: &[&Document]) {
    if docs.is_empty() {
        return;
    }
    println!("{:>5}  {:<12}  {:<40}  ATTACHMENT", "ID", "DUE DATE", "TITLE");
    for doc in docs {
        println!(
            "{:>5}  {:<12}  {:<40}  {}",
            doc.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            doc.due_date.to_string(),
            doc.title,
            doc.attachment_path.as_deref().unwrap_or("-")
        );
    }
}
