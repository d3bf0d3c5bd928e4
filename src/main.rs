use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use konpa_catalog::catalog::{AppendOutcome, Catalog, Release};
use konpa_catalog::config::{AppConfig, CliConfig, FileConfig};
use konpa_catalog::persistence::FileAppendStore;
use konpa_catalog::query::{self, ReleaseFilter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "konpa-catalog",
    about = "Browse and extend the konpa discography catalog"
)]
struct CliArgs {
    /// Path to the append store JSON file.
    #[clap(long)]
    store_path: Option<PathBuf>,

    /// Path to a baseline TSV file overriding the embedded dataset.
    #[clap(long)]
    baseline: Option<PathBuf>,

    /// Path to a TOML config file; file values override CLI values.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Page size for listings.
    #[clap(long, default_value_t = query::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print aggregate catalog statistics.
    Stats,
    /// List releases, newest first, optionally filtered.
    List {
        /// Only releases by these artists (repeatable).
        #[clap(long)]
        artist: Vec<String>,
        /// Only releases on this label.
        #[clap(long)]
        label: Option<String>,
        #[clap(long)]
        min_year: Option<i32>,
        #[clap(long)]
        max_year: Option<i32>,
        /// Case-insensitive search over artist, title and label.
        #[clap(long)]
        search: Option<String>,
        /// Page number, starting at 1.
        #[clap(long, default_value_t = 1)]
        page: usize,
    },
    /// List artists, optionally by initial letter.
    Artists {
        #[clap(long)]
        initial: Option<char>,
    },
    /// Append a TSV batch to the catalog and persist it.
    Append {
        /// Path to the TSV file to append.
        file: PathBuf,
    },
}

fn print_release(release: &Release) {
    let year = release
        .year
        .map(|year| year.to_string())
        .unwrap_or_else(|| "????".to_owned());
    println!(
        "{year}  {} / {} [{}] ({} tracks)",
        release.artist, release.title, release.label, release.track_count
    );
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = cli_args.config.as_deref().map(FileConfig::load).transpose()?;
    let cli_config = CliConfig {
        store_path: cli_args.store_path.clone(),
        baseline_path: cli_args.baseline.clone(),
        page_size: cli_args.page_size,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let store = Arc::new(FileAppendStore::open(config.store_path.clone()));
    let mut catalog = match &config.baseline_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read baseline file {:?}", path))?;
            Catalog::initialize(&text, store)?
        }
        None => Catalog::initialize_builtin(store)?,
    };

    match cli_args.command {
        Command::Stats => {
            let stats = catalog.stats();
            println!(
                "{} releases by {} artists on {} labels",
                stats.total_releases,
                stats.total_artists,
                catalog.labels().len()
            );
            match stats.year_span {
                Some(span) => println!("Years {} to {}", span.min, span.max),
                None => println!("No release years known"),
            }
        }
        Command::List {
            artist,
            label,
            min_year,
            max_year,
            search,
            page,
        } => {
            let filter = ReleaseFilter {
                artists: artist,
                label,
                min_year,
                max_year,
            };
            let mut rows = filter.apply(catalog.releases());
            if let Some(query_text) = &search {
                rows.retain(|release| query::matches_query(release, query_text));
            }
            let page_rows = query::page(&rows, page, config.page_size);
            for release in page_rows {
                print_release(release);
            }
            println!(
                "{} of {} releases (page {page})",
                page_rows.len(),
                rows.len()
            );
        }
        Command::Artists { initial } => match initial {
            Some(letter) => {
                for artist in query::artists_with_initial(catalog.artists(), letter) {
                    println!("{artist}");
                }
            }
            None => {
                for artist in catalog.artists() {
                    println!("{artist}");
                }
            }
        },
        Command::Append { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read batch file {:?}", file))?;
            match catalog.append(&text)? {
                AppendOutcome::Noop => println!("Nothing to append"),
                AppendOutcome::NothingAccepted { summary } => println!(
                    "No valid rows in batch ({} skipped, {} duplicates)",
                    summary.skipped, summary.duplicates
                ),
                AppendOutcome::Merged { summary, persisted } => {
                    println!(
                        "Appended {} releases ({} skipped, {} duplicates)",
                        summary.accepted, summary.skipped, summary.duplicates
                    );
                    if !persisted {
                        error!("The appended data could not be persisted and will be lost on reload");
                    }
                }
            }
        }
    }

    Ok(())
}
