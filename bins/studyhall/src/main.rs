//! studyhall - browse, search and track progress through study modules
//!
//! Drives the launcher from the terminal: every subcommand loads the catalog
//! and stored preferences, applies one intent and prints the result.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use studyhall_catalog::{parse_category, Catalog, Category, ModuleRepository};
use studyhall_core::{exit_codes, Config};
use studyhall_launcher::LauncherController;
use studyhall_prefs::{PreferenceStore, StoreLimits};
use studyhall_telemetry::TelemetryConfig;
use tracing::{debug, warn};

mod commands;
mod output;

use commands::{App, Format};

/// Browse, search and track study modules
#[derive(Parser)]
#[command(name = "studyhall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to studyhall.toml lookup)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preferences file, overriding the configured one
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List modules grouped by level
    List {
        /// Only this level
        #[arg(short, long)]
        level: Option<u8>,

        /// Only this category (e.g. "state", "lists-grids")
        #[arg(short, long, value_parser = category_arg)]
        category: Option<Category>,
    },

    /// Search modules by keyword
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Don't add the query to recent searches
        #[arg(long)]
        no_record: bool,
    },

    /// Show details for one module
    Show {
        /// Module id
        id: String,
    },

    /// Open a module and add it to recently opened
    Open {
        /// Module id
        id: String,
    },

    /// Mark a module as completed
    Complete {
        /// Module id
        id: String,

        /// Mark as not completed instead
        #[arg(long)]
        undo: bool,
    },

    /// Flip a module between completed and not completed
    Toggle {
        /// Module id
        id: String,
    },

    /// Show recent searches and recently opened modules
    Recent {
        /// Clear recent searches
        #[arg(long)]
        clear_searches: bool,

        /// Clear recently opened modules
        #[arg(long)]
        clear_modules: bool,
    },

    /// Remove one term from recent searches
    Forget {
        /// Search term
        term: String,
    },

    /// Expand a level in the launcher
    Expand {
        /// Level number
        #[arg(required_unless_present = "all")]
        level: Option<u8>,

        /// Expand every level
        #[arg(long)]
        all: bool,
    },

    /// Collapse a level in the launcher
    Collapse {
        /// Level number
        #[arg(required_unless_present = "all")]
        level: Option<u8>,

        /// Collapse every level
        #[arg(long)]
        all: bool,
    },

    /// Show completion progress per level
    Progress {
        /// Clear all completed modules
        #[arg(long)]
        reset: bool,
    },

    /// Show catalog statistics
    Stats,

    /// Verify every prerequisite refers to a known module
    Check,
}

fn category_arg(value: &str) -> Result<Category, String> {
    parse_category(value).ok_or_else(|| format!("unknown category '{value}'"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let code = match run(cli).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            e.downcast_ref::<studyhall_core::Error>()
                .map_or(exit_codes::FAILURE, |err| exit_codes::for_code(err.code))
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let telemetry = TelemetryConfig {
        log_level: config.schema.logging.level.clone(),
        json: config.schema.logging.json,
        ..TelemetryConfig::default()
    }
    .with_verbosity(cli.verbose);
    // A subscriber may already be installed when embedded; keep going without ours.
    if let Err(e) = studyhall_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }
    debug!(config = ?config.path, "Configuration loaded");

    let catalog = load_catalog(&config)?;
    let repository = Arc::new(ModuleRepository::new(Arc::new(catalog)));

    let prefs_path = cli
        .prefs
        .unwrap_or_else(|| config.schema.preferences.path.clone());
    let limits = StoreLimits {
        max_recent_searches: config.schema.preferences.max_recent_searches,
        max_recent_modules: config.schema.preferences.max_recent_modules,
    };
    debug!(path = %prefs_path.display(), "Opening preferences");
    let store = PreferenceStore::open(prefs_path, limits);

    let app = App {
        controller: LauncherController::new(repository, store).await,
        format: cli.format,
    };

    let result = match cli.command {
        Commands::List { level, category } => commands::list(&app, level, category),
        Commands::Search { query, no_record } => commands::search(&app, &query.join(" "), !no_record),
        Commands::Show { id } => commands::show(&app, &id),
        Commands::Open { id } => commands::open(&app, &id),
        Commands::Complete { id, undo } => commands::complete(&app, &id, undo).await,
        Commands::Toggle { id } => commands::toggle(&app, &id).await,
        Commands::Recent {
            clear_searches,
            clear_modules,
        } => commands::recent(&app, clear_searches, clear_modules).await,
        Commands::Forget { term } => commands::forget(&app, &term).await,
        Commands::Expand { level, all } => commands::set_expanded(&app, level, all, true).await,
        Commands::Collapse { level, all } => commands::set_expanded(&app, level, all, false).await,
        Commands::Progress { reset } => commands::progress(&app, reset).await,
        Commands::Stats => commands::stats(&app),
        Commands::Check => commands::check(&app),
    };

    // Queued preference writes land before the process exits.
    app.controller.flush().await;
    result
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let settings = &config.schema.catalog;
    let timer = studyhall_telemetry::Timer::start("load_catalog");
    let catalog = match &settings.path {
        Some(path) => {
            debug!(path = %path.display(), "Loading catalog file");
            Catalog::from_json_file(path)?
        }
        None => Catalog::builtin()?,
    };

    if settings.validate_prerequisites {
        catalog.validate_prerequisites()?;
    } else {
        for (module, missing) in catalog.dangling_prerequisites() {
            warn!(module = %module, prerequisite = %missing, "Prerequisite not in catalog");
        }
    }

    timer.stop();
    Ok(catalog)
}
