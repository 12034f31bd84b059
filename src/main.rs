// Copyright (c) 2024-2025 Pixelbrowse Contributors
// Licensed under the MIT License. See LICENSE file for details.

//! Terminal host for the pixelbrowse engine.
//!
//! The engine itself is headless; this binary is the hosting screen. It
//! wires the browse state to the catalog client, renders the computed grid
//! as text, and supplies the CLI platform implementation for download and
//! share.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use pixelbrowse::browse::BrowseState;
use pixelbrowse::catalog::CatalogClient;
use pixelbrowse::config::CatalogConfig;
use pixelbrowse::grid::{GridView, COLUMN_COUNT};
use pixelbrowse::transfer::{
    CliPlatform, DownloadManager, HttpTransport, LocalStore, ShareManager,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default viewport width for text rendering, in layout units.
const DEFAULT_VIEWPORT_WIDTH: f32 = 400.0;

/// Default viewport height for the visible grid window.
const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

/// Overscan margin around the visible window.
const OVERSCAN: f32 = 100.0;

/// Spinner helpers for consistent progress indicators
mod spinner {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;

    /// Create a spinner with consistent styling
    pub fn create(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}

#[derive(Parser)]
#[command(name = "pixelbrowse", version = VERSION, about = "Browse remote image catalogs from the terminal")]
struct Cli {
    /// Override the remote catalog host
    #[arg(long, global = true)]
    host: Option<String>,

    /// Path to a config file (defaults to the per-user config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List configured categories, default active category first
    Categories,
    /// Show category suggestions for a search query
    Search {
        /// Search text (case-insensitive substring match)
        query: String,
    },
    /// Fetch and print the item list for a category
    Fetch {
        /// Category label, used verbatim
        category: String,
    },
    /// Fetch a category and render the computed grid slots
    Grid {
        /// Category label, used verbatim
        category: String,
        /// Viewport width in layout units
        #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
        viewport_width: f32,
        /// Scroll offset of the visible window
        #[arg(long, default_value_t = 0.0)]
        scroll: f32,
    },
    /// Download an image to local storage and the Download album
    Download {
        /// Image URL
        uri: String,
    },
    /// Prepare an image and hand it to the share surface
    Share {
        /// Image URL
        uri: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CatalogConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Command::Categories => cmd_categories(&config),
        Command::Search { query } => cmd_search(&config, &query),
        Command::Fetch { category } => cmd_fetch(&config, &category).await,
        Command::Grid {
            category,
            viewport_width,
            scroll,
        } => cmd_grid(&config, &category, viewport_width, scroll).await,
        Command::Download { uri } => cmd_download(&uri).await,
        Command::Share { uri } => cmd_share(&uri).await,
    }
}

fn cmd_categories(config: &CatalogConfig) -> Result<()> {
    let state = BrowseState::new(config);
    for category in state.categories() {
        if category == state.active_category() {
            println!("{} {}", "*".green(), category.bold());
        } else {
            println!("  {}", category);
        }
    }
    Ok(())
}

fn cmd_search(config: &CatalogConfig, query: &str) -> Result<()> {
    let mut state = BrowseState::new(config);
    state.set_query(query);
    if !state.suggestions_visible() {
        println!("{}", "Empty query - suggestion list is hidden".dimmed());
        return Ok(());
    }
    let suggestions = state.suggestions();
    if suggestions.is_empty() {
        println!("{}", format!("No categories match \"{}\"", query).yellow());
    } else {
        for suggestion in suggestions {
            println!("  {}", suggestion);
        }
    }
    Ok(())
}

/// Drive one full browse fetch: select, issue, complete.
async fn browse_category(config: &CatalogConfig, category: &str) -> Result<BrowseState> {
    let mut state = BrowseState::new(config);
    state.select(category);

    let client = CatalogClient::new(&config.host);
    let token = state.begin_fetch();

    let progress = spinner::create(&format!("Fetching \"{}\"...", category));
    let result = client.fetch(state.active_category()).await;
    progress.finish_and_clear();

    state.complete_fetch(token, result);
    Ok(state)
}

async fn cmd_fetch(config: &CatalogConfig, category: &str) -> Result<()> {
    let state = browse_category(config, category).await?;

    if let pixelbrowse::LoadState::Error(msg) = state.load_state() {
        println!("{}", msg.red());
        return Ok(());
    }
    if state.items().is_empty() {
        println!("No images found for \"{}\"", state.active_category());
        return Ok(());
    }

    println!(
        "{} items in \"{}\"",
        state.items().len().to_string().bold(),
        state.active_category()
    );
    for (i, item) in state.items().iter().enumerate() {
        let dims = match (item.width, item.height) {
            (Some(w), Some(h)) => format!("{}x{}", w, h),
            _ => "unknown size".to_string(),
        };
        println!("  {:>4}  {}  {}", i, item.uri, dims.dimmed());
    }
    Ok(())
}

async fn cmd_grid(
    config: &CatalogConfig,
    category: &str,
    viewport_width: f32,
    scroll: f32,
) -> Result<()> {
    let state = browse_category(config, category).await?;

    match GridView::from_state(&state, viewport_width) {
        GridView::Placeholders(slots) => {
            println!("{} placeholder boxes", slots.len());
        }
        GridView::Error(msg) => println!("{}", msg.red()),
        GridView::Empty(msg) => println!("{}", msg),
        GridView::Grid(mut layout) => {
            let visible = layout.visible_slots(scroll, DEFAULT_VIEWPORT_HEIGHT, OVERSCAN);
            println!(
                "{} columns, {} items, {} visible at offset {}",
                COLUMN_COUNT,
                layout.len(),
                visible.len(),
                scroll
            );
            for slot in visible {
                let uri = layout.item(slot.index).map(|i| i.uri.as_str()).unwrap_or("?");
                println!(
                    "  [{}] col {}  x {:>6.1}  y {:>7.1}  {:>5.1} x {:>5.1}  {}",
                    slot.index, slot.column, slot.x, slot.y, slot.width, slot.height, uri
                );
            }
        }
    }
    Ok(())
}

async fn cmd_download(uri: &str) -> Result<()> {
    let manager = DownloadManager::new(HttpTransport::new(), CliPlatform::new(), LocalStore::new());

    let progress = spinner::create("Downloading...");
    let result = manager.download(uri).await;
    progress.finish_and_clear();

    match result {
        Ok(path) => {
            println!(
                "{} Image saved successfully ({})",
                "[OK]".green(),
                chrono::Local::now().format("%H:%M:%S")
            );
            println!("  {}", path.display());
            Ok(())
        }
        Err(err) => {
            println!("{} {}", "[X]".red(), err);
            std::process::exit(1);
        }
    }
}

async fn cmd_share(uri: &str) -> Result<()> {
    let manager = ShareManager::new(HttpTransport::new(), CliPlatform::new(), LocalStore::new());

    let progress = spinner::create("Preparing to share...");
    let result = manager.share(uri).await;
    progress.finish_and_clear();

    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            println!("{} {}", "[X]".red(), err);
            std::process::exit(1);
        }
    }
}
