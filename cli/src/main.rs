//! `comic-shelf`: import comics into the shared storage folder and browse them.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shelf_core::log::{LogConfig, LogLevel};
use shelf_core::{LibraryConfig, PageOrder};

#[derive(Debug, Parser)]
#[command(name = "comic-shelf", version, about = "Import and read local comic collections")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Folder holding one subdirectory per comic
    #[arg(long, global = true, env = "COMIC_SHELF_STORAGE")]
    storage: Option<PathBuf>,

    /// Folder for transient archive copies
    #[arg(long, global = true, env = "COMIC_SHELF_CACHE")]
    cache: Option<PathBuf>,

    /// Order pages numerically (2.png before 10.png)
    #[arg(long, global = true)]
    natural: bool,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List imported comics, optionally filtered by name
    List {
        /// Case-insensitive name filter
        query: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Copy a folder of images into the library
    ImportFolder { path: PathBuf },

    /// Extract a .zip/.cbz/.rar/.cbr archive into the library
    ImportArchive { path: PathBuf },

    /// Print the page paths of a comic
    Pages {
        name: String,

        #[arg(long)]
        json: bool,
    },

    /// Show one page of a comic
    Read {
        name: String,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let console_level = if cli.verbose { LogLevel::DEBUG } else { LogLevel::WARN };
    if let Err(err) = shelf_core::log::init(LogConfig::default().with_console_level(console_level))
    {
        eprintln!("failed to initialise logging: {err:#}");
    }

    let config = library_config(&cli);
    tracing::debug!(
        storage = %config.storage_root.display(),
        cache = %config.cache_dir.display(),
        "library configured"
    );

    match commands::run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn library_config(cli: &Cli) -> LibraryConfig {
    let mut config = LibraryConfig::default();
    if let Some(storage) = &cli.storage {
        config = config.with_storage_root(storage);
    }
    if let Some(cache) = &cli.cache {
        config = config.with_cache_dir(cache);
    }
    if cli.natural {
        config = config.with_page_order(PageOrder::Natural);
    }
    config
}
