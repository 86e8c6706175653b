//! spidey: search box and history over the shared search stores.

mod panel;
mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use spidey_core::{paths, Config, Error};
use spidey_state::{InputPolicy, SearchInput, SearchStores};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "spidey")]
#[command(about = "Search box and search history for the spidey search engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to $SPIDEY_DIR/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search box reading one query per line from stdin
    Repl,

    /// Submit queries in order and print the resulting history
    Run {
        /// Queries to submit
        queries: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print detailed build information
    BuildInfo,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Plain,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.log_level.as_deref() {
        Some(level) => spidey_core::logging::init_with_level(level),
        None => spidey_core::logging::init(),
    }

    let config_path = cli.config.unwrap_or_else(paths::config_path);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => interactive(&config_path)?,
        Commands::Run { queries, format } => run(&config_path, &queries, format)?,
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => config_init(&config_path, force)?,
            ConfigAction::Show => config_show(&config_path)?,
        },
        Commands::BuildInfo => {
            println!(
                "spidey {}",
                spidey_core::build_info::BUILD_INFO.version_line()
            );
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load_or_default(path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}

fn interactive(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let stores = SearchStores::new();
    info!("search box ready");

    let stdin = std::io::stdin();
    let mut session = repl::Repl::new(
        stores,
        InputPolicy::from(&config),
        config.history.panel_size,
        std::io::stdout(),
    );
    session.run(stdin.lock())
}

fn run(config_path: &Path, queries: &[String], format: Format) -> Result<()> {
    let config = load_config(config_path)?;
    let stores = SearchStores::new();
    let mut input = SearchInput::new(stores.clone(), InputPolicy::from(&config));

    for query in queries {
        match input.submit_text(query.as_str()) {
            Ok(submitted) => info!(query = %submitted, "search submitted"),
            Err(Error::EmptyQuery) => warn!("skipping empty query"),
            Err(err) => return Err(err.into()),
        }
    }

    let history = stores.history.get();
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&history)?),
        Format::Plain => {
            for entry in history {
                println!("{entry}");
            }
        }
    }

    Ok(())
}

fn config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn config_show(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
