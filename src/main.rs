use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use docdex::index::stats::show_stats;
use docdex::output;
use docdex::query::{parse_query_with_options, QueryExecutor, QueryOptions};
use docdex::utils::{get_config_path, AppConfig};
use docdex::DocIndex;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use termcolor::ColorChoice;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docdex")]
#[command(about = "Keyword search over generated documentation search indexes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search query (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Search index file (Documenter search_index.js or JSON)
    #[arg(short = 'f', long = "index", env = "DOCDEX_INDEX", global = true)]
    index: Option<PathBuf>,

    /// Configuration file (defaults to config.json in the app data directory)
    #[arg(long, env = "DOCDEX_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Maximum number of results (0 for all)
    #[arg(short = 'n', long, global = true)]
    limit: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    color: ColorWhen,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Search record titles and text
    Search {
        /// Query (supports category:, page: and top: filters)
        #[arg(trailing_var_arg = true, required = true)]
        query: Vec<String>,
    },
    /// Print the record at a location
    Get {
        /// Record location, e.g. "GPU_background/#What-are-GPUs?-1"
        location: String,
    },
    /// Show index statistics
    Stats,
    /// Show pages and their sections in table-of-contents order
    Outline,
    /// Show the configuration in effect
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let color = color_choice(cli.color, &config);

    match &cli.command {
        Some(Commands::Search { query }) => search(&cli, &config, &query.join(" "), color),
        Some(Commands::Get { location }) => {
            let index = open_index(&cli, &config)?;
            let record = index.get(location)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                output::print_record(record, color)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Stats) => {
            let path = index_path(&cli, &config)?;
            let index = DocIndex::open(&path)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&index.stats())?);
            } else {
                show_stats(&index, &path)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Outline) => {
            let index = open_index(&cli, &config)?;
            output::print_outline(&index, color)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config) => {
            show_config(&cli, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            if cli.query.is_empty() {
                anyhow::bail!("No query given (try `docdex --help`)");
            }
            search(&cli, &config, &cli.query.join(" "), color)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn color_choice(when: ColorWhen, config: &AppConfig) -> ColorChoice {
    match when {
        ColorWhen::Always => ColorChoice::Always,
        ColorWhen::Never => ColorChoice::Never,
        ColorWhen::Auto if config.color && std::io::stdout().is_terminal() => ColorChoice::Auto,
        ColorWhen::Auto => ColorChoice::Never,
    }
}

/// Resolve the index file: flag or DOCDEX_INDEX, then the config file
fn index_path(cli: &Cli, config: &AppConfig) -> Result<PathBuf> {
    cli.index
        .clone()
        .or_else(|| config.index_path.clone())
        .context("No search index given: pass --index, set DOCDEX_INDEX, or set index_path in the config file")
}

fn open_index(cli: &Cli, config: &AppConfig) -> Result<DocIndex> {
    let path = index_path(cli, config)?;
    debug!(path = %path.display(), "opening search index");
    DocIndex::open(&path)
}

fn search(cli: &Cli, config: &AppConfig, input: &str, color: ColorChoice) -> Result<ExitCode> {
    let index = open_index(cli, config)?;

    let defaults = QueryOptions {
        limit: cli.limit.unwrap_or(config.limit),
        snippet_width: config.effective_snippet_width(),
    };
    let query = parse_query_with_options(input, defaults);
    let results = QueryExecutor::new(&index).execute(&query);

    if cli.json {
        output::print_matches_json(&results)?;
    } else {
        output::print_matches(&results, color)?;
    }

    if results.matches.is_empty() {
        if !cli.json {
            eprintln!("No matches for {:?}", query.text);
        }
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn show_config(cli: &Cli, config: &AppConfig) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };

    println!("Config file:      {}{}", config_path.display(), missing_marker(&config_path));
    println!(
        "Index:            {}",
        cli.index
            .as_ref()
            .or(config.index_path.as_ref())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!("Limit:            {}", cli.limit.unwrap_or(config.limit));
    println!("Snippet width:    {}", config.effective_snippet_width());
    println!("Color:            {}", config.color);

    Ok(())
}

fn missing_marker(path: &Path) -> &'static str {
    if path.exists() { "" } else { " [missing, using defaults]" }
}
