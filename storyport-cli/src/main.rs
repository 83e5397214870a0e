//! Storyport CLI - Create GitHub issues from USER_STORIES.md
//!
//! Parses epics and stories from a markdown document and creates one
//! labelled issue per story.

mod commands;

use clap::{Parser, Subcommand};
use storyport_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ImportArgs, ListArgs};

/// Storyport: turn user stories into GitHub issues
#[derive(Parser, Debug)]
#[command(name = "storyport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Create one issue per story in the stories document
    #[command(visible_alias = "i")]
    Import(ImportArgs),

    /// List the stories that would be imported
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Version) => {
            println!("storyport {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Import(args)) => {
            args.execute().await?;
        }
        Some(Commands::List(args)) => {
            args.execute()?;
        }
        Some(Commands::Config) => {
            let config = Config::load()?.with_env_overrides();

            println!("Storyport Configuration");
            println!("=======================");
            println!();
            println!("Source:");
            println!("  path: {}", config.source.path.display());
            println!();
            println!("Tracker:");
            println!("  gh_path: {}", config.tracker.gh_path);
            println!(
                "  repo: {}",
                config.tracker.repo.as_deref().unwrap_or("(inferred by gh)")
            );
            println!();
            println!("Publish:");
            println!("  delay: {}", humantime::format_duration(config.publish.delay));
            if config.publish.labels.is_empty() {
                println!("  labels: (none)");
            } else {
                println!("  labels: {}", config.publish.labels.join(", "));
            }
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Storyport - Create GitHub issues from USER_STORIES.md");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
