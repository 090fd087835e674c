//! CLI command definitions and handlers

mod heuristics;
mod init;
mod rate;

use crate::config::{load_config_file, load_rating_config, RatingConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::{Path, PathBuf};

/// Parse a score threshold (0-100)
fn parse_score(s: &str) -> Result<u8, String> {
    let n: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid score", s))?;
    if n > 100 {
        Err("score cannot exceed 100".to_string())
    } else {
        Ok(n)
    }
}

/// Layoutscore - Geometric rating of UI layouts
#[derive(Parser, Debug)]
#[command(name = "layoutscore")]
#[command(
    version,
    about = "Rate UI layouts for balance, equilibrium, symmetry and harmony",
    long_about = "Layoutscore rates the visual composition of a screen from the bounding \
boxes of its elements. Every heuristic produces 0-100 metric scores with a short \
comment; the overall score is the floor average of the heuristic averages.\n\n\
A layout file is JSON:\n  \
{\"canvas\": {\"width\": 1080, \"height\": 1920},\n   \
\"items\": [{\"x\": 0.1, \"y\": 0.1, \"width\": 0.8, \"height\": 0.2}]}",
    after_help = "\
Examples:
  layoutscore rate screen.json                    Rate one layout
  layoutscore rate a.json b.json --format json    One JSON line per layout
  layoutscore rate screen.json -H balance         Run a single heuristic
  layoutscore rate screen.json --fail-under 70    Exit code 1 below 70 (CI mode)
  layoutscore heuristics                          List registered heuristics
  layoutscore init                                Write an example layoutscore.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: layoutscore.toml or .layoutscorerc.json in the current directory)
    #[arg(long, short = 'c', global = true, env = "LAYOUTSCORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rate one or more layout files
    #[command(after_help = "\
Examples:
  layoutscore rate screen.json                       Terminal report
  layoutscore rate screen.json --format markdown     Markdown for PR comments
  layoutscore rate screens/*.json --format json      Batch, one JSON line per file
  layoutscore rate - < screen.json                   Read the layout from stdin
  layoutscore rate screen.json --explain             Show the scoring breakdown")]
    Rate {
        /// Layout files to rate (`-` reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file, or a directory to write report.<ext> into (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Heuristics to run, in order (overrides the config file)
        #[arg(long = "heuristic", short = 'H')]
        heuristics: Vec<String>,

        /// Reject elements outside the unit square
        #[arg(long)]
        strict: bool,

        /// Explain the scoring formula with full breakdown
        #[arg(long)]
        explain: bool,

        /// Exit with code 1 if any layout scores below this value
        #[arg(long, value_parser = parse_score)]
        fail_under: Option<u8>,
    },

    /// List registered heuristics and the metrics they emit
    Heuristics,

    /// Validate the configuration file
    Check,

    /// Initialize a layoutscore.toml config file with example settings
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match cli.command {
        Commands::Rate {
            files,
            format,
            output,
            heuristics,
            strict,
            explain,
            fail_under,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let options = rate::RateOptions {
                format: format
                    .or_else(|| config.defaults.format.clone())
                    .unwrap_or_else(|| "text".to_string()),
                output,
                heuristics,
                strict: strict || config.strict_bounds,
                explain,
                fail_under: fail_under.or(config.defaults.fail_under),
            };
            rate::run(&files, &config, options)
        }

        Commands::Heuristics => {
            let config = load_config(cli.config.as_deref())?;
            heuristics::run(&config)
        }

        Commands::Check => run_check(cli.config.as_deref()),

        Commands::Init { path, force } => init::run(&path, force),
    }
}

/// Load the explicit config file, or discover one in the current directory
fn load_config(path: Option<&Path>) -> Result<RatingConfig> {
    match path {
        Some(p) => load_config_file(p),
        None => {
            let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
            Ok(load_rating_config(&cwd))
        }
    }
}

fn run_check(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let registry = crate::raters::HeuristicRegistry::default();
    config
        .validate(&registry)
        .context("Configuration is invalid")?;

    println!(
        "{} Configuration OK: {}",
        style("✓").green(),
        style(config.heuristics.join(", ")).cyan()
    );
    if config.strict_bounds {
        println!("  strict bounds enabled");
    }
    Ok(())
}
