//! var_cli: command-line front end for the VAR decision engine.
//!
//! Reads JSON requests from files, prints JSON responses to stdout. Logs go to stderr
//! (`RUST_LOG` controls the level, default `info`).

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use var_core::api;
use var_core::{MatchState, VarConfig};

#[derive(Parser)]
#[command(name = "var_cli")]
#[command(about = "Offside and goal decisions from frame detections", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Judge a play (receive frame + shoot frame)
    Play {
        /// Play request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Score JSON file; read before the play and rewritten after it
        #[arg(long)]
        score: Option<PathBuf>,

        /// Engine config (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Analyse a single frame (roles, offside line, offside players)
    Frame {
        /// Frame request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Engine config (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Reconstruct goal structures from line segments
    Goals {
        /// Goals request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Engine config (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the JSON Schema of the play request
    Schema,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli.command, &mut stdout.lock())
}

fn run(command: Commands, out: &mut impl Write) -> Result<()> {
    let response = match command {
        Commands::Play { request, score, config } => {
            let config = load_config(config.as_deref())?;
            let request = read_request(&request)?;
            let mut state = match &score {
                Some(path) => load_score(path)?,
                None => MatchState::default(),
            };

            let response = api::analyze_play_json_with_config(&request, &config, &mut state)
                .map_err(|e| anyhow!(e))
                .context("play analysis failed")?;

            if let Some(path) = &score {
                save_score(path, &state)?;
            }
            response
        }

        Commands::Frame { request, config } => {
            let config = load_config(config.as_deref())?;
            let request = read_request(&request)?;
            api::analyze_frame_json_with_config(&request, &config)
                .map_err(|e| anyhow!(e))
                .context("frame analysis failed")?
        }

        Commands::Goals { request, config } => {
            let config = load_config(config.as_deref())?;
            let request = read_request(&request)?;
            api::detect_goals_json_with_config(&request, &config)
                .map_err(|e| anyhow!(e))
                .context("goal reconstruction failed")?
        }

        Commands::Schema => api::play_request_schema().map_err(|e| anyhow!(e))?,
    };

    writeln!(out, "{response}")?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<VarConfig> {
    match path {
        Some(path) => {
            let config = VarConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::info!(path = %path.display(), "config loaded");
            Ok(config)
        }
        None => Ok(VarConfig::from_env_or_default()),
    }
}

fn read_request(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read request {}", path.display()))
}

/// A missing score file means a fresh match
fn load_score(path: &Path) -> Result<MatchState> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no score file yet, starting at 0-0");
        return Ok(MatchState::default());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read score {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid score file {}", path.display()))
}

fn save_score(path: &Path, state: &MatchState) -> Result<()> {
    let text = serde_json::to_string_pretty(state)?;
    fs::write(path, text).with_context(|| format!("failed to write score {}", path.display()))
}
