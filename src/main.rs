use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::modes::{HeadlessMode, HumanMode};
use grid_snake::render::JsonLinesRenderer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed 20x20 board")]
struct Cli {
    /// How to host the game
    #[arg(long, value_enum, default_value = "human")]
    mode: Mode,

    /// Tick budget for a headless run
    #[arg(long, default_value = "100")]
    ticks: u32,

    /// Seed for food placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here; an interactive session logs nowhere otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play with the keyboard in the terminal
    Human,
    /// Run one game without input, printing a JSON snapshot per tick
    Headless,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.mode, cli.log_file.as_deref())?;

    let config = GameConfig::default();
    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    }
    .context("Invalid game configuration")?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(engine);
            human_mode.run().await?;
        }
        Mode::Headless => {
            let renderer = JsonLinesRenderer::new(stdout().lock());
            let mut headless = HeadlessMode::new(engine, renderer, cli.ticks);
            let last = headless.run()?;
            if let Some(report) = last.final_score_text() {
                info!("{report}");
            }
        }
    }

    Ok(())
}

fn init_tracing(mode: Mode, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (log_file, mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        // The terminal belongs to the board
        (None, Mode::Human) => {}
        (None, Mode::Headless) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    Ok(())
}
