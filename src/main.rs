use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::config::{
    DEFAULT_TICK_INTERVAL_MS, FRAME_POLL_MS, MIN_TICK_INTERVAL_MS, PALETTE_CLASSIC,
};
use grid_snake::game::{Game, GameStatus, StepOutcome};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::layout::{Layout, user_layout_path};
use grid_snake::renderer;
use grid_snake::terminal_runtime::TerminalSession;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Starting board as JSON; defaults to the user layout or the stock board.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Extra items scattered over free cells.
    #[arg(long, default_value_t = 0)]
    items: usize,

    /// Seed for item scattering.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Run this many ticks without a terminal UI, printing the board after each.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.headless.is_some())?;

    let layout = load_layout(&cli)?;
    match cli.headless {
        Some(ticks) => run_headless(&layout, ticks),
        None => run(&layout, tick_interval(cli.tick_ms)),
    }
}

fn init_tracing(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else if headless {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    Ok(())
}

fn load_layout(cli: &Cli) -> Result<Layout> {
    let mut layout = match &cli.layout {
        Some(path) => Layout::from_path(path)?,
        None => match user_layout_path().filter(|path| path.is_file()) {
            Some(path) => {
                info!(path = %path.display(), "using user layout");
                Layout::from_path(&path)?
            }
            None => Layout::classic(),
        },
    };

    if cli.items > 0 {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        layout
            .scatter_items(&mut rng, cli.items)
            .context("failed to scatter items")?;
    }

    Ok(layout)
}

fn run(layout: &Layout, tick_interval: Duration) -> Result<()> {
    let mut game = Game::new(layout).context("invalid starting layout")?;
    let mut session = TerminalSession::enter().context("failed to set up terminal")?;
    let mut input = InputHandler::new(Duration::from_millis(FRAME_POLL_MS));
    let mut last_tick = Instant::now();

    info!(?tick_interval, "game started");

    loop {
        session.draw(|frame| renderer::render(frame, &game, &PALETTE_CLASSIC))?;

        if let Some(game_input) = input.poll_input()? {
            if matches!(game_input, GameInput::Quit) {
                game.request_stop();
                break;
            }

            handle_input(&mut game, layout, game_input)?;
        }

        if last_tick.elapsed() >= tick_interval {
            game.step();
            last_tick = Instant::now();
        }
    }

    info!(
        length = game.snake().len(),
        ticks = game.tick_count(),
        status = ?game.status(),
        "session ended"
    );
    Ok(())
}

fn handle_input(game: &mut Game, layout: &Layout, input: GameInput) -> Result<()> {
    match input {
        GameInput::Restart if game.status() == GameStatus::GameOver => {
            *game = Game::new(layout)?;
            info!("game restarted");
        }
        other => game.apply_input(other),
    }
    Ok(())
}

fn run_headless(layout: &Layout, ticks: u64) -> Result<()> {
    let mut game = Game::new(layout).context("invalid starting layout")?;
    print!("{}", game.grid());

    for _ in 0..ticks {
        let outcome = game.step();
        println!();
        print!("{}", game.grid());

        if let StepOutcome::Blocked { tile } = outcome {
            warn!(?tile, ticks = game.tick_count(), "blocked");
            break;
        }
    }

    info!(
        length = game.snake().len(),
        ticks = game.tick_count(),
        status = ?game.status(),
        "headless run finished"
    );
    Ok(())
}

fn tick_interval(tick_ms: u64) -> Duration {
    Duration::from_millis(tick_ms.max(MIN_TICK_INTERVAL_MS))
}
