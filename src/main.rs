use std::error::Error;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use flipsnake::config::GameConfig;
use flipsnake::input::{self, GameInput, PendingDirection};
use flipsnake::renderer;
use flipsnake::session::{Session, Step};
use flipsnake::settings::load_settings;
use log::{LevelFilter, info};
use ratatui::DefaultTerminal;
use simplelog::WriteLogger;

/// Snake on a square grid. Purple food turns the snake end-to-end.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board side length.
    #[arg(long)]
    size: Option<u16>,

    /// Chance (0 to 1) that newly spawned food reverses the snake.
    #[arg(long = "reversal-probability")]
    reversal_probability: Option<f64>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to read instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a debug log to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(error.as_ref());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Settle configuration before raw mode so errors print normally.
    let config = resolve_config(cli)?;
    info!("starting with {config:?}");

    // try_init also hooks panics so they restore the terminal first.
    let mut terminal = ratatui::try_init()?;
    let outcome = play(&mut terminal, config, cli.seed);
    ratatui::restore();
    Ok(outcome?)
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, Box<dyn Error>> {
    let mut config = load_settings(cli.config.as_deref())?;

    if let Some(size) = cli.size {
        config.board_size = size;
    }
    if let Some(probability) = cli.reversal_probability {
        config.reversal_probability = probability;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }

    Ok(config.validate()?)
}

fn play(terminal: &mut DefaultTerminal, config: GameConfig, seed: Option<u64>) -> io::Result<()> {
    let session = match seed {
        Some(seed) => Session::with_seed(config, seed),
        None => Session::new(config),
    };
    let mut step = Step::Running(session);
    let mut pending = PendingDirection::default();
    let tick_interval = config.tick_interval();
    let mut next_tick = Instant::now() + tick_interval;

    loop {
        terminal.draw(|frame| renderer::render(frame, &step))?;

        let wait = next_tick.saturating_duration_since(Instant::now());
        match input::poll_input(wait)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Direction(direction)) => pending.set(direction),
            Some(GameInput::Restart) => {
                step = match step {
                    Step::GameOver(over) => {
                        let _ = pending.take();
                        next_tick = Instant::now() + tick_interval;
                        Step::Running(over.reset())
                    }
                    running @ Step::Running(_) => running,
                };
            }
            None => {}
        }

        if Instant::now() >= next_tick {
            step = match step {
                Step::Running(session) => session.tick(pending.take()),
                over @ Step::GameOver(_) => over,
            };
            next_tick = Instant::now() + tick_interval;
        }
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    WriteLogger::init(
        LevelFilter::Debug,
        simplelog::Config::default(),
        File::create(path)?,
    )?;
    Ok(())
}

fn report(error: &dyn Error) {
    eprintln!("flipsnake: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
