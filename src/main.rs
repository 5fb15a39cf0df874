use std::fs::{self, File};
use std::io;
use std::panic;
use std::thread;
use std::time::Instant;

use clap::Parser;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use tick_snake::config::{FRAME_DURATION, THEME_CLASSIC};
use tick_snake::engine::TickEngine;
use tick_snake::food::RandomCells;
use tick_snake::score::{JsonScoreStore, MemoryScoreStore, ScoreStore, data_dir};
use tick_snake::terminal_input::TerminalInput;
use tick_snake::terminal_runtime::{restore_terminal, TerminalFeedback, TerminalSession};

const LOG_FILE_NAME: &str = "tick-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed food placement for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the top score in memory only.
    #[arg(long = "no-persist")]
    no_persist: bool,

    /// Log verbosity written to the log file in the data directory.
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level);
    install_panic_hook();

    if cli.no_persist {
        run(&cli, MemoryScoreStore::default())
    } else {
        run(&cli, JsonScoreStore::default())
    }
}

fn run<S: ScoreStore>(cli: &Cli, store: S) -> io::Result<()> {
    let cells = match cli.seed {
        Some(seed) => RandomCells::seeded(seed),
        None => RandomCells::from_entropy(),
    };

    let session = TerminalSession::enter()?;
    let input = TerminalInput::new(session.key_reporting());
    let feedback = TerminalFeedback::new(session, &THEME_CLASSIC);
    let mut engine = TickEngine::new(input, store, feedback, cells);

    let mut state = engine.new_state();
    engine.on_start(&mut state);
    info!("session started, top score {}", state.round.top_score);

    let mut next_frame = Instant::now();
    loop {
        engine.on_frame(&mut state);

        if engine.input_mut().quit_requested() {
            break;
        }
        if let Some(error) = engine.feedback_mut().take_error() {
            return Err(error);
        }

        next_frame += FRAME_DURATION;
        let now = Instant::now();
        if next_frame > now {
            thread::sleep(next_frame - now);
        } else {
            // Running behind; drop the backlog instead of fast-forwarding.
            next_frame = now;
        }
    }

    info!("session ended, top score {}", state.round.top_score);
    Ok(())
}

/// Logs to a file: the terminal itself is owned by the game screen.
fn init_logging(level: LevelFilter) {
    let dir = data_dir();
    let file = fs::create_dir_all(&dir).and_then(|()| File::create(dir.join(LOG_FILE_NAME)));

    match file {
        Ok(file) => {
            if let Err(error) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {error}");
            }
        }
        Err(error) => eprintln!("Failed to open log file in {}: {error}", dir.display()),
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
