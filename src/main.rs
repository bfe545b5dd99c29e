use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{DEFAULT_TICK_INTERVAL_MS, EngineConfig, THEME_NIGHT};
use grid_snake::game::{GameEngine, GamePhase, ResetOutcome, TickOutcome};
use grid_snake::input::{GameInput, InputEvent, InputHandler};
use grid_snake::random::RandomSource;
use grid_snake::renderer::{self, FrameInfo};
use grid_snake::score::{ScoreStore, app_data_dir};
use grid_snake::terminal_runtime::{AppTerminal, TerminalSession, install_panic_hook};
use log::{debug, error, info, warn};
use ratatui::layout::Rect;
use simplelog::{LevelFilter, WriteLogger};

const LOG_FILE_NAME: &str = "grid-snake.log";
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells (overrides the config file).
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells (overrides the config file).
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds between simulation ticks.
    #[arg(
        long = "tick-ms",
        default_value_t = DEFAULT_TICK_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    tick_ms: u64,

    /// JSON file with engine settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible sessions.
    #[arg(long)]
    seed: Option<u64>,

    /// Never read or write the high-score file.
    #[arg(long = "no-persist")]
    no_persist: bool,

    /// Log file path (defaults to the per-user data directory).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log level filter.
    #[arg(long = "log-level", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = resolve_config(&cli)?;
    let store = if cli.no_persist {
        ScoreStore::disabled()
    } else {
        ScoreStore::default_location()
    };

    let high_score = match store.load() {
        Ok(score) => score,
        Err(error) => {
            warn!("ignoring unreadable high-score file: {error}");
            eprintln!("Warning: could not read high score ({error}); starting from 0.");
            0
        }
    };

    let tick_interval = Duration::from_millis(cli.tick_ms);
    info!(
        "starting on a {}x{} grid, tick {} ms, high score {high_score}",
        config.width, config.height, cli.tick_ms
    );

    install_panic_hook();

    match cli.seed {
        Some(seed) => {
            let engine =
                GameEngine::new_with_seed(config, high_score, seed).map_err(invalid_input)?;
            run_session(engine, &store, tick_interval)
        }
        None => {
            let engine = GameEngine::new(config, high_score).map_err(invalid_input)?;
            run_session(engine, &store, tick_interval)
        }
    }
}

fn run_session<R: RandomSource>(
    mut engine: GameEngine<R>,
    store: &ScoreStore,
    tick_interval: Duration,
) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let result = run(session.terminal_mut(), &mut engine, store, tick_interval);

    // Offer whatever was scored for persistence, even when leaving mid-session.
    persist(store, engine.reset());
    info!("exiting");
    result
}

fn run<R: RandomSource>(
    terminal: &mut AppTerminal,
    engine: &mut GameEngine<R>,
    store: &ScoreStore,
    tick_interval: Duration,
) -> io::Result<()> {
    let mut input = InputHandler::new(INPUT_POLL_INTERVAL);
    let mut last_tick = Instant::now();
    let mut board = Rect::default();

    loop {
        let snapshot = engine.snapshot();
        let info = FrameInfo {
            grid: engine.config().grid(),
            stats: engine.stats(),
            is_new_high_score: engine.is_new_high_score(),
            theme: &THEME_NIGHT,
        };
        terminal.draw(|frame| board = renderer::render(frame, &snapshot, info))?;

        if let Some(event) = input.poll_input()? {
            let game_input = match event {
                InputEvent::Game(game_input) => Some(game_input),
                InputEvent::Pointer { column, row } => {
                    pointer_input(engine.phase(), board, column, row)
                }
            };

            match game_input {
                Some(GameInput::Quit) => break,
                Some(other) => {
                    if handle_input(engine, store, other) {
                        last_tick = Instant::now();
                    }
                }
                None => {}
            }
        }

        if engine.phase() == GamePhase::Playing && last_tick.elapsed() >= tick_interval {
            match engine.tick() {
                Ok(TickOutcome::Nothing) => {}
                Ok(outcome) => debug!("tick {}: {outcome:?}", engine.tick_count()),
                Err(fault) => error!("simulation fault: {fault}"),
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Applies one input. Returns true when a new session started.
fn handle_input<R: RandomSource>(
    engine: &mut GameEngine<R>,
    store: &ScoreStore,
    input: GameInput,
) -> bool {
    match input {
        GameInput::Direction(direction) => {
            engine.set_direction(direction);
            false
        }
        GameInput::Confirm => match engine.phase() {
            GamePhase::Ready => match engine.start() {
                Ok(()) => true,
                Err(fault) => {
                    error!("could not start session: {fault}");
                    false
                }
            },
            GamePhase::Ended => {
                persist(store, engine.reset());
                false
            }
            GamePhase::Playing => false,
        },
        GameInput::Reset => {
            persist(store, engine.reset());
            false
        }
        GameInput::Quit => false,
    }
}

/// Outside a session a click acts as confirm; during one it steers.
fn pointer_input(phase: GamePhase, board: Rect, column: u16, row: u16) -> Option<GameInput> {
    if phase != GamePhase::Playing {
        return Some(GameInput::Confirm);
    }

    renderer::direction_for_click(board, column, row).map(GameInput::Direction)
}

fn persist(store: &ScoreStore, outcome: ResetOutcome) {
    if let Err(error) = store.persist(outcome) {
        warn!("failed to save high score: {error}");
    }
}

fn resolve_config(cli: &Cli) -> io::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }

    Ok(config)
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| app_data_dir().join(LOG_FILE_NAME));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    WriteLogger::init(
        cli.log_level,
        simplelog::Config::default(),
        File::create(&path)?,
    )
    .map_err(io::Error::other)
}

fn invalid_input(error: grid_snake::error::EngineError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}
