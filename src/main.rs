use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use connect_four_store::config::{AppConfig, LogConfig};
use connect_four_store::ui::App;
use connect_four_store::Session;

/// Two-player Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Seed for the starting-player draw (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Play a comma-separated list of columns headless and print the result
    #[arg(long, value_delimiter = ',')]
    replay: Option<Vec<usize>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
        config.game.first_player = None;
    }

    let sink = match (&cli.replay, &config.log.file) {
        (Some(_), _) => LogSink::Stderr,
        (None, Some(path)) => LogSink::File(path.as_path()),
        (None, None) => LogSink::Off,
    };
    init_tracing(&config.log, sink)?;
    if !cli.config.exists() {
        warn!(path = %cli.config.display(), "config file not found, using defaults");
    }

    match cli.replay {
        Some(columns) => replay(&config, &columns),
        None => run_tui(&config),
    }
}

/// Where log output goes.
enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    /// The TUI owns the terminal; without a log file it logs nothing.
    Off,
}

fn init_tracing(log: &LogConfig, sink: LogSink<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.filter))
        .context("building log filter")?;

    match sink {
        LogSink::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
        LogSink::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        LogSink::Off => {}
    }
    Ok(())
}

fn replay(config: &AppConfig, columns: &[usize]) -> Result<()> {
    let mut session = Session::from_config(&config.game);
    let state = session.replay(columns).context("replaying moves")?;

    println!("{}", state.board());
    println!();
    let flags = state.flags();
    if flags.is_win {
        println!("Winner: {}", state.current_player().name());
    } else if flags.is_draw {
        println!("Result: draw");
    } else {
        println!(
            "In progress: {} to move (turn {})",
            state.current_player().name(),
            state.turn_count()
        );
    }
    Ok(())
}

fn run_tui(config: &AppConfig) -> Result<()> {
    info!("starting terminal UI");
    let session = Session::from_config(&config.game);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal even if the app loop failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}
