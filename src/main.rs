use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four_engine::config::AppConfig;
use connect_four_engine::engine::OpponentMode;
use connect_four_engine::ui::App;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect Four against a human or the computer")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Opponent: human, alphabeta or montecarlo
    #[arg(long)]
    opponent: Option<String>,

    /// Override alpha-beta search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Override Monte Carlo playouts per candidate column
    #[arg(long)]
    simulations: Option<usize>,

    /// Seed the Monte Carlo opponent for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Log file; the terminal UI owns stdout and stderr while it runs.
    /// Verbosity follows RUST_LOG.
    #[arg(long, default_value = "connect4.log")]
    log_file: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    init_logging(&cli.log_file)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(opponent) = cli.opponent.as_deref() {
        config.game.opponent = match opponent {
            "human" => OpponentMode::HumanVsHuman,
            "alphabeta" => OpponentMode::HumanVsAlphaBeta,
            "montecarlo" => OpponentMode::HumanVsMonteCarlo,
            other => bail!(
                "unknown opponent '{}' (expected 'human', 'alphabeta', or 'montecarlo')",
                other
            ),
        };
    }
    if let Some(depth) = cli.depth {
        config.alphabeta.depth = depth;
    }
    if let Some(simulations) = cli.simulations {
        config.monte_carlo.simulations_per_move = simulations;
    }
    if cli.seed.is_some() {
        config.monte_carlo.seed = cli.seed;
    }
    config.validate().context("validating command line overrides")?;

    info!("starting {}", config.game.opponent.label());
    run(config).context("running terminal UI")
}

fn run(config: AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_records_go_to_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connect4.log");
        init_logging(&path).unwrap();

        log::error!("search worker is gone");
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("search worker is gone"));
    }
}
