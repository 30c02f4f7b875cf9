use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use holdem_rs::agents::{AgentTable, BotAgent, BotProfile, Difficulty};
use holdem_rs::config::{TableConfig, DEFAULT_STACK, MAX_PLAYERS};
use holdem_rs::game::{Game, GameError};
use holdem_rs::tui::{app::AppState, controller};
use log::{error, info};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Parser)]
#[clap(version, about = "Texas Hold'em at the terminal")]
struct Cli {
    /// Number of seats at the table.
    #[clap(long, short, default_value_t = 3,
           value_parser = clap::value_parser!(u8).range(2..=MAX_PLAYERS as i64))]
    players: u8,
    /// Starting stack for every seat.
    #[clap(long, short, default_value_t = DEFAULT_STACK)]
    stack: u64,
    /// Seed for reproducible shuffles and bot decisions.
    #[clap(long)]
    seed: Option<u64>,
    /// Play bot-only hands without the terminal UI and print the results.
    #[clap(long)]
    auto: bool,
    /// Hands to play in auto mode.
    #[clap(long, default_value_t = 1)]
    hands: u32,
    /// Bot difficulty in auto mode: easy, medium or hard.
    #[clap(long, default_value = "medium", value_parser = parse_difficulty)]
    difficulty: Difficulty,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    match s.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "medium" | "med" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        other => Err(format!("unknown difficulty '{other}'")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // the TUI owns the screen, so it stays quiet unless RUST_LOG asks otherwise
    let default_filter = if cli.auto { "warn" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let mut config = TableConfig::with_players(cli.players as usize, cli.stack);
    config.seed = cli.seed;

    let res = if cli.auto {
        run_auto(config, cli.hands, cli.difficulty).map_err(|e| e.to_string())
    } else {
        run_tui(config)
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("holdem: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Bots on every seat; print each hand's board, the category of every player still
/// in and the final pot.
fn run_auto(config: TableConfig, hands: u32, difficulty: Difficulty) -> Result<(), GameError> {
    let seed = config.seed;
    let mut game = Game::new(config)?;
    let n = game.players().len();
    let mut agents = AgentTable::for_seats(n);
    for seat in 0..n {
        let mut profile = BotProfile::for_difficulty(difficulty);
        if let Some(seed) = seed {
            profile = profile.with_seed(seed.wrapping_add(seat as u64));
        }
        agents.set_agent(seat, Some(Box::new(BotAgent::new(profile))));
    }

    for hand in 1..=hands {
        match game.new_hand() {
            Ok(()) => {}
            Err(GameError::NotEnoughPlayers(left)) => {
                info!("stopping after {} hands: {left} player(s) with chips", hand - 1);
                break;
            }
            Err(e) => return Err(e),
        }
        agents.run_hand(&mut game)?;
        let showdown = game.showdown()?;

        let board: Vec<String> = game.board().as_slice().iter().map(|c| c.to_string()).collect();
        println!("Hand {hand}: {}", board.join(" "));
        for r in &showdown.results {
            let marker = if showdown.winners.contains(&r.seat) { " *" } else { "" };
            println!("  {}: {}{marker}", r.name, r.label());
        }
        println!("  Pot: {}", showdown.pot);
    }

    let stacks: Vec<String> =
        game.players().iter().map(|p| format!("{} {}", p.name(), p.stack())).collect();
    println!("Stacks: {}", stacks.join(", "));
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_tui(config: TableConfig) -> Result<(), String> {
    if !io::stdout().is_terminal() {
        println!(
            "holdem TUI requires a real terminal (TTY); use --auto for headless play. Version: {}",
            holdem_rs::VERSION
        );
        return Ok(());
    }
    let mut app = AppState::new(config).map_err(|e| e.to_string())?;
    let mut terminal = setup_terminal().map_err(|e| e.to_string())?;
    let res = controller::run(&mut terminal, &mut app, Duration::from_millis(250));

    // always attempt to restore the terminal
    restore_terminal(terminal).map_err(|e| e.to_string())?;
    res.map_err(|e| e.to_string())
}
