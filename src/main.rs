use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tictactoe::{menu, outcome_message, play_game, Cli, GameError, MarkAllocator};

fn main() -> Result<(), GameError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings();
    let stdin = io::stdin();

    match cli.start_players() {
        Some(players) => {
            let mut marks = MarkAllocator::new();
            let winner = play_game(players, &mut marks, &settings, stdin.lock(), io::stdout())?;
            println!("{}", outcome_message(winner));
            Ok(())
        }
        None => menu::run(stdin.lock(), io::stdout(), &settings),
    }
}
