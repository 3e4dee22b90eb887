//! The interactive command loop: `start <player> <player>` or `exit`.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::agents::PlayerKind;
use crate::config::Settings;
use crate::error::{GameError, Result};
use crate::game::{outcome_message, play_game};
use crate::marks::MarkAllocator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start(PlayerKind, PlayerKind),
    Exit,
}

/// Any arity or token other than `start <p1> <p2>` / `exit` is `BadParameters`.
pub fn parse_command(line: &str) -> Result<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["exit"] => Ok(Command::Exit),
        ["start", p1, p2] => {
            let p1 = p1.parse().map_err(|_| GameError::BadParameters)?;
            let p2 = p2.parse().map_err(|_| GameError::BadParameters)?;
            Ok(Command::Start(p1, p2))
        }
        _ => Err(GameError::BadParameters),
    }
}

/// Read commands until `exit` or end of input, playing a game for every `start`.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W, settings: &Settings) -> Result<()> {
    let mut marks = MarkAllocator::new();
    let mut games = 0;

    loop {
        write!(output, "Input command:")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        match parse_command(&line) {
            Ok(Command::Exit) => return Ok(()),
            Ok(Command::Start(p1, p2)) => {
                let result = play_game(
                    (p1, p2),
                    &mut marks,
                    &settings.for_game(games),
                    &mut input,
                    &mut output,
                );
                // the next game needs both marks again, whatever happened to this one
                marks.reset();
                games += 1;

                let winner = result?;
                writeln!(output, "{}", outcome_message(winner))?;
                info!(games, "game finished");
            }
            Err(err) => {
                warn!(command = line.trim(), %err, "command rejected");
                writeln!(output, "{}", err)?;
            }
        }
    }
}

#[test]
fn test_parse_command() {
    assert_eq!(parse_command("exit\n").unwrap(), Command::Exit);
    assert_eq!(
        parse_command("start user hard").unwrap(),
        Command::Start(PlayerKind::User, PlayerKind::Hard)
    );
    assert_eq!(
        parse_command("  start   easy medium ").unwrap(),
        Command::Start(PlayerKind::Easy, PlayerKind::Medium)
    );

    for bad in [
        "",
        "start",
        "start easy",
        "start easy hard medium",
        "begin easy hard",
        "start easy expert",
        "exit now",
    ]
    .iter()
    {
        assert!(
            matches!(parse_command(bad), Err(GameError::BadParameters)),
            "{:?} should be rejected",
            bad
        );
    }
}

#[test]
fn test_run_plays_games_until_exit() {
    let settings = Settings {
        seed: Some(5),
        show_board: false,
    };
    let input: &[u8] = b"start easy\nstart hard hard\nstart easy easy\nexit\nstart hard hard\n";
    let mut output = Vec::new();

    run(input, &mut output, &settings).unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert_eq!(printed.matches("Input command:").count(), 4);
    assert_eq!(printed.matches("Bad parameters!").count(), 1);
    // hard against hard always ends in a draw
    assert!(printed.contains("Draw"));
    assert_eq!(
        printed.matches(" wins").count() + printed.matches("Draw").count(),
        2
    );
}
