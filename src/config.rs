//! Command-line interface and the settings derived from it.

use clap::Parser;

use crate::agents::PlayerKind;

/// Tic-tac-toe against the computer (or a friend) in the terminal.
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with easy, medium and hard computer players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Seed for the computer players' random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play a single game between the two players and exit, e.g. `--start user hard`
    #[arg(long, num_args = 2, value_names = ["PLAYER1", "PLAYER2"])]
    pub start: Option<Vec<PlayerKind>>,

    /// Don't print the board after every move
    #[arg(short, long)]
    pub quiet: bool,
}

/// What a game needs to know from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub seed: Option<u64>,
    pub show_board: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            seed: None,
            show_board: true,
        }
    }
}

impl Settings {
    /// Settings for the `n`th game of a session, so that seeded sessions don't replay the same
    /// game over and over.
    pub fn for_game(&self, n: u64) -> Settings {
        Settings {
            seed: self.seed.map(|s| s.wrapping_add(n.wrapping_mul(2))),
            ..*self
        }
    }
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            seed: self.seed,
            show_board: !self.quiet,
        }
    }

    /// The two players of `--start`, if given.
    pub fn start_players(&self) -> Option<(PlayerKind, PlayerKind)> {
        match self.start.as_deref() {
            Some(&[p1, p2]) => Some((p1, p2)),
            _ => None,
        }
    }
}

#[test]
fn test_parse_cli() {
    let cli = Cli::try_parse_from(["tictactoe", "--seed", "9", "--start", "user", "hard", "-q"])
        .unwrap();
    assert_eq!(
        cli.settings(),
        Settings {
            seed: Some(9),
            show_board: false
        }
    );
    assert_eq!(
        cli.start_players(),
        Some((PlayerKind::User, PlayerKind::Hard))
    );

    let cli = Cli::try_parse_from(["tictactoe"]).unwrap();
    assert_eq!(cli.settings(), Settings::default());
    assert_eq!(cli.start_players(), None);

    assert!(Cli::try_parse_from(["tictactoe", "--start", "user"]).is_err());
    assert!(Cli::try_parse_from(["tictactoe", "--start", "user", "expert"]).is_err());
}

#[test]
fn test_settings_for_game() {
    let settings = Settings {
        seed: Some(10),
        show_board: true,
    };
    assert_eq!(settings.for_game(0), settings);
    assert_eq!(settings.for_game(3).seed, Some(16));
    assert_eq!(Settings::default().for_game(5).seed, None);
}
