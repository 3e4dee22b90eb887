use std::io;

use tictactoe::{
    build_agent, play_game, GameError, MarkAllocator, PlayerKind, Settings, Sign, TicTacToe,
};

fn quiet(seed: u64) -> Settings {
    Settings {
        seed: Some(seed),
        show_board: false,
    }
}

#[test]
fn hard_against_hard_is_a_draw() {
    let mut marks = MarkAllocator::new();
    let winner = play_game(
        (PlayerKind::Hard, PlayerKind::Hard),
        &mut marks,
        &quiet(0),
        io::empty(),
        io::sink(),
    )
    .unwrap();
    assert_eq!(winner, None);
}

#[test]
fn hard_never_loses_to_weaker_bots() {
    // hard moving second has the shorter searches, so it gets most of the games
    for seed in 0..6 {
        for weak in [PlayerKind::Easy, PlayerKind::Medium].iter() {
            let mut marks = MarkAllocator::new();
            let winner = play_game(
                (*weak, PlayerKind::Hard),
                &mut marks,
                &quiet(seed),
                io::empty(),
                io::sink(),
            )
            .unwrap();
            assert_ne!(winner, Some(Sign::X), "{} beat hard with seed {}", weak, seed);
        }
    }

    for weak in [PlayerKind::Easy, PlayerKind::Medium].iter() {
        let mut marks = MarkAllocator::new();
        let winner = play_game(
            (PlayerKind::Hard, *weak),
            &mut marks,
            &quiet(11),
            io::empty(),
            io::sink(),
        )
        .unwrap();
        assert_ne!(winner, Some(Sign::O), "{} beat hard", weak);
    }
}

#[test]
fn scripted_human_against_hard() {
    // bad input first, then the same cell twice, then every cell in order: the human always
    // finds a free cell eventually
    let script = "a b\n0 4\n1 1\n1 1\n1 2\n1 3\n2 1\n2 2\n2 3\n3 1\n3 2\n3 3\n";
    let mut output = Vec::new();
    let mut marks = MarkAllocator::new();

    let winner = play_game(
        (PlayerKind::User, PlayerKind::Hard),
        &mut marks,
        &Settings::default(),
        script.as_bytes(),
        &mut output,
    )
    .unwrap();
    assert_ne!(winner, Some(Sign::X));

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("You should enter numbers!"));
    assert!(printed.contains("Coordinates should be from 1 to 3!"));
    assert!(printed.contains("This cell is occupied! Choose another one!"));
    assert!(printed.contains("Making move level \"hard\""));
    assert!(printed.starts_with("---------\n|       |\n|       |\n|       |\n---------\n"));
}

#[test]
fn human_running_out_of_input_ends_the_game() {
    let mut marks = MarkAllocator::new();
    let result = play_game(
        (PlayerKind::Easy, PlayerKind::User),
        &mut marks,
        &quiet(1),
        "2 2\n".as_bytes(),
        io::sink(),
    );
    assert!(matches!(result, Err(GameError::InputClosed)));
}

#[test]
fn marks_must_be_reset_between_games() {
    let mut marks = MarkAllocator::new();
    play_game(
        (PlayerKind::Easy, PlayerKind::Easy),
        &mut marks,
        &quiet(2),
        io::empty(),
        io::sink(),
    )
    .unwrap();

    let again = play_game(
        (PlayerKind::Easy, PlayerKind::Easy),
        &mut marks,
        &quiet(3),
        io::empty(),
        io::sink(),
    );
    assert!(matches!(again, Err(GameError::TooManyPlayers)));

    marks.reset();
    let first = build_agent(PlayerKind::Medium, &mut marks, Some(4)).unwrap();
    let second = build_agent(PlayerKind::Easy, &mut marks, Some(5)).unwrap();
    assert_eq!((first.sign(), second.sign()), (Sign::X, Sign::O));

    let mut game = TicTacToe::new(first, second, io::empty(), io::sink())
        .unwrap()
        .show_board(false);
    let winner = game.play().unwrap();
    assert!(game.board().evaluate().finished());
    assert_eq!(game.board().evaluate().winner(), winner);
}
