use othello_engine::movegen::{enumerate_legal_moves, find_flip_directions};
use othello_engine::{
    CellState, CpuConfig, CpuPlayer, Difficulty, Game, Policy, Position, Side, TurnRecord, Winner,
};

fn quick_config(seed: u64) -> CpuConfig {
    CpuConfig {
        hard: Policy::Minimax {
            depth: 2,
            exact_solve_empties: 6,
        },
        ..CpuConfig::default().with_seed(seed)
    }
}

fn play_out(seed: u64, black: Difficulty, white: Difficulty) -> Game {
    let mut game = Game::new(Box::new(CpuPlayer::new(quick_config(seed))));

    while let Some(side) = game.side_to_move() {
        assert!(!game.legal_moves().is_empty(), "{side} is awaiting with no moves");

        let (black_before, white_before) = game.disc_counts();
        let difficulty = match side {
            Side::Black => black,
            Side::White => white,
        };
        let result = game.play_cpu_turn(difficulty).unwrap();
        let flipped = result.applied_flips.len() as u8;
        let (black_after, white_after) = game.disc_counts();

        assert_eq!(result.mover, side);
        assert!(flipped > 0);
        assert!(result.applied_flips.iter().all(|&(_, c)| c == CellState::from(side)));
        match side {
            Side::Black => {
                assert_eq!(black_after, black_before + 1 + flipped);
                assert_eq!(white_after, white_before - flipped);
            }
            Side::White => {
                assert_eq!(white_after, white_before + 1 + flipped);
                assert_eq!(black_after, black_before - flipped);
            }
        }
        assert_eq!(game.disc_counts(), game.board().disc_counts());
    }

    game
}

#[test]
fn seeded_games_run_to_a_consistent_finish() {
    for seed in 0..4 {
        let game = play_out(seed, Difficulty::Easy, Difficulty::Normal);
        let (black, white) = game.disc_counts();

        assert!(game.is_terminal());
        assert_eq!(game.consecutive_passes(), 2);
        assert_eq!(game.winner(), Some(Winner::from_counts(black, white)));
        assert!(enumerate_legal_moves(game.board(), Side::Black).is_empty());
        assert!(enumerate_legal_moves(game.board(), Side::White).is_empty());
    }
}

#[test]
fn same_seed_replays_the_same_game() {
    let first = play_out(99, Difficulty::Normal, Difficulty::Hard);
    let second = play_out(99, Difficulty::Normal, Difficulty::Hard);

    assert_eq!(first.history(), second.history());
    assert_eq!(first.board(), second.board());
}

#[test]
fn history_ends_with_two_passes() {
    let game = play_out(5, Difficulty::Hard, Difficulty::Easy);
    let history = game.history();

    assert!(matches!(
        &history[history.len() - 2..],
        [TurnRecord::Pass { .. }, TurnRecord::Pass { .. }]
    ));
}

#[test]
fn legal_set_matches_per_square_flip_directions() {
    let mut game = Game::new(Box::new(CpuPlayer::new(quick_config(17))));

    while let Some(side) = game.side_to_move() {
        let board = *game.board();
        let expected: Vec<Position> = (0..8u8)
            .flat_map(|row| (0..8u8).map(move |col| Position { row, col }))
            .filter(|&pos| {
                board.get(pos) == Ok(CellState::Empty)
                    && !find_flip_directions(&board, side, pos).is_empty()
            })
            .collect();

        assert_eq!(game.legal_moves(), expected);
        game.play_cpu_turn(Difficulty::Easy).unwrap();
    }
}

#[test]
fn simulating_on_a_copy_leaves_the_game_board_alone() {
    let game = Game::new(Box::new(CpuPlayer::default()));
    let before = *game.board();

    for candidate in game.candidates() {
        let mut copy = *game.board();
        othello_engine::apply::apply_move(
            &mut copy,
            Side::Black,
            candidate.position,
            &candidate.flip_directions,
        )
        .unwrap();
        assert_ne!(copy, before);
    }

    assert_eq!(*game.board(), before);
}
