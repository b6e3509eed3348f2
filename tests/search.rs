/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use duel::{
    ai_move, best_move, Cell, Checkers, Difficulty, Game, GameError, GameStatus, LineGame,
    Ruleset, SearchConfig, Side,
};
use rand::{rngs::StdRng, SeedableRng};

/// Plays a whole game between two difficulty levels, returning how it ended.
fn duel<R: Ruleset>(
    mut game: Game<R>,
    x: Difficulty,
    o: Difficulty,
    seed: u64,
    max_plies: usize,
) -> GameStatus {
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..max_plies {
        if game.status().is_over() {
            break;
        }

        let side = game.side_to_move();
        let difficulty = match side {
            Side::X => x,
            Side::O => o,
        };

        let mv = ai_move(&game, side, difficulty, &mut rng).unwrap();
        game = game.make_move(mv).unwrap();
    }

    game.status()
}

#[test]
fn test_completes_the_middle_column() {
    let game = Game::from_layout(LineGame::TIC_TAC_TOE, "xox/xo./... o").unwrap();

    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mv = best_move(&game, Side::O, SearchConfig::default(), &mut rng).unwrap();
        assert_eq!(mv.to(), Cell::new(2, 1));

        let next = game.make_move(mv).unwrap();
        assert_eq!(next.status(), GameStatus::Won(Side::O));
    }
}

#[test]
fn test_finished_board_has_no_best_move() {
    let game = Game::from_layout(LineGame::TIC_TAC_TOE, "xox/xo./.o. x").unwrap();
    assert_eq!(game.status(), GameStatus::Won(Side::O));

    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        best_move(&game, Side::X, SearchConfig::default(), &mut rng),
        Err(GameError::NoLegalMoves(Side::X))
    );

    // Same board with O on move, as if it had to play on after winning
    let game = Game::from_layout(LineGame::TIC_TAC_TOE, "xox/xo./.o. o").unwrap();
    assert_eq!(game.status(), GameStatus::Won(Side::O));
    assert_eq!(
        best_move(&game, Side::O, SearchConfig::default(), &mut rng),
        Err(GameError::NoLegalMoves(Side::O))
    );
}

#[test]
fn test_blocks_two_in_a_row() {
    let game = Game::from_layout(LineGame::TIC_TAC_TOE, "xx./.o./... o").unwrap();

    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mv = ai_move(&game, Side::O, Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(mv.to(), Cell::new(0, 2));
    }
}

#[test]
fn test_prefers_winning_over_blocking() {
    // Both sides have two in a row; O should finish its own line
    let game = Game::from_layout(LineGame::TIC_TAC_TOE, "xx./oo./x.. o").unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let mv = ai_move(&game, Side::O, Difficulty::Medium, &mut rng).unwrap();
    assert_eq!(mv.to(), Cell::new(1, 2));
}

#[test]
fn test_hard_never_loses_at_tic_tac_toe() {
    let game = Game::new(LineGame::TIC_TAC_TOE);

    for seed in 0..8 {
        let status = duel(game, Difficulty::Hard, Difficulty::Easy, seed, 9);
        assert_ne!(status, GameStatus::Won(Side::O), "seed {seed}");

        let status = duel(game, Difficulty::Easy, Difficulty::Hard, seed, 9);
        assert_ne!(status, GameStatus::Won(Side::X), "seed {seed}");
    }
}

#[test]
fn test_hard_against_hard_is_a_draw() {
    let game = Game::new(LineGame::TIC_TAC_TOE);

    for seed in 0..3 {
        let status = duel(game, Difficulty::Hard, Difficulty::Hard, seed, 9);
        assert_eq!(status, GameStatus::Draw, "seed {seed}");
    }
}

#[test]
fn test_hard_beats_random_checkers() {
    let game = Game::new(Checkers::new(6).unwrap());

    for seed in 0..2 {
        let status = duel(game, Difficulty::Hard, Difficulty::Easy, seed, 200);
        assert_ne!(status, GameStatus::Won(Side::O), "seed {seed}");
    }
}

#[test]
fn test_seeded_moves_repeat() {
    let game = Game::new(Checkers::STANDARD);

    let first = ai_move(&game, Side::X, Difficulty::Medium, &mut StdRng::seed_from_u64(99));
    let second = ai_move(&game, Side::X, Difficulty::Medium, &mut StdRng::seed_from_u64(99));
    assert_eq!(first, second);
}

#[test]
fn test_search_on_another_thread() {
    let game = Game::new(Checkers::STANDARD);

    let handle = std::thread::spawn(move || {
        let mut rng = StdRng::seed_from_u64(4);
        ai_move(&game, Side::X, Difficulty::Hard, &mut rng)
    });

    let mv = handle.join().unwrap().unwrap();
    assert!(game.is_legal(mv));
}
