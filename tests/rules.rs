/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use duel::{
    best_move, Cell, Checkers, Game, GameError, GameStatus, IllegalReason, LineGame, Move,
    Ruleset, SearchConfig, Side,
};
use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

const FORCED_CAPTURE: &str =
    "......../......../......../......../...o..../..x...x./......../........ x";

const DOUBLE_JUMP: &str =
    ".......o/......../...o..../......../.o....../x...x.../......../........ x";

/// Plays random legal moves from `game`, calling `check` on every transition.
fn random_playout<R: Ruleset>(
    mut game: Game<R>,
    seed: u64,
    max_plies: usize,
    mut check: impl FnMut(&Game<R>, Move, &Game<R>),
) {
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..max_plies {
        let moves = game.legal_moves();
        let Some(&mv) = moves.choose(&mut rng) else {
            assert!(game.status().is_over(), "no moves in ongoing game {game:?}");
            return;
        };

        let next = game.make_move(mv).unwrap();
        check(&game, mv, &next);
        game = next;
    }
}

#[test]
fn test_forced_capture_is_the_only_move() {
    let game = Game::from_layout(Checkers::STANDARD, FORCED_CAPTURE).unwrap();
    let capture = Move::capture(Cell::new(5, 2), Cell::new(3, 4), Cell::new(4, 3), false);

    assert_eq!(game.legal_moves().as_slice(), &[capture]);

    // The other piece has nowhere to go while the capture is pending
    assert!(game.legal_destinations(Cell::new(5, 6)).unwrap().is_empty());
    assert_eq!(
        game.legal_destinations(Cell::new(5, 2)).unwrap(),
        vec![Cell::new(3, 4)]
    );

    let quiet = Move::step(Cell::new(5, 6), Cell::new(4, 5), false);
    assert_eq!(
        game.make_move(quiet),
        Err(GameError::IllegalMove {
            mv: quiet,
            reason: IllegalReason::NotLegal
        })
    );
}

#[test]
fn test_chain_capture_keeps_the_turn() {
    let game = Game::from_layout(Checkers::STANDARD, DOUBLE_JUMP).unwrap();

    let first = game.find_move(Some(Cell::new(5, 0)), Cell::new(3, 2)).unwrap();
    assert!(first.is_capture());

    let mid = game.make_move(first).unwrap();
    assert_eq!(mid.side_to_move(), Side::X);
    assert_eq!(mid.chain(), Some(Cell::new(3, 2)));
    assert_eq!(mid.count(Side::O), 2);

    // Only the chaining piece may move, and only to capture again
    let second = Move::capture(Cell::new(3, 2), Cell::new(1, 4), Cell::new(2, 3), false);
    assert_eq!(mid.legal_moves().as_slice(), &[second]);
    assert_eq!(mid.legal_continuations(Cell::new(3, 2)).as_slice(), &[second]);
    assert!(mid.legal_continuations(Cell::new(5, 4)).is_empty());

    let err = mid
        .find_move(Some(Cell::new(5, 4)), Cell::new(4, 5))
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::IllegalMove {
            reason: IllegalReason::ChainPiece,
            ..
        }
    ));

    let done = mid.make_move(second).unwrap();
    assert_eq!(done.side_to_move(), Side::O);
    assert_eq!(done.chain(), None);
    assert_eq!(done.count(Side::O), 1);
    assert_eq!(done.status(), GameStatus::Ongoing);
}

#[test]
fn test_no_continuations_outside_a_chain() {
    let game = Game::from_layout(Checkers::STANDARD, FORCED_CAPTURE).unwrap();
    assert!(game.legal_continuations(Cell::new(5, 2)).is_empty());
}

#[test]
fn test_reaching_the_far_row_promotes() {
    let layout = "......../..x...../......../......../......../......../.o....../........ x";
    let game = Game::from_layout(Checkers::STANDARD, layout).unwrap();

    let mv = game.find_move(Some(Cell::new(1, 2)), Cell::new(0, 1)).unwrap();
    assert!(mv.promotes());

    let game = game.make_move(mv).unwrap();
    let king = game.piece_at(Cell::new(0, 1)).unwrap();
    assert_eq!(king.side(), Side::X);
    assert!(king.is_promoted());

    // O promotes too, then the new king may move backwards
    let mv = game.find_move(Some(Cell::new(6, 1)), Cell::new(7, 2)).unwrap();
    assert!(mv.promotes());

    let game = game.make_move(mv).unwrap();
    assert!(game.piece_at(Cell::new(7, 2)).unwrap().is_promoted());
    assert_eq!(
        game.legal_destinations(Cell::new(0, 1)).unwrap(),
        vec![Cell::new(1, 0), Cell::new(1, 2)]
    );
}

#[test]
fn test_new_king_keeps_capturing() {
    let layout = "......../..o.o.../.x....../......../......../......../......../......o. x";
    let game = Game::from_layout(Checkers::STANDARD, layout).unwrap();

    let mv = game.find_move(Some(Cell::new(2, 1)), Cell::new(0, 3)).unwrap();
    assert!(mv.is_capture());
    assert!(mv.promotes());

    // Promotion happens first, so the new king can jump backwards over 1,4
    let game = game.make_move(mv).unwrap();
    assert!(game.piece_at(Cell::new(0, 3)).unwrap().is_promoted());
    assert_eq!(game.side_to_move(), Side::X);
    assert_eq!(game.chain(), Some(Cell::new(0, 3)));
    assert_eq!(
        game.legal_moves().as_slice(),
        &[Move::capture(Cell::new(0, 3), Cell::new(2, 5), Cell::new(1, 4), false)]
    );
}

#[test]
fn test_kings_move_backwards() {
    let layout = "......../..X...../......../......../......../......../.o....../........ x";
    let game = Game::from_layout(Checkers::STANDARD, layout).unwrap();

    assert_eq!(
        game.legal_destinations(Cell::new(1, 2)).unwrap(),
        vec![Cell::new(0, 1), Cell::new(0, 3), Cell::new(2, 1), Cell::new(2, 3)]
    );
}

#[test]
fn test_selection_errors() {
    let game = Game::new(Checkers::STANDARD);

    assert_eq!(
        game.legal_destinations(Cell::new(4, 1)),
        Err(GameError::EmptySelection(Cell::new(4, 1)))
    );
    assert_eq!(
        game.legal_destinations(Cell::new(8, 0)),
        Err(GameError::InvalidCoordinates(Cell::new(8, 0)))
    );
    assert_eq!(
        game.legal_destinations(Cell::new(2, 1)),
        Err(GameError::WrongSelection {
            cell: Cell::new(2, 1),
            owner: Side::O,
            to_move: Side::X
        })
    );

    let mv = Move::step(Cell::new(2, 1), Cell::new(3, 0), false);
    assert_eq!(
        game.make_move(mv),
        Err(GameError::IllegalMove {
            mv,
            reason: IllegalReason::WrongSide
        })
    );
}

#[test]
fn test_occupied_placement() {
    let game = Game::from_layout(LineGame::TIC_TAC_TOE, "x../.../... o").unwrap();
    assert!(matches!(
        game.make_move(Move::place(Cell::new(0, 0))),
        Err(GameError::IllegalMove {
            reason: IllegalReason::NotLegal,
            ..
        })
    ));
    assert!(game.make_move(Move::place(Cell::new(1, 1))).is_ok());
}

#[test]
fn test_no_moves_after_the_game_ends() {
    let game = Game::from_layout(LineGame::TIC_TAC_TOE, "xxx/oo./... o").unwrap();
    assert_eq!(game.status(), GameStatus::Won(Side::X));
    assert!(game.legal_moves().is_empty());
    assert_eq!(
        game.make_move(Move::place(Cell::new(1, 2))),
        Err(GameError::NoLegalMoves(Side::O))
    );
}

#[test]
fn test_no_moves_once_the_opponent_is_gone() {
    let layout = "......../......../......../......../......../..x...../......../........ x";
    let game = Game::from_layout(Checkers::STANDARD, layout).unwrap();
    assert_eq!(game.status(), GameStatus::Won(Side::X));
    assert!(game.legal_moves().is_empty());
    assert_eq!(
        game.legal_destinations(Cell::new(5, 2)).unwrap(),
        Vec::<Cell>::new()
    );

    assert_eq!(
        game.make_move(Move::step(Cell::new(5, 2), Cell::new(4, 1), false)),
        Err(GameError::NoLegalMoves(Side::X))
    );

    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        best_move(&game, Side::X, SearchConfig::default(), &mut rng),
        Err(GameError::NoLegalMoves(Side::X))
    );
}

#[test]
fn test_checkers_playouts_keep_invariants() {
    for size in [6, 8, 10] {
        let rules = Checkers::new(size).unwrap();

        for seed in 0..10 {
            random_playout(Game::new(rules), seed, 300, |before, mv, after| {
                let mover = before.side_to_move();
                let legal = before.legal_moves();

                // Captures are mandatory
                if legal.iter().any(Move::is_capture) {
                    assert!(mv.is_capture(), "{mv} played over a capture in {before:?}");
                }

                // Pieces are never created
                for side in Side::all() {
                    assert!(after.count(side) <= before.count(side));
                }
                if mv.is_capture() {
                    assert_eq!(after.count(mover.opponent()), before.count(mover.opponent()) - 1);
                }

                // Promotion is never undone
                let moved = after.piece_at(mv.to()).unwrap();
                let was_promoted = mv
                    .from()
                    .and_then(|from| before.piece_at(from))
                    .is_some_and(|piece| piece.is_promoted());
                assert_eq!(moved.is_promoted(), was_promoted || mv.promotes());

                // A chain continues exactly when the moved piece can capture again
                if after.is_turn_of(mover) {
                    assert!(mv.is_capture());
                    assert_eq!(after.chain(), Some(mv.to()));
                    assert!(after.legal_moves().iter().all(|m| m.from() == Some(mv.to())));
                } else {
                    assert_eq!(after.chain(), None);
                }

                assert_eq!(after.status(), after.status());
            });
        }
    }
}

#[test]
fn test_line_playouts_end_properly() {
    for rules in [LineGame::TIC_TAC_TOE, LineGame::new(4, 4, 3).unwrap()] {
        for seed in 0..20 {
            random_playout(Game::new(rules), seed, 100, |before, mv, after| {
                assert!(mv.is_placement());
                assert!(before.is_vacant(mv.to()));
                assert_eq!(after.piece_at(mv.to()).map(|p| p.side()), Some(before.side_to_move()));
                assert_eq!(after.side_to_move(), before.side_to_move().opponent());

                if let GameStatus::Won(side) = after.status() {
                    assert_eq!(side, before.side_to_move());
                }
            });
        }
    }
}
