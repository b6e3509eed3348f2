/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref};

use anyhow::{bail, Result};
use tracing::trace;

use crate::{
    Board, Cell, GameError, GameResult, GameStatus, IllegalReason, Move, MoveList, Ruleset,
    Score, Side,
};

/// A game in progress: a [`Board`] together with the [`Ruleset`] it is played by.
///
/// Like [`Board`], a [`Game`] is a plain value.
/// [`Game::make_move`] and [`Game::with_move_made`] return a new [`Game`] and leave `self` untouched,
/// so the holder of a [`Game`] can hand out copies freely (to a search running on another thread, for example).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Game<R: Ruleset> {
    board: Board,
    rules: R,
}

impl<R: Ruleset> Game<R> {
    /// Starts a new game from the canonical starting position of `rules`.
    ///
    /// # Example
    /// ```
    /// # use duel::{Checkers, Game, GameStatus, Side};
    /// let game = Game::new(Checkers::STANDARD);
    /// assert_eq!(game.side_to_move(), Side::X);
    /// assert_eq!(game.status(), GameStatus::Ongoing);
    /// assert_eq!(game.legal_moves().len(), 7);
    /// ```
    #[inline(always)]
    pub fn new(rules: R) -> Self {
        Self {
            board: rules.initial_board(),
            rules,
        }
    }

    /// Sets up a position for `rules` from the layout notation of [`Board::from_layout`].
    ///
    /// Fails if the layout does not fit the ruleset's board, or puts a piece on an unplayable cell.
    ///
    /// # Example
    /// ```
    /// # use duel::{Game, GameStatus, LineGame, Side};
    /// let game = Game::from_layout(LineGame::TIC_TAC_TOE, "xxx/oo./... o").unwrap();
    /// assert_eq!(game.status(), GameStatus::Won(Side::X));
    ///
    /// assert!(Game::from_layout(LineGame::TIC_TAC_TOE, "xx/oo o").is_err());
    /// ```
    pub fn from_layout(rules: R, layout: &str) -> Result<Self> {
        let board = Board::from_layout(layout)?;

        if board.rows() != rules.rows() || board.cols() != rules.cols() {
            bail!(
                "Layout is {}x{}, but {:?} is played on a {}x{} board",
                board.rows(),
                board.cols(),
                rules.kind(),
                rules.rows(),
                rules.cols()
            );
        }

        if let Some((cell, piece)) = board.pieces().find(|(cell, _)| !rules.is_playable(*cell)) {
            bail!("{piece:?} stands on unplayable cell {cell}");
        }

        Ok(Self { board, rules })
    }

    #[inline(always)]
    pub const fn rules(&self) -> &R {
        &self.rules
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Fetches the outcome of this game so far.
    ///
    /// Calling this any number of times on the same [`Game`] always gives the same answer.
    #[inline(always)]
    pub fn status(&self) -> GameStatus {
        self.rules.status(&self.board)
    }

    /// Generates every legal move for the side to move.
    ///
    /// * While a capture chain is in progress, only the chaining piece's captures are legal.
    /// * Otherwise, if any capture is available, only captures are legal.
    /// * A finished game has no legal moves.
    pub fn legal_moves(&self) -> MoveList {
        if let Some(cell) = self.board.chain() {
            return self.legal_continuations(cell);
        }

        let mut moves = MoveList::new();
        self.rules.generate_moves(&self.board, &mut moves);

        if moves.iter().any(Move::is_capture) {
            moves.retain(|mv| mv.is_capture());
        }

        moves
    }

    /// Generates the captures that continue the chain of the piece on `cell`.
    ///
    /// Empty unless `cell` holds the piece currently in the middle of a capture chain.
    pub fn legal_continuations(&self, cell: Cell) -> MoveList {
        let mut moves = MoveList::new();

        if self.board.chain() == Some(cell) {
            self.rules.moves_from(&self.board, cell, &mut moves);
            moves.retain(|mv| mv.is_capture());
        }

        moves
    }

    /// Generates the legal moves that start from `cell`.
    ///
    /// In placement games, the (only) legal move that starts from `cell` is placing a mark on it.
    fn legal_moves_from(&self, cell: Cell) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|mv| match mv.from() {
            Some(from) => from == cell,
            None => mv.to() == cell,
        });
        moves
    }

    /// Fetches every cell the user may pick after selecting `cell`, for highlighting.
    ///
    /// # Errors
    /// * [`GameError::InvalidCoordinates`] if `cell` is off the board.
    /// * [`GameError::EmptySelection`] if a movement game has no piece on `cell`.
    /// * [`GameError::WrongSelection`] if the piece on `cell` is not the side to move's.
    ///
    /// # Example
    /// ```
    /// # use duel::{Cell, Checkers, Game};
    /// let game = Game::new(Checkers::STANDARD);
    /// let targets = game.legal_destinations(Cell::new(5, 2)).unwrap();
    /// assert_eq!(targets, vec![Cell::new(4, 1), Cell::new(4, 3)]);
    ///
    /// assert!(game.legal_destinations(Cell::new(4, 1)).is_err());
    /// ```
    pub fn legal_destinations(&self, cell: Cell) -> GameResult<Vec<Cell>> {
        self.check_selection(cell)?;

        let mut targets = self
            .legal_moves_from(cell)
            .into_iter()
            .map(|mv| mv.to())
            .collect::<Vec<_>>();
        targets.sort();

        Ok(targets)
    }

    /// Checks that `cell` may be selected as the origin of a move.
    fn check_selection(&self, cell: Cell) -> GameResult<()> {
        self.board.check_bounds(cell)?;

        match self.board.piece_at(cell) {
            Some(piece) if piece.side() != self.side_to_move() => Err(GameError::WrongSelection {
                cell,
                owner: piece.side(),
                to_move: self.side_to_move(),
            }),
            Some(_) => Ok(()),
            None if self.rules.is_placement() => Ok(()),
            None => Err(GameError::EmptySelection(cell)),
        }
    }

    /// Looks up the legal move a user means by selecting `from` and then `to`.
    ///
    /// Placement games ignore `from`.
    pub fn find_move(&self, from: Option<Cell>, to: Cell) -> GameResult<Move> {
        self.board.check_bounds(to)?;
        let from = if self.rules.is_placement() { None } else { from };

        if let Some(from) = from {
            self.check_selection(from)?;
        }

        let legal = self.legal_moves();
        if legal.is_empty() {
            return Err(GameError::NoLegalMoves(self.side_to_move()));
        }

        if let Some(mv) = legal.iter().find(|mv| mv.connects(from, to)) {
            return Ok(*mv);
        }

        // Describe the rejected move as precisely as the input allows
        let mv = match from {
            Some(from) => match from.midpoint(to) {
                Some(over) if from.row().abs_diff(to.row()) == 2 => {
                    Move::capture(from, to, over, false)
                }
                _ => Move::step(from, to, false),
            },
            None => Move::place(to),
        };

        Err(self.rejection(mv))
    }

    /// Explains why `mv`, which is not in the legal move list, was rejected.
    fn rejection(&self, mv: Move) -> GameError {
        let reason = match self.board.chain() {
            Some(chain) if mv.from() != Some(chain) => IllegalReason::ChainPiece,
            _ => IllegalReason::NotLegal,
        };

        GameError::IllegalMove { mv, reason }
    }

    /// Returns `true` if `mv` is legal in this position.
    #[inline(always)]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Checks an untrusted `mv` against the rules, explaining why it is illegal if it is.
    pub fn check_legality_of(&self, mv: Move) -> GameResult<()> {
        self.board.check_bounds(mv.to())?;

        if let Some(from) = mv.from() {
            self.board.check_bounds(from)?;

            match self.board.piece_at(from) {
                None => return Err(GameError::EmptySelection(from)),
                Some(piece) if piece.side() != self.side_to_move() => {
                    return Err(GameError::IllegalMove {
                        mv,
                        reason: IllegalReason::WrongSide,
                    })
                }
                Some(_) => {}
            }
        }

        let legal = self.legal_moves();
        if legal.is_empty() {
            return Err(GameError::NoLegalMoves(self.side_to_move()));
        }

        if legal.contains(&mv) {
            Ok(())
        } else {
            Err(self.rejection(mv))
        }
    }

    /// Applies an untrusted `mv`, returning the resulting game.
    ///
    /// The move is checked with [`Game::check_legality_of`] first; `self` is never modified.
    ///
    /// # Example
    /// ```
    /// # use duel::{Cell, Checkers, Game, GameError, Move};
    /// let game = Game::new(Checkers::STANDARD);
    ///
    /// let mv = Move::step(Cell::new(5, 2), Cell::new(4, 3), false);
    /// let next = game.make_move(mv).unwrap();
    /// assert_ne!(next, game);
    ///
    /// // Moving backwards is not allowed
    /// let bad = Move::step(Cell::new(4, 3), Cell::new(5, 2), false);
    /// assert!(matches!(next.make_move(bad), Err(GameError::IllegalMove { .. })));
    /// ```
    pub fn make_move(&self, mv: Move) -> GameResult<Self> {
        if let Err(err) = self.check_legality_of(mv) {
            trace!("rejected {mv} on {:?}: {err}", self.board);
            return Err(err);
        }

        Ok(self.with_move_made(mv))
    }

    /// Applies `mv` without checking its legality, returning the resulting game.
    ///
    /// `mv` must have come from [`Game::legal_moves`] of this same game.
    ///
    /// If `mv` is a capture and the moved piece can capture again, the same side stays on move
    /// and the chain is pinned to that piece. Otherwise the turn passes.
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut board = self.board;
        self.rules.transition(&mut board, &mv);

        // Promotion already happened above, so a freshly promoted piece may chain backwards
        let continues = mv.is_capture() && {
            let mut further = MoveList::new();
            self.rules.moves_from(&board, mv.to(), &mut further);
            further.iter().any(Move::is_capture)
        };

        if continues {
            board.set_chain(Some(mv.to()));
        } else {
            board.set_chain(None);
            board.toggle_side_to_move();
        }

        Self {
            board,
            rules: self.rules,
        }
    }

    /// Static evaluation of this position from the side to move's perspective.
    #[inline(always)]
    pub fn evaluate(&self, positional_weight: u8) -> Score {
        self.rules
            .evaluate(&self.board, self.side_to_move(), positional_weight)
    }

    /// Returns `true` if `side` is the side to move.
    #[inline(always)]
    pub fn is_turn_of(&self, side: Side) -> bool {
        self.side_to_move() == side
    }
}

impl<R: Ruleset + Default> Default for Game<R> {
    #[inline(always)]
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: Ruleset> Deref for Game<R> {
    type Target = Board;

    /// A [`Game`] immutably dereferences to its [`Board`], for simplicity.
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

impl<R: Ruleset> fmt::Display for Game<R> {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl<R: Ruleset> fmt::Debug for Game<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("rules", &self.rules)
            .field("board", &self.board)
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Checkers, LineGame};

    #[test]
    fn test_layout_must_fit_the_rules() {
        assert!(Game::from_layout(LineGame::TIC_TAC_TOE, "..../..../..../.... x").is_err());

        // Checkers pieces only stand on dark cells
        assert!(Game::from_layout(Checkers::new(4).unwrap(), "x.../..../..../.... x").is_err());
        assert!(Game::from_layout(Checkers::new(4).unwrap(), ".x../..../..../o... x").is_ok());
    }

    #[test]
    fn test_moves_do_not_touch_the_original() {
        let game = Game::new(Checkers::STANDARD);
        let before = game.board().to_layout();

        for mv in game.legal_moves() {
            let next = game.with_move_made(mv);
            assert_eq!(next.side_to_move(), Side::O);
        }

        assert_eq!(game.board().to_layout(), before);
    }

    #[test]
    fn test_placement_ignores_origin() {
        let game = Game::new(LineGame::TIC_TAC_TOE);
        let mv = game.find_move(Some(Cell::new(2, 2)), Cell::new(1, 1)).unwrap();
        assert_eq!(mv, Move::place(Cell::new(1, 1)));
        assert_eq!(
            game.legal_destinations(Cell::new(1, 1)).unwrap(),
            vec![Cell::new(1, 1)]
        );
    }
}
