/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, hash::Hash};

use crate::{Board, Cell, Move, MoveList, Score, Side};

/// Checkers (English draughts) and its smaller/larger siblings.
mod checkers;

/// Tic-tac-toe and other "k in a row" placement games.
mod line;

pub use checkers::*;
pub use line::*;

/// Which family of games a [`Ruleset`] implements.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum GameKind {
    /// Pieces move diagonally, jump to capture, and are promoted on the far row.
    #[default]
    Checkers,

    /// Marks are placed on empty cells until one side completes a line.
    Line,
}

/// Whether a game is still going, and if not, how it ended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Won(Side),
    Draw,
}

impl GameStatus {
    /// Returns `true` if the game has ended.
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    /// The side that won, if any.
    #[inline(always)]
    pub const fn winner(&self) -> Option<Side> {
        match self {
            Self::Won(side) => Some(*side),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "in progress"),
            Self::Won(side) => write!(f, "{} wins", side.name()),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// Abstraction over the specific game being played.
///
/// A [`Ruleset`] only knows the mechanics of its game: the starting layout, how a single piece may
/// move, what a move does to the board, when the game is over and how good a position looks.
/// Everything shared by all games (mandatory capture, capture chains, turn order, validation
/// of untrusted moves and search) is implemented once in [`crate::Game`] and [`crate::Search`].
pub trait Ruleset
where
    Self: Copy + fmt::Debug + PartialEq + Eq + Hash + Send + Sync + 'static,
{
    /// Fetch the [`GameKind`] of this ruleset.
    fn kind(&self) -> GameKind;

    /// Number of rows on the board.
    fn rows(&self) -> u8;

    /// Number of columns on the board.
    fn cols(&self) -> u8;

    /// Returns `true` if pieces may stand on `cell`.
    #[inline(always)]
    fn is_playable(&self, cell: Cell) -> bool {
        let _ = cell;
        true
    }

    /// Returns `true` if moves in this game place new marks rather than move existing pieces.
    #[inline(always)]
    fn is_placement(&self) -> bool {
        false
    }

    /// The canonical starting position.
    fn initial_board(&self) -> Board;

    /// Appends every move the piece on `from` could make, ignoring mandatory capture.
    fn moves_from(&self, board: &Board, from: Cell, moves: &mut MoveList);

    /// Appends every move available to the side to move, ignoring mandatory capture.
    ///
    /// Implementations must append nothing once the game is over.
    #[inline(always)]
    fn generate_moves(&self, board: &Board, moves: &mut MoveList) {
        for (cell, _) in board.pieces_of(board.side_to_move()) {
            self.moves_from(board, cell, moves);
        }
    }

    /// Performs the mechanics of `mv` on `board`: relocating, capturing and promoting pieces.
    ///
    /// Turn order and capture chains are handled by the caller.
    fn transition(&self, board: &mut Board, mv: &Move);

    /// Determines whether `board` is a finished game.
    fn status(&self, board: &Board) -> GameStatus;

    /// Static evaluation of a non-terminal `board` from `side`'s perspective.
    ///
    /// `positional_weight` is a percentage in `[0, 100]` scaling every term that is not material.
    fn evaluate(&self, board: &Board, side: Side, positional_weight: u8) -> Score;

    /// How deep a strong search of `board` should go.
    ///
    /// Small games return the number of plies left until the board is full, so the whole tree is searched.
    fn deep_search_depth(&self, board: &Board) -> u8;
}
