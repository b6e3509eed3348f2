/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use thiserror::Error;

use crate::{Cell, Move, Side};

/// Why a [`Move`] was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalReason {
    /// The piece being moved belongs to the side that is not on move.
    WrongSide,

    /// The move is not among the legal moves of the position.
    NotLegal,

    /// A capture chain is in progress and the move does not continue it with the same piece.
    ChainPiece,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongSide => write!(f, "that piece belongs to the other side"),
            Self::NotLegal => write!(f, "not a legal move in this position"),
            Self::ChainPiece => write!(f, "the capturing piece must keep capturing"),
        }
    }
}

/// Errors that can occur when interacting with a [`crate::Game`].
///
/// None of these are fatal: the caller is expected to re-prompt on a rejected selection,
/// and to end the game on [`GameError::NoLegalMoves`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A move broke the rules of the game.
    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: IllegalReason },

    /// A piece of the side not on move was selected.
    #[error(
        "Cannot select {cell}: the piece there belongs to {}, but it is {}'s turn",
        .owner.name(),
        .to_move.name()
    )]
    WrongSelection {
        cell: Cell,
        owner: Side,
        to_move: Side,
    },

    /// A move was requested for a side that is not on move.
    #[error("It is not {}'s turn", .0.name())]
    NotOnMove(Side),

    /// No piece stands on the selected origin.
    #[error("No piece at {0}")]
    EmptySelection(Cell),

    /// The side to move has no legal moves, so the game is over.
    #[error("{} has no legal moves", .0.name())]
    NoLegalMoves(Side),

    /// A cell lies outside the board.
    #[error("Cell {0} is outside of the board")]
    InvalidCoordinates(Cell),

    /// A ruleset was configured with a board it cannot be played on.
    #[error("Unsupported board dimensions {rows}x{cols}")]
    UnsupportedDimensions { rows: u8, cols: u8 },
}

/// Result type alias for game operations.
pub type GameResult<T> = Result<T, GameError>;
