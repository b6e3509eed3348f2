/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{Cell, MAX_CELLS};

/// Upper bound on the number of moves available in any position.
///
/// At most half the cells of the largest board hold pieces of one side,
/// and each of those pieces has at most four diagonal steps or jumps.
pub const MAX_NUM_MOVES: usize = MAX_CELLS * 2;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// A single atomic step made by one side.
///
/// Movement games (checkers) move a piece from an origin to a destination, possibly jumping over
/// (and capturing) an opponent's piece on the way.
/// Placement games (tic-tac-toe) have no origin; a mark is dropped onto the destination.
///
/// A turn may consist of several [`Move`]s when a capture chain is in progress.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Option<Cell>,
    to: Cell,
    captured: Option<Cell>,
    promotes: bool,
}

impl Move {
    /// Creates a non-capturing step from `from` to `to`.
    #[inline(always)]
    pub const fn step(from: Cell, to: Cell, promotes: bool) -> Self {
        Self {
            from: Some(from),
            to,
            captured: None,
            promotes,
        }
    }

    /// Creates a jump from `from` to `to` that removes the piece on `captured`.
    #[inline(always)]
    pub const fn capture(from: Cell, to: Cell, captured: Cell, promotes: bool) -> Self {
        Self {
            from: Some(from),
            to,
            captured: Some(captured),
            promotes,
        }
    }

    /// Creates a move that places a new mark on `to`.
    #[inline(always)]
    pub const fn place(to: Cell) -> Self {
        Self {
            from: None,
            to,
            captured: None,
            promotes: false,
        }
    }

    /// The cell the moving piece starts on, or `None` for a placement.
    #[inline(always)]
    pub const fn from(&self) -> Option<Cell> {
        self.from
    }

    #[inline(always)]
    pub const fn to(&self) -> Cell {
        self.to
    }

    /// The cell whose piece this move removes, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Cell> {
        self.captured
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns `true` if the moving piece is promoted on arrival.
    #[inline(always)]
    pub const fn promotes(&self) -> bool {
        self.promotes
    }

    #[inline(always)]
    pub const fn is_placement(&self) -> bool {
        self.from.is_none()
    }

    /// Returns `true` if this move is the one a user means by selecting `from` and then `to`.
    ///
    /// Placements are selected by their destination alone.
    #[inline(always)]
    pub fn connects(&self, from: Option<Cell>, to: Cell) -> bool {
        self.to == to && (self.from.is_none() || self.from == from)
    }
}

impl fmt::Display for Move {
    /// Steps display as `5,2-4,3`, captures as `5,2x3,4` and placements as `@1,1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => {
                let sep = if self.is_capture() { 'x' } else { '-' };
                write!(f, "{from}{sep}{}", self.to)?;
            }
            None => write!(f, "@{}", self.to)?,
        }

        if self.promotes {
            write!(f, "+")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")?;
        if let Some(captured) = self.captured {
            write!(f, " (captures {captured})")?;
        }
        Ok(())
    }
}
