/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

/// Largest number of rows or columns a board may have.
pub const MAX_SIDE_LEN: usize = 10;

/// Largest number of cells a board may have.
pub const MAX_CELLS: usize = MAX_SIDE_LEN * MAX_SIDE_LEN;

/// The four diagonal directions, as `(row, col)` deltas.
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A location on a board, identified by its row and column.
///
/// Row `0` is the top of the board, as printed.
/// A [`Cell`] knows nothing about the size of the board it is used with;
/// bounds are checked by [`crate::Board::contains`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Creates a new [`Cell`] at `(row, col)`.
    ///
    /// # Example
    /// ```
    /// # use duel::Cell;
    /// let cell = Cell::new(5, 2);
    /// assert_eq!(cell.row(), 5);
    /// assert_eq!(cell.col(), 2);
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.row
    }

    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Index of this cell in a row-major grid that is `cols` wide.
    #[inline(always)]
    pub const fn index(&self, cols: u8) -> usize {
        self.row as usize * cols as usize + self.col as usize
    }

    /// Inverse of [`Cell::index`].
    #[inline(always)]
    pub const fn from_index(index: usize, cols: u8) -> Self {
        Self::new((index / cols as usize) as u8, (index % cols as usize) as u8)
    }

    /// Returns `true` if `row + col` is odd, which are the dark cells that checkers is played on.
    #[inline(always)]
    pub const fn is_dark(&self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Offsets this [`Cell`] by the provided deltas, if the result has no negative coordinate.
    ///
    /// The upper bound is not checked here; see [`crate::Board::contains`].
    ///
    /// # Example
    /// ```
    /// # use duel::Cell;
    /// assert_eq!(Cell::new(3, 3).offset(1, -1), Some(Cell::new(4, 2)));
    /// assert_eq!(Cell::new(0, 3).offset(-1, 1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Self> {
        let Some(row) = self.row.checked_add_signed(row_delta) else {
            return None;
        };

        let Some(col) = self.col.checked_add_signed(col_delta) else {
            return None;
        };

        Some(Self::new(row, col))
    }

    /// The cell exactly halfway between `self` and `other`, if there is one.
    ///
    /// Used to find the piece jumped over by a capture.
    #[inline(always)]
    pub const fn midpoint(&self, other: Self) -> Option<Self> {
        let rows = self.row as u16 + other.row as u16;
        let cols = self.col as u16 + other.col as u16;
        if rows % 2 != 0 || cols % 2 != 0 {
            return None;
        }

        Some(Self::new((rows / 2) as u8, (cols / 2) as u8))
    }
}

impl FromStr for Cell {
    type Err = anyhow::Error;

    /// Parses a [`Cell`] from `"row,col"` or `"row col"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|part| !part.is_empty());

        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            bail!("Cell must be given as \"row,col\". Got {s:?}");
        };

        let row = row
            .parse()
            .map_err(|e| anyhow!("Invalid row {row:?} in {s:?}: {e}"))?;
        let col = col
            .parse()
            .map_err(|e| anyhow!("Invalid column {col:?} in {s:?}: {e}"))?;

        Ok(Self::new(row, col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
