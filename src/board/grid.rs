/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt::{self, Write};

use anyhow::{bail, Context, Result};

use super::{Cell, Piece, Side, MAX_CELLS, MAX_SIDE_LEN};
use crate::{GameError, GameResult};

/// A snapshot of a game: which piece stands on every cell, whose turn it is,
/// and which piece (if any) is in the middle of a capture chain.
///
/// A [`Board`] is a plain value. Applying a move produces a new [`Board`];
/// a board that has been handed to another component is never changed in place.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Row-major grid; only the first `rows * cols` entries are used.
    cells: [Option<Piece>; MAX_CELLS],

    rows: u8,

    cols: u8,

    side_to_move: Side,

    /// The piece that just captured and must capture again before the turn ends.
    chain: Option<Cell>,
}

impl Board {
    /// Creates an empty `rows` by `cols` board with [`Side::X`] to move.
    ///
    /// # Example
    /// ```
    /// # use duel::Board;
    /// assert!(Board::new(8, 8).is_ok());
    /// assert!(Board::new(0, 3).is_err());
    /// assert!(Board::new(11, 11).is_err());
    /// ```
    pub fn new(rows: u8, cols: u8) -> GameResult<Self> {
        let fits = |n: u8| n > 0 && n as usize <= MAX_SIDE_LEN;
        if !fits(rows) || !fits(cols) {
            return Err(GameError::UnsupportedDimensions { rows, cols });
        }

        Ok(Self {
            cells: [None; MAX_CELLS],
            rows,
            cols,
            side_to_move: Side::default(),
            chain: None,
        })
    }

    #[inline(always)]
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    #[inline(always)]
    pub const fn cols(&self) -> u8 {
        self.cols
    }

    /// Number of cells on this board.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Returns `true` if `cell` lies within this board.
    #[inline(always)]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row() < self.rows && cell.col() < self.cols
    }

    /// Returns `Ok(())` if `cell` lies within this board.
    #[inline(always)]
    pub fn check_bounds(&self, cell: Cell) -> GameResult<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GameError::InvalidCoordinates(cell))
        }
    }

    /// Fetches the piece at `cell`, if there is one.
    ///
    /// Cells outside of the board are always empty.
    #[inline(always)]
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        if self.contains(cell) {
            self.cells[cell.index(self.cols)]
        } else {
            None
        }
    }

    /// Returns `true` if `cell` is on the board and nothing stands on it.
    #[inline(always)]
    pub fn is_vacant(&self, cell: Cell) -> bool {
        self.contains(cell) && self.cells[cell.index(self.cols)].is_none()
    }

    /// Places `piece` on `cell`, replacing whatever was there.
    ///
    /// # Panics
    /// If `cell` is outside of the board.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, cell: Cell) {
        assert!(self.contains(cell), "cannot place {piece:?} on {cell:?}");
        self.cells[cell.index(self.cols)] = Some(piece);
    }

    /// Removes and returns the piece on `cell`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, cell: Cell) -> Option<Piece> {
        if self.contains(cell) {
            self.cells[cell.index(self.cols)].take()
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// The cell of the piece that must continue capturing, if a chain is in progress.
    #[inline(always)]
    pub const fn chain(&self) -> Option<Cell> {
        self.chain
    }

    #[inline(always)]
    pub fn set_chain(&mut self, chain: Option<Cell>) {
        self.chain = chain;
    }

    /// An iterator over every cell of this board, in row-major order.
    #[inline(always)]
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols;
        (0..self.len()).map(move |i| Cell::from_index(i, cols))
    }

    /// An iterator over every occupied cell of this board and the piece on it.
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        self.cells[..self.len()]
            .iter()
            .enumerate()
            .filter_map(|(i, piece)| piece.map(|p| (Cell::from_index(i, self.cols), p)))
    }

    /// An iterator over the cells occupied by `side`'s pieces.
    #[inline(always)]
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.side() == side)
    }

    /// Number of pieces that `side` has on the board.
    #[inline(always)]
    pub fn count(&self, side: Side) -> usize {
        self.pieces_of(side).count()
    }

    /// Returns `true` if no cell of this board is empty.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.cells[..self.len()].iter().all(Option::is_some)
    }

    /// Number of empty cells on this board.
    #[inline(always)]
    pub fn empty_count(&self) -> usize {
        self.cells[..self.len()]
            .iter()
            .filter(|piece| piece.is_none())
            .count()
    }

    /// Parses a [`Board`] from its compact layout notation.
    ///
    /// The layout lists rows top to bottom separated by `/`, with `.` for an empty cell,
    /// `x`/`o` for ordinary pieces and `X`/`O` for promoted ones.
    /// It is optionally followed by the side to move (default `x`) and the cell of a piece
    /// that is mid-chain.
    ///
    /// # Example
    /// ```
    /// # use duel::{Board, Cell, Piece, Side};
    /// let board = Board::from_layout("xo./.X./... o").unwrap();
    /// assert_eq!(board.rows(), 3);
    /// assert_eq!(board.side_to_move(), Side::O);
    /// assert_eq!(board.piece_at(Cell::new(1, 1)), Some(Piece::X_PROMOTED));
    /// ```
    pub fn from_layout(layout: &str) -> Result<Self> {
        let mut fields = layout.split_ascii_whitespace();

        let Some(grid) = fields.next() else {
            bail!("Layout string is empty");
        };

        let lines = grid.split('/').collect::<Vec<_>>();
        let rows = lines.len();
        let cols = lines[0].chars().count();
        if rows > MAX_SIDE_LEN || cols > MAX_SIDE_LEN {
            bail!("Layout {grid:?} is larger than {MAX_SIDE_LEN}x{MAX_SIDE_LEN}");
        }

        let mut board = Self::new(rows as u8, cols as u8)?;

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                bail!("Row {row} of layout {grid:?} does not have {cols} cells");
            }

            for (col, c) in line.chars().enumerate() {
                if c == '.' {
                    continue;
                }

                let piece = Piece::from_char(c)
                    .with_context(|| format!("Invalid cell in row {row} of layout {grid:?}"))?;
                board.place(piece, Cell::new(row as u8, col as u8));
            }
        }

        if let Some(side) = fields.next() {
            board.side_to_move = side.parse()?;
        }

        if let Some(chain) = fields.next() {
            let cell = chain.parse::<Cell>()?;
            match board.piece_at(cell) {
                Some(piece) if piece.side() == board.side_to_move => board.chain = Some(cell),
                _ => bail!("Chain cell {cell} does not hold a piece of the side to move"),
            }
        }

        if let Some(extra) = fields.next() {
            bail!("Unexpected trailing field {extra:?} in layout {layout:?}");
        }

        Ok(board)
    }

    /// Generates the compact layout notation of this board.
    ///
    /// See [`Board::from_layout`].
    pub fn to_layout(&self) -> String {
        let mut layout = String::with_capacity(self.len() + self.rows as usize + 8);

        for row in 0..self.rows {
            if row > 0 {
                layout.push('/');
            }
            for col in 0..self.cols {
                let c = self
                    .piece_at(Cell::new(row, col))
                    .map(|piece| piece.char())
                    .unwrap_or('.');
                layout.push(c);
            }
        }

        // Writing to a `String` cannot fail
        let _ = write!(layout, " {}", self.side_to_move);
        if let Some(chain) = self.chain {
            let _ = write!(layout, " {chain}");
        }

        layout
    }
}

impl fmt::Display for Board {
    /// Prints the board as a grid with row and column numbers, followed by whose turn it is.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.cols {
            write!(f, " {col}")?;
        }
        writeln!(f)?;

        write!(f, "  +")?;
        for _ in 0..self.cols {
            write!(f, "--")?;
        }
        writeln!(f)?;

        for row in 0..self.rows {
            write!(f, "{row:>2}|")?;
            for col in 0..self.cols {
                let c = self
                    .piece_at(Cell::new(row, col))
                    .map(|piece| piece.char())
                    .unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }

        write!(f, "{} to move", self.side_to_move.name())?;
        if let Some(chain) = self.chain {
            write!(f, " (continuing capture from {chain})")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.to_layout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_round_trip() {
        let layouts = [
            "xox/xo./... o",
            "..../.x../..O./X... x",
            ".o.o/..../.x../.... x 2,1",
        ];

        for layout in layouts {
            let board = Board::from_layout(layout).unwrap();
            assert_eq!(board.to_layout(), layout);
        }
    }

    #[test]
    fn test_layout_rejects_garbage() {
        assert!(Board::from_layout("").is_err());
        assert!(Board::from_layout("xo/x").is_err());
        assert!(Board::from_layout("xz./.../...").is_err());
        assert!(Board::from_layout("xo./.../... q").is_err());
        // Chain cell must hold a piece of the side to move
        assert!(Board::from_layout("xo./.../... x 0,1").is_err());
        assert!(Board::from_layout("xo./.../... x 0,0 extra").is_err());
    }

    #[test]
    fn test_counts() {
        let board = Board::from_layout("xox/xo./... o").unwrap();
        assert_eq!(board.count(Side::X), 3);
        assert_eq!(board.count(Side::O), 2);
        assert_eq!(board.empty_count(), 4);
        assert!(!board.is_full());
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::new(3, 3).unwrap();
        assert_eq!(board.piece_at(Cell::new(3, 0)), None);
        assert_eq!(board.take(Cell::new(0, 9)), None);
        assert!(!board.is_vacant(Cell::new(5, 5)));
        assert_eq!(
            board.check_bounds(Cell::new(3, 3)),
            Err(GameError::InvalidCoordinates(Cell::new(3, 3)))
        );
    }

    #[test]
    fn test_copies_are_independent() {
        let original = Board::from_layout("x../.../... o").unwrap();
        let mut copy = original;
        copy.take(Cell::new(0, 0));
        copy.toggle_side_to_move();

        assert_eq!(original.piece_at(Cell::new(0, 0)), Some(Piece::X_ORDINARY));
        assert_eq!(original.side_to_move(), Side::O);
        assert_ne!(original, copy);
    }
}
