/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{
    Board, Cell, GameError, GameKind, GameResult, GameStatus, Move, MoveList, Piece, PieceKind,
    Ruleset, Score, Side, MAX_SIDE_LEN,
};

/// Directions in which a line can run: across, down, and both diagonals.
const LINE_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Boards with at most this many empty cells are searched to the end.
const FULL_SEARCH_CELLS: usize = 9;

/// Depth of a strong search on boards too large to search to the end.
const BOUNDED_SEARCH_DEPTH: u8 = 4;

/// A placement game: sides take turns marking empty cells, and the first to fill `k` cells in a
/// row, column or diagonal wins. A full board without a winner is a draw.
///
/// Tic-tac-toe is the 3x3 game with `k = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineGame {
    rows: u8,
    cols: u8,
    k: u8,
}

impl LineGame {
    /// Tic-tac-toe.
    pub const TIC_TAC_TOE: Self = Self {
        rows: 3,
        cols: 3,
        k: 3,
    };

    /// Creates a `rows` by `cols` game won by `k` in a row.
    ///
    /// # Example
    /// ```
    /// # use duel::LineGame;
    /// assert!(LineGame::new(6, 7, 4).is_ok());
    /// assert!(LineGame::new(3, 3, 4).is_err());
    /// ```
    pub fn new(rows: u8, cols: u8, k: u8) -> GameResult<Self> {
        let fits = |n: u8| n > 0 && n as usize <= MAX_SIDE_LEN;
        if !fits(rows) || !fits(cols) || k == 0 || k > rows.max(cols) {
            return Err(GameError::UnsupportedDimensions { rows, cols });
        }

        Ok(Self { rows, cols, k })
    }

    /// Number of marks in a row needed to win.
    #[inline(always)]
    pub const fn k(&self) -> u8 {
        self.k
    }

    /// An iterator over every run of `k` cells on the board.
    pub fn lines(&self) -> impl Iterator<Item = [Option<Cell>; MAX_SIDE_LEN]> + '_ {
        let cells = (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)));

        cells.flat_map(move |start| {
            LINE_DIRECTIONS
                .into_iter()
                .filter_map(move |(dr, dc)| self.line_from(start, dr, dc))
        })
    }

    /// The `k` cells starting at `start` and running in direction `(dr, dc)`, if they all fit on the board.
    fn line_from(&self, start: Cell, dr: i8, dc: i8) -> Option<[Option<Cell>; MAX_SIDE_LEN]> {
        let mut line = [None; MAX_SIDE_LEN];
        let mut cell = start;

        for (i, slot) in line.iter_mut().take(self.k as usize).enumerate() {
            if i > 0 {
                cell = cell.offset(dr, dc)?;
            }
            if cell.row() >= self.rows || cell.col() >= self.cols {
                return None;
            }
            *slot = Some(cell);
        }

        Some(line)
    }

    /// Returns `true` if `side` has filled a line.
    pub fn has_line(&self, board: &Board, side: Side) -> bool {
        self.lines().any(|line| {
            line.iter()
                .flatten()
                .all(|&cell| board.piece_at(cell).is_some_and(|p| p.side() == side))
        })
    }
}

impl Default for LineGame {
    #[inline(always)]
    fn default() -> Self {
        Self::TIC_TAC_TOE
    }
}

impl Ruleset for LineGame {
    #[inline(always)]
    fn kind(&self) -> GameKind {
        GameKind::Line
    }

    #[inline(always)]
    fn rows(&self) -> u8 {
        self.rows
    }

    #[inline(always)]
    fn cols(&self) -> u8 {
        self.cols
    }

    #[inline(always)]
    fn is_placement(&self) -> bool {
        true
    }

    fn initial_board(&self) -> Board {
        // Safe: the dimensions were validated when `self` was constructed
        Board::new(self.rows, self.cols).unwrap_or_else(|_| unreachable!())
    }

    /// Marks never move once placed.
    #[inline(always)]
    fn moves_from(&self, _board: &Board, _from: Cell, _moves: &mut MoveList) {}

    fn generate_moves(&self, board: &Board, moves: &mut MoveList) {
        if self.status(board).is_over() {
            return;
        }

        for cell in board.cells() {
            if board.piece_at(cell).is_none() {
                moves.push(Move::place(cell));
            }
        }
    }

    fn transition(&self, board: &mut Board, mv: &Move) {
        let mark = Piece::new(board.side_to_move(), PieceKind::Ordinary);
        board.place(mark, mv.to());
    }

    fn status(&self, board: &Board) -> GameStatus {
        // The side that just moved is the only one that can have completed a line in real play,
        // so it is checked first.
        let last = board.side_to_move().opponent();
        for side in [last, last.opponent()] {
            if self.has_line(board, side) {
                return GameStatus::Won(side);
            }
        }

        if board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }

    /// Counts the lines each side can still complete, favoring lines that are closer to done.
    fn evaluate(&self, board: &Board, side: Side, positional_weight: u8) -> Score {
        let mut score = 0;

        for line in self.lines() {
            let (mut mine, mut theirs) = (0, 0);
            for piece in line.iter().flatten().filter_map(|&cell| board.piece_at(cell)) {
                if piece.side() == side {
                    mine += 1;
                } else {
                    theirs += 1;
                }
            }

            match (mine, theirs) {
                (0, 0) => {}
                (n, 0) => score += n * n,
                (0, n) => score -= n * n,
                _ => {} // Blocked for both sides
            }
        }

        Score::new(score).scaled(positional_weight)
    }

    fn deep_search_depth(&self, board: &Board) -> u8 {
        let empty = board.empty_count();
        if empty <= FULL_SEARCH_CELLS {
            empty as u8
        } else {
            BOUNDED_SEARCH_DEPTH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tic_tac_toe_has_eight_lines() {
        assert_eq!(LineGame::TIC_TAC_TOE.lines().count(), 8);

        // Four in a row on a 4x4 board: 4 rows, 4 columns, 2 diagonals
        assert_eq!(LineGame::new(4, 4, 4).unwrap().lines().count(), 10);
    }

    #[test]
    fn test_status() {
        let rules = LineGame::TIC_TAC_TOE;
        let status = |layout: &str| rules.status(&Board::from_layout(layout).unwrap());

        assert_eq!(status(".../.../... x"), GameStatus::Ongoing);
        assert_eq!(status("xxx/oo./... o"), GameStatus::Won(Side::X));
        assert_eq!(status("xo./xo./.o. x"), GameStatus::Won(Side::O));
        assert_eq!(status("o.x/.x./x.o o"), GameStatus::Won(Side::X));
        assert_eq!(status("xox/xoo/oxx x"), GameStatus::Draw);
    }

    #[test]
    fn test_no_moves_once_decided() {
        let rules = LineGame::TIC_TAC_TOE;
        let board = Board::from_layout("xxx/oo./... o").unwrap();
        let mut moves = MoveList::new();
        rules.generate_moves(&board, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_full_search_depth() {
        let rules = LineGame::TIC_TAC_TOE;
        assert_eq!(rules.deep_search_depth(&rules.initial_board()), 9);

        let board = Board::from_layout("xo./.../... x").unwrap();
        assert_eq!(rules.deep_search_depth(&board), 7);

        let big = LineGame::new(5, 5, 4).unwrap();
        assert_eq!(big.deep_search_depth(&big.initial_board()), BOUNDED_SEARCH_DEPTH);
    }

    #[test]
    fn test_evaluation_prefers_open_lines() {
        let rules = LineGame::TIC_TAC_TOE;
        let center = Board::from_layout(".../.x./... o").unwrap();
        let corner = Board::from_layout("x../.../... o").unwrap();

        // The center touches four lines, a corner only three
        assert!(rules.evaluate(&center, Side::X, 100) > rules.evaluate(&corner, Side::X, 100));
        assert_eq!(rules.evaluate(&center, Side::X, 0), Score::DRAW);
    }
}
