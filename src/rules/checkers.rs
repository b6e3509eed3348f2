/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{
    Board, Cell, GameError, GameKind, GameResult, GameStatus, Move, MoveList, Piece, PieceKind,
    Ruleset, Score, Side, DIAGONALS, MAX_SIDE_LEN,
};

/// Material value of an ordinary piece.
const MAN_VALUE: i32 = 100;

/// Material value of a promoted piece.
const KING_VALUE: i32 = 160;

/// Bonus for every row an ordinary piece has advanced from its home row.
const ADVANCE_BONUS: i32 = 4;

/// Bonus for an ordinary piece still guarding its own back row.
const BACK_ROW_BONUS: i32 = 6;

/// Bonus for a promoted piece per step closer to the middle of the board.
const CENTER_BONUS: i32 = 3;

/// Depth of a strong search. Checkers trees are far too large to search fully.
const DEEP_SEARCH_DEPTH: u8 = 6;

/// Checkers played on the dark cells of a square board.
///
/// * [`Side::X`] starts on the bottom rows and moves first, toward row `0`.
/// * [`Side::O`] starts on the top rows and moves toward the last row.
/// * Ordinary pieces step and jump diagonally forward only; promoted pieces in all four diagonals.
/// * A piece reaching the opponent's back row is promoted.
/// * A side with no pieces, or no legal moves on its turn, loses. There are no draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checkers {
    size: u8,
}

impl Checkers {
    /// The standard 8x8 game with 12 pieces each.
    pub const STANDARD: Self = Self { size: 8 };

    /// Creates a game on a `size` by `size` board.
    ///
    /// `size` must be even and between 4 and 10.
    /// Each side fills `(size - 2) / 2` rows, leaving two empty rows in the middle.
    ///
    /// # Example
    /// ```
    /// # use duel::Checkers;
    /// assert_eq!(Checkers::new(10).unwrap().home_rows(), 4);
    /// assert!(Checkers::new(7).is_err());
    /// ```
    pub fn new(size: u8) -> GameResult<Self> {
        if size < 4 || size as usize > MAX_SIDE_LEN || size % 2 != 0 {
            return Err(GameError::UnsupportedDimensions {
                rows: size,
                cols: size,
            });
        }

        Ok(Self { size })
    }

    /// Number of rows each side fills at the start of the game.
    #[inline(always)]
    pub const fn home_rows(&self) -> u8 {
        (self.size - 2) / 2
    }

    /// Direction in which `side`'s ordinary pieces advance, as a row delta.
    #[inline(always)]
    pub const fn forward(side: Side) -> i8 {
        match side {
            Side::X => -1,
            Side::O => 1,
        }
    }

    /// The row on which `side`'s pieces are promoted.
    #[inline(always)]
    pub const fn promotion_row(&self, side: Side) -> u8 {
        match side {
            Side::X => 0,
            Side::O => self.size - 1,
        }
    }

    #[inline(always)]
    fn promotes(&self, piece: Piece, to: Cell) -> bool {
        !piece.is_promoted() && to.row() == self.promotion_row(piece.side())
    }

    /// Number of rows `piece` on `cell` has advanced from its own back row.
    #[inline(always)]
    fn advancement(&self, piece: Piece, cell: Cell) -> i32 {
        match piece.side() {
            Side::X => (self.size - 1 - cell.row()) as i32,
            Side::O => cell.row() as i32,
        }
    }

    /// Positional value of `piece` standing on `cell`, excluding material.
    fn positional(&self, piece: Piece, cell: Cell) -> i32 {
        match piece.kind() {
            PieceKind::Ordinary => {
                let advanced = self.advancement(piece, cell);
                if advanced == 0 {
                    BACK_ROW_BONUS
                } else {
                    advanced * ADVANCE_BONUS
                }
            }
            PieceKind::Promoted => {
                // Doubled coordinates keep the center exact on even-sized boards
                let center = self.size as i32 - 1;
                let dist = (2 * cell.row() as i32 - center).abs()
                    + (2 * cell.col() as i32 - center).abs();
                (2 * center - dist) * CENTER_BONUS / 4
            }
        }
    }
}

impl Default for Checkers {
    #[inline(always)]
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Ruleset for Checkers {
    #[inline(always)]
    fn kind(&self) -> GameKind {
        GameKind::Checkers
    }

    #[inline(always)]
    fn rows(&self) -> u8 {
        self.size
    }

    #[inline(always)]
    fn cols(&self) -> u8 {
        self.size
    }

    #[inline(always)]
    fn is_playable(&self, cell: Cell) -> bool {
        cell.is_dark()
    }

    fn initial_board(&self) -> Board {
        // Safe: the size was validated when `self` was constructed
        let mut board = Board::new(self.size, self.size).unwrap_or_else(|_| unreachable!());

        let home = self.home_rows();
        for cell in board.cells().filter(|cell| cell.is_dark()) {
            if cell.row() < home {
                board.place(Piece::O_ORDINARY, cell);
            } else if cell.row() >= self.size - home {
                board.place(Piece::X_ORDINARY, cell);
            }
        }

        board
    }

    fn moves_from(&self, board: &Board, from: Cell, moves: &mut MoveList) {
        let Some(piece) = board.piece_at(from) else {
            return;
        };

        for (dr, dc) in DIAGONALS {
            // Ordinary pieces only go forward, whether stepping or jumping
            if !piece.is_promoted() && dr != Self::forward(piece.side()) {
                continue;
            }

            let Some(to) = from.offset(dr, dc) else {
                continue;
            };

            if !board.contains(to) || !self.is_playable(to) {
                continue;
            }

            match board.piece_at(to) {
                None => moves.push(Move::step(from, to, self.promotes(piece, to))),

                Some(victim) if victim.side() != piece.side() => {
                    let Some(landing) = to.offset(dr, dc) else {
                        continue;
                    };

                    if board.is_vacant(landing) && self.is_playable(landing) {
                        moves.push(Move::capture(
                            from,
                            landing,
                            to,
                            self.promotes(piece, landing),
                        ));
                    }
                }

                // Blocked by a friendly piece
                Some(_) => {}
            }
        }
    }

    fn generate_moves(&self, board: &Board, moves: &mut MoveList) {
        let stm = board.side_to_move();

        // The game ended when the last opposing piece was taken
        if board.count(stm.opponent()) == 0 {
            return;
        }

        for (cell, _) in board.pieces_of(stm) {
            self.moves_from(board, cell, moves);
        }
    }

    fn transition(&self, board: &mut Board, mv: &Move) {
        let Some(from) = mv.from() else {
            return;
        };

        if let Some(captured) = mv.captured() {
            board.take(captured);
        }

        if let Some(piece) = board.take(from) {
            let piece = if mv.promotes() {
                piece.promoted()
            } else {
                piece
            };
            board.place(piece, mv.to());
        }
    }

    fn status(&self, board: &Board) -> GameStatus {
        for side in Side::all() {
            if board.count(side) == 0 {
                return GameStatus::Won(side.opponent());
            }
        }

        let stm = board.side_to_move();
        let mut moves = MoveList::new();
        match board.chain() {
            Some(cell) => self.moves_from(board, cell, &mut moves),
            None => self.generate_moves(board, &mut moves),
        }

        if moves.is_empty() {
            GameStatus::Won(stm.opponent())
        } else {
            GameStatus::Ongoing
        }
    }

    fn evaluate(&self, board: &Board, side: Side, positional_weight: u8) -> Score {
        let mut material = [0; Side::COUNT];
        let mut positional = [0; Side::COUNT];

        for (cell, piece) in board.pieces() {
            material[piece.side()] += match piece.kind() {
                PieceKind::Ordinary => MAN_VALUE,
                PieceKind::Promoted => KING_VALUE,
            };
            positional[piece.side()] += self.positional(piece, cell);
        }

        let them = side.opponent();
        Score::new(material[side] - material[them])
            + Score::new(positional[side] - positional[them]).scaled(positional_weight)
    }

    #[inline(always)]
    fn deep_search_depth(&self, _board: &Board) -> u8 {
        DEEP_SEARCH_DEPTH
    }
}
