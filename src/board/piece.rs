/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};

/// One of the two competing players.
///
/// [`Side::X`] always moves first, and therefore [`Side`] defaults to [`Side::X`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Side {
    #[default]
    X,
    O,
}

impl Side {
    /// Number of side variants.
    pub const COUNT: usize = 2;

    /// An array of both sides, starting with X.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::X, Self::O]
    }

    /// Returns this [`Side`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use duel::Side;
    /// assert_eq!(Side::X.opponent(), Side::O);
    /// assert_eq!(Side::O.opponent(), Side::X);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Returns this [`Side`] as a `usize`.
    ///
    /// Will be `0` for X, `1` for O.
    ///
    /// Useful for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Creates a [`Side`] from a `char`, case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use duel::Side;
    /// assert_eq!(Side::from_char('O').unwrap(), Side::O);
    /// assert!(Side::from_char('z').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(side: char) -> Result<Self> {
        match side {
            'x' | 'X' => Ok(Self::X),
            'o' | 'O' => Ok(Self::O),
            _ => bail!("Side must be either 'x' or 'o' (case-insensitive). Found {side:?}"),
        }
    }

    /// Converts this [`Side`] to a lowercase char.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::X => 'x',
            Self::O => 'o',
        }
    }

    /// Fetches a human-readable name for this [`Side`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
        }
    }
}

impl<T> Index<Side> for [T; Side::COUNT] {
    type Output = T;
    /// [`Side`] can be used to index into a list of [`Side::COUNT`] elements.
    #[inline(always)]
    fn index(&self, index: Side) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Side> for [T; Side::COUNT] {
    /// [`Side`] can be used to mutably index into a list of [`Side::COUNT`] elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

/// The rank of a piece.
///
/// Promotion is one-way: nothing ever turns a [`PieceKind::Promoted`] piece back into an ordinary one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    #[default]
    Ordinary,
    Promoted,
}

impl PieceKind {
    /// Number of piece kind variants.
    pub const COUNT: usize = 2;

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ordinary => "ordinary",
            Self::Promoted => "promoted",
        }
    }
}

/// A piece (or mark) standing on a cell: who owns it, and whether it has been promoted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    side: Side,
    kind: PieceKind,
}

impl Piece {
    pub const X_ORDINARY: Self = Self::new(Side::X, PieceKind::Ordinary);
    pub const X_PROMOTED: Self = Self::new(Side::X, PieceKind::Promoted);
    pub const O_ORDINARY: Self = Self::new(Side::O, PieceKind::Ordinary);
    pub const O_PROMOTED: Self = Self::new(Side::O, PieceKind::Promoted);

    /// Number of unique piece variants.
    pub const COUNT: usize = Side::COUNT * PieceKind::COUNT;

    /// Creates a new [`Piece`] from the given [`Side`] and [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use duel::{Piece, PieceKind, Side};
    /// let king = Piece::new(Side::O, PieceKind::Promoted);
    /// assert_eq!(king.to_string(), "O");
    /// ```
    #[inline(always)]
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    #[inline(always)]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn is_promoted(&self) -> bool {
        matches!(self.kind, PieceKind::Promoted)
    }

    /// Returns a copy of this piece with its kind set to [`PieceKind::Promoted`].
    ///
    /// Promoting an already-promoted piece does nothing.
    #[inline(always)]
    pub const fn promoted(self) -> Self {
        Self::new(self.side, PieceKind::Promoted)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.side.index() * PieceKind::COUNT + self.kind.index()
    }

    /// Parses a [`Piece`] from its layout char.
    ///
    /// Lowercase `x`/`o` are ordinary pieces, uppercase `X`/`O` are promoted.
    ///
    /// # Example
    /// ```
    /// # use duel::Piece;
    /// assert_eq!(Piece::from_char('X').unwrap(), Piece::X_PROMOTED);
    /// assert_eq!(Piece::from_char('o').unwrap(), Piece::O_ORDINARY);
    /// assert!(Piece::from_char('.').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(piece: char) -> Result<Self> {
        let side = Side::from_char(piece)?;
        let kind = if piece.is_ascii_uppercase() {
            PieceKind::Promoted
        } else {
            PieceKind::Ordinary
        };

        Ok(Self::new(side, kind))
    }

    /// Converts this [`Piece`] to its layout char.
    #[inline(always)]
    pub const fn char(&self) -> char {
        let c = self.side.char();
        if self.is_promoted() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Fetches a human-readable name for this [`Piece`].
    pub fn name(&self) -> String {
        format!("{} {}", self.kind.name(), self.side.name())
    }
}

macro_rules! impl_common_traits {
    ($type:ty) => {
        impl FromStr for $type {
            type Err = anyhow::Error;
            /// Does the same as [`Self::from_char`], but only if `s` is one character in length.
            #[inline(always)]
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_char(c),
                    _ => bail!(
                        "Invalid str for {}: Must be a str of len 1. Got {s:?}",
                        stringify!($type)
                    ),
                }
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.char())
            }
        }

        impl fmt::Debug for $type {
            /// Debug formatting displays a $type as its human-readable name and index value.
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "\"{}\" ({})", self.name(), self.index())
            }
        }
    };
}

impl_common_traits!(Piece);
impl_common_traits!(Side);
