/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

/// Maximum number of plies from the root that a search may reach.
pub const MAX_PLY: i32 = u8::MAX as i32;

/// A numerical evaluation of a position, from the point of view of one side.
///
/// Heuristic scores stay well below [`Score::LOWEST_WIN`], so any score at or beyond it
/// means a forced win (or loss) was found.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Score(pub(crate) i32);

impl Score {
    /// Largest possible score ever achievable.
    pub const INF: Self = Self(i16::MAX as i32);

    /// Score of having already won.
    pub const WIN: Self = Self(Self::INF.0 - 1);

    /// Score of a draw.
    pub const DRAW: Self = Self(0);

    /// Lowest possible score of a forced win.
    pub const LOWEST_WIN: Self = Self(Self::WIN.0 - MAX_PLY);

    /// Constructs a new [`Score`] instance.
    #[inline(always)]
    pub const fn new(score: i32) -> Self {
        Self(score)
    }

    /// Score of winning `ply` plies after the root.
    ///
    /// Quicker wins score higher.
    #[inline(always)]
    pub const fn win_in(ply: i32) -> Self {
        Self(Self::WIN.0 - ply)
    }

    /// Score of losing `ply` plies after the root.
    ///
    /// Slower losses score higher.
    #[inline(always)]
    pub const fn loss_in(ply: i32) -> Self {
        Self(-Self::WIN.0 + ply)
    }

    /// Returns `true` if this score is a forced win or loss.
    #[inline(always)]
    pub const fn is_decisive(&self) -> bool {
        self.0.abs() >= Self::LOWEST_WIN.0
    }

    /// Returns `true` if this score is a forced win.
    #[inline(always)]
    pub const fn is_win(&self) -> bool {
        self.0 >= Self::LOWEST_WIN.0
    }

    /// Returns `true` if this score is a forced loss.
    #[inline(always)]
    pub const fn is_loss(&self) -> bool {
        self.0 <= -Self::LOWEST_WIN.0
    }

    /// Returns the number of plies until the game is decided, if this score is decisive.
    #[inline(always)]
    pub const fn plies_to_end(&self) -> Option<i32> {
        if self.is_decisive() {
            Some(Self::WIN.0 - self.0.abs())
        } else {
            None
        }
    }

    /// Scales this score by `percent`, in the range `[0, 100]`.
    #[inline(always)]
    pub const fn scaled(self, percent: u8) -> Self {
        Self(self.0 * percent as i32 / 100)
    }

    /// Returns the absolute value of this [`Score`].
    #[inline(always)]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

macro_rules! impl_binary_op {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }

        impl std::ops::$trait<i32> for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: i32) -> Self::Output {
                Self(self.0.$fn(rhs))
            }
        }
    };
}

macro_rules! impl_binary_op_assign {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: Self) {
                self.0.$fn(rhs.0);
            }
        }

        impl std::ops::$trait<i32> for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: i32) {
                self.0.$fn(rhs);
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);

impl_binary_op_assign!(AddAssign, add_assign);
impl_binary_op_assign!(SubAssign, sub_assign);

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(self.0.neg())
    }
}

impl fmt::Display for Score {
    /// Decisive scores display as `win in N` / `loss in N` plies; anything else as a number.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.plies_to_end() {
            Some(plies) if self.0 > 0 => write!(f, "win in {plies}"),
            Some(plies) => write!(f, "loss in {plies}"),
            None => self.0.fmt(f),
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}
