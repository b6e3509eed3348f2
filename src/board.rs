/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Locations on a board.
mod cell;

/// The grid of cells and whose turn it is.
mod grid;

/// Single steps, jumps and placements.
mod moves;

/// Sides, piece kinds and pieces.
mod piece;

pub use cell::*;
pub use grid::*;
pub use moves::*;
pub use piece::*;
