/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Grids, cells, pieces, and moves.
mod board;

/// Command-line interface of the console driver.
mod cli;

/// Mapping of difficulty levels to search settings.
mod difficulty;

/// Errors produced when validating selections and moves.
mod error;

/// A board paired with the rules it is played by.
mod game;

/// Node counting for validating move generation.
mod perft;

/// Rules of the supported games.
mod rules;

/// Scores assigned to positions during search.
mod score;

/// Main AI logic; all search related code.
mod search;

pub use board::*;
pub use cli::*;
pub use difficulty::*;
pub use error::*;
pub use game::*;
pub use perft::*;
pub use rules::*;
pub use score::*;
pub use search::*;
