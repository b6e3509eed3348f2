/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};
use rand::Rng;
use tracing::debug;

use crate::{best_move, Game, GameResult, Move, Ruleset, SearchConfig, Side};

/// Search depth used by [`Difficulty::Medium`]: enough to see a win or a loss one move away.
const MEDIUM_DEPTH: u8 = 2;

/// How strongly a computer opponent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Difficulty {
    /// Plays a random legal move.
    Easy,

    /// Looks one move ahead for each side, judging positions by material alone.
    ///
    /// Takes immediate wins and blocks immediate losses, but nothing deeper.
    #[default]
    Medium,

    /// Searches as deep as the ruleset allows, using the full positional heuristic.
    ///
    /// For small games like tic-tac-toe, this is the entire game tree, so it never loses.
    Hard,
}

impl Difficulty {
    /// All difficulty levels, from weakest to strongest.
    #[inline(always)]
    pub const fn all() -> [Self; 3] {
        [Self::Easy, Self::Medium, Self::Hard]
    }

    /// Lowercase name of this difficulty level.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Builds the [`SearchConfig`] for playing at this level in `game`.
    ///
    /// # Example
    /// ```
    /// # use duel::{Difficulty, Game, LineGame};
    /// let game = Game::new(LineGame::TIC_TAC_TOE);
    /// assert_eq!(Difficulty::Easy.search_config(&game).max_depth, 0);
    /// assert_eq!(Difficulty::Medium.search_config(&game).max_depth, 2);
    /// assert_eq!(Difficulty::Hard.search_config(&game).max_depth, 9);
    /// ```
    pub fn search_config<R: Ruleset>(&self, game: &Game<R>) -> SearchConfig {
        let (max_depth, heuristic_weight) = match self {
            Self::Easy => (0, 0),
            Self::Medium => (MEDIUM_DEPTH, 0),
            Self::Hard => (game.rules().deep_search_depth(game.board()), 100),
        };

        SearchConfig {
            max_depth,
            heuristic_weight,
            randomize_ties: true,
        }
    }
}

/// Picks a move for `side` to play in `game`, at the provided [`Difficulty`].
///
/// All randomness is drawn from `rng`, so a seeded `rng` always picks the same move.
///
/// # Errors
/// See [`best_move`].
pub fn ai_move<R: Ruleset, G: Rng + ?Sized>(
    game: &Game<R>,
    side: Side,
    difficulty: Difficulty,
    rng: &mut G,
) -> GameResult<Move> {
    let config = difficulty.search_config(game);
    debug!(difficulty = difficulty.name(), ?config, "choosing a move for {}", side.name());
    best_move(game, side, config, rng)
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Self::Easy),
            "medium" | "m" => Ok(Self::Medium),
            "hard" | "h" => Ok(Self::Hard),
            _ => bail!("Invalid difficulty {s:?}: Must be one of easy, medium, or hard"),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
