/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{builder::PossibleValue, Args, Parser, Subcommand, ValueEnum};

use crate::{Difficulty, GameKind, Side};

/// Play checkers or tic-tac-toe against a minimax opponent.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// A command to be run by the console driver.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Play a game on the console.
    ///
    /// Enter moves as `row col row col` (checkers) or `row col` (placement games).
    Play {
        #[command(flatten)]
        setup: GameSetup,

        /// The side played by the computer.
        #[arg(long, default_value = "o")]
        ai: AiSide,

        /// How strongly the computer plays.
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// Seed for the computer's random choices. Random if not provided.
        #[arg(long, required = false)]
        seed: Option<u64>,

        /// If set, the computer plays both sides.
        #[arg(long, default_value = "false")]
        self_play: bool,
    },

    /// Performs a perft on the starting position at the supplied depth, printing total node count.
    Perft {
        depth: usize,

        #[command(flatten)]
        setup: GameSetup,

        /// If set, the node count after each root move will also be printed.
        #[arg(short, long, default_value = "false")]
        split: bool,
    },
}

/// Which game to set up, and on what board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Args)]
pub struct GameSetup {
    /// The game to play.
    #[arg(short, long, default_value = "checkers")]
    pub game: GameKind,

    /// Side length of the board.
    ///
    /// Defaults to 8 for checkers and 3 for placement games.
    #[arg(long, required = false)]
    pub size: Option<u8>,

    /// Number of marks in a row needed to win a placement game. Defaults to the board size.
    #[arg(long, required = false)]
    pub line: Option<u8>,
}

/// Which side, if any, the computer plays.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum AiSide {
    X,
    #[default]
    O,
    None,
}

impl AiSide {
    /// The [`Side`] played by the computer, if any.
    #[inline(always)]
    pub const fn side(&self) -> Option<Side> {
        match self {
            Self::X => Some(Side::X),
            Self::O => Some(Side::O),
            Self::None => None,
        }
    }
}

impl ValueEnum for GameKind {
    fn value_variants<'a>() -> &'a [Self] {
        &[GameKind::Checkers, GameKind::Line]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = match self {
            GameKind::Checkers => PossibleValue::new("checkers").aliases(["draughts", "c"]),
            GameKind::Line => PossibleValue::new("tic-tac-toe").aliases(["tictactoe", "ttt", "line"]),
        };

        Some(value)
    }
}

impl ValueEnum for Difficulty {
    fn value_variants<'a>() -> &'a [Self] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        // Single-letter aliases match what `FromStr` accepts
        let name = self.name();
        Some(PossibleValue::new(name).alias(&name[..1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play() {
        let cli = Cli::try_parse_from([
            "duel",
            "play",
            "--game",
            "ttt",
            "--ai",
            "x",
            "-d",
            "hard",
            "--seed",
            "9",
        ])
        .unwrap();

        let Command::Play {
            setup,
            ai,
            difficulty,
            seed,
            self_play,
        } = cli.command
        else {
            panic!("expected a play command");
        };

        assert_eq!(setup.game, GameKind::Line);
        assert_eq!(setup.size, None);
        assert_eq!(ai.side(), Some(Side::X));
        assert_eq!(difficulty, Difficulty::Hard);
        assert_eq!(seed, Some(9));
        assert!(!self_play);
    }

    #[test]
    fn test_parse_perft_defaults() {
        let cli = Cli::try_parse_from(["duel", "perft", "4", "--size", "6"]).unwrap();

        let Command::Perft {
            depth,
            setup,
            split,
        } = cli.command
        else {
            panic!("expected a perft command");
        };

        assert_eq!(depth, 4);
        assert_eq!(setup.game, GameKind::Checkers);
        assert_eq!(setup.size, Some(6));
        assert!(!split);
    }

    #[test]
    fn test_reject_unknown_game() {
        assert!(Cli::try_parse_from(["duel", "play", "--game", "chess"]).is_err());
    }
}
