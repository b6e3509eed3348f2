/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Game, Ruleset};

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// Every hop of a capture chain counts as its own ply.
/// Finished games have no moves, so they contribute no nodes below them.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
#[inline(always)]
pub fn perft<R: Ruleset>(game: &Game<R>, depth: usize) -> u64 {
    perft_generic::<true, false, R>(game, depth)
}

/// Perform a splitperft at the specified depth, collecting only data about the number of possible positions (nodes),
/// and printing the number of nodes reachable after each move available at the root node.
#[inline(always)]
pub fn splitperft<R: Ruleset>(game: &Game<R>, depth: usize) -> u64 {
    perft_generic::<true, true, R>(game, depth)
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will perform a splitperft.
pub fn perft_generic<const BULK: bool, const SPLIT: bool, R: Ruleset>(
    game: &Game<R>,
    depth: usize,
) -> u64 {
    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return game.legal_moves().len() as u64;
    }
    // Recursion limit; return 1, since we're fathoming this node.
    else if depth == 0 {
        return 1;
    }

    // Recursively accumulate the nodes from the remaining depths
    game.legal_moves().into_iter().fold(0, |nodes, mv| {
        let new_nodes = perft_generic::<BULK, false, R>(&game.with_move_made(mv), depth - 1);

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Checkers, LineGame};

    #[test]
    fn test_bulk_counting_agrees() {
        let game = Game::new(Checkers::STANDARD);
        for depth in 0..=4 {
            assert_eq!(
                perft_generic::<true, false, _>(&game, depth),
                perft_generic::<false, false, _>(&game, depth),
                "bulk counting differs at depth {depth}"
            );
        }
    }

    #[test]
    fn test_finished_game_has_no_nodes() {
        let game = Game::from_layout(LineGame::TIC_TAC_TOE, "xxx/oo./... o").unwrap();
        assert_eq!(perft(&game, 0), 1);
        assert_eq!(perft(&game, 1), 0);
        assert_eq!(perft(&game, 3), 0);
    }
}
