/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::cmp::Reverse;

use rand::{seq::IndexedRandom, Rng};
use tracing::{debug, trace};

use crate::{Game, GameError, GameResult, GameStatus, Move, MoveList, Ruleset, Score, Side, MAX_PLY};

/// Maximum depth that can be searched
pub const MAX_DEPTH: u8 = u8::MAX;

/// The result of a search, containing the best move found, score, and total nodes searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Number of nodes searched.
    pub nodes: u64,

    /// Best move found during the search.
    ///
    /// `None` only if the side to move had no legal moves.
    pub bestmove: Option<Move>,

    /// Evaluation of the position after `bestmove` is made, from the searching side's perspective.
    pub score: Score,
}

impl Default for SearchResult {
    /// A default search result should initialize to a *very bad* value,
    /// since there isn't a move to play.
    #[inline(always)]
    fn default() -> Self {
        Self {
            nodes: 0,
            bestmove: None,
            score: -Score::INF,
        }
    }
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchConfig {
    /// Maximum depth to execute the search, in plies.
    ///
    /// Capture chains do not use up depth, since the same side keeps moving.
    /// A depth of `0` does not search at all and plays a uniformly random legal move.
    pub max_depth: u8,

    /// Percentage in `[0, 100]` by which the ruleset's positional heuristic is weighted.
    ///
    /// At `0`, non-terminal positions are judged on material alone.
    pub heuristic_weight: u8,

    /// If set, a random move is chosen among all moves sharing the best score.
    /// Otherwise, the first one in move generation order is played.
    pub randomize_ties: bool,
}

impl Default for SearchConfig {
    /// A default [`SearchConfig`] will search as deep as possible with the full heuristic.
    #[inline(always)]
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            heuristic_weight: 100,
            randomize_ties: true,
        }
    }
}

/// Executes a minimax search on the provided game.
///
/// The search is written in negamax form with alpha-beta pruning, which finds the same
/// scores as plain minimax while visiting fewer nodes.
/// Positions are never modified: every child node is a fresh copy made by [`Game::with_move_made`].
pub struct Search<'a, R: Ruleset> {
    /// The game to search on.
    game: &'a Game<R>,

    /// The result of the search, updated as-needed during search.
    result: SearchResult,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,
}

impl<'a, R: Ruleset> Search<'a, R> {
    /// Construct a new [`Search`] instance to execute on the provided [`Game`].
    #[inline(always)]
    pub fn new(game: &'a Game<R>, config: SearchConfig) -> Self {
        Self {
            game,
            result: SearchResult::default(),
            config,
        }
    }

    /// Start the search, returning its results.
    ///
    /// `rng` is only used to break ties (and to pick a move at depth `0`),
    /// so a seeded `rng` makes the whole search reproducible.
    pub fn start<G: Rng + ?Sized>(mut self, rng: &mut G) -> SearchResult {
        let game = self.game;
        let moves = ordered_moves(game);

        if moves.is_empty() {
            // Nothing to play: report how the game ended for the side to move
            self.result.score = match game.status() {
                GameStatus::Won(side) if game.is_turn_of(side) => Score::win_in(0),
                GameStatus::Draw => Score::DRAW,
                _ => Score::loss_in(0),
            };
            debug!(score = %self.result.score, "no legal moves for {}", game.side_to_move().name());
            return self.result;
        }

        let res = if self.config.max_depth == 0 {
            self.random_move(&moves, rng)
        } else {
            self.search_root(&moves, rng)
        };

        debug!(
            depth = self.config.max_depth,
            nodes = res.nodes,
            score = %res.score,
            bestmove = ?res.bestmove,
            "search finished"
        );

        res
    }

    /// Chooses a random legal move to play.
    fn random_move<G: Rng + ?Sized>(&mut self, moves: &MoveList, rng: &mut G) -> SearchResult {
        let game = self.game;

        if let Some(&mv) = moves.choose(rng) {
            let child = game.with_move_made(mv);
            self.result.score = self.search_child(game, &child, 0, 1, -Score::INF, Score::INF);
            self.result.bestmove = Some(mv);
        }

        self.result
    }

    /// Scores every root move and picks among the best ones.
    fn search_root<G: Rng + ?Sized>(&mut self, moves: &MoveList, rng: &mut G) -> SearchResult {
        let game = self.game;
        let depth = self.config.max_depth;

        let mut best = -Score::INF;
        let mut candidates = MoveList::new();

        for &mv in moves {
            let child = game.with_move_made(mv);

            // Moves scoring below `best` can never be picked, so they may be cut off early.
            // Moves that tie with `best` must be scored exactly, hence the lower bound of `best - 1`.
            let alpha = if best > -Score::INF {
                best - 1
            } else {
                -Score::INF
            };
            let score = self.search_child(game, &child, depth, 1, alpha, Score::INF);
            trace!(%mv, %score, nodes = self.result.nodes, "searched root move");

            if score > best {
                best = score;
                candidates.clear();
                candidates.push(mv);
            } else if score == best {
                candidates.push(mv);
            }
        }

        let pick = if self.config.randomize_ties {
            candidates.choose(rng).copied()
        } else {
            candidates.first().copied()
        };

        self.result.bestmove = pick;
        self.result.score = best;
        self.result
    }

    /// Scores `child`, reached from `parent` by one move, from the perspective of `parent`'s side to move.
    ///
    /// If the move continued a capture chain, the same side is still on move, so the score is
    /// not negated and no depth is used up.
    #[inline(always)]
    fn search_child(
        &mut self,
        parent: &Game<R>,
        child: &Game<R>,
        depth: u8,
        ply: i32,
        alpha: Score,
        beta: Score,
    ) -> Score {
        if child.side_to_move() == parent.side_to_move() {
            self.negamax(child, depth, ply, alpha, beta)
        } else {
            -self.negamax(child, depth.saturating_sub(1), ply, -beta, -alpha)
        }
    }

    /// Primary location of search logic.
    ///
    /// Uses the [negamax](https://www.chessprogramming.org/Negamax) algorithm,
    /// scoring `game` from its side to move's perspective.
    fn negamax(
        &mut self,
        game: &Game<R>,
        depth: u8,
        ply: i32,
        mut alpha: Score,
        beta: Score,
    ) -> Score {
        self.result.nodes += 1;

        // If we've reached a terminal node, score it by how (and how soon) the game ended
        match game.status() {
            GameStatus::Won(side) if game.is_turn_of(side) => return Score::win_in(ply),
            GameStatus::Won(_) => return Score::loss_in(ply),
            GameStatus::Draw => return Score::DRAW,
            GameStatus::Ongoing => {}
        }

        if depth == 0 || ply >= MAX_PLY {
            return game.evaluate(self.config.heuristic_weight);
        }

        let moves = ordered_moves(game);

        // Having nothing to play loses, never passes
        if moves.is_empty() {
            return Score::loss_in(ply);
        }

        // Start with a *really bad* initial score
        let mut best = -Score::INF;

        for mv in moves {
            let child = game.with_move_made(mv);
            let score = self.search_child(game, &child, depth, ply + 1, alpha, beta);

            best = best.max(score);
            alpha = alpha.max(score);

            if alpha >= beta {
                break;
            }
        }

        best
    }
}

/// Generates the legal moves of `game`, with captures and promotions first.
#[inline(always)]
fn ordered_moves<R: Ruleset>(game: &Game<R>) -> MoveList {
    let mut moves = game.legal_moves();
    moves.sort_by_key(|mv| Reverse((mv.is_capture(), mv.promotes())));
    moves
}

/// Finds the best move for `side` in `game`.
///
/// # Errors
/// * [`GameError::NotOnMove`] if `side` is not the side to move.
/// * [`GameError::NoLegalMoves`] if `side` has nothing to play, meaning it has lost.
///
/// # Example
/// ```
/// # use duel::{best_move, Cell, Game, LineGame, SearchConfig, Side};
/// # use rand::{rngs::StdRng, SeedableRng};
/// let game = Game::from_layout(LineGame::TIC_TAC_TOE, "xx./oo./... x").unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let mv = best_move(&game, Side::X, SearchConfig::default(), &mut rng).unwrap();
/// assert_eq!(mv.to(), Cell::new(0, 2));
/// ```
pub fn best_move<R: Ruleset, G: Rng + ?Sized>(
    game: &Game<R>,
    side: Side,
    config: SearchConfig,
    rng: &mut G,
) -> GameResult<Move> {
    if !game.is_turn_of(side) {
        return Err(GameError::NotOnMove(side));
    }

    Search::new(game, config)
        .start(rng)
        .bestmove
        .ok_or(GameError::NoLegalMoves(side))
}
