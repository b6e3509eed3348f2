/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use duel::{
    ai_move, perft, splitperft, Cell, Checkers, Cli, Command, Difficulty, Game, GameKind,
    GameSetup, LineGame, Move, Ruleset, Side,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}

/// Dispatches `cli` to the driver for the selected game.
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Play {
            setup,
            ai,
            difficulty,
            seed,
            self_play,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };

            let ai = Players {
                computer: if self_play {
                    Side::all().to_vec()
                } else {
                    ai.side().into_iter().collect()
                },
                difficulty,
            };

            match setup.game {
                GameKind::Checkers => play(Game::new(checkers(&setup)?), &ai, &mut rng),
                GameKind::Line => play(Game::new(line_game(&setup)?), &ai, &mut rng),
            }
        }

        Command::Perft {
            depth,
            setup,
            split,
        } => {
            match setup.game {
                GameKind::Checkers => count(&Game::new(checkers(&setup)?), depth, split),
                GameKind::Line => count(&Game::new(line_game(&setup)?), depth, split),
            }
            Ok(())
        }
    }
}

/// Who the computer plays, and how well.
struct Players {
    computer: Vec<Side>,
    difficulty: Difficulty,
}

fn checkers(setup: &GameSetup) -> Result<Checkers> {
    Ok(Checkers::new(setup.size.unwrap_or(8))?)
}

fn line_game(setup: &GameSetup) -> Result<LineGame> {
    let size = setup.size.unwrap_or(3);
    Ok(LineGame::new(size, size, setup.line.unwrap_or(size))?)
}

fn count<R: Ruleset>(game: &Game<R>, depth: usize, split: bool) {
    let nodes = if split {
        splitperft(game, depth)
    } else {
        perft(game, depth)
    };
    println!("\n{nodes}");
}

/// Runs a game on the console until it ends or input runs out.
fn play<R: Ruleset>(mut game: Game<R>, players: &Players, rng: &mut StdRng) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock().lines();

    loop {
        println!("{game}\n");

        let status = game.status();
        if status.is_over() {
            println!("Game over: {status}");
            return Ok(());
        }

        let side = game.side_to_move();
        let mv = if players.computer.contains(&side) {
            let mv = ai_move(&game, side, players.difficulty, rng)?;
            println!("{} plays {mv}", side.name());
            mv
        } else {
            print!("{} to move: ", side.name());
            io::stdout().flush()?;

            let Some(line) = input.next() else {
                // Input closed
                println!();
                return Ok(());
            };
            let line = line.context("Failed to read from stdin")?;
            let line = line.trim();

            if matches!(line, "quit" | "exit" | "q") {
                return Ok(());
            }

            match read_move(&game, line) {
                Ok(Some(mv)) => mv,
                Ok(None) => continue,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            }
        };

        game = game.make_move(mv)?;
    }
}

/// Interprets one line of user input as a move.
///
/// Returns `Ok(None)` if the input was a request that doesn't make a move, like listing destinations.
fn read_move<R: Ruleset>(game: &Game<R>, input: &str) -> Result<Option<Move>> {
    let cells = parse_cells(input)?;

    let mv = match (game.rules().is_placement(), game.chain(), cells.as_slice()) {
        // Placement games take a single cell
        (true, _, &[to]) => game.find_move(None, to)?,

        // Mid-chain, the piece to move is already known
        (false, Some(from), &[to]) => game.find_move(Some(from), to)?,

        // Otherwise, a single cell asks where that piece can go
        (false, None, &[from]) => {
            let destinations = game.legal_destinations(from)?;
            if destinations.is_empty() {
                println!("The piece at {from} cannot move");
            } else {
                let list = destinations.iter().map(|c| c.to_string()).collect::<Vec<_>>();
                println!("The piece at {from} can move to {}", list.join(" "));
            }
            return Ok(None);
        }

        (false, _, &[from, to]) => game.find_move(Some(from), to)?,

        _ if game.rules().is_placement() => bail!("Enter a move as `row col`"),
        _ => bail!("Enter a move as `row col row col`"),
    };

    Ok(Some(mv))
}

/// Parses pairs of whitespace or comma separated numbers into cells.
fn parse_cells(input: &str) -> Result<Vec<Cell>> {
    let numbers = input
        .split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .with_context(|| format!("Invalid coordinate {part:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    if numbers.is_empty() || numbers.len() % 2 != 0 {
        bail!("Coordinates must come in `row col` pairs. Got {input:?}");
    }

    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Cell::new(pair[0], pair[1]))
        .collect())
}
