//! Example demonstrating Qu0x puzzle generation.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` from a `GeneratorConfig`
//! - Generate a daily, phrase-seeded, or random puzzle
//! - Display the dice, target, allowed operators, and the closest hint
//! - Scan a range of days for puzzles without an exact solution
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! ```
//!
//! Generate the puzzle of a given day, or from a phrase:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --seed 42
//! cargo run --example generate_puzzle -- --seed 2025-06-01
//! cargo run --example generate_puzzle -- --seed "lunch break"
//! ```
//!
//! Scan days 0-999 and list every day whose target cannot be reached exactly
//! with `+ - * / ^`:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --scan 1000
//! ```

use std::process;

use clap::Parser;
use qu0x_core::FaceRange;
use qu0x_eval::search;
use qu0x_generator::{
    DayIndex, GeneratedPuzzle, GeneratorConfig, PuzzleGenerator, PuzzleSeed, TargetRange,
};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Day number, ISO date, or phrase. A random phrase is used if omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<PuzzleSeed>,

    /// Draw targets from 20-250 instead of 1-100.
    #[arg(long)]
    wide: bool,

    /// Highest die face (1-9).
    #[arg(long, value_name = "MAX", default_value_t = 6)]
    faces: u8,

    /// Withhold one operator per puzzle.
    #[arg(long)]
    block_operators: bool,

    /// Scan this many days from day 0 for puzzles without an exact solution.
    #[arg(long, value_name = "DAYS")]
    scan: Option<u32>,
}

fn main() {
    let args = Args::parse();
    let faces = match FaceRange::new(1, args.faces) {
        Ok(faces) => faces,
        Err(err) => {
            eprintln!("--faces: {err}");
            process::exit(2);
        }
    };
    let targets = if args.wide {
        TargetRange::WIDE
    } else {
        TargetRange::STANDARD
    };
    let config = GeneratorConfig::default()
        .faces(faces)
        .targets(targets)
        .block_operators(args.block_operators);
    let generator = PuzzleGenerator::new(config);

    if let Some(days) = args.scan {
        scan(&generator, days);
        return;
    }

    let puzzle = match args.seed {
        Some(seed) => generator.generate_with_seed(seed),
        None => generator.generate(),
    };
    print_puzzle(&puzzle);
}

fn scan(generator: &PuzzleGenerator, days: u32) {
    let mut unsolved = (0..days)
        .into_par_iter()
        .filter_map(|day| {
            let puzzle = generator.generate_day(DayIndex::new(day));
            let hint = search::closest(&puzzle.dice, puzzle.target, puzzle.allowed_operators)?;
            (hint.distance(puzzle.target) > 0).then_some((puzzle, hint))
        })
        .collect::<Vec<_>>();
    unsolved.sort_by_key(|(puzzle, _)| puzzle.seed.day());

    println!("Scanned {days} days, {} without an exact solution", unsolved.len());
    for (puzzle, hint) in &unsolved {
        println!(
            "  #{:<5} {}  target {:>3}  best {} = {}",
            puzzle.seed.day().map_or(0, DayIndex::game_number),
            puzzle.dice,
            puzzle.target,
            hint.expression,
            hint.value,
        );
    }
}

fn print_puzzle(puzzle: &GeneratedPuzzle) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    if let Some(day) = puzzle.seed.day() {
        let date = day
            .date()
            .map_or_else(|| "-".to_owned(), |date| date.to_string());
        println!("  game #{} ({date})", day.game_number());
    }
    println!();

    println!("Dice:");
    println!("  {}", puzzle.dice);
    println!();
    println!("Target:");
    println!("  {}", puzzle.target);
    println!();
    println!("Operators:");
    println!("  {}", puzzle.allowed_operators);
    println!();

    println!("Closest:");
    match search::closest(&puzzle.dice, puzzle.target, puzzle.allowed_operators) {
        Some(hint) => {
            println!("  {} = {}", hint.expression, hint.value);
            println!("  distance: {}", hint.distance(puzzle.target));
        }
        None => println!("  -"),
    }
}
