mod logging;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand};
use log::debug;
use water_sort_engine::{
    CAPACITY, LevelDefinition, Palette, apply_move, check_win, find_best_move, format_board,
    generate_level, generate_level_seeded, parse_board,
};

#[derive(Parser)]
#[command(name = "water-sort", about = "Generate, inspect and auto-play water sort levels", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print engine debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the starting board of a level
    Level {
        index: u32,

        /// Seed for a reproducible shuffle
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Suggest a move for a board such as "AAB BBA ."
    Hint { board: String },

    /// Follow hints from the start of a level until it is won or stuck
    Play {
        index: u32,

        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(short, long, default_value = "200")]
        max_moves: usize,
    },
}

fn load_level(index: u32, seed: Option<u64>) -> Result<LevelDefinition> {
    ensure!(index >= 1, "levels start at 1");
    Ok(match seed {
        Some(seed) => generate_level_seeded(index, seed, &Palette::default()),
        None => generate_level(index),
    })
}

fn play(level: &LevelDefinition, max_moves: usize) -> Result<()> {
    let mut tubes = level.instantiate();
    println!("start  {}", format_board(&tubes));
    for step in 1..=max_moves {
        if check_win(&tubes, level.capacity) {
            println!("Solved in {} moves.", step - 1);
            return Ok(());
        }
        let Some(hint) = find_best_move(&tubes, level.capacity) else {
            println!("Deadlocked after {} moves.", step - 1);
            return Ok(());
        };
        let (next, moved) = apply_move(&tubes, hint.from_index, hint.to_index, level.capacity)
            .context("hint suggested an illegal move")?;
        debug!("step {step}: {} -> {} moved {moved}", hint.from_index, hint.to_index);
        tubes = next;
        println!(
            "{step:>4}   {} -> {} ({moved})   {}",
            hint.from_index,
            hint.to_index,
            format_board(&tubes)
        );
    }
    if check_win(&tubes, level.capacity) {
        println!("Solved in {max_moves} moves.");
        return Ok(());
    }
    bail!("gave up after {max_moves} moves")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Level { index, seed } => {
            let level = load_level(index, seed)?;
            println!("{}", format_board(&level.instantiate()));
        }
        Commands::Hint { board } => {
            let tubes = parse_board(&board, CAPACITY).context("could not parse board")?;
            match find_best_move(&tubes, CAPACITY) {
                Some(hint) => println!("{} -> {}", hint.from_index, hint.to_index),
                None => println!("No legal move."),
            }
        }
        Commands::Play {
            index,
            seed,
            max_moves,
        } => {
            let level = load_level(index, seed)?;
            play(&level, max_moves)?;
        }
    }
    Ok(())
}
