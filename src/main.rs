use log::info;
use slider_scramble::{write_board, Mode, Options, Puzzle, Scramble};
use std::{env, io};

fn init_logging() {
    // info by default so the chosen mode is reported; RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let options = match Options::from_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    let puzzle = Puzzle::new(options.size)?;
    let mut rng = rand::thread_rng();
    let scramble: Scramble = match options.mode {
        Mode::RandomState => {
            info!("searching for a random-state scramble of the {}", puzzle);
            puzzle.random_state_scramble(&mut rng)
        }
        Mode::RandomMoves => {
            info!("walking {} random moves on the {}", options.total_moves, puzzle);
            puzzle.random_moves_scramble(&mut rng, options.total_moves)
        }
    };

    println!("Scramble ({} moves):\n{}\n", scramble.len(), scramble);

    let scrambled = puzzle.apply_scramble(puzzle.solved(), &scramble)?;
    write_board(&mut io::stdout(), &puzzle, &scrambled)?;
    Ok(())
}
