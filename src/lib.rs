//! Scrambles for n×n sliding-tile puzzles.
//!
//! [`get_random_state_scramble`] draws a uniformly random solvable board and
//! returns the moves that reach it from solved, found with IDA*.
//! [`get_random_moves_scramble`] is the cheap fallback: a random walk that
//! never immediately undoes itself.

mod error;
mod moves;
mod options;
mod puzzle;
mod render;
mod search;

pub use error::Error;
pub use moves::{Move, MoveSet, Scramble, MAX_RUN};
pub use options::{Mode, Options};
pub use puzzle::{Board, Puzzle, MAX_CELLS, MAX_SIZE};
pub use render::write_board;
pub use search::SearchStats;

/// Walk length used when the caller has no preference.
pub const DEFAULT_TOTAL_MOVES: usize = 50;

/// Moves which, applied to a solved `size`×`size` puzzle, produce a uniformly
/// random solvable board other than the solved one.
///
/// Cost grows steeply with `size`; 4×4 can take seconds and anything larger
/// belongs on a background worker.
pub fn get_random_state_scramble(size: usize) -> Result<String, Error> {
    let puzzle = Puzzle::new(size)?;
    let scramble = puzzle.random_state_scramble(&mut rand::thread_rng());
    Ok(scramble.to_string())
}

/// `total_moves` random legal moves from the solved board, grouped into
/// runs.
pub fn get_random_moves_scramble(size: usize, total_moves: usize) -> Result<String, Error> {
    let puzzle = Puzzle::new(size)?;
    let scramble = puzzle.random_moves_scramble(&mut rand::thread_rng(), total_moves);
    Ok(scramble.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    /// Sum of run lengths, counting a bare letter as one.
    fn token_count(scramble: &str) -> usize {
        scramble
            .split(' ')
            .filter(|token| !token.is_empty())
            .map(|token| {
                let digits = &token[1..];
                assert!(matches!(&token[..1], "U" | "D" | "L" | "R"), "{}", token);
                if digits.is_empty() {
                    1
                } else {
                    let count: usize = digits.parse().unwrap();
                    assert!(count >= 2, "{}", token);
                    count
                }
            })
            .sum()
    }

    #[rstest]
    #[case(2, 0)]
    #[case(2, 1)]
    #[case(3, DEFAULT_TOTAL_MOVES)]
    #[case(4, DEFAULT_TOTAL_MOVES)]
    #[case(7, 500)]
    fn random_moves_count_matches(#[case] size: usize, #[case] total: usize) {
        let scramble = get_random_moves_scramble(size, total).unwrap();
        assert_eq!(total, token_count(&scramble));

        let puzzle = Puzzle::new(size).unwrap();
        let parsed: Scramble = scramble.parse().unwrap();
        assert_eq!(total, parsed.len());
        assert!(puzzle.apply_scramble(puzzle.solved(), &parsed).is_ok());
    }

    #[test]
    fn random_moves_open_by_pulling_a_neighbor_of_the_corner_blank() {
        // from solved only the tiles above and left of the blank can slide
        for _ in 0..20 {
            let scramble = get_random_moves_scramble(4, 5).unwrap();
            assert!(matches!(&scramble[..1], "U" | "L"), "{}", scramble);
        }
    }

    #[test]
    fn random_moves_groups_runs() {
        // a 2x2 walk can only circle, so every run has length one
        let scramble = get_random_moves_scramble(2, 12).unwrap();
        assert_eq!(12, scramble.split(' ').count());
    }

    #[test]
    fn random_state_two_by_two_covers_every_scrambled_board() {
        let puzzle = Puzzle::new(2).unwrap();
        let mut boards = HashSet::new();
        for _ in 0..500 {
            let scramble = get_random_state_scramble(2).unwrap();
            assert!(token_count(&scramble) > 0);

            let parsed: Scramble = scramble.parse().unwrap();
            let board = puzzle.apply_scramble(puzzle.solved(), &parsed).unwrap();
            assert!(puzzle.is_solvable(&board));
            assert!(!puzzle.is_solved(&board));
            boards.insert(board);
        }
        // 4!/2 solvable boards minus solved
        assert_eq!(11, boards.len());
    }

    #[test]
    fn random_state_three_by_three_round_trips() {
        let puzzle = Puzzle::new(3).unwrap();
        let scramble: Scramble = get_random_state_scramble(3).unwrap().parse().unwrap();
        let board = puzzle.apply_scramble(puzzle.solved(), &scramble).unwrap();
        assert!(puzzle.is_solvable(&board));
        assert!(!puzzle.is_solved(&board));
        assert!(scramble.len() <= 31);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(MAX_SIZE + 1)]
    fn entry_points_reject_bad_sizes(#[case] size: usize) {
        assert!(matches!(get_random_state_scramble(size), Err(Error::InvalidSize { .. })));
        assert!(matches!(get_random_moves_scramble(size, 10), Err(Error::InvalidSize { .. })));
    }
}
