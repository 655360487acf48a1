use log::trace;
use rand::{seq::SliceRandom, Rng};
use std::fmt;

use crate::error::Error;
use crate::moves::{Move, MoveSet, Scramble};

/// Largest supported side length.
pub const MAX_SIZE: usize = 8;
pub const MAX_CELLS: usize = MAX_SIZE * MAX_SIZE;

const BLANK: u8 = 0;

/// One configuration of an n×n puzzle: tile values in row-major order with
/// `0` for the blank. Cells past `n²` are unused and always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [u8; MAX_CELLS],
    cells: u8,
    blank: u8,
}

impl Board {
    pub fn tiles(&self) -> &[u8] {
        &self.tiles[..self.cells as usize]
    }

    pub fn blank(&self) -> usize {
        self.blank as usize
    }

    fn swap_blank(&self, to: usize) -> Self {
        let mut next = *self;
        next.tiles.swap(self.blank as usize, to);
        next.blank = to as u8;
        next
    }
}

/// The rules and goal of an n×n sliding-tile puzzle.
#[derive(Debug, Clone)]
pub struct Puzzle {
    size: usize,
    solved: Board,
    // goal[value] is the index where `value` sits in the solved board
    goal: [u8; MAX_CELLS],
}

impl Puzzle {
    pub fn new(size: usize) -> Result<Self, Error> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(Error::InvalidSize {
                size,
                max: MAX_SIZE,
            });
        }
        let cells = size * size;

        let mut tiles = [BLANK; MAX_CELLS];
        for (index, tile) in tiles.iter_mut().enumerate().take(cells - 1) {
            *tile = (index + 1) as u8;
        }
        let solved = Board {
            tiles,
            cells: cells as u8,
            blank: (cells - 1) as u8,
        };

        let mut goal = [0; MAX_CELLS];
        for (index, &value) in solved.tiles().iter().enumerate() {
            goal[value as usize] = index as u8;
        }

        Ok(Self { size, solved, goal })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> usize {
        self.size * self.size
    }

    pub fn solved(&self) -> &Board {
        &self.solved
    }

    pub fn is_solved(&self, board: &Board) -> bool {
        *board == self.solved
    }

    /// Builds a board from row-major tile values, which must be a
    /// permutation of `0..n²`.
    pub fn board(&self, values: &[u8]) -> Result<Board, Error> {
        let cells = self.cells();
        let invalid = || Error::InvalidBoard {
            tiles: values.to_vec(),
            cells,
        };
        if values.len() != cells {
            return Err(invalid());
        }

        let mut seen = [false; MAX_CELLS];
        let mut tiles = [BLANK; MAX_CELLS];
        let mut blank = 0;
        for (index, &value) in values.iter().enumerate() {
            let slot = seen.get_mut(value as usize).filter(|_| (value as usize) < cells);
            match slot {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(invalid()),
            }
            tiles[index] = value;
            if value == BLANK {
                blank = index;
            }
        }

        Ok(Board {
            tiles,
            cells: cells as u8,
            blank: blank as u8,
        })
    }

    fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    fn goal_coords(&self, value: u8) -> (usize, usize) {
        self.coords(self.goal[value as usize] as usize)
    }

    /// Moves that have a tile to pull into the blank.
    pub fn legal_moves(&self, board: &Board) -> MoveSet {
        let (row, col) = self.coords(board.blank());
        let last = self.size - 1;
        let mut moves = MoveSet::empty();
        if row > 0 {
            moves.insert(Move::Up);
        }
        if row < last {
            moves.insert(Move::Down);
        }
        if col > 0 {
            moves.insert(Move::Left);
        }
        if col < last {
            moves.insert(Move::Right);
        }
        moves
    }

    pub fn apply_move(&self, board: &Board, movement: Move) -> Option<Board> {
        let (dr, dc) = movement.as_offset();
        let (row, col) = self.coords(board.blank());

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let size = self.size as isize;

        if new_row >= 0 && new_row < size && new_col >= 0 && new_col < size {
            let to = new_row as usize * self.size + new_col as usize;
            Some(board.swap_blank(to))
        } else {
            None
        }
    }

    pub fn apply_scramble(&self, board: &Board, scramble: &Scramble) -> Result<Board, Error> {
        let mut current = *board;
        for (index, &mv) in scramble.moves().iter().enumerate() {
            current = self
                .apply_move(&current, mv)
                .ok_or(Error::IllegalMove { mv, index })?;
        }
        Ok(current)
    }

    /// The single move leading from `from` to `to`, if they are neighbors.
    pub fn move_between(&self, from: &Board, to: &Board) -> Option<Move> {
        Move::ALL.into_iter().find(|&mv| {
            self.apply_move(from, mv)
                .map_or(false, |next| next == *to)
        })
    }

    /// Pairs `i < j` whose values appear in the opposite order in the solved
    /// board. The blank counts like any other tile.
    pub fn count_inversions(&self, board: &Board) -> usize {
        let ranks: Vec<u8> = board
            .tiles()
            .iter()
            .map(|&value| self.goal[value as usize])
            .collect();
        ranks
            .iter()
            .enumerate()
            .map(|(i, &rank)| ranks[i + 1..].iter().filter(|&&later| later < rank).count())
            .sum()
    }

    /// Manhattan distance between the blank's position and its solved position.
    pub fn taxicab_distance(&self, board: &Board) -> usize {
        let (row, col) = self.coords(board.blank());
        let (goal_row, goal_col) = self.coords(self.solved.blank());
        row.abs_diff(goal_row) + col.abs_diff(goal_col)
    }

    /// Every slide is one transposition and moves the blank by one step, so
    /// a board is reachable exactly when both parities agree.
    pub fn is_solvable(&self, board: &Board) -> bool {
        self.taxicab_distance(board) % 2 == self.count_inversions(board) % 2
    }

    pub fn manhattan_distance(&self, board: &Board) -> usize {
        let mut distance = 0;
        for (index, &value) in board.tiles().iter().enumerate() {
            if value != BLANK {
                let (row, col) = self.coords(index);
                let (goal_row, goal_col) = self.goal_coords(value);
                distance += row.abs_diff(goal_row) + col.abs_diff(goal_col);
            }
        }
        distance
    }

    /// Manhattan distance plus two moves for every tile that has to leave its
    /// goal line so the others in that line can pass.
    pub fn linear_conflicts(&self, board: &Board) -> usize {
        let mut removed = 0;
        for line in 0..self.size {
            removed += self.line_conflicts(board, |i| line * self.size + i, |(row, col)| {
                (row == line).then_some(col)
            });
            removed += self.line_conflicts(board, |i| i * self.size + line, |(row, col)| {
                (col == line).then_some(row)
            });
        }
        self.manhattan_distance(board) + 2 * removed
    }

    /// Number of tiles removed from one line before none of the remaining
    /// goal-line tiles are in reversed order.
    fn line_conflicts(
        &self,
        board: &Board,
        cell: impl Fn(usize) -> usize,
        goal_in_line: impl Fn((usize, usize)) -> Option<usize>,
    ) -> usize {
        // goal offsets along the line, in current order
        let mut goals = [0usize; MAX_SIZE];
        let mut len = 0;
        for i in 0..self.size {
            let value = board.tiles[cell(i)];
            if value == BLANK {
                continue;
            }
            if let Some(offset) = goal_in_line(self.goal_coords(value)) {
                goals[len] = offset;
                len += 1;
            }
        }

        let mut active = [true; MAX_SIZE];
        let mut removed = 0;
        loop {
            let mut worst = None;
            let mut worst_count = 0;
            for i in (0..len).filter(|&i| active[i]) {
                let count = (0..len)
                    .filter(|&j| active[j])
                    .filter(|&j| (i < j && goals[i] > goals[j]) || (j < i && goals[j] > goals[i]))
                    .count();
                if count > worst_count {
                    worst = Some(i);
                    worst_count = count;
                }
            }
            match worst {
                Some(i) => {
                    active[i] = false;
                    removed += 1;
                }
                None => return removed,
            }
        }
    }

    /// Uniformly random board among the solvable ones other than solved.
    pub fn random_solvable_board<R: Rng + ?Sized>(&self, rng: &mut R) -> Board {
        let mut values: Vec<u8> = self.solved.tiles().to_vec();
        let mut draws = 0;
        loop {
            draws += 1;
            values.shuffle(rng);
            let blank = values.iter().position(|&v| v == BLANK).unwrap_or_default();
            let mut candidate = self.solved;
            candidate.tiles[..values.len()].copy_from_slice(&values);
            candidate.blank = blank as u8;

            if self.is_solvable(&candidate) && !self.is_solved(&candidate) {
                trace!(target: "scramble", "accepted draw {} after {} rejections", draws, draws - 1);
                return candidate;
            }
            trace!(target: "scramble", "rejected draw {}: {:?}", draws, candidate.tiles());
        }
    }

    /// Random legal moves from the solved board, never undoing the previous
    /// move.
    pub fn random_walk<R: Rng + ?Sized>(&self, rng: &mut R, total_moves: usize) -> Vec<Move> {
        let mut board = self.solved;
        let mut last: Option<Move> = None;
        let mut moves = Vec::with_capacity(total_moves);

        for _ in 0..total_moves {
            let mut options = self.legal_moves(&board);
            if let Some(last) = last {
                options.remove(last.inverse());
            }
            // every cell has at least two neighbors when n >= 2
            let mv = match options.choose(rng) {
                Some(mv) => mv,
                None => unreachable!("no move left from {:?}", board.tiles()),
            };
            board = match self.apply_move(&board, mv) {
                Some(next) => next,
                None => unreachable!("{} was listed as legal", mv),
            };
            moves.push(mv);
            last = Some(mv);
        }
        moves
    }

    /// A scramble leading to a uniformly random solvable board.
    ///
    /// Panics if the search cannot solve a board the parity check accepted;
    /// that means the heuristic or the move model is broken.
    pub fn random_state_scramble<R: Rng + ?Sized>(&self, rng: &mut R) -> Scramble {
        let candidate = self.random_solvable_board(rng);
        let path = self
            .solve(&candidate)
            .unwrap_or_else(|| panic!("no solution found for solvable board {:?}", candidate.tiles()));

        let solution: Vec<Move> = path
            .windows(2)
            .map(|pair| {
                self.move_between(&pair[0], &pair[1])
                    .unwrap_or_else(|| panic!("search path has a gap at {:?}", pair[1].tiles()))
            })
            .collect();
        Scramble::from_solution(&solution)
    }

    pub fn random_moves_scramble<R: Rng + ?Sized>(&self, rng: &mut R, total_moves: usize) -> Scramble {
        Scramble::new(self.random_walk(rng, total_moves))
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} puzzle", self.size, self.size)
    }
}
