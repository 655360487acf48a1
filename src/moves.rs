use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Longest run a single scramble token may ask for.
pub const MAX_RUN: usize = u16::MAX as usize;

/// A single slide, named for the side of the blank the moving tile comes
/// from.
///
/// `Up` pulls the tile above the blank down into it, which is the same as
/// swapping the blank with its upper neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Down, Move::Right];

    /// Row and column offset of the blank after this move.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Left => (0, -1),
            Move::Down => (1, 0),
            Move::Right => (0, 1),
        }
    }

    pub fn inverse(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Move::Up => 'U',
            Move::Left => 'L',
            Move::Down => 'D',
            Move::Right => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Move::Up),
            'L' => Some(Move::Left),
            'D' => Some(Move::Down),
            'R' => Some(Move::Right),
            _ => None,
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Move::Up => 0b0001,
            Move::Left => 0b0010,
            Move::Down => 0b0100,
            Move::Right => 0b1000,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A set of at most four moves, kept in a single byte so search frames
/// stay on the stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveSet(u8);

impl MoveSet {
    pub fn empty() -> Self {
        MoveSet(0)
    }

    pub fn insert(&mut self, mv: Move) {
        self.0 |= mv.bit();
    }

    pub fn remove(&mut self, mv: Move) {
        self.0 &= !mv.bit();
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.0 & mv.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        Move::ALL.into_iter().filter(move |&mv| self.contains(mv))
    }

    /// Removes and returns the first move in `Move::ALL` order.
    pub fn pop(&mut self) -> Option<Move> {
        let mv = self.iter().next()?;
        self.remove(mv);
        Some(mv)
    }

    /// Picks one member uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Move> {
        if self.is_empty() {
            return None;
        }
        let pick = rng.gen_range(0..self.len());
        self.iter().nth(pick)
    }
}

impl FromIterator<Move> for MoveSet {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        let mut set = MoveSet::empty();
        for mv in iter {
            set.insert(mv);
        }
        set
    }
}

/// An ordered list of atomic moves which prints in grouped notation:
/// consecutive repeats collapse to `<move><count>`, so `U U U L` is `U3 L`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scramble {
    moves: Vec<Move>,
}

impl Scramble {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    /// Turns a solution (scrambled to solved) into the scramble that leads
    /// from solved back to the scrambled board.
    pub fn from_solution(solution: &[Move]) -> Self {
        let moves = solution.iter().rev().map(Move::inverse).collect();
        Self { moves }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Consecutive runs of identical moves.
    pub fn runs(&self) -> Vec<(Move, usize)> {
        let mut runs: Vec<(Move, usize)> = Vec::new();
        for &mv in &self.moves {
            match runs.last_mut() {
                Some((last, count)) if *last == mv => *count += 1,
                _ => runs.push((mv, 1)),
            }
        }
        runs
    }
}

impl fmt::Display for Scramble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (mv, count)) in self.runs().into_iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mv)?;
            if count > 1 {
                write!(f, "{}", count)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Scramble {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut moves = Vec::new();
        for token in s.split_ascii_whitespace() {
            let invalid = || Error::InvalidToken(token.to_owned());
            let mut chars = token.chars();
            let mv = chars.next().and_then(Move::from_letter).ok_or_else(invalid)?;
            let digits = chars.as_str();
            let count = if digits.is_empty() {
                1
            } else if digits.bytes().all(|b| b.is_ascii_digit()) {
                digits.parse::<usize>().map_err(|_| invalid())?
            } else {
                return Err(invalid());
            };
            if count == 0 || count > MAX_RUN {
                return Err(invalid());
            }
            moves.extend(std::iter::repeat(mv).take(count));
        }
        Ok(Self { moves })
    }
}
