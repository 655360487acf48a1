use std::str::FromStr;

use crate::error::Error;
use crate::DEFAULT_TOTAL_MOVES;

pub const USAGE: &str = "usage: slider-scramble [SIZE] [state|moves] [TOTAL_MOVES]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Search-backed scramble to a uniformly random board.
    RandomState,
    /// Random walk of a fixed length.
    RandomMoves,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(Mode::RandomState),
            "moves" => Ok(Mode::RandomMoves),
            other => Err(Error::Usage(format!(
                "unknown mode `{}`, expected `state` or `moves`\n{}",
                other, USAGE
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub size: usize,
    pub mode: Mode,
    pub total_moves: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            size: 4,
            mode: Mode::RandomState,
            total_moves: DEFAULT_TOTAL_MOVES,
        }
    }
}

impl Options {
    /// Parses positional arguments, not including the program name. Missing
    /// trailing arguments keep their defaults; `-h`/`--help` yields the usage
    /// text as an error.
    pub fn from_args<I, S>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        if args.iter().any(|arg| matches!(arg.as_ref(), "-h" | "--help")) {
            return Err(Error::Usage(USAGE.to_owned()));
        }
        if args.len() > 3 {
            return Err(Error::Usage(USAGE.to_owned()));
        }

        let mut options = Options::default();
        let mut args = args.iter().map(|arg| arg.as_ref());
        if let Some(size) = args.next() {
            options.size = parse_count("SIZE", size)?;
        }
        if let Some(mode) = args.next() {
            options.mode = mode.parse()?;
        }
        if let Some(total) = args.next() {
            options.total_moves = parse_count("TOTAL_MOVES", total)?;
        }
        Ok(options)
    }
}

fn parse_count(name: &str, value: &str) -> Result<usize, Error> {
    value.parse().map_err(|_| {
        Error::Usage(format!(
            "{} (`{}`) must be a non-negative integer\n{}",
            name, value, USAGE
        ))
    })
}
