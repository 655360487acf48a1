//! Terminal drawing of boards.

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::puzzle::{Board, Puzzle};

/// Writes `board` as a grid, dimming the blank and highlighting tiles that
/// already sit in their solved cell.
pub fn write_board<W: Write>(out: &mut W, puzzle: &Puzzle, board: &Board) -> io::Result<()> {
    let width = (puzzle.cells() - 1).to_string().len();
    let solved = puzzle.solved().tiles();

    for (row, values) in board.tiles().chunks(puzzle.size()).enumerate() {
        for (col, &value) in values.iter().enumerate() {
            let index = row * puzzle.size() + col;
            let (color, text) = if value == 0 {
                (Color::DarkGrey, format!("{:>width$}", ".", width = width))
            } else if solved[index] == value {
                (Color::Green, format!("{:>width$}", value, width = width))
            } else {
                (Color::Reset, format!("{:>width$}", value, width = width))
            };
            queue!(out, SetForegroundColor(color), Print(text), ResetColor, Print(" "))?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drops `ESC [ ... m` colour sequences.
    fn plain(text: &str) -> String {
        let mut plain = String::new();
        let mut in_escape = false;
        for c in text.chars() {
            match (in_escape, c) {
                (false, '\x1b') => in_escape = true,
                (false, c) => plain.push(c),
                (true, 'm') => in_escape = false,
                (true, _) => {}
            }
        }
        plain
    }

    #[test]
    fn writes_rows_in_order() {
        let puzzle = Puzzle::new(3).unwrap();
        let board = puzzle.board(&[1, 2, 3, 4, 0, 6, 7, 5, 8]).unwrap();
        let mut out = Vec::new();
        write_board(&mut out, &puzzle, &board).unwrap();

        let text = plain(&String::from_utf8(out).unwrap());
        assert_eq!("1 2 3 \n4 . 6 \n7 5 8 \n", text);
    }

    #[test]
    fn pads_to_widest_tile() {
        let puzzle = Puzzle::new(4).unwrap();
        let mut out = Vec::new();
        write_board(&mut out, &puzzle, puzzle.solved()).unwrap();

        let text = plain(&String::from_utf8(out).unwrap());
        assert_eq!(" 1  2  3  4 ", text.lines().next().unwrap());
        assert_eq!("13 14 15  . ", text.lines().last().unwrap());
    }
}
