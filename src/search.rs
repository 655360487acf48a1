//! Iterative-deepening A* over board states.
//!
//! Each pass is a depth-first search bounded by `g + h`, where `h` is the
//! linear-conflict heuristic. A failed pass raises the bound to the smallest
//! `f` it pruned. Only boards on the current path are remembered.

use log::debug;
use std::collections::HashSet;

use crate::moves::MoveSet;
use crate::puzzle::{Board, Puzzle};

/// Counters from one call to [`Puzzle::solve_with_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Bounded depth-first passes, including the successful one.
    pub passes: usize,
    /// Boards pushed onto the search stack across all passes.
    pub expanded: usize,
    /// Bound of the final pass.
    pub bound: usize,
}

enum Pass {
    Found(Vec<Board>),
    Exceeded(usize),
    Exhausted,
}

struct Frame {
    board: Board,
    depth: usize,
    pending: MoveSet,
}

impl Puzzle {
    /// Shortest path of boards from `start` to the solved board, both ends
    /// included. `None` only if no path exists.
    pub fn solve(&self, start: &Board) -> Option<Vec<Board>> {
        let (path, stats) = self.solve_with_stats(start);
        debug!(
            target: "search",
            "{}: {} passes, {} expanded, final bound {}",
            self, stats.passes, stats.expanded, stats.bound
        );
        path
    }

    pub fn solve_with_stats(&self, start: &Board) -> (Option<Vec<Board>>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut bound = self.linear_conflicts(start);

        loop {
            stats.passes += 1;
            stats.bound = bound;
            match self.bounded_pass(start, bound, &mut stats) {
                Pass::Found(path) => return (Some(path), stats),
                Pass::Exceeded(next) => {
                    debug!(target: "search", "raising bound {} -> {}", bound, next);
                    bound = next;
                }
                Pass::Exhausted => return (None, stats),
            }
        }
    }

    fn bounded_pass(&self, start: &Board, bound: usize, stats: &mut SearchStats) -> Pass {
        let f = self.linear_conflicts(start);
        if f > bound {
            return Pass::Exceeded(f);
        }
        if self.is_solved(start) {
            return Pass::Found(vec![*start]);
        }

        let mut stack = vec![Frame {
            board: *start,
            depth: 0,
            pending: self.legal_moves(start),
        }];
        let mut on_path = HashSet::from([*start]);
        let mut next_bound: Option<usize> = None;
        stats.expanded += 1;

        while let Some(frame) = stack.last_mut() {
            let Some(mv) = frame.pending.pop() else {
                let done = stack.pop().map(|frame| frame.board);
                if let Some(board) = done {
                    on_path.remove(&board);
                }
                continue;
            };

            let child = match self.apply_move(&frame.board, mv) {
                Some(child) => child,
                None => continue,
            };
            if on_path.contains(&child) {
                continue;
            }

            let depth = frame.depth + 1;
            let f = depth + self.linear_conflicts(&child);
            if f > bound {
                next_bound = Some(next_bound.map_or(f, |b| b.min(f)));
                continue;
            }

            if self.is_solved(&child) {
                let mut path: Vec<Board> = stack.iter().map(|frame| frame.board).collect();
                path.push(child);
                return Pass::Found(path);
            }

            on_path.insert(child);
            stack.push(Frame {
                board: child,
                depth,
                pending: self.legal_moves(&child),
            });
            stats.expanded += 1;
        }

        match next_bound {
            Some(next) => Pass::Exceeded(next),
            None => Pass::Exhausted,
        }
    }
}
