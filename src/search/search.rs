//! Minimax with alpha-beta pruning at a fixed depth.
//!
//! Every branch explores a private copy of the position: a recursive call
//! owns the board it mutates and siblings can never observe each other's
//! state. There is no shared board with rollback inside the search.

use super::params::SearchParams;
use super::stats::SearchStats;
use crate::board::{Board, Color, Move};
use crate::eval;

/// Initial alpha-beta window bound
pub const INFINITE: i16 = 30_000;

/// Score of a delivered checkmate, outside any reachable material sum
pub const MATE: i16 = 29_000;

pub struct Search {
    params: SearchParams,
    stats: SearchStats,
}

impl Search {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            stats: SearchStats::new(),
        }
    }

    pub fn params(&self) -> SearchParams {
        self.params
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick a move for the side to move in `board`, searching the configured
    /// number of plies. Returns the move and its score, or None when no legal
    /// move exists (checkmate or stalemate; the caller reports it).
    /// Ties keep the first-seen move in generation order.
    pub fn best_move(&mut self, board: &Board) -> Option<(Move, i16)> {
        self.stats.reset();
        self.stats.start_timing();

        let moves = board.generate_moves(board.side);
        if moves.is_empty() {
            self.stats.update_timing();
            return None;
        }

        let maximizing = board.side == Color::White;
        let mut alpha = -INFINITE;
        let mut beta = INFINITE;
        let mut best: Option<(Move, i16)> = None;

        for mv in moves {
            self.stats.inc_root_node();
            let mut branch = board.clone();
            branch.make_move(mv);
            let score = self.alpha_beta(
                &branch,
                self.params.max_depth.saturating_sub(1),
                alpha,
                beta,
                !maximizing,
            );

            let better = match best {
                None => true,
                Some((_, best_score)) => {
                    if maximizing {
                        score > best_score
                    } else {
                        score < best_score
                    }
                }
            };
            if better {
                best = Some((mv, score));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        self.stats.update_timing();
        best
    }

    /// Alpha-beta over the subtree rooted at `board`. `maximizing` is true
    /// when the node's side to move is the one the evaluator favours with
    /// positive scores, i.e. White.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i16,
        mut beta: i16,
        maximizing: bool,
    ) -> i16 {
        self.stats.inc_node();

        if depth == 0 {
            return eval::evaluate(board);
        }

        let moves = board.generate_moves(board.side);
        if moves.is_empty() {
            // checkmate or stalemate; never the static evaluator
            return terminal_score(board);
        }

        if maximizing {
            let mut best = -INFINITE;
            for mv in moves {
                let mut branch = board.clone();
                branch.make_move(mv);
                let score = self.alpha_beta(&branch, depth - 1, alpha, beta, false);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    self.stats.inc_cutoff();
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITE;
            for mv in moves {
                let mut branch = board.clone();
                branch.make_move(mv);
                let score = self.alpha_beta(&branch, depth - 1, alpha, beta, true);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    self.stats.inc_cutoff();
                    break;
                }
            }
            best
        }
    }
}

/// Score for a side with no legal moves: a mated White scores -MATE, a mated
/// Black +MATE, a stalemate is neutral.
fn terminal_score(board: &Board) -> i16 {
    if board.in_check(board.side) {
        match board.side {
            Color::White => -MATE,
            Color::Black => MATE,
        }
    } else {
        0
    }
}
