//! Fail-hard alpha-beta search with quiescence.

use sable_core::{Board, Move, Position, generate_legal_moves, generate_noisy_moves};

use crate::eval::evaluate;
use crate::search::IMMEDIATE_MATE_SCORE;
use crate::search::control::SearchControl;
use crate::search::ordering::order_moves;
use crate::search::tt::{Bound, TranspositionTable};

/// Best root move of the iteration in progress.
#[derive(Debug, Clone, Copy)]
pub(super) struct RootBest {
    pub best_move: Move,
    pub score: i32,
    /// Set once a root move has raised alpha.
    pub searched_one: bool,
}

impl RootBest {
    pub fn new() -> Self {
        Self {
            best_move: Move::NULL,
            score: i32::MIN,
            searched_one: false,
        }
    }
}

/// State threaded through one search.
pub(super) struct SearchContext<'a> {
    pub tt: &'a mut TranspositionTable,
    pub control: &'a SearchControl,
    pub nodes: u64,
    pub root: RootBest,
}

impl<'a> SearchContext<'a> {
    pub fn new(tt: &'a mut TranspositionTable, control: &'a SearchControl) -> Self {
        Self {
            tt,
            control,
            nodes: 0,
            root: RootBest::new(),
        }
    }
}

/// Score `pos` from the side to move's point of view, `depth` plies deep.
///
/// Returns 0 as soon as the search is cancelled; callers must discard the
/// value in that case.
pub(super) fn negamax(
    ctx: &mut SearchContext<'_>,
    pos: &mut Position,
    depth: u16,
    ply: u16,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if ctx.control.is_cancelled() {
        return 0;
    }
    ctx.nodes += 1;
    ctx.control.node_visited(ctx.nodes);

    if ply > 0 {
        if pos.is_fifty_move_draw() || pos.is_repetition() {
            return 0;
        }

        // No line from here can beat a mate delivered at this ply.
        alpha = alpha.max(-IMMEDIATE_MATE_SCORE + ply as i32);
        beta = beta.min(IMMEDIATE_MATE_SCORE - ply as i32);
        if alpha >= beta {
            return alpha;
        }
    }

    let hash = pos.hash();
    if let Some(score) = ctx.tt.lookup(hash, depth, ply, alpha, beta) {
        if ply == 0 {
            ctx.root.best_move = ctx.tt.stored_move(hash).unwrap_or(Move::NULL);
            ctx.root.score = score;
        }
        return score;
    }

    if depth == 0 {
        return quiescence(ctx, pos.board(), alpha, beta);
    }

    let board = *pos.board();
    let mut moves = generate_legal_moves(&board);
    if moves.is_empty() {
        return if board.in_check() {
            -(IMMEDIATE_MATE_SCORE - ply as i32)
        } else {
            0
        };
    }
    order_moves(&board, moves.as_mut_slice(), &board.opponent_attack_maps());

    let mut bound = Bound::UpperBound;
    let mut best_move = Move::NULL;

    for mv in moves.iter().copied() {
        let score = {
            let mut child = pos.play(mv);
            -negamax(ctx, &mut child, depth - 1, ply + 1, -beta, -alpha)
        };

        if ctx.control.is_cancelled() {
            return 0;
        }

        if score >= beta {
            ctx.tt.store(hash, depth, ply, beta, Bound::LowerBound, mv);
            return beta;
        }

        if score > alpha {
            bound = Bound::Exact;
            best_move = mv;
            alpha = score;
            if ply == 0 {
                ctx.root = RootBest {
                    best_move: mv,
                    score,
                    searched_one: true,
                };
            }
        }
    }

    ctx.tt.store(hash, depth, ply, alpha, bound, best_move);
    alpha
}

/// Search captures and promotions until the position is quiet.
fn quiescence(ctx: &mut SearchContext<'_>, board: &Board, mut alpha: i32, beta: i32) -> i32 {
    if ctx.control.is_cancelled() {
        return 0;
    }
    ctx.nodes += 1;
    ctx.control.node_visited(ctx.nodes);

    let stand_pat = evaluate(board);
    if stand_pat >= beta {
        return beta;
    }
    alpha = alpha.max(stand_pat);

    let mut moves = generate_noisy_moves(board);
    order_moves(board, moves.as_mut_slice(), &board.opponent_attack_maps());

    for mv in moves.iter().copied() {
        let score = -quiescence(ctx, &board.make_move(mv), -beta, -alpha);
        if score >= beta {
            return beta;
        }
        alpha = alpha.max(score);
    }

    alpha
}
