//! Material evaluation.
//!
//! The search consumes a single contract: a deterministic, White-positive
//! centipawn score that grows when a side gains material. Everything else
//! (structure, mobility, king safety) stays outside the engine core.

use crate::board::{Board, Color, PieceKind};
use crate::utils::count_bits;

// Valori materiali in centipawn
const PAWN_VALUE: i16 = 100;
const KNIGHT_VALUE: i16 = 320;
const BISHOP_VALUE: i16 = 330;
const ROOK_VALUE: i16 = 500;
const QUEEN_VALUE: i16 = 900;
const KING_VALUE: i16 = 20000;

const ALL_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub fn piece_value(kind: PieceKind) -> i16 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// White material minus Black material, in centipawns.
pub fn evaluate(board: &Board) -> i16 {
    let mut score = 0i16;
    for kind in ALL_KINDS {
        let value = piece_value(kind);
        score += value * count_bits(board.piece_bb(kind, Color::White)) as i16;
        score -= value * count_bits(board.piece_bb(kind, Color::Black)) as i16;
    }
    score
}
