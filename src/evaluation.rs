//! Chess Universe - Position Evaluation Module
//!
//! Static material count of a board, in pawn units, from white's point of
//! view.

use crate::board::Board;
use crate::types::*;

// ============================================================================
// PIECE VALUES
// ============================================================================

pub const PIECE_VALUES: [i32; 7] = [
    0, // EMPTY
    1, // PAWN
    3, // KNIGHT
    3, // BISHOP
    5, // ROOK
    9, // QUEEN
    0, // KING
];

/// Bound of the reported evaluation in either direction
pub const EVALUATION_LIMIT: i32 = 10;

/// Signed material sum; black pieces count negative
pub fn material_balance(board: &Board) -> i32 {
    board
        .squares
        .iter()
        .filter(|&&piece| piece != EMPTY)
        .map(|&piece| {
            let value = PIECE_VALUES[get_piece_type(piece) as usize];
            if is_white(piece) { value } else { -value }
        })
        .sum()
}

/// Material balance clamped to `[-EVALUATION_LIMIT, EVALUATION_LIMIT]`
pub fn evaluate(board: &Board) -> i32 {
    material_balance(board).clamp(-EVALUATION_LIMIT, EVALUATION_LIMIT)
}
