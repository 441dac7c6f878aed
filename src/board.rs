//! Chess Universe - Board Representation Module
//!
//! This module provides the mutable board the move applier replays tokens
//! onto, together with lenient FEN parsing and canonical FEN generation.

use crate::types::*;

/// Starting position FEN
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Result of relocating a piece
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relocation {
    pub captured_piece: u8,
}

impl Relocation {
    pub fn is_capture(&self) -> bool {
        self.captured_piece != EMPTY
    }
}

/// Chess board representation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// 64-element array representing the board (0=a1, 1=b1, ..., 63=h8)
    pub squares: [u8; 64],
    /// True if it's white's turn
    pub white_to_move: bool,
    /// Bitmask for castling rights (1=K, 2=Q, 4=k, 8=q)
    pub castling_rights: u8,
    /// Target square for en passant (-1 if none). Carried through unchanged.
    pub en_passant_square: i8,
    /// Plies since last pawn move or capture
    pub halfmove_clock: u32,
    /// Full move counter
    pub fullmove_number: u32,
}

impl Board {
    /// Create a new board with the starting position
    pub fn new() -> Self {
        Board::from_fen(STARTING_FEN)
    }

    /// Create a board from a FEN string.
    ///
    /// Never fails: missing cells are empty, surplus cells and ranks are
    /// dropped, and missing or unreadable fields take their starting values.
    pub fn from_fen(fen: &str) -> Self {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        let mut board = Board {
            squares: [EMPTY; 64],
            white_to_move: true,
            castling_rights: 0,
            en_passant_square: -1,
            halfmove_clock: 0,
            fullmove_number: 1,
        };

        // Piece placement, rank 8 first
        if let Some(placement) = parts.first() {
            for (row, row_text) in placement.split('/').take(8).enumerate() {
                let rank = 7 - row;
                let mut file = 0usize;
                for c in row_text.chars() {
                    if file >= 8 {
                        break;
                    }
                    if let Some(run) = c.to_digit(10) {
                        file += run as usize;
                    } else if let Some(piece) = fen_to_piece(c) {
                        board.squares[square_at(file, rank)] = piece;
                        file += 1;
                    }
                }
            }
        }

        // Active color
        if parts.len() > 1 {
            board.white_to_move = parts[1] != "b";
        }

        // Castling rights
        if parts.len() > 2 && parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => board.castling_rights |= CASTLE_WK,
                    'Q' => board.castling_rights |= CASTLE_WQ,
                    'k' => board.castling_rights |= CASTLE_BK,
                    'q' => board.castling_rights |= CASTLE_BQ,
                    _ => {}
                }
            }
        }

        // En passant square
        if parts.len() > 3 && parts[3] != "-" {
            if let Some(sq) = parse_square(parts[3]) {
                board.en_passant_square = sq as i8;
            }
        }

        if parts.len() > 4 {
            board.halfmove_clock = parts[4].parse().unwrap_or(0);
        }

        if parts.len() > 5 {
            board.fullmove_number = parts[5].parse().unwrap_or(1);
        }

        board
    }

    /// Generate FEN string from current board state
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        // Piece placement
        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                let piece = self.squares[square_at(file, rank)];
                match piece_to_fen(piece) {
                    None => empty_count += 1,
                    Some(c) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(c);
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        // Active color
        fen.push(' ');
        fen.push(if self.white_to_move { 'w' } else { 'b' });

        // Castling rights
        fen.push(' ');
        if self.castling_rights == 0 {
            fen.push('-');
        } else {
            if self.castling_rights & CASTLE_WK != 0 { fen.push('K'); }
            if self.castling_rights & CASTLE_WQ != 0 { fen.push('Q'); }
            if self.castling_rights & CASTLE_BK != 0 { fen.push('k'); }
            if self.castling_rights & CASTLE_BQ != 0 { fen.push('q'); }
        }

        // En passant
        fen.push(' ');
        if self.en_passant_square >= 0 {
            fen.push_str(&square_name(self.en_passant_square as usize));
        } else {
            fen.push('-');
        }

        // Halfmove clock and fullmove number
        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));

        fen
    }

    /// Color bits of the side to move
    pub fn side_to_move(&self) -> u8 {
        if self.white_to_move { WHITE } else { BLACK }
    }

    /// Squares in row-major order of the board matrix: rank 8 to rank 1,
    /// file a to file h within each rank.
    pub fn scan_order() -> impl Iterator<Item = usize> {
        (0..8).rev().flat_map(|rank| (0..8).map(move |file| square_at(file, rank)))
    }

    /// Move whatever stands on `from_sq` to `to_sq`, optionally replacing it
    /// with a promoted piece.
    pub fn relocate(&mut self, from_sq: usize, to_sq: usize, promotion: Option<u8>) -> Relocation {
        let piece = self.squares[from_sq];
        let captured = self.squares[to_sq];

        self.squares[from_sq] = EMPTY;
        self.squares[to_sq] = match promotion {
            Some(kind) => get_piece_color(piece) | kind,
            None => piece,
        };

        Relocation { captured_piece: captured }
    }

    /// Finish a ply: update both clocks and pass the move to the other side
    pub fn end_ply(&mut self, reset_clock: bool) {
        if reset_clock {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if !self.white_to_move {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.white_to_move = !self.white_to_move;
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for rank in (0..8).rev() {
            let mut row = format!("{} |", rank + 1);
            for file in 0..8 {
                let piece = self.squares[square_at(file, rank)];
                match piece_to_fen(piece) {
                    Some(c) => row.push_str(&format!(" {} |", c)),
                    None => row.push_str("   |"),
                }
            }
            lines.push(row);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());

        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_round_trips() {
        let board = Board::new();
        assert_eq!(board.to_fen(), STARTING_FEN);
        assert_eq!(board.squares[square_at(4, 0)], WHITE_KING);
        assert_eq!(board.squares[square_at(4, 7)], BLACK_KING);
    }

    #[test]
    fn en_passant_and_clocks_are_kept() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        assert_eq!(Board::from_fen(fen).to_fen(), fen);
    }

    #[test]
    fn short_rows_are_padded_with_empty_squares() {
        let board = Board::from_fen("rnbqkbnr/ppp/8");
        assert_eq!(board.to_fen(), "rnbqkbnr/ppp5/8/8/8/8/8/8 w - - 0 1");
    }

    #[test]
    fn overlong_rows_and_ranks_are_cut() {
        let board = Board::from_fen("ppppppppppp/8/8/8/8/8/8/8/PPPP b - - x y");
        assert_eq!(board.to_fen(), "pppppppp/8/8/8/8/8/8/8 b - - 0 1");
    }

    #[test]
    fn empty_input_gives_empty_board() {
        assert_eq!(Board::from_fen("").to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    }

    #[test]
    fn bad_en_passant_square_is_dropped() {
        let board = Board::from_fen("8/8/8/8/8/8/8/8 w - z9 4 7");
        assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8 w - - 4 7");
    }

    #[test]
    fn scan_order_starts_at_a8() {
        let order: Vec<usize> = Board::scan_order().collect();
        assert_eq!(order.len(), 64);
        assert_eq!(order[0], parse_square("a8").unwrap());
        assert_eq!(order[7], parse_square("h8").unwrap());
        assert_eq!(order[63], parse_square("h1").unwrap());
    }

    #[test]
    fn end_ply_counts_moves_after_black() {
        let mut board = Board::new();
        board.end_ply(false);
        assert!(!board.white_to_move);
        assert_eq!((board.halfmove_clock, board.fullmove_number), (1, 1));
        board.end_ply(true);
        assert!(board.white_to_move);
        assert_eq!((board.halfmove_clock, board.fullmove_number), (0, 2));
    }
}
