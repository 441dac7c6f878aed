//! Chess Universe - Type definitions and constants
//!
//! This module provides the core type definitions and constants for
//! representing pieces, colors, squares and tile coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UniverseError;

/// Piece type constants (lower 3 bits)
pub const EMPTY: u8 = 0;
pub const PAWN: u8 = 1;
pub const KNIGHT: u8 = 2;
pub const BISHOP: u8 = 3;
pub const ROOK: u8 = 4;
pub const QUEEN: u8 = 5;
pub const KING: u8 = 6;

/// Color constants (bits 3-4)
pub const WHITE: u8 = 8;
pub const BLACK: u8 = 16;

/// Piece masks
pub const PIECE_MASK: u8 = 0b111;
pub const COLOR_MASK: u8 = 0b11000;

pub const WHITE_PAWN: u8 = WHITE | PAWN;
pub const WHITE_KNIGHT: u8 = WHITE | KNIGHT;
pub const WHITE_BISHOP: u8 = WHITE | BISHOP;
pub const WHITE_ROOK: u8 = WHITE | ROOK;
pub const WHITE_QUEEN: u8 = WHITE | QUEEN;
pub const WHITE_KING: u8 = WHITE | KING;

pub const BLACK_PAWN: u8 = BLACK | PAWN;
pub const BLACK_KNIGHT: u8 = BLACK | KNIGHT;
pub const BLACK_BISHOP: u8 = BLACK | BISHOP;
pub const BLACK_ROOK: u8 = BLACK | ROOK;
pub const BLACK_QUEEN: u8 = BLACK | QUEEN;
pub const BLACK_KING: u8 = BLACK | KING;

/// Castling rights bitmasks
pub const CASTLE_WK: u8 = 1;
pub const CASTLE_WQ: u8 = 2;
pub const CASTLE_BK: u8 = 4;
pub const CASTLE_BQ: u8 = 8;

pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
pub const RANK_NAMES: &[u8; 8] = b"12345678";

/// Deepest zoom level a map client is expected to request.
pub const MAX_ZOOM: u32 = 20;

#[inline]
pub fn get_piece_type(piece: u8) -> u8 {
    piece & PIECE_MASK
}

#[inline]
pub fn get_piece_color(piece: u8) -> u8 {
    piece & COLOR_MASK
}

#[inline]
pub fn is_white(piece: u8) -> bool {
    (piece & COLOR_MASK) == WHITE
}

/// Square index from file (0 = a) and rank (0 = first rank)
#[inline]
pub fn square_at(file: usize, rank: usize) -> usize {
    rank * 8 + file
}

#[inline]
pub fn file_of(sq: usize) -> usize {
    sq % 8
}

#[inline]
pub fn rank_of(sq: usize) -> usize {
    sq / 8
}

/// Convert square index (0-63) to algebraic notation (e.g., "e4")
pub fn square_name(sq: usize) -> String {
    format!(
        "{}{}",
        FILE_NAMES[file_of(sq)] as char,
        RANK_NAMES[rank_of(sq)] as char
    )
}

/// Convert algebraic notation to square index
pub fn parse_square(name: &str) -> Option<usize> {
    let mut chars = name.chars();
    let file = parse_file(chars.next()?)?;
    let rank = parse_rank(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(square_at(file, rank))
}

pub fn parse_file(c: char) -> Option<usize> {
    match c {
        'a'..='h' => Some(c as usize - 'a' as usize),
        _ => None,
    }
}

pub fn parse_rank(c: char) -> Option<usize> {
    match c {
        '1'..='8' => Some(c as usize - '1' as usize),
        _ => None,
    }
}

/// Piece type named by an uppercase SAN letter
pub fn piece_type_from_letter(c: char) -> Option<u8> {
    match c {
        'N' => Some(KNIGHT),
        'B' => Some(BISHOP),
        'R' => Some(ROOK),
        'Q' => Some(QUEEN),
        'K' => Some(KING),
        _ => None,
    }
}

/// FEN piece character to piece value
pub fn fen_to_piece(c: char) -> Option<u8> {
    match c {
        'P' => Some(WHITE_PAWN),
        'N' => Some(WHITE_KNIGHT),
        'B' => Some(WHITE_BISHOP),
        'R' => Some(WHITE_ROOK),
        'Q' => Some(WHITE_QUEEN),
        'K' => Some(WHITE_KING),
        'p' => Some(BLACK_PAWN),
        'n' => Some(BLACK_KNIGHT),
        'b' => Some(BLACK_BISHOP),
        'r' => Some(BLACK_ROOK),
        'q' => Some(BLACK_QUEEN),
        'k' => Some(BLACK_KING),
        _ => None,
    }
}

/// Piece value to FEN character
pub fn piece_to_fen(piece: u8) -> Option<char> {
    match piece {
        WHITE_PAWN => Some('P'),
        WHITE_KNIGHT => Some('N'),
        WHITE_BISHOP => Some('B'),
        WHITE_ROOK => Some('R'),
        WHITE_QUEEN => Some('Q'),
        WHITE_KING => Some('K'),
        BLACK_PAWN => Some('p'),
        BLACK_KNIGHT => Some('n'),
        BLACK_BISHOP => Some('b'),
        BLACK_ROOK => Some('r'),
        BLACK_QUEEN => Some('q'),
        BLACK_KING => Some('k'),
        _ => None,
    }
}

/// Unicode glyph drawn for a piece value
pub fn piece_glyph(piece: u8) -> Option<&'static str> {
    match piece {
        WHITE_PAWN => Some("\u{2659}"),
        WHITE_KNIGHT => Some("\u{2658}"),
        WHITE_BISHOP => Some("\u{2657}"),
        WHITE_ROOK => Some("\u{2656}"),
        WHITE_QUEEN => Some("\u{2655}"),
        WHITE_KING => Some("\u{2654}"),
        BLACK_PAWN => Some("\u{265F}"),
        BLACK_KNIGHT => Some("\u{265E}"),
        BLACK_BISHOP => Some("\u{265D}"),
        BLACK_ROOK => Some("\u{265C}"),
        BLACK_QUEEN => Some("\u{265B}"),
        BLACK_KING => Some("\u{265A}"),
        _ => None,
    }
}

/// A tile in the universe grid. `z` is the zoom depth.
///
/// `x` and `y` are signed because neighbouring tiles are produced without
/// range clamping; every derivation reduces them modulo its grid size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoordinate {
    pub x: i64,
    pub y: i64,
    pub z: u32,
}

impl TileCoordinate {
    pub fn new(x: i64, y: i64, z: u32) -> Self {
        TileCoordinate { x, y, z }
    }
}

impl fmt::Display for TileCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl FromStr for TileCoordinate {
    type Err = UniverseError;

    /// Parse a `z/x/y` tile key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UniverseError::InvalidCoordinate(s.to_string());
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        let z = parts[0].trim().parse().map_err(|_| invalid())?;
        let x = parts[1].trim().parse().map_err(|_| invalid())?;
        let y = parts[2].trim().parse().map_err(|_| invalid())?;
        Ok(TileCoordinate { x, y, z })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_names_round_trip() {
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(63), "h8");
        assert_eq!(parse_square("e4"), Some(28));
        assert_eq!(parse_square("i9"), None);
        assert_eq!(parse_square("e44"), None);
    }

    #[test]
    fn tile_keys_parse() {
        let coord: TileCoordinate = "3/5/-2".parse().unwrap();
        assert_eq!(coord, TileCoordinate::new(5, -2, 3));
        assert_eq!(coord.to_string(), "3/5/-2");
        assert!("3/5".parse::<TileCoordinate>().is_err());
        assert!("-1/0/0".parse::<TileCoordinate>().is_err());
    }
}
