//! Chess Universe - Move Applier Module
//!
//! Replays SAN-like move tokens onto a [`Board`] using per-piece geometry
//! only. Nothing here checks legality: blocked paths, pins and checks are
//! ignored, and tokens that cannot be matched to a piece leave the board
//! untouched for that ply.

use log::trace;

use crate::board::Board;
use crate::types::*;

/// A parsed move token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SanMove {
    Castle {
        long: bool,
    },
    Piece {
        kind: u8,
        from_file: Option<usize>,
        from_rank: Option<usize>,
        capture: bool,
        to_sq: usize,
    },
    Pawn {
        from_file: Option<usize>,
        from_rank: Option<usize>,
        capture: bool,
        to_sq: usize,
        promotion: Option<u8>,
    },
}

impl SanMove {
    /// Parse a token, ignoring check and annotation suffixes.
    /// Returns `None` for anything that is not castling, a piece move or a
    /// pawn move.
    pub fn parse(token: &str) -> Option<SanMove> {
        let text = token.trim_end_matches(['+', '#', '!', '?']);

        match text {
            "O-O" | "0-0" => return Some(SanMove::Castle { long: false }),
            "O-O-O" | "0-0-0" => return Some(SanMove::Castle { long: true }),
            _ => {}
        }

        let chars: Vec<char> = text.chars().collect();
        let first = *chars.first()?;
        if let Some(kind) = piece_type_from_letter(first) {
            parse_piece(kind, &chars[1..])
        } else if parse_file(first).is_some() {
            parse_pawn(&chars)
        } else {
            None
        }
    }
}

fn parse_piece(kind: u8, rest: &[char]) -> Option<SanMove> {
    if rest.len() < 2 {
        return None;
    }
    let (head, dest) = rest.split_at(rest.len() - 2);
    let to_sq = square_at(parse_file(dest[0])?, parse_rank(dest[1])?);

    let (head, capture) = match head.split_last() {
        Some((&'x', init)) => (init, true),
        _ => (head, false),
    };

    let (from_file, from_rank) = match head {
        [] => (None, None),
        [c] => match parse_file(*c) {
            Some(file) => (Some(file), None),
            None => (None, Some(parse_rank(*c)?)),
        },
        [f, r] => (Some(parse_file(*f)?), Some(parse_rank(*r)?)),
        _ => return None,
    };

    Some(SanMove::Piece { kind, from_file, from_rank, capture, to_sq })
}

fn parse_pawn(chars: &[char]) -> Option<SanMove> {
    let (body, promotion) = match chars.iter().position(|&c| c == '=') {
        Some(eq) => match &chars[eq + 1..] {
            [p] if matches!(*p, 'N' | 'B' | 'R' | 'Q') => (&chars[..eq], piece_type_from_letter(*p)),
            _ => return None,
        },
        None => (chars, None),
    };

    match body {
        [f, r] => Some(SanMove::Pawn {
            from_file: None,
            from_rank: None,
            capture: false,
            to_sq: square_at(parse_file(*f)?, parse_rank(*r)?),
            promotion,
        }),
        [f0, rest @ ..] => {
            let from_file = parse_file(*f0)?;
            let mut rest = rest;
            let mut from_rank = None;
            if let Some((&c, tail)) = rest.split_first() {
                if let Some(rank) = parse_rank(c) {
                    from_rank = Some(rank);
                    rest = tail;
                }
            }
            let mut marked = false;
            if let Some((&'x', tail)) = rest.split_first() {
                marked = true;
                rest = tail;
            }
            let [f1, r1] = rest else {
                return None;
            };
            let to_file = parse_file(*f1)?;
            Some(SanMove::Pawn {
                from_file: Some(from_file),
                from_rank,
                capture: marked || from_file != to_file,
                to_sq: square_at(to_file, parse_rank(*r1)?),
                promotion,
            })
        }
        [] => None,
    }
}

/// What a successfully applied token did to the board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlyEffect {
    pub capture: bool,
    pub pawn_move: bool,
    pub king_moved: bool,
}

/// Whether a piece of `kind` standing on `from` could reach `to` by geometry
pub fn reaches(kind: u8, from: usize, to: usize) -> bool {
    let dr = rank_of(from).abs_diff(rank_of(to));
    let dc = file_of(from).abs_diff(file_of(to));
    let rook = (dr == 0) != (dc == 0);
    let bishop = dr == dc && dr > 0;
    match kind {
        KNIGHT => (dr == 1 && dc == 2) || (dr == 2 && dc == 1),
        BISHOP => bishop,
        ROOK => rook,
        QUEEN => rook || bishop,
        KING => dr.max(dc) == 1,
        _ => false,
    }
}

/// Play a parsed move for the side to move. `None` means nothing matched.
fn play(board: &mut Board, mv: SanMove) -> Option<PlyEffect> {
    let side = board.side_to_move();

    match mv {
        SanMove::Castle { long } => {
            let base = if side == WHITE { 0 } else { 56 };
            let (king_to, rook_from, rook_to) = if long {
                (base + 2, base, base + 3)
            } else {
                (base + 6, base + 7, base + 5)
            };
            let king_from = base + 4;
            let mut capture = false;

            // each piece moves only from home and never onto its own side
            if board.squares[king_from] == side | KING
                && get_piece_color(board.squares[king_to]) != side
            {
                capture |= board.relocate(king_from, king_to, None).is_capture();
            }
            if board.squares[rook_from] == side | ROOK
                && get_piece_color(board.squares[rook_to]) != side
            {
                capture |= board.relocate(rook_from, rook_to, None).is_capture();
            }
            // the rights go even when neither piece moved
            Some(PlyEffect { capture, king_moved: true, ..PlyEffect::default() })
        }

        SanMove::Piece { kind, from_file, from_rank, to_sq, .. } => {
            if get_piece_color(board.squares[to_sq]) == side {
                return None;
            }
            let piece = side | kind;
            let from_sq = Board::scan_order().find(|&sq| {
                board.squares[sq] == piece
                    && from_file.map_or(true, |f| file_of(sq) == f)
                    && from_rank.map_or(true, |r| rank_of(sq) == r)
                    && reaches(kind, sq, to_sq)
            })?;

            let relocation = board.relocate(from_sq, to_sq, None);
            Some(PlyEffect {
                capture: relocation.is_capture(),
                pawn_move: false,
                king_moved: kind == KING,
            })
        }

        SanMove::Pawn { from_file, from_rank, capture, to_sq, promotion } => {
            let pawn = side | PAWN;
            let forward: isize = if side == WHITE { 1 } else { -1 };
            let start_rank = if side == WHITE { 1 } else { 6 };
            let to_file = file_of(to_sq);
            let to_rank = rank_of(to_sq) as isize;
            let from_file = from_file.unwrap_or(to_file);
            let target = board.squares[to_sq];

            let rank_back = |steps: isize| -> Option<usize> {
                let rank = to_rank - forward * steps;
                (0..8).contains(&rank).then_some(rank as usize)
            };

            let from_sq = if capture {
                if from_file.abs_diff(to_file) != 1 || get_piece_color(target) == side {
                    return None;
                }
                let sq = square_at(from_file, rank_back(1)?);
                (board.squares[sq] == pawn).then_some(sq)?
            } else {
                if from_file != to_file || target != EMPTY {
                    return None;
                }
                let one = square_at(to_file, rank_back(1)?);
                if board.squares[one] == pawn {
                    one
                } else {
                    let two_rank = rank_back(2)?;
                    let two = square_at(to_file, two_rank);
                    if two_rank != start_rank || board.squares[one] != EMPTY || board.squares[two] != pawn {
                        return None;
                    }
                    two
                }
            };

            if from_rank.is_some_and(|r| r != rank_of(from_sq)) {
                return None;
            }

            let relocation = board.relocate(from_sq, to_sq, promotion);
            Some(PlyEffect {
                capture: relocation.is_capture(),
                pawn_move: true,
                king_moved: false,
            })
        }
    }
}

/// Revoke castling rights named by rook home squares in the move text
fn revoke_rook_squares(board: &mut Board, token: &str) {
    for (square, right) in [("a1", CASTLE_WQ), ("h1", CASTLE_WK), ("a8", CASTLE_BQ), ("h8", CASTLE_BK)] {
        if token.contains(square) {
            board.castling_rights &= !right;
        }
    }
}

/// Apply one token for the side to move and finish the ply.
/// Returns whether the token changed the board.
pub fn apply_token(board: &mut Board, token: &str) -> bool {
    let side = board.side_to_move();
    let effect = SanMove::parse(token).and_then(|mv| play(board, mv));

    match effect {
        Some(effect) if effect.king_moved => {
            board.castling_rights &= if side == WHITE {
                !(CASTLE_WK | CASTLE_WQ)
            } else {
                !(CASTLE_BK | CASTLE_BQ)
            };
        }
        Some(_) => {}
        None => trace!("skipping '{}' for {}", token, if side == WHITE { "white" } else { "black" }),
    }
    revoke_rook_squares(board, token);

    board.end_ply(effect.is_some_and(|e| e.capture || e.pawn_move));
    effect.is_some()
}

/// Replay `moves` onto the position `fen` and return the resulting FEN
pub fn apply_moves<S: AsRef<str>>(fen: &str, moves: &[S]) -> String {
    apply_moves_to_board(fen, moves).to_fen()
}

/// Replay `moves` onto the position `fen`
pub fn apply_moves_to_board<S: AsRef<str>>(fen: &str, moves: &[S]) -> Board {
    let mut board = Board::from_fen(fen);
    for mv in moves {
        apply_token(&mut board, mv.as_ref());
    }
    board
}
