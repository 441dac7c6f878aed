//! Chess Universe - Inverse Mapper
//!
//! Best-effort lookup of a tile from a move list. The move list is hashed
//! and the hash is folded onto the `2^zoom` grid of the requested level.
//! This is not an inverse of the move walker: different move lists collide,
//! and the tile found will usually generate different moves.

use crate::types::TileCoordinate;

/// 32-bit rolling polynomial hash (`h = 31*h + c`) of the comma-joined moves
pub fn moves_hash<S: AsRef<str>>(moves: &[S]) -> i32 {
    let joined = moves.iter().map(|m| m.as_ref()).collect::<Vec<_>>().join(",");
    joined
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Tile at `zoom` that a move list maps onto
pub fn moves_to_coordinates<S: AsRef<str>>(moves: &[S], zoom: u32) -> TileCoordinate {
    let hash = moves_hash(moves);
    // 2^zoom tiles per axis; beyond 31 bits the fold no longer reduces
    let tiles = 1u64.checked_shl(zoom).unwrap_or(u64::MAX);

    let x = (hash as i64).unsigned_abs() % tiles;
    let y = ((hash >> 16) as i64).unsigned_abs() % tiles;

    TileCoordinate::new(x as i64, y as i64, zoom)
}
