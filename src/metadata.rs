//! Chess Universe - Metadata Synthesizer
//!
//! Derives the statistics shown next to a tile. Every field is a pure
//! function of the coordinate, the resulting board and the number of plies
//! that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::evaluation::evaluate;
use crate::hilbert::{index_of, wrap};
use crate::types::TileCoordinate;

/// Grid the statistics seed is taken from
const STATS_GRID: u64 = 256;
const STATS_DEPTH_STRIDE: u64 = 1_000_000;

const HASH_PRIME_X: i64 = 73_856_093;
const HASH_PRIME_Y: i64 = 19_349_663;
const HASH_PRIME_Z: i64 = 83_492_791;

pub const UNIVERSE_NAMES: [&str; 23] = [
    "Andromeda Gambit",
    "Orion Reach",
    "Cassiopeia Fields",
    "Nebula Prime",
    "Sicilian Drift",
    "Caro-Kann Cluster",
    "Ruy Lopez Expanse",
    "Queen's Gambit Rift",
    "King's Indian Deep",
    "Nimzo Nebula",
    "Dragon Spiral",
    "Gr\u{fc}nfeld Halo",
    "Benoni Void",
    "Catalan Corona",
    "Pirc Pulsar",
    "Alekhine Abyss",
    "Scandinavian Shelf",
    "English Ether",
    "Dutch Horizon",
    "French Frontier",
    "Slav Singularity",
    "Petrov Quasar",
    "Italian Aurora",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Opening,
    Middlegame,
    Endgame,
}

impl Phase {
    /// Phase reached after `ply` half-moves
    pub fn from_ply(ply: usize) -> Self {
        match ply {
            0..=10 => Phase::Opening,
            11..=40 => Phase::Middlegame,
            _ => Phase::Endgame,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Opening => "opening",
            Phase::Middlegame => "middlegame",
            Phase::Endgame => "endgame",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics attached to a generated position
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub games: u64,
    pub avg_elo: u64,
    pub win_rate: i32,
    pub evaluation: i32,
    pub phase: Phase,
    pub universe: String,
    pub depth: u32,
}

/// Name of the universe a tile belongs to
pub fn universe_name(coord: &TileCoordinate) -> &'static str {
    let hash = coord.x.wrapping_mul(HASH_PRIME_X)
        ^ coord.y.wrapping_mul(HASH_PRIME_Y)
        ^ (coord.z as i64).wrapping_mul(HASH_PRIME_Z);
    UNIVERSE_NAMES[(hash.unsigned_abs() % UNIVERSE_NAMES.len() as u64) as usize]
}

/// Seed shared by the statistical fields
pub fn stats_seed(coord: &TileCoordinate) -> u64 {
    let d = index_of(STATS_GRID, wrap(coord.x, STATS_GRID), wrap(coord.y, STATS_GRID));
    d as u64 + coord.z as u64 * STATS_DEPTH_STRIDE
}

/// Win rate around 50%, pushed by the evaluation and jittered by the seed
pub fn win_rate(evaluation: i32, seed: u64) -> i32 {
    let bias = (seed % 10) as i32;
    let base = 50 + evaluation * 2;
    let rate = if evaluation > 0 { base + bias } else { base - bias };
    rate.clamp(5, 95)
}

/// Build the metadata for `coord` given the board reached after `ply` plies
pub fn synthesize(coord: &TileCoordinate, board: &Board, ply: usize) -> Metadata {
    let seed = stats_seed(coord);
    let evaluation = evaluate(board);
    let z = coord.z as u64;

    let base_games = ((20 - coord.z as i64) * 50).max(1) as u64;

    Metadata {
        games: base_games + seed % 10_000,
        avg_elo: 1200 + z * 50 + seed % 800,
        win_rate: win_rate(evaluation, seed),
        evaluation,
        phase: Phase::from_ply(ply),
        universe: universe_name(coord).to_string(),
        depth: coord.z,
    }
}
