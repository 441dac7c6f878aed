//! Chess Universe - Move-Tree Walker
//!
//! A fixed graph of plausible opening replies is walked with a small linear
//! congruential generator seeded from the tile's curve index. The same tile
//! always yields the same move list; neighbouring tiles start from nearby
//! seeds.

use log::trace;
use rand::RngCore;
use rand_core::impls;

use crate::hilbert::{grid_size, index_of, wrap};
use crate::types::TileCoordinate;

/// Name of the distinguished start node
pub const ROOT: &str = "root";

/// Per-depth offset mixed into the walk seed
pub const DEPTH_SEED_STRIDE: u128 = 1_234_567;

const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;
const LCG_MASK: u64 = 0x7fff_ffff;

// ============================================================================
// MOVE GRAPH
// ============================================================================

const ROOT_EDGES: &[&str] = &[
    "e4", "d4", "Nf3", "c4", "g3", "f4", "b3", "Nc3", "e3", "d3", "b4", "g4",
];

/// Node -> replies. Tokens that are not keys here end a line of play.
static MOVE_GRAPH: &[(&str, &[&str])] = &[
    (ROOT, ROOT_EDGES),
    // first moves
    ("e4", &["e5", "c5", "e6", "c6", "d5", "Nf6", "d6", "g6", "Nc6"]),
    ("d4", &["d5", "Nf6", "e6", "f5", "g6", "c5", "d6", "c6", "Nc6"]),
    ("Nf3", &["d5", "Nf6", "c5", "g6", "e6", "f5", "d6", "b6", "c6"]),
    ("c4", &["e5", "Nf6", "c5", "e6", "c6", "g6", "f5", "b6", "d5"]),
    ("g3", &["d5", "g6", "e5", "Nf6", "c5", "f5", "d6", "e6"]),
    ("f4", &["d5", "e5", "Nf6", "g6", "c5", "f5", "d6"]),
    ("b3", &["e5", "d5", "Nf6", "c5", "b6", "g6"]),
    ("Nc3", &["d5", "e5", "Nf6", "c5", "g6", "d6"]),
    ("e3", &["e5", "d5", "Nf6", "c5", "g6"]),
    ("d3", &["d5", "e5", "Nf6", "g6", "c5"]),
    ("b4", &["e5", "d5", "Nf6", "c6", "a5"]),
    ("g4", &["d5", "e5", "h5", "g5"]),
    // replies to first moves
    ("e5", &["Nf3", "Nc3", "Bc4", "f4", "d4", "Qh5", "d3", "c3", "Bb5"]),
    ("c5", &["Nf3", "Nc3", "c3", "d4", "f4", "g3", "Bb5", "e5"]),
    ("e6", &["d4", "Nf3", "d3", "Nc3", "c4", "g3", "Bd3"]),
    ("c6", &["d4", "Nc3", "Nf3", "c4", "e5", "Bd3"]),
    ("d5", &["exd5", "e5", "Nc3", "c4", "Nf3", "Bf4", "Bg5", "e3", "cxd5"]),
    ("Nf6", &["e5", "Nc3", "c4", "Nf3", "Bg5", "g3", "d3", "Bf4", "Qxf7#"]),
    ("d6", &["d4", "Nf3", "Nc3", "Bc4", "f4", "g3"]),
    ("g6", &["d4", "Nf3", "Nc3", "Bc4", "c4", "Bg2"]),
    ("Nc6", &["Nf3", "d4", "Bb5", "Bc4", "Nc3", "d5"]),
    ("f5", &["g3", "Nf3", "Bg5", "c4", "e4", "Nc3"]),
    ("b6", &["d4", "e4", "Bb2", "Nc3"]),
    ("a5", &["b5", "bxa5", "Bb2"]),
    ("h5", &["gxh5", "g5", "h3"]),
    ("g5", &["d4", "h3", "Bg2"]),
    // developing moves
    ("Bc4", &["Nf6", "Bc5", "Nc6", "d6", "Be7", "Qh4"]),
    ("Bb5", &["a6", "Nf6", "Nd4", "d6", "Bc5", "g6", "Bd7"]),
    ("Qh5", &["Nc6", "Nf6", "g6", "Qe7", "d6"]),
    ("Bg5", &["Be7", "h6", "Nbd7", "c6", "dxc4"]),
    ("Bf4", &["c5", "Nf6", "e6", "Bf5", "Nc6"]),
    ("Be7", &["O-O", "Nf3", "Bd3", "Qc2", "e3"]),
    ("Bc5", &["c3", "O-O", "d3", "b4", "Nxe5"]),
    ("a6", &["Ba4", "Bxc6", "Bc4"]),
    ("Ba4", &["Nf6", "d6", "b5", "Be7"]),
    ("Nd4", &["Nxd4", "Bc4", "Ba4"]),
    ("exd5", &["Qxd5", "Nf6", "e6", "c6"]),
    ("cxd5", &["Qxd5", "Nxd5", "exd5", "cxd5"]),
    ("Qxd5", &["Nc3", "Nf3", "d4"]),
    ("Nxe5", &["Nxe5", "Qe7", "d6", "Qg5"]),
    ("Nxd4", &["exd4", "Bc5", "Nf6"]),
    ("O-O", &["O-O", "Nc6", "Be7", "d6", "Re8", "Bg4", "a6", "h6", "O-O-O"]),
    ("O-O-O", &["O-O", "Rd1", "Kb1", "h4", "g4"]),
    ("Re8", &["Re1", "Bd3", "c3", "Nbd2"]),
    ("Re1", &["b5", "d6", "Re8", "Bd7"]),
    ("Qh4", &["g3", "Nf3", "Qe2", "d3", "Qh4#"]),
    // mates end the walk
    ("Qxf7#", &[]),
    ("Qh4#", &[]),
];

/// Replies listed for `node`, if it is part of the graph
pub fn edges_of(node: &str) -> Option<&'static [&'static str]> {
    MOVE_GRAPH
        .iter()
        .find(|(key, _)| *key == node)
        .map(|(_, edges)| *edges)
}

// ============================================================================
// RANDOM SOURCE
// ============================================================================

/// Linear congruential generator, `next = (1103515245 * prev + 12345) mod 2^31`.
///
/// Every draw is a 31-bit value; only the low 31 bits of the seed matter.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u128) -> Self {
        Lcg { state: (seed & LCG_MASK as u128) as u64 }
    }

    /// Advance and return the next 31-bit draw
    pub fn draw(&mut self) -> u32 {
        self.state = (LCG_MULTIPLIER * self.state + LCG_INCREMENT) & LCG_MASK;
        self.state as u32
    }

    /// Uniform-ish choice of an index below `len`
    fn pick(&mut self, len: usize) -> usize {
        self.draw() as usize % len
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.draw()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// ============================================================================
// WALK
// ============================================================================

/// Seed for the walk of `coord`
pub fn walk_seed(coord: &TileCoordinate) -> u128 {
    let n = grid_size(coord.x, coord.y);
    index_of(n, wrap(coord.x, n), wrap(coord.y, n)) + coord.z as u128 * DEPTH_SEED_STRIDE
}

/// Walk the move graph for at most `steps` plies.
pub fn walk(seed: u128, steps: u32) -> Vec<String> {
    let mut rng = Lcg::new(seed);
    let mut moves = Vec::with_capacity(steps.min(64) as usize);
    let mut visited_roots: u16 = 0;
    let mut current = ROOT;

    for _ in 0..steps {
        let edges = edges_of(current).unwrap_or(ROOT_EDGES);
        if edges.is_empty() {
            trace!("walk ends at '{}' after {} plies", current, moves.len());
            break;
        }

        let token = edges[rng.pick(edges.len())];
        moves.push(token.to_string());
        mark_root(&mut visited_roots, token);

        if edges_of(token).is_some() {
            current = token;
            continue;
        }

        let unvisited: Vec<&'static str> = ROOT_EDGES
            .iter()
            .enumerate()
            .filter(|(i, _)| visited_roots & (1 << i) == 0)
            .map(|(_, t)| *t)
            .collect();

        current = if unvisited.is_empty() {
            ROOT
        } else {
            let next = unvisited[rng.pick(unvisited.len())];
            mark_root(&mut visited_roots, next);
            next
        };
        trace!("'{}' leaves the graph, continuing from '{}'", token, current);
    }

    moves
}

fn mark_root(visited: &mut u16, token: &str) {
    if let Some(i) = ROOT_EDGES.iter().position(|t| *t == token) {
        *visited |= 1 << i;
    }
}

/// Deterministic move list for a tile
pub fn coordinates_to_moves(coord: &TileCoordinate) -> Vec<String> {
    walk(walk_seed(coord), coord.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_respects_fan_out_limits() {
        assert!(ROOT_EDGES.len() <= 12);
        for (node, edges) in MOVE_GRAPH {
            if *node != ROOT {
                assert!(edges.len() <= 9, "node '{}' has {} replies", node, edges.len());
            }
        }
    }

    #[test]
    fn lcg_matches_reference_sequence() {
        let mut rng = Lcg::new(0);
        assert_eq!(rng.draw(), 12345);
        assert_eq!(rng.draw(), ((1_103_515_245u64 * 12345 + 12345) & 0x7fff_ffff) as u32);
    }

    #[test]
    fn lcg_ignores_high_seed_bits() {
        let mut a = Lcg::new(7);
        let mut b = Lcg::new(7 + (1u128 << 31) * 99);
        for _ in 0..16 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn lcg_as_rng_core() {
        let mut rng = Lcg::new(42);
        let mut bytes = [0u8; 7];
        rng.fill_bytes(&mut bytes);
        assert!(rng.next_u32() < 1 << 31);

        let mut reference = Lcg::new(42);
        let mut rng = Lcg::new(42);
        let low = reference.draw() as u64;
        let high = reference.draw() as u64;
        assert_eq!(rng.next_u64(), (high << 32) | low);
    }

    #[test]
    fn zero_steps_yield_no_moves() {
        assert!(walk(123, 0).is_empty());
        assert!(coordinates_to_moves(&TileCoordinate::new(9, 9, 0)).is_empty());
    }

    #[test]
    fn first_ply_comes_from_root() {
        for seed in 0..200u128 {
            let moves = walk(seed, 1);
            assert_eq!(moves.len(), 1);
            assert!(ROOT_EDGES.contains(&moves[0].as_str()));
        }
    }

    #[test]
    fn walk_is_bounded_and_repeatable() {
        for seed in [0u128, 1, 99, 65_535, 1 << 40] {
            for steps in [1u32, 5, 17, 60] {
                let moves = walk(seed, steps);
                assert!(moves.len() <= steps as usize);
                assert_eq!(moves, walk(seed, steps));
            }
        }
    }

    #[test]
    fn mates_stop_the_walk() {
        for seed in 0..2_000u128 {
            let moves = walk(seed, 40);
            if let Some(pos) = moves.iter().position(|m| m.ends_with('#')) {
                assert_eq!(pos, moves.len() - 1);
            } else {
                assert_eq!(moves.len(), 40);
            }
        }
    }

    #[test]
    fn depth_three_tile_has_three_moves() {
        let coord = TileCoordinate::new(5, 5, 3);
        let moves = coordinates_to_moves(&coord);
        assert_eq!(moves.len(), 3);
        assert_eq!(moves, coordinates_to_moves(&coord));
    }
}
