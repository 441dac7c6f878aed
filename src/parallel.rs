//! Chess Universe - Batch generation
//!
//! Generation has no shared state, so a batch of tiles is split into
//! contiguous chunks and each chunk is generated on its own scoped thread.

use std::thread;

use log::debug;

use crate::types::TileCoordinate;
use crate::universe::{generate_chess_position, ChessPosition};

/// Worker count for a requested thread setting; 0 means one per core
pub fn resolve_threads(threads: usize) -> usize {
    let threads = if threads == 0 { num_cpus::get() } else { threads };
    threads.max(1)
}

/// Generate every tile in `coords`, returning positions in input order
pub fn generate_batch(coords: &[TileCoordinate], threads: usize) -> Vec<ChessPosition> {
    if coords.is_empty() {
        return Vec::new();
    }

    let num_threads = resolve_threads(threads).min(coords.len());
    let chunk_size = coords.len().div_ceil(num_threads);
    debug!(
        "generating {} tiles on {} threads ({} per chunk)",
        coords.len(),
        num_threads,
        chunk_size
    );

    if num_threads == 1 {
        return coords.iter().map(generate_chess_position).collect();
    }

    thread::scope(|scope| {
        let handles: Vec<_> = coords
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || chunk.iter().map(generate_chess_position).collect::<Vec<_>>())
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(positions) => positions,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

/// Row-major list of the tiles in a `width`×`height` window at `zoom`
pub fn tile_window(x0: i64, y0: i64, width: u32, height: u32, zoom: u32) -> Vec<TileCoordinate> {
    (0..height as i64)
        .flat_map(|dy| {
            (0..width as i64)
                .map(move |dx| TileCoordinate::new(x0.wrapping_add(dx), y0.wrapping_add(dy), zoom))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_means_all_cores() {
        assert_eq!(resolve_threads(0), num_cpus::get().max(1));
        assert_eq!(resolve_threads(3), 3);
    }

    #[test]
    fn window_is_row_major() {
        let window = tile_window(10, 20, 3, 2, 4);
        assert_eq!(window.len(), 6);
        assert_eq!(window[0], TileCoordinate::new(10, 20, 4));
        assert_eq!(window[2], TileCoordinate::new(12, 20, 4));
        assert_eq!(window[3], TileCoordinate::new(10, 21, 4));
    }

    #[test]
    fn window_wraps_at_the_coordinate_limit() {
        let window = tile_window(i64::MAX, i64::MAX, 2, 2, 5);
        assert_eq!(window[1], TileCoordinate::new(i64::MIN, i64::MAX, 5));
        assert_eq!(window[3], TileCoordinate::new(i64::MIN, i64::MIN, 5));
        assert_eq!(generate_batch(&window, 2).len(), 4);
    }

    #[test]
    fn batch_matches_sequential_generation() {
        let coords = tile_window(-3, 5, 7, 5, 9);
        let sequential: Vec<_> = coords.iter().map(generate_chess_position).collect();
        for threads in [1, 2, 4, 64] {
            assert_eq!(generate_batch(&coords, threads), sequential);
        }
    }

    #[test]
    fn empty_batch() {
        assert!(generate_batch(&[], 4).is_empty());
    }
}
