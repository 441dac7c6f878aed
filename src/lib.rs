//! Chess Universe - deterministic chess positions for an infinite tile map
//!
//! Every tile coordinate `(x, y, z)` of the map is turned into:
//! - a move list, walked through a fixed graph of opening replies and seeded
//!   from the tile's Hilbert curve index
//! - the position those moves reach, replayed with simplified piece geometry
//!   (no legality checks)
//! - statistics and a universe name derived from the coordinate
//! - a self-contained SVG tile
//!
//! All of it is pure: the same coordinate always gives the same result.

pub mod types;
pub mod error;
pub mod config;
pub mod hilbert;
pub mod board;
pub mod move_tree;
pub mod move_applier;
pub mod evaluation;
pub mod metadata;
pub mod render;
pub mod inverse;
pub mod universe;
pub mod parallel;

pub use board::STARTING_FEN;
pub use error::{Result, UniverseError};
pub use inverse::moves_to_coordinates;
pub use metadata::{Metadata, Phase};
pub use types::TileCoordinate;
pub use universe::{
    coordinates_to_moves, generate_chess_position, generate_mini_board, generate_tile_data_url,
    get_related_positions, ChessPosition,
};
