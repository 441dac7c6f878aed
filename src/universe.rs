//! The public generation surface: tile coordinate in, position and images
//! out. Nothing is cached; every call recomputes from the coordinate.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::STARTING_FEN;
use crate::config::RenderConfig;
use crate::metadata::{synthesize, Metadata};
use crate::move_applier::apply_moves_to_board;
use crate::move_tree;
use crate::render::{data_url, mini_board_svg, tile_svg};
use crate::types::{TileCoordinate, MAX_ZOOM};

/// Everything shown for one tile
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessPosition {
    pub fen: String,
    pub moves: Vec<String>,
    pub metadata: Metadata,
}

/// Generate the position of a tile
pub fn generate_chess_position(coord: &TileCoordinate) -> ChessPosition {
    let moves = move_tree::coordinates_to_moves(coord);
    let board = apply_moves_to_board(STARTING_FEN, &moves);
    let metadata = synthesize(coord, &board, moves.len());
    debug!("tile {} -> {} plies, {}", coord, moves.len(), metadata.universe);

    ChessPosition {
        fen: board.to_fen(),
        moves,
        metadata,
    }
}

/// Move list of a tile, without replaying it
pub fn coordinates_to_moves(coord: &TileCoordinate) -> Vec<String> {
    move_tree::coordinates_to_moves(coord)
}

/// Tiles one zoom level up and down and the four planar neighbours.
/// No range clamping is applied to `x` and `y`.
pub fn get_related_positions(coord: &TileCoordinate) -> Vec<TileCoordinate> {
    let TileCoordinate { x, y, z } = *coord;
    let mut related = Vec::with_capacity(6);

    if z > 0 {
        related.push(TileCoordinate::new(x, y, z - 1));
    }
    if z < MAX_ZOOM {
        related.push(TileCoordinate::new(x, y, z + 1));
    }
    related.push(TileCoordinate::new(x.wrapping_sub(1), y, z));
    related.push(TileCoordinate::new(x.wrapping_add(1), y, z));
    related.push(TileCoordinate::new(x, y.wrapping_sub(1), z));
    related.push(TileCoordinate::new(x, y.wrapping_add(1), z));

    related
}

/// Tile image as a `data:` URL, drawn with `config`
pub fn tile_data_url_with(coord: &TileCoordinate, config: &RenderConfig) -> String {
    data_url(&tile_svg(&generate_chess_position(coord), config))
}

/// Tile image as a `data:` URL
pub fn generate_tile_data_url(coord: &TileCoordinate) -> String {
    tile_data_url_with(coord, &RenderConfig::default())
}

/// Board-only SVG of `fen`
pub fn generate_mini_board(fen: &str, size: u32) -> String {
    mini_board_svg(fen, size, &RenderConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Phase;

    #[test]
    fn origin_is_the_starting_position() {
        let position = generate_chess_position(&TileCoordinate::new(0, 0, 0));
        assert!(position.moves.is_empty());
        assert_eq!(position.fen, STARTING_FEN);
        assert_eq!(position.metadata.phase, Phase::Opening);
        assert_eq!(position.metadata.evaluation, 0);
    }

    #[test]
    fn related_positions_in_order() {
        let related = get_related_positions(&TileCoordinate::new(2, 3, 1));
        assert_eq!(
            related,
            vec![
                TileCoordinate::new(2, 3, 0),
                TileCoordinate::new(2, 3, 2),
                TileCoordinate::new(1, 3, 1),
                TileCoordinate::new(3, 3, 1),
                TileCoordinate::new(2, 2, 1),
                TileCoordinate::new(2, 4, 1),
            ]
        );
    }

    #[test]
    fn related_positions_at_zoom_limits() {
        let top = get_related_positions(&TileCoordinate::new(0, 0, 0));
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], TileCoordinate::new(0, 0, 1));
        assert_eq!(top[1], TileCoordinate::new(-1, 0, 0));

        let bottom = get_related_positions(&TileCoordinate::new(4, 4, MAX_ZOOM));
        assert_eq!(bottom.len(), 5);
        assert_eq!(bottom[0], TileCoordinate::new(4, 4, MAX_ZOOM - 1));
    }

    #[test]
    fn fen_matches_replayed_moves() {
        let coord = TileCoordinate::new(17, 4, 12);
        let position = generate_chess_position(&coord);
        assert_eq!(position.moves, coordinates_to_moves(&coord));
        assert_eq!(
            position.fen,
            crate::move_applier::apply_moves(STARTING_FEN, &position.moves)
        );
    }

    #[test]
    fn position_serializes_to_json() {
        let position = generate_chess_position(&TileCoordinate::new(5, 5, 3));
        let json = serde_json::to_string(&position).unwrap();
        let back: ChessPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, position);
    }

    #[test]
    fn data_url_is_never_empty() {
        for coord in [
            TileCoordinate::new(0, 0, 0),
            TileCoordinate::new(-5, 1 << 40, 7),
            TileCoordinate::new(i64::MAX, i64::MIN, 2),
        ] {
            let url = generate_tile_data_url(&coord);
            assert!(url.starts_with("data:image/svg+xml;base64,"));
            assert!(url.len() > "data:image/svg+xml;base64,".len());
        }
    }
}
