//! Invariants that must hold for every tile coordinate.

use chess_universe::board::Board;
use chess_universe::hilbert::{index_of, point_of};
use chess_universe::metadata::Phase;
use chess_universe::{generate_chess_position, generate_tile_data_url, TileCoordinate};
use proptest::prelude::*;

fn arb_coordinate() -> impl Strategy<Value = TileCoordinate> {
    (-1_000_000i64..1_000_000, -1_000_000i64..1_000_000, 0u32..80)
        .prop_map(|(x, y, z)| TileCoordinate::new(x, y, z))
}

fn arb_grid_point() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u32..=20).prop_flat_map(|bits| {
        let n = 1u64 << bits;
        (Just(n), 0..n, 0..n)
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn curve_index_inverts((n, x, y) in arb_grid_point()) {
        let d = index_of(n, x, y);
        prop_assert!(d < (n as u128) * (n as u128));
        prop_assert_eq!(point_of(n, d), (x, y));
    }

    #[test]
    fn generation_is_referentially_transparent(coord in arb_coordinate()) {
        prop_assert_eq!(generate_chess_position(&coord), generate_chess_position(&coord));
    }

    #[test]
    fn moves_never_exceed_depth(coord in arb_coordinate()) {
        let position = generate_chess_position(&coord);
        prop_assert!(position.moves.len() <= coord.z as usize);
        prop_assert_eq!(position.metadata.depth, coord.z);
    }

    #[test]
    fn metadata_stays_in_range(coord in arb_coordinate()) {
        let meta = generate_chess_position(&coord).metadata;
        prop_assert!((-10..=10).contains(&meta.evaluation));
        prop_assert!((5..=95).contains(&meta.win_rate));
        prop_assert!(meta.games >= 1);
    }

    #[test]
    fn phase_tracks_move_count(coord in arb_coordinate()) {
        let position = generate_chess_position(&coord);
        let expected = match position.moves.len() {
            0..=10 => Phase::Opening,
            11..=40 => Phase::Middlegame,
            _ => Phase::Endgame,
        };
        prop_assert_eq!(position.metadata.phase, expected);
    }

    #[test]
    fn record_stays_well_formed(coord in arb_coordinate()) {
        let position = generate_chess_position(&coord);
        let fields: Vec<&str> = position.fen.split(' ').collect();
        prop_assert_eq!(fields.len(), 6);

        let ranks: Vec<&str> = fields[0].split('/').collect();
        prop_assert_eq!(ranks.len(), 8);
        for rank in ranks {
            let width: u32 = rank.chars().map(|c| c.to_digit(10).unwrap_or(1)).sum();
            prop_assert_eq!(width, 8);
        }
        prop_assert!(fields[1] == "w" || fields[1] == "b");
        prop_assert!(fields[4].parse::<u32>().is_ok());
        prop_assert!(fields[5].parse::<u32>().unwrap() >= 1);

        // re-parsing the record gives it back verbatim
        prop_assert_eq!(Board::from_fen(&position.fen).to_fen(), position.fen);
    }

    #[test]
    fn side_to_move_follows_ply_parity(coord in arb_coordinate()) {
        let position = generate_chess_position(&coord);
        let board = Board::from_fen(&position.fen);
        prop_assert_eq!(board.white_to_move, position.moves.len() % 2 == 0);
        prop_assert_eq!(board.fullmove_number as usize, 1 + position.moves.len() / 2);
    }

    #[test]
    fn tile_url_is_never_empty(x in any::<i64>(), y in any::<i64>(), z in 0u32..40) {
        let url = generate_tile_data_url(&TileCoordinate::new(x, y, z));
        prop_assert!(url.len() > "data:image/svg+xml;base64,".len());
    }
}
