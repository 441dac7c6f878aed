//! Chess Universe - Tile Renderer
//!
//! Draws a generated position as a standalone SVG document. Tiles are laid
//! out on a fixed 256-unit canvas and scaled through the `viewBox`, so the
//! markup only depends on the position and the configured colors and size.
//! Nothing is fetched: glyphs are Unicode text and all paint is inline.

use std::fmt::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::board::Board;
use crate::config::RenderConfig;
use crate::metadata::Phase;
use crate::types::*;
use crate::universe::ChessPosition;

const CANVAS: u32 = 256;
const BOARD_X: u32 = 48;
const BOARD_Y: u32 = 40;
const SQUARE: u32 = 20;
const HEADER_HEIGHT: u32 = 28;
const FOOTER_Y: u32 = 212;

/// Placeholder shown in the footer of a tile without moves
pub const NO_MOVES_PLACEHOLDER: &str = "starting position";

/// Hue and saturation of the background for each phase
fn phase_palette(phase: Phase) -> (u32, u32) {
    match phase {
        Phase::Opening => (200, 60),
        Phase::Middlegame => (35, 70),
        Phase::Endgame => (280, 55),
    }
}

fn phase_icon(phase: Phase) -> &'static str {
    match phase {
        Phase::Opening => "\u{2658}",
        Phase::Middlegame => "\u{2694}",
        Phase::Endgame => "\u{2654}",
    }
}

/// Escape text for use in SVG content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Squares and glyphs of `board`, top-left corner at `(x, y)`
fn write_board(out: &mut String, board: &Board, x: f64, y: f64, square: f64, config: &RenderConfig) {
    let light = escape_xml(&config.light_square);
    let dark = escape_xml(&config.dark_square);
    let font_size = square * 0.8;

    for row in 0..8 {
        let rank = 7 - row;
        for file in 0..8 {
            let sx = x + file as f64 * square;
            let sy = y + row as f64 * square;
            let fill = if (row + file) % 2 == 0 { &light } else { &dark };
            let _ = write!(
                out,
                r#"<rect x="{sx:.2}" y="{sy:.2}" width="{square:.2}" height="{square:.2}" fill="{fill}"/>"#
            );

            if let Some(glyph) = piece_glyph(board.squares[square_at(file, rank)]) {
                let _ = write!(
                    out,
                    r##"<text x="{:.2}" y="{:.2}" font-size="{font_size:.2}" text-anchor="middle" fill="#111">{glyph}</text>"##,
                    sx + square / 2.0,
                    sy + square * 0.78,
                );
            }
        }
    }
}

/// Render a full map tile for `position`
pub fn tile_svg(position: &ChessPosition, config: &RenderConfig) -> String {
    let meta = &position.metadata;
    let board = Board::from_fen(&position.fen);
    let (hue, saturation) = phase_palette(meta.phase);
    let center_lightness = 30 + meta.evaluation * 2;
    let center_saturation = saturation + meta.evaluation.unsigned_abs() * 3;

    let mut svg = String::with_capacity(8 * 1024);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {CANVAS} {CANVAS}">"#,
        size = config.tile_size,
    );

    // background
    svg.push_str("<defs>");
    let _ = write!(
        svg,
        r#"<radialGradient id="bg" cx="50%" cy="50%" r="70%"><stop offset="0%" stop-color="hsl({hue},{center_saturation}%,{center_lightness}%)"/><stop offset="100%" stop-color="hsl({hue},{saturation}%,8%)"/></radialGradient>"#
    );
    if meta.depth > 3 {
        let _ = write!(
            svg,
            r#"<radialGradient id="glow"><stop offset="0%" stop-color="hsl({hue},90%,70%)" stop-opacity="1"/><stop offset="100%" stop-color="hsl({hue},90%,70%)" stop-opacity="0"/></radialGradient>"#
        );
    }
    svg.push_str("</defs>");
    let _ = write!(svg, r#"<rect width="{CANVAS}" height="{CANVAS}" fill="url(#bg)"/>"#);

    // depth glow
    if meta.depth > 3 {
        let depth = meta.depth.min(40) as f64;
        let radius = 60.0 + depth * 3.0;
        let opacity = (0.1 + depth * 0.02).min(0.6);
        let _ = write!(
            svg,
            r#"<circle cx="128" cy="120" r="{radius:.2}" fill="url(#glow)" opacity="{opacity:.2}"/>"#
        );
    }

    // header
    let _ = write!(
        svg,
        r##"<rect width="{CANVAS}" height="{HEADER_HEIGHT}" fill="#000" fill-opacity="0.45"/>"##
    );
    let _ = write!(
        svg,
        r##"<text x="10" y="19" font-family="sans-serif" font-size="13" font-weight="bold" fill="#fff">{}</text>"##,
        escape_xml(&meta.universe)
    );
    let _ = write!(
        svg,
        r##"<text x="246" y="20" font-size="16" text-anchor="end" fill="#fff">{}</text>"##,
        phase_icon(meta.phase)
    );

    // board
    write_board(&mut svg, &board, BOARD_X as f64, BOARD_Y as f64, SQUARE as f64, config);
    let _ = write!(
        svg,
        r##"<rect x="{BOARD_X}" y="{BOARD_Y}" width="{side}" height="{side}" fill="none" stroke="#4ecdc4" stroke-width="1.5"/>"##,
        side = SQUARE * 8,
    );

    // footer
    let last_moves = match position.moves.len() {
        0 => NO_MOVES_PLACEHOLDER.to_string(),
        n => position.moves[n.saturating_sub(2)..].join(" "),
    };
    let _ = write!(
        svg,
        r##"<rect y="{FOOTER_Y}" width="{CANVAS}" height="{}" fill="#000" fill-opacity="0.45"/>"##,
        CANVAS - FOOTER_Y
    );
    let _ = write!(
        svg,
        r##"<text x="10" y="230" font-family="sans-serif" font-size="12" fill="#fff">Elo {} &#183; {}%</text>"##,
        meta.avg_elo, meta.win_rate
    );
    let _ = write!(
        svg,
        r##"<text x="246" y="230" font-family="sans-serif" font-size="11" text-anchor="end" fill="#aaa">{} games</text>"##,
        meta.games
    );
    let _ = write!(
        svg,
        r##"<text x="10" y="248" font-family="monospace" font-size="12" fill="#4ecdc4">{}</text>"##,
        escape_xml(&last_moves)
    );

    svg.push_str("</svg>");
    svg
}

/// Board-only image of `fen`, `size` pixels square
pub fn mini_board_svg(fen: &str, size: u32, config: &RenderConfig) -> String {
    let board = Board::from_fen(fen);
    let side = SQUARE * 8;
    let mut svg = String::with_capacity(4 * 1024);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {side} {side}">"#
    );
    write_board(&mut svg, &board, 0.0, 0.0, SQUARE as f64, config);
    svg.push_str("</svg>");
    svg
}

/// Embed an SVG document as a base64 `data:` URL
pub fn data_url(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}
