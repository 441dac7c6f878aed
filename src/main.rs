//! Chess Universe - command line front end
//!
//! Usage:
//!     chess_universe position 3/5/5
//!     chess_universe tile 6/3/7 --data-url
//!     chess_universe grid --zoom 8 --width 16 --height 16
//!
//! Tile keys are written `z/x/y`. Logs go to stderr, results to stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use chess_universe::board::Board;
use chess_universe::config::Config;
use chess_universe::parallel::{generate_batch, tile_window};
use chess_universe::render::{data_url, mini_board_svg, tile_svg};
use chess_universe::{
    coordinates_to_moves, generate_chess_position, get_related_positions, moves_to_coordinates,
    TileCoordinate,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the generated position of a tile as JSON
    Position {
        tile: TileCoordinate,
        /// Also draw the board on stderr
        #[arg(long)]
        board: bool,
    },
    /// Print the move list of a tile
    Moves { tile: TileCoordinate },
    /// Find the tile a move list maps to at a zoom level
    Locate {
        #[arg(short, long)]
        zoom: u32,
        moves: Vec<String>,
    },
    /// List the parent, child and neighbouring tiles
    Related { tile: TileCoordinate },
    /// Render a tile as SVG
    Tile {
        tile: TileCoordinate,
        /// Print a base64 data URL instead of SVG markup
        #[arg(long)]
        data_url: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a board-only image of a FEN
    MiniBoard {
        fen: String,
        #[arg(short, long)]
        size: Option<u32>,
    },
    /// Generate a window of tiles in parallel, one JSON object per line
    Grid {
        #[arg(short, long)]
        zoom: u32,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        x0: i64,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        y0: i64,
        #[arg(long, default_value_t = 8)]
        width: u32,
        #[arg(long, default_value_t = 8)]
        height: u32,
        /// Worker threads, 0 = all cores (overrides the config file)
        #[arg(short, long)]
        threads: Option<usize>,
    },
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Position { tile, board } => {
            let position = generate_chess_position(&tile);
            if board {
                eprintln!("{}", Board::from_fen(&position.fen));
            }
            writeln!(out, "{}", serde_json::to_string_pretty(&position)?)?;
        }
        Command::Moves { tile } => {
            writeln!(out, "{}", coordinates_to_moves(&tile).join(" "))?;
        }
        Command::Locate { zoom, moves } => {
            let coord = moves_to_coordinates(&moves, zoom);
            writeln!(out, "{}", coord)?;
        }
        Command::Related { tile } => {
            for coord in get_related_positions(&tile) {
                writeln!(out, "{}", coord)?;
            }
        }
        Command::Tile { tile, data_url: as_url, output } => {
            let svg = tile_svg(&generate_chess_position(&tile), &config.render);
            let text = if as_url { data_url(&svg) } else { svg };
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    log::info!("wrote tile {} to {}", tile, path.display());
                }
                None => writeln!(out, "{}", text)?,
            }
        }
        Command::MiniBoard { fen, size } => {
            let size = size.unwrap_or(config.render.mini_board_size);
            writeln!(out, "{}", mini_board_svg(&fen, size, &config.render))?;
        }
        Command::Grid { zoom, x0, y0, width, height, threads } => {
            let coords = tile_window(x0, y0, width, height, zoom);
            let threads = threads.unwrap_or(config.threads);
            let started = std::time::Instant::now();
            let positions = generate_batch(&coords, threads);
            for (coord, position) in coords.iter().zip(&positions) {
                let line = serde_json::json!({ "tile": coord, "position": position });
                writeln!(out, "{}", line)?;
            }
            log::info!("generated {} tiles in {:?}", positions.len(), started.elapsed());
        }
    }

    Ok(())
}
