//! Configuration for rendering and batch generation.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! threads = 4
//!
//! [render]
//! tile_size = 512
//! light_square = "#eeeed2"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// How tiles and mini boards are drawn
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side length of a map tile in pixels
    pub tile_size: u32,
    /// Default side length of a board-only image
    pub mini_board_size: u32,
    pub light_square: String,
    pub dark_square: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            tile_size: 256,
            mini_board_size: 120,
            light_square: "#f0d9b5".to_string(),
            dark_square: "#b58863".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    /// Worker threads for batch generation, 0 = all cores
    pub threads: usize,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Config::from_toml_str(&text)
    }
}
