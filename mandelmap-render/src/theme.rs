use serde::{Deserialize, Serialize};

/// A packed RGB color.
pub type Rgb = [u8; 3];

/// Side length of the repeating deep-ocean texture tile.
pub const WAVE_TILE_SIZE: usize = 32;

/// The "nautical chart" color scheme.
///
/// Interior points of the set read as deep ocean, high escape counts as
/// shallow water, the band between the two coastline thresholds as the
/// coastline itself, and low counts as land.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapTheme {
    #[serde(default = "default_deep")]
    pub deep: Rgb,
    #[serde(default = "default_wave")]
    pub wave: Rgb,
    #[serde(default = "default_shallow")]
    pub shallow: Rgb,
    #[serde(default = "default_coastline")]
    pub coastline: Rgb,
    #[serde(default = "default_land")]
    pub land: Rgb,
    /// Background revealed behind a drag-offset frame; shells clear with it.
    #[serde(default = "default_void")]
    pub void: Rgb,
    #[serde(default = "default_marker")]
    pub marker: Rgb,
    /// Foreground/background for text overlays drawn by the shell.
    #[serde(default = "default_text")]
    pub text: Rgb,
    #[serde(default = "default_text_bg")]
    pub text_bg: Rgb,
}

fn default_deep() -> Rgb {
    [8, 40, 90]
}
fn default_wave() -> Rgb {
    [30, 72, 132]
}
fn default_shallow() -> Rgb {
    [62, 120, 180]
}
fn default_coastline() -> Rgb {
    [228, 208, 160]
}
fn default_land() -> Rgb {
    [92, 150, 72]
}
fn default_void() -> Rgb {
    [0, 0, 0]
}
fn default_marker() -> Rgb {
    [220, 60, 60]
}
fn default_text() -> Rgb {
    [240, 240, 240]
}
fn default_text_bg() -> Rgb {
    [20, 20, 30]
}

impl Default for MapTheme {
    fn default() -> Self {
        Self {
            deep: default_deep(),
            wave: default_wave(),
            shallow: default_shallow(),
            coastline: default_coastline(),
            land: default_land(),
            void: default_void(),
            marker: default_marker(),
            text: default_text(),
            text_bg: default_text_bg(),
        }
    }
}

/// The repeating deep-ocean tile: a flat deep fill with two hand-placed
/// wave squiggles, sampled by `(row % tile, col % tile)` so the interior
/// reads as textured water instead of a flat fill.
#[derive(Debug, Clone)]
pub struct WaveTile {
    pixels: Vec<Rgb>,
}

/// Stroke coordinates of one wave squiggle, relative to its top-left cell.
const WAVE_STROKE: [(usize, usize); 11] = [
    (0, 2),
    (1, 2),
    (2, 2),
    (3, 1),
    (4, 1),
    (5, 0),
    (6, 1),
    (7, 1),
    (8, 2),
    (9, 2),
    (10, 2),
];

impl WaveTile {
    pub fn new(theme: &MapTheme) -> Self {
        let mut pixels = vec![theme.deep; WAVE_TILE_SIZE * WAVE_TILE_SIZE];
        // Two squiggles, offset so the pattern tiles without obvious rows.
        for &(row, col) in &WAVE_STROKE {
            pixels[row * WAVE_TILE_SIZE + col] = theme.wave;
        }
        for &(row, col) in &WAVE_STROKE {
            pixels[(row + 16) * WAVE_TILE_SIZE + col + 16] = theme.wave;
        }
        Self { pixels }
    }

    /// Color for a frame cell, wrapping coordinates into the tile.
    #[inline]
    pub fn sample(&self, row: usize, col: usize) -> Rgb {
        self.pixels[(row % WAVE_TILE_SIZE) * WAVE_TILE_SIZE + (col % WAVE_TILE_SIZE)]
    }
}
