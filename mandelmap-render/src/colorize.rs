use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buffer::RgbBuffer;
use crate::grid::IterationGrid;
use crate::theme::{MapTheme, WaveTile};

/// Iteration thresholds separating water from coastline from land.
///
/// Cells with escape values above `shallow_min` are shallow water, values
/// above `coastline_min` (but not above `shallow_min`) are coastline, and
/// everything below is land. Invariant: `coastline_min < shallow_min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoastlineBands {
    pub shallow_min: u32,
    pub coastline_min: u32,
}

impl Default for CoastlineBands {
    fn default() -> Self {
        Self {
            shallow_min: 20,
            coastline_min: 10,
        }
    }
}

/// Turn an iteration grid into a themed map image.
///
/// Per cell, in priority order: interior (0) samples the wave texture;
/// above `shallow_min` is shallow water; above `coastline_min` is
/// coastline; anything else is land and feeds the land mask. A second
/// pass dilates the land mask by its four orthogonal neighbours and
/// paints the dilated (non-land) ring in the coastline color, so every
/// landmass gets a one-cell outline regardless of the water color it
/// would otherwise wear.
pub fn colorize(grid: &IterationGrid, theme: &MapTheme, bands: CoastlineBands) -> RgbBuffer {
    let w = grid.width as usize;
    let h = grid.height as usize;
    let tile = WaveTile::new(theme);

    let mut pixels = vec![0u8; w * h * 3];
    let mut land = vec![false; w * h];

    pixels
        .par_chunks_mut(w * 3)
        .zip(land.par_chunks_mut(w))
        .enumerate()
        .for_each(|(row, (row_pixels, row_land))| {
            for col in 0..w {
                let value = grid.data[row * w + col];
                let color = if value == 0 {
                    tile.sample(row, col)
                } else if value > bands.shallow_min {
                    theme.shallow
                } else if value > bands.coastline_min {
                    theme.coastline
                } else {
                    row_land[col] = true;
                    theme.land
                };
                row_pixels[col * 3..col * 3 + 3].copy_from_slice(&color);
            }
        });

    // Outline pass: 4-neighbour dilation of the land mask, restricted to
    // non-land cells. Edge cells only test in-bounds neighbours.
    let mut outline = vec![false; w * h];
    for row in 0..h {
        for col in 0..w {
            if !land[row * w + col] {
                continue;
            }
            if row > 0 {
                outline[(row - 1) * w + col] = true;
            }
            if row + 1 < h {
                outline[(row + 1) * w + col] = true;
            }
            if col > 0 {
                outline[row * w + col - 1] = true;
            }
            if col + 1 < w {
                outline[row * w + col + 1] = true;
            }
        }
    }
    for i in 0..w * h {
        if outline[i] && !land[i] {
            pixels[i * 3..i * 3 + 3].copy_from_slice(&theme.coastline);
        }
    }

    RgbBuffer {
        width: grid.width,
        height: grid.height,
        pixels,
    }
}
