use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use mandelmap_core::{escape_time, Complex, CoreError, Viewport};

use crate::error::RenderError;
use crate::grid::IterationGrid;

/// `count` evenly spaced samples across `[min, max]`, inclusive of both
/// endpoints. A single-sample axis degenerates to the lower bound.
fn sample_axis(min: f64, max: f64, count: u32) -> Vec<f64> {
    if count == 1 {
        return vec![min];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| min + step * i as f64).collect()
}

/// Evaluate the escape-time grid for a viewport at the given resolution.
///
/// Every cell is independent, so rows are computed in parallel via Rayon.
/// Degenerate viewports, zero dimensions, and a zero iteration budget are
/// rejected before any sampling happens.
pub fn evaluate(
    viewport: &Viewport,
    width: u32,
    height: u32,
    max_iterations: u32,
) -> crate::Result<IterationGrid> {
    viewport.validate()?;
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    if max_iterations == 0 {
        return Err(CoreError::InvalidMaxIterations(max_iterations).into());
    }

    let start = Instant::now();
    debug!(width, height, max_iterations, "Starting grid evaluation");

    let res = sample_axis(viewport.x_min, viewport.x_max, width);
    let ims = sample_axis(viewport.y_min, viewport.y_max, height);

    let mut grid = IterationGrid::new(width, height, max_iterations);
    grid.data
        .par_chunks_mut(width as usize)
        .zip(ims.par_iter())
        .for_each(|(row, &im)| {
            for (cell, &re) in row.iter_mut().zip(res.iter()) {
                *cell = escape_time(Complex::new(re, im), max_iterations);
            }
        });

    info!(
        elapsed_ms = start.elapsed().as_millis(),
        width, height, "Grid evaluation complete"
    );
    Ok(grid)
}
