pub mod buffer;
pub mod colorize;
pub mod error;
pub mod evaluate;
pub mod export;
pub mod grid;
pub mod overlay;
pub mod theme;

pub use buffer::RgbBuffer;
pub use colorize::{colorize, CoastlineBands};
pub use error::RenderError;
pub use evaluate::evaluate;
pub use export::write_snapshot_png;
pub use grid::IterationGrid;
pub use overlay::draw_square;
pub use theme::{MapTheme, Rgb, WaveTile, WAVE_TILE_SIZE};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
