/// Per-pixel escape values for a full frame.
///
/// This is the raw output of the evaluator before coloring. `0` marks an
/// interior sample (never escaped within the budget); `n > 0` is the
/// 1-based iteration index of first escape. Keeping iteration data separate
/// from colored pixels lets the engine recompose overlays (markers on/off)
/// without re-evaluating.
#[derive(Debug, Clone)]
pub struct IterationGrid {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub data: Vec<u32>,
}

impl IterationGrid {
    pub fn new(width: u32, height: u32, max_iterations: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            max_iterations,
            data: vec![0; size],
        }
    }

    #[inline]
    pub fn index(&self, col: u32, row: u32) -> usize {
        (row * self.width + col) as usize
    }

    /// Escape value at `(col, row)`. Row 0 is the top of the frame.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> u32 {
        self.data[self.index(col, row)]
    }

    #[inline]
    pub fn set(&mut self, col: u32, row: u32, value: u32) {
        let i = self.index(col, row);
        self.data[i] = value;
    }
}
