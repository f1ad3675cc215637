use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid image dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] mandelmap_core::CoreError),
}
