use thiserror::Error;

/// Errors originating from the interactive engine layer.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("marker index {index} out of range (have {count} markers)")]
    MarkerIndexOutOfRange { index: usize, count: usize },

    #[error(transparent)]
    Core(#[from] mandelmap_core::CoreError),

    #[error(transparent)]
    Render(#[from] mandelmap_render::RenderError),
}
