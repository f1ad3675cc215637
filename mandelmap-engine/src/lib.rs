pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod marker;
pub mod notifications;
pub mod scheduler;

pub use config::MapConfig;
pub use controller::ViewportController;
pub use engine::{FrameView, MapEngine, MarkerLabel};
pub use error::EngineError;
pub use events::NavEvent;
pub use marker::Marker;
pub use notifications::NotificationQueue;
pub use scheduler::{ComputedFrame, RecomputeScheduler};

/// Convenience result type for the engine crate.
pub type Result<T> = std::result::Result<T, EngineError>;
