/// Abstract navigation input, decoupled from any particular window toolkit.
///
/// The windowing shell translates raw input (scroll wheel, mouse buttons,
/// number keys) into these events and feeds them to [`MapEngine::handle_event`].
///
/// [`MapEngine::handle_event`]: crate::engine::MapEngine::handle_event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    /// Zoom in by the configured step, toward the given display pixel.
    ZoomIn { px: f64, py: f64 },
    /// Zoom out by the reciprocal of the configured step.
    ZoomOut { px: f64, py: f64 },
    /// Begin a drag at the given display pixel.
    PanStart { px: f64, py: f64 },
    /// Drag in progress; the pointer is now at the given display pixel.
    PanUpdate { px: f64, py: f64 },
    /// End the drag and commit the accumulated offset to the viewport.
    PanCommit,
    /// Centre the viewport on the marker with this index (0-based).
    JumpToMarker(usize),
    /// Show or hide the marker overlay.
    ToggleMarkers,
    /// Restore the initial viewport.
    Reset,
    /// Flag the current composited frame for an external image writer.
    RequestScreenshot,
}
