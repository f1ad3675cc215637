use mandelmap_core::{Complex, Viewport};

use crate::config::MapConfig;
use crate::error::EngineError;
use crate::marker::Marker;

/// Owns the current viewport and the in-progress drag state.
///
/// Navigation operations return the viewport to recompute (when one is
/// needed); the controller itself never talks to the scheduler. The drag
/// offset is a pixel-space translation applied visually to the stale frame
/// until the committed recompute lands, at which point the engine calls
/// [`clear_drag_offset`](Self::clear_drag_offset).
#[derive(Debug)]
pub struct ViewportController {
    initial: Viewport,
    current: Viewport,
    /// The viewport of the last committed navigation; pan commits compare
    /// against this to skip no-op recomputes.
    committed: Viewport,
    drag_anchor: Option<(f64, f64)>,
    drag_offset: (f64, f64),
    display_width: u32,
    display_height: u32,
    default_marker_zoom: f64,
    markers: Vec<Marker>,
}

impl ViewportController {
    pub fn new(config: &MapConfig) -> Self {
        let initial = config.initial_viewport();
        Self {
            initial,
            current: initial,
            committed: initial,
            drag_anchor: None,
            drag_offset: (0.0, 0.0),
            display_width: config.display_width,
            display_height: config.display_height,
            default_marker_zoom: config.default_marker_zoom,
            markers: config.markers.clone(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.current
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Pixel offset to apply when blitting the stale frame.
    pub fn drag_offset(&self) -> (i32, i32) {
        (
            self.drag_offset.0.round() as i32,
            self.drag_offset.1.round() as i32,
        )
    }

    pub fn clear_drag_offset(&mut self) {
        self.drag_offset = (0.0, 0.0);
    }

    /// Zoom toward a display pixel: factor < 1 zooms in, > 1 zooms out.
    ///
    /// The pivot pixel is adjusted by the pending drag offset so that
    /// zooming mid-drag targets the point actually under the cursor.
    pub fn zoom(&mut self, factor: f64, pivot_px: (f64, f64)) -> Viewport {
        let pivot = self.current.screen_to_complex(
            pivot_px.0 - self.drag_offset.0,
            pivot_px.1 - self.drag_offset.1,
            self.display_width,
            self.display_height,
        );
        self.current = self.current.zoomed_toward(pivot, factor);
        self.committed = self.current;
        self.current
    }

    pub fn pan_start(&mut self, pos: (f64, f64)) {
        self.drag_anchor = Some(pos);
        self.drag_offset = (0.0, 0.0);
    }

    pub fn pan_update(&mut self, pos: (f64, f64)) {
        if let Some(anchor) = self.drag_anchor {
            self.drag_offset = (pos.0 - anchor.0, pos.1 - anchor.1);
        }
    }

    /// Commit the accumulated drag: convert the pixel offset to a
    /// complex-plane delta and shift the viewport against the drag
    /// direction (dragging right reveals content to the left).
    ///
    /// Returns the new viewport only when it differs from the last
    /// committed one. The drag offset is kept for display until the
    /// recompute lands; a no-op commit clears it immediately since no
    /// new frame will arrive.
    pub fn pan_commit(&mut self) -> Option<Viewport> {
        self.drag_anchor = None;
        let dx = self.current.x_range() * self.drag_offset.0 / self.display_width as f64;
        let dy = self.current.y_range() * self.drag_offset.1 / self.display_height as f64;
        self.current = self.current.translated(-dx, -dy);

        if self.current != self.committed {
            self.committed = self.current;
            Some(self.current)
        } else {
            self.clear_drag_offset();
            None
        }
    }

    /// Centre the viewport on a marker at its configured magnification.
    ///
    /// The new real span is `initial span / zoom`; the imaginary span
    /// follows from the display aspect ratio.
    pub fn jump_to_marker(&mut self, index: usize) -> crate::Result<(Viewport, String)> {
        let marker = self
            .markers
            .get(index)
            .ok_or(EngineError::MarkerIndexOutOfRange {
                index,
                count: self.markers.len(),
            })?;

        let zoom = marker.zoom.unwrap_or(self.default_marker_zoom);
        let half_width = self.initial.x_range() / zoom / 2.0;
        let half_height = half_width / self.aspect_ratio();

        self.current = Viewport::centered_on(marker.position(), half_width, half_height);
        self.committed = self.current;
        Ok((self.current, marker.label.clone()))
    }

    /// Restore the initial viewport exactly.
    pub fn reset(&mut self) -> Viewport {
        self.current = self.initial;
        self.committed = self.initial;
        self.current
    }

    /// Zoom multiplier relative to the initial view, for display only.
    pub fn zoom_level(&self) -> f64 {
        self.current.magnification(&self.initial)
    }

    /// Centre coordinates and zoom multiplier for the status overlay.
    pub fn status_text(&self) -> String {
        let center = self.current.center();
        format!(
            "Center: X:{:.6} Y:{:.6}, Zoom: {:.0}x",
            center.re,
            center.im,
            self.zoom_level()
        )
    }

    /// Complex coordinate under the pointer, adjusted by the drag offset.
    pub fn mouse_position(&self, px: f64, py: f64) -> Complex {
        self.current.screen_to_complex(
            px - self.drag_offset.0,
            py - self.drag_offset.1,
            self.display_width,
            self.display_height,
        )
    }

    pub fn mouse_text(&self, px: f64, py: f64) -> String {
        let c = self.mouse_position(px, py);
        format!("Mouse: X:{:.6} Y:{:.6}", c.re, c.im)
    }

    fn aspect_ratio(&self) -> f64 {
        self.display_width as f64 / self.display_height as f64
    }
}
