use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use mandelmap_core::Viewport;
use mandelmap_render::{draw_square, IterationGrid, RgbBuffer};

use crate::config::MapConfig;
use crate::controller::ViewportController;
use crate::events::NavEvent;
use crate::marker::Marker;
use crate::notifications::NotificationQueue;
use crate::scheduler::RecomputeScheduler;

/// A marker caption and the display pixel it anchors to.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLabel {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// The last applied recompute, retained in two layers: the plain colorized
/// image and the marker-composited one. Keeping both (plus the iteration
/// grid) lets the marker overlay toggle without touching the evaluator.
#[derive(Debug)]
struct DisplayFrame {
    viewport: Viewport,
    grid: IterationGrid,
    base: RgbBuffer,
    composed: RgbBuffer,
    labels: Vec<MarkerLabel>,
}

/// Everything the windowing shell needs to draw one frame.
#[derive(Debug)]
pub struct FrameView<'a> {
    /// Composited image, or `None` before the first recompute lands.
    pub image: Option<&'a RgbBuffer>,
    /// Pixel offset to blit the image at while a drag is pending.
    pub drag_offset: (i32, i32),
    pub status_text: String,
    /// Active notifications, newest first.
    pub notifications: Vec<&'a str>,
    pub marker_labels: &'a [MarkerLabel],
    /// True while a requested recompute has not yet been applied.
    pub busy: bool,
}

/// The interactive map engine: routes navigation events to the viewport
/// controller, keeps the recompute scheduler fed, and composes the frame
/// the shell draws each tick.
#[derive(Debug)]
pub struct MapEngine {
    config: Arc<MapConfig>,
    controller: ViewportController,
    scheduler: RecomputeScheduler,
    notifications: NotificationQueue,
    show_markers: bool,
    frame: Option<DisplayFrame>,
    pending_screenshot: bool,
}

impl MapEngine {
    /// Validate the configuration, spawn the recompute worker, and queue
    /// the initial frame.
    pub fn new(config: MapConfig) -> crate::Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let controller = ViewportController::new(&config);
        let mut scheduler = RecomputeScheduler::spawn(config.clone());
        scheduler.request(controller.viewport())?;

        let mut notifications = NotificationQueue::new();
        // The welcome message lingers twice as long as a normal one.
        notifications.push(
            "Welcome to MandelMap! Drag to pan, scroll to zoom.",
            Instant::now(),
            config.message_duration() * 2,
        );

        info!(
            width = config.display_width,
            height = config.display_height,
            "Map engine started"
        );
        Ok(Self {
            config,
            controller,
            scheduler,
            notifications,
            show_markers: true,
            frame: None,
            pending_screenshot: false,
        })
    }

    /// Dispatch one navigation event. `now` anchors notification expiry.
    pub fn handle_event(&mut self, event: NavEvent, now: Instant) -> crate::Result<()> {
        match event {
            NavEvent::ZoomIn { px, py } => {
                let vp = self.controller.zoom(self.config.zoom_step, (px, py));
                self.scheduler.request(vp)?;
            }
            NavEvent::ZoomOut { px, py } => {
                let vp = self.controller.zoom(1.0 / self.config.zoom_step, (px, py));
                self.scheduler.request(vp)?;
            }
            NavEvent::PanStart { px, py } => self.controller.pan_start((px, py)),
            NavEvent::PanUpdate { px, py } => self.controller.pan_update((px, py)),
            NavEvent::PanCommit => {
                if let Some(vp) = self.controller.pan_commit() {
                    self.scheduler.request(vp)?;
                }
            }
            NavEvent::JumpToMarker(index) => match self.controller.jump_to_marker(index) {
                Ok((vp, label)) => {
                    self.notify(format!("Jumping to marker: '{label}'"), now);
                    self.scheduler.request(vp)?;
                }
                Err(e) => {
                    // A key bound past the marker list is not an error worth
                    // surfacing; the view simply stays put.
                    debug!("Ignoring marker jump: {e}");
                }
            },
            NavEvent::ToggleMarkers => {
                self.show_markers = !self.show_markers;
                if let Some(frame) = &mut self.frame {
                    let (composed, labels) = compose(
                        &self.config,
                        self.controller.markers(),
                        &frame.viewport,
                        &frame.base,
                        self.show_markers,
                    );
                    frame.composed = composed;
                    frame.labels = labels;
                }
                let text = if self.show_markers {
                    "Markers shown"
                } else {
                    "Markers hidden"
                };
                self.notify(text, now);
            }
            NavEvent::Reset => {
                let vp = self.controller.reset();
                self.scheduler.request(vp)?;
                self.notify("View reset", now);
            }
            NavEvent::RequestScreenshot => {
                self.pending_screenshot = true;
                self.notify("Screenshot captured", now);
            }
        }
        Ok(())
    }

    /// Apply the newest finished recompute, if any. Returns true when a new
    /// frame was applied (the shell should redraw).
    pub fn poll(&mut self) -> bool {
        let Some(computed) = self.scheduler.poll() else {
            return false;
        };
        let (composed, labels) = compose(
            &self.config,
            self.controller.markers(),
            &computed.viewport,
            &computed.image,
            self.show_markers,
        );
        self.frame = Some(DisplayFrame {
            viewport: computed.viewport,
            grid: computed.grid,
            base: computed.image,
            composed,
            labels,
        });
        // The freshly computed frame already reflects the committed pan.
        self.controller.clear_drag_offset();
        true
    }

    /// Snapshot of everything the shell draws this tick. Expired
    /// notifications are pruned first, then the remainder is borrowed.
    pub fn frame(&mut self, now: Instant) -> FrameView<'_> {
        self.notifications.prune(now);
        FrameView {
            image: self.frame.as_ref().map(|f| &f.composed),
            drag_offset: self.controller.drag_offset(),
            status_text: self.controller.status_text(),
            notifications: self.notifications.visible(now),
            marker_labels: self.frame.as_ref().map_or(&[], |f| f.labels.as_slice()),
            busy: self.scheduler.busy(),
        }
    }

    /// Coordinate readout for the pointer position.
    pub fn mouse_position_text(&self, px: f64, py: f64) -> String {
        self.controller.mouse_text(px, py)
    }

    /// Escape value under a display pixel, read from the retained grid.
    ///
    /// Under pixel doubling the grid is half the display resolution, so the
    /// pixel is scaled down before the lookup. `None` before the first
    /// frame or for a pointer outside the canvas.
    pub fn escape_value_at(&self, px: f64, py: f64) -> Option<u32> {
        let frame = self.frame.as_ref()?;
        if px < 0.0 || py < 0.0 {
            return None;
        }
        let col = (px * frame.grid.width as f64 / self.config.display_width as f64) as u32;
        let row = (py * frame.grid.height as f64 / self.config.display_height as f64) as u32;
        if col >= frame.grid.width || row >= frame.grid.height {
            return None;
        }
        Some(frame.grid.get(col, row))
    }

    /// Hand over the composited frame if a screenshot was requested and a
    /// frame exists. The request is consumed either way.
    pub fn take_screenshot_request(&mut self) -> Option<RgbBuffer> {
        if !self.pending_screenshot {
            return None;
        }
        self.pending_screenshot = false;
        self.frame.as_ref().map(|f| f.composed.clone())
    }

    pub fn busy(&self) -> bool {
        self.scheduler.busy()
    }

    fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.notifications
            .push(text, now, self.config.message_duration());
    }
}

/// Composite the marker overlay onto a colorized frame.
fn compose(
    config: &MapConfig,
    markers: &[Marker],
    viewport: &Viewport,
    base: &RgbBuffer,
    show_markers: bool,
) -> (RgbBuffer, Vec<MarkerLabel>) {
    if !show_markers {
        return (base.clone(), Vec::new());
    }
    let mut composed = base.clone();
    let mut labels = Vec::with_capacity(markers.len());
    let [label_dx, label_dy] = config.marker_label_offset;
    for marker in markers {
        let (sx, sy) = viewport.complex_to_screen(
            marker.position(),
            config.display_width,
            config.display_height,
        );
        draw_square(&mut composed, sx, sy, config.marker_size, config.theme.marker);
        labels.push(MarkerLabel {
            text: marker.label.clone(),
            x: sx + label_dx,
            y: sy + label_dy,
        });
    }
    (composed, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn small_config() -> MapConfig {
        MapConfig {
            display_width: 60,
            display_height: 40,
            max_iterations: 50,
            ..MapConfig::default()
        }
    }

    fn engine() -> MapEngine {
        MapEngine::new(small_config()).unwrap()
    }

    /// Poll until the pending recompute is applied.
    fn settle(engine: &mut MapEngine) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while engine.busy() {
            engine.poll();
            assert!(Instant::now() < deadline, "engine never settled");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn startup_queues_exactly_one_recompute() {
        let mut eng = engine();
        assert!(eng.busy());
        settle(&mut eng);

        let now = Instant::now();
        let view = eng.frame(now);
        assert!(view.image.is_some());
        assert!(!view.busy);
        assert!(view
            .notifications
            .iter()
            .any(|t| t.starts_with("Welcome to MandelMap")));
    }

    #[test]
    fn reset_requests_one_recompute_and_restores_bounds() {
        let mut eng = engine();
        settle(&mut eng);
        let initial = eng.controller.viewport();

        let now = Instant::now();
        eng.handle_event(NavEvent::ZoomIn { px: 10.0, py: 10.0 }, now).unwrap();
        settle(&mut eng);
        assert_ne!(eng.controller.viewport(), initial);

        let before = eng.scheduler.requested;
        eng.handle_event(NavEvent::Reset, now).unwrap();
        assert_eq!(eng.scheduler.requested, before + 1);
        assert_eq!(eng.controller.viewport(), initial);
        settle(&mut eng);
        assert_eq!(eng.frame.as_ref().unwrap().viewport, initial);
    }

    #[test]
    fn toggle_markers_recomposes_without_recompute() {
        let mut eng = engine();
        settle(&mut eng);
        let frame = eng.frame.as_ref().unwrap();
        assert_ne!(frame.composed, frame.base, "markers must be drawn");
        assert_eq!(frame.labels.len(), 9);

        let before = eng.scheduler.requested;
        let now = Instant::now();
        eng.handle_event(NavEvent::ToggleMarkers, now).unwrap();
        assert_eq!(eng.scheduler.requested, before, "toggle must not recompute");

        let frame = eng.frame.as_ref().unwrap();
        assert_eq!(frame.composed, frame.base);
        assert!(frame.labels.is_empty());

        eng.handle_event(NavEvent::ToggleMarkers, now).unwrap();
        let frame = eng.frame.as_ref().unwrap();
        assert_ne!(frame.composed, frame.base);
    }

    #[test]
    fn drag_offset_persists_until_the_new_frame_lands() {
        let mut eng = engine();
        settle(&mut eng);

        let now = Instant::now();
        eng.handle_event(NavEvent::PanStart { px: 20.0, py: 20.0 }, now).unwrap();
        eng.handle_event(NavEvent::PanUpdate { px: 35.0, py: 28.0 }, now).unwrap();
        eng.handle_event(NavEvent::PanCommit, now).unwrap();
        assert_eq!(eng.frame(now).drag_offset, (15, 8));
        assert!(eng.busy());

        settle(&mut eng);
        assert_eq!(eng.frame(now).drag_offset, (0, 0));
    }

    #[test]
    fn out_of_range_marker_jump_is_ignored() {
        let mut eng = engine();
        settle(&mut eng);
        let before_requests = eng.scheduler.requested;
        let before_viewport = eng.controller.viewport();

        let now = Instant::now();
        eng.handle_event(NavEvent::JumpToMarker(99), now).unwrap();
        assert_eq!(eng.scheduler.requested, before_requests);
        assert_eq!(eng.controller.viewport(), before_viewport);
    }

    #[test]
    fn marker_jump_recenters_and_notifies() {
        let mut eng = engine();
        settle(&mut eng);

        let now = Instant::now();
        eng.handle_event(NavEvent::JumpToMarker(0), now).unwrap();
        let center = eng.controller.viewport().center();
        assert!((center.re - (-0.75)).abs() < 1e-9);
        assert!((center.im - 0.1).abs() < 1e-9);

        let view = eng.frame(now);
        assert!(view
            .notifications
            .iter()
            .any(|t| *t == "Jumping to marker: 'Seahorse Valley'"));
    }

    #[test]
    fn escape_probe_reads_the_retained_grid() {
        let mut eng = engine();
        assert!(eng.escape_value_at(30.0, 20.0).is_none(), "no frame yet");
        settle(&mut eng);

        // The display centre sits near (-0.5, 0), well inside the set.
        assert_eq!(eng.escape_value_at(30.0, 20.0), Some(0));
        assert!(eng.escape_value_at(-1.0, 5.0).is_none());
        assert!(eng.escape_value_at(60.0, 5.0).is_none());
    }

    #[test]
    fn screenshot_request_hands_over_the_composed_frame() {
        let mut eng = engine();
        let now = Instant::now();

        // Before any frame exists the request is consumed with no image.
        eng.handle_event(NavEvent::RequestScreenshot, now).unwrap();
        assert!(eng.take_screenshot_request().is_none());
        assert!(eng.take_screenshot_request().is_none());

        settle(&mut eng);
        eng.handle_event(NavEvent::RequestScreenshot, now).unwrap();
        let shot = eng.take_screenshot_request().expect("frame available");
        assert_eq!(shot.width, 60);
        assert_eq!(shot.height, 40);
        assert!(eng.take_screenshot_request().is_none(), "request is one-shot");

        let view = eng.frame(now);
        assert!(
            view.notifications.iter().any(|t| *t == "Screenshot captured"),
            "capture must be announced"
        );
    }
}
