use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::{debug, error, info};

use mandelmap_core::Viewport;
use mandelmap_render::{colorize, evaluate, IterationGrid, RgbBuffer};

use crate::config::MapConfig;

/// A finished recompute: the viewport it was evaluated for, the raw
/// iteration grid (kept so the overlay can be recomposed without a new
/// evaluation), and the colorized image at display resolution.
#[derive(Debug)]
pub struct ComputedFrame {
    pub id: u64,
    pub viewport: Viewport,
    pub grid: IterationGrid,
    pub image: RgbBuffer,
}

#[derive(Debug, Clone, Copy)]
struct RecomputeRequest {
    id: u64,
    viewport: Viewport,
}

/// Hands viewport recomputes to a dedicated worker thread.
///
/// Requests are serialized through a channel; when several arrive while the
/// worker is mid-frame, it drains the queue and computes only the newest
/// one. Results come back newest-wins too, so a stale frame can never
/// overwrite a fresher one.
#[derive(Debug)]
pub struct RecomputeScheduler {
    request_tx: Sender<RecomputeRequest>,
    frame_rx: Receiver<ComputedFrame>,
    pub(crate) requested: u64,
    applied: u64,
}

impl RecomputeScheduler {
    /// Spawn the worker thread. The configuration is shared, not copied,
    /// since theme and band tables can be sizeable.
    pub fn spawn(config: Arc<MapConfig>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<RecomputeRequest>();
        let (frame_tx, frame_rx) = mpsc::channel::<ComputedFrame>();

        thread::Builder::new()
            .name("recompute-worker".into())
            .spawn(move || recompute_worker(&config, &request_rx, &frame_tx))
            .expect("failed to spawn recompute worker thread");

        Self {
            request_tx,
            frame_rx,
            requested: 0,
            applied: 0,
        }
    }

    /// Queue a recompute for the given viewport. The viewport is validated
    /// up front so a degenerate request never reaches the worker.
    pub fn request(&mut self, viewport: Viewport) -> crate::Result<()> {
        viewport.validate()?;
        self.requested += 1;
        let id = self.requested;
        debug!(id, "Queueing recompute");
        if self.request_tx.send(RecomputeRequest { id, viewport }).is_err() {
            error!("Recompute worker is gone; request dropped");
        }
        Ok(())
    }

    /// Collect finished frames without blocking, returning the newest one.
    /// Older frames still in the channel are discarded.
    pub fn poll(&mut self) -> Option<ComputedFrame> {
        let mut newest: Option<ComputedFrame> = None;
        loop {
            match self.frame_rx.try_recv() {
                Ok(frame) => {
                    if newest.as_ref().is_none_or(|f| frame.id > f.id) {
                        newest = Some(frame);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if let Some(frame) = &newest {
            self.applied = self.applied.max(frame.id);
        }
        newest
    }

    /// True while a requested frame has not yet been applied.
    pub fn busy(&self) -> bool {
        self.applied < self.requested
    }
}

fn recompute_worker(
    config: &MapConfig,
    request_rx: &Receiver<RecomputeRequest>,
    frame_tx: &Sender<ComputedFrame>,
) {
    info!("Recompute worker started");
    while let Ok(first) = request_rx.recv() {
        let request = drain_latest(first, request_rx);
        match compute_frame(config, request) {
            Ok(frame) => {
                if frame_tx.send(frame).is_err() {
                    break;
                }
            }
            Err(e) => {
                // Keep serving later requests; the previous frame stays up.
                error!(id = request.id, "Recompute failed: {e}");
            }
        }
    }
    info!("Recompute worker shutting down");
}

/// Collapse a burst of queued requests down to the most recent one.
fn drain_latest(first: RecomputeRequest, rx: &Receiver<RecomputeRequest>) -> RecomputeRequest {
    let mut latest = first;
    let mut skipped = 0u32;
    while let Ok(next) = rx.try_recv() {
        latest = next;
        skipped += 1;
    }
    if skipped > 0 {
        debug!(skipped, id = latest.id, "Coalesced stale recompute requests");
    }
    latest
}

fn compute_frame(config: &MapConfig, request: RecomputeRequest) -> crate::Result<ComputedFrame> {
    let (width, height) = config.render_size();
    let grid = evaluate(&request.viewport, width, height, config.max_iterations)?;
    let colored = colorize(&grid, &config.theme, config.bands);
    let image = if config.pixel_doubling {
        colored.upscale2x()
    } else {
        colored
    };
    Ok(ComputedFrame {
        id: request.id,
        viewport: request.viewport,
        grid,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn small_config() -> Arc<MapConfig> {
        Arc::new(MapConfig {
            display_width: 60,
            display_height: 40,
            max_iterations: 50,
            ..MapConfig::default()
        })
    }

    fn wait_for_frame(scheduler: &mut RecomputeScheduler) -> ComputedFrame {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(frame) = scheduler.poll() {
                return frame;
            }
            assert!(Instant::now() < deadline, "no frame within 10s");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn request_produces_a_frame() {
        let config = small_config();
        let mut scheduler = RecomputeScheduler::spawn(config.clone());
        scheduler.request(config.initial_viewport()).unwrap();
        assert!(scheduler.busy());

        let frame = wait_for_frame(&mut scheduler);
        assert_eq!(frame.id, 1);
        assert_eq!(frame.image.width, 60);
        assert_eq!(frame.image.height, 40);
        assert_eq!(frame.grid.width, 60);
        assert!(!scheduler.busy());
    }

    #[test]
    fn burst_of_requests_settles_on_the_newest_viewport() {
        let config = small_config();
        let mut scheduler = RecomputeScheduler::spawn(config.clone());

        let mut viewport = config.initial_viewport();
        let last = {
            for _ in 0..20 {
                scheduler.request(viewport).unwrap();
                viewport = viewport.translated(0.01, 0.0);
            }
            scheduler.request(viewport).unwrap();
            viewport
        };
        assert!(scheduler.busy());

        // Keep polling until the final request's frame is applied.
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut newest_viewport = None;
        while scheduler.busy() {
            if let Some(frame) = scheduler.poll() {
                newest_viewport = Some(frame.viewport);
            }
            assert!(Instant::now() < deadline, "scheduler never settled");
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(newest_viewport.expect("at least one frame"), last);
    }

    #[test]
    fn degenerate_viewport_is_rejected_before_queueing() {
        let config = small_config();
        let mut scheduler = RecomputeScheduler::spawn(config);
        let bad = Viewport {
            x_min: 1.0,
            x_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
        };
        assert!(scheduler.request(bad).is_err());
        assert!(!scheduler.busy());
    }

    #[test]
    fn pixel_doubling_frames_come_back_at_display_size() {
        let config = Arc::new(MapConfig {
            display_width: 64,
            display_height: 48,
            max_iterations: 50,
            pixel_doubling: true,
            ..MapConfig::default()
        });
        let mut scheduler = RecomputeScheduler::spawn(config.clone());
        scheduler.request(config.initial_viewport()).unwrap();

        let frame = wait_for_frame(&mut scheduler);
        assert_eq!(frame.image.width, 64);
        assert_eq!(frame.image.height, 48);
        // The grid stays at evaluation resolution.
        assert_eq!(frame.grid.width, 32);
        assert_eq!(frame.grid.height, 24);
    }
}
