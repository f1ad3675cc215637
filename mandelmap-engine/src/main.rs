use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{error, info};

use mandelmap_engine::{MapConfig, MapEngine, NavEvent};
use mandelmap_render::write_snapshot_png;

/// Headless driver: computes the initial view and writes it to `map.png`.
/// A windowing shell would instead feed `NavEvent`s from user input and
/// blit each `FrameView`.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting MandelMap");
    if let Err(e) = run() {
        error!("MandelMap failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = MapConfig::load_or_default(Path::new("mandelmap.json"));
    let mut engine = MapEngine::new(config)?;

    while engine.busy() {
        engine.poll();
        thread::sleep(Duration::from_millis(10));
    }

    engine.handle_event(NavEvent::RequestScreenshot, Instant::now())?;
    let image = engine
        .take_screenshot_request()
        .ok_or("no frame to snapshot")?;

    let file = File::create("map.png")?;
    write_snapshot_png(&image, BufWriter::new(file))?;
    info!("Wrote map.png ({}x{})", image.width, image.height);
    Ok(())
}
