use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use mandelmap_core::{CoreError, Viewport};
use mandelmap_render::{CoastlineBands, MapTheme, RenderError};

use crate::marker::Marker;

/// Immutable engine configuration, constructed once at startup and threaded
/// through constructors. Every field has a serde default so a partial JSON
/// file deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_display_width")]
    pub display_width: u32,
    #[serde(default = "default_display_height")]
    pub display_height: u32,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Factor applied to the viewport ranges per zoom-in step; the
    /// reciprocal is used for zooming out. Must be in `(0, 1)`.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    /// Render at half the display resolution and upscale 2×.
    #[serde(default)]
    pub pixel_doubling: bool,

    #[serde(default)]
    pub bands: CoastlineBands,
    #[serde(default)]
    pub theme: MapTheme,

    /// How long a notification stays on screen, in seconds.
    #[serde(default = "default_message_display_secs")]
    pub message_display_secs: f64,
    /// How long the mouse-coordinate readout lingers after the last motion.
    /// Consumed by the windowing shell, which owns the readout's timer;
    /// the engine only supplies the text.
    #[serde(default = "default_mouse_text_display_secs")]
    pub mouse_text_display_secs: f64,

    /// Side length of the marker square, in display pixels.
    #[serde(default = "default_marker_size")]
    pub marker_size: u32,
    /// Label anchor offset from the marker centre, in display pixels.
    #[serde(default = "default_marker_label_offset")]
    pub marker_label_offset: [i32; 2],
    /// Magnification used for markers that do not specify their own.
    #[serde(default = "default_marker_zoom")]
    pub default_marker_zoom: f64,

    #[serde(default = "default_markers")]
    pub markers: Vec<Marker>,
}

fn default_display_width() -> u32 {
    900
}
fn default_display_height() -> u32 {
    600
}
fn default_max_iterations() -> u32 {
    100
}
fn default_zoom_step() -> f64 {
    0.5
}
fn default_message_display_secs() -> f64 {
    4.0
}
fn default_mouse_text_display_secs() -> f64 {
    2.0
}
fn default_marker_size() -> u32 {
    6
}
fn default_marker_label_offset() -> [i32; 2] {
    [8, -12]
}
fn default_marker_zoom() -> f64 {
    200.0
}

fn default_markers() -> Vec<Marker> {
    let named = [
        (-0.75, 0.1, "Seahorse Valley", Some(100.0)),
        (0.275, 0.007, "Elephant Valley", Some(300.0)),
        (-0.7453, 0.1127, "Double Spiral", Some(1500.0)),
        (-1.7549, 0.0, "Mini Mandelbrot", Some(2000.0)),
        (-0.0882, 0.655, "Triple Spiral", Some(600.0)),
        (-1.4012, 0.0, "Feigenbaum Point", Some(800.0)),
        (-1.36, 0.005, "Scepter Valley", Some(400.0)),
        (0.35, 0.06, "Quad Spiral", None),
        (-1.94, 0.0, "The Needle", None),
    ];
    named
        .iter()
        .map(|&(x, y, label, zoom)| Marker {
            x,
            y,
            label: label.to_string(),
            zoom,
        })
        .collect()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            display_width: default_display_width(),
            display_height: default_display_height(),
            max_iterations: default_max_iterations(),
            zoom_step: default_zoom_step(),
            pixel_doubling: false,
            bands: CoastlineBands::default(),
            theme: MapTheme::default(),
            message_display_secs: default_message_display_secs(),
            mouse_text_display_secs: default_mouse_text_display_secs(),
            marker_size: default_marker_size(),
            marker_label_offset: default_marker_label_offset(),
            default_marker_zoom: default_marker_zoom(),
            markers: default_markers(),
        }
    }
}

impl MapConfig {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<MapConfig>(&json) {
                    Ok(config) => {
                        info!("Loaded configuration from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        error!("Failed to parse configuration: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read configuration file: {e}");
                }
            }
        } else {
            debug!("No configuration file at {}", path.display());
        }
        Self::default()
    }

    /// Reject configurations the compute pipeline cannot serve.
    pub fn validate(&self) -> crate::Result<()> {
        if self.display_width == 0 || self.display_height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.display_width,
                height: self.display_height,
            }
            .into());
        }
        if self.max_iterations == 0 {
            return Err(CoreError::InvalidMaxIterations(self.max_iterations).into());
        }
        if !(self.zoom_step > 0.0 && self.zoom_step < 1.0) {
            return Err(CoreError::InvalidViewport {
                reason: format!("zoom step must be in (0, 1), got {}", self.zoom_step),
            }
            .into());
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.display_width as f64 / self.display_height as f64
    }

    /// Resolution the evaluator runs at: halved under pixel doubling.
    pub fn render_size(&self) -> (u32, u32) {
        if self.pixel_doubling {
            ((self.display_width / 2).max(1), (self.display_height / 2).max(1))
        } else {
            (self.display_width, self.display_height)
        }
    }

    pub fn initial_viewport(&self) -> Viewport {
        Viewport::initial_map(self.display_width, self.display_height)
    }

    pub fn message_duration(&self) -> Duration {
        Duration::from_secs_f64(self.message_display_secs)
    }

    /// Linger time for the shell's mouse-coordinate readout.
    pub fn mouse_text_duration(&self) -> Duration {
        Duration::from_secs_f64(self.mouse_text_display_secs)
    }
}
