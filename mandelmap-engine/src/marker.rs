use serde::{Deserialize, Serialize};

use mandelmap_core::Complex;

/// A named, bookmarked location on the complex plane.
///
/// Static configuration, read-only to the engine. `zoom` is the
/// magnification to jump to; markers without one use the configured
/// default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl Marker {
    pub fn position(&self) -> Complex {
        Complex::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_zoom() {
        let m: Marker =
            serde_json::from_str(r#"{"x": -0.75, "y": 0.1, "label": "Seahorse Valley"}"#).unwrap();
        assert_eq!(m.label, "Seahorse Valley");
        assert!(m.zoom.is_none());
        assert_eq!(m.position(), Complex::new(-0.75, 0.1));
    }

    #[test]
    fn deserializes_with_zoom() {
        let m: Marker =
            serde_json::from_str(r#"{"x": 0.275, "y": 0.007, "label": "Elephant", "zoom": 300}"#)
                .unwrap();
        assert_eq!(m.zoom, Some(300.0));
    }
}
