use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// The rectangular region of the complex plane currently mapped onto the
/// display.
///
/// Stored as explicit bounds rather than center + scale: navigation math
/// (zoom toward a pivot, pan by a pixel delta) moves each bound
/// independently, and the bounds need not match the display aspect ratio.
///
/// Invariant: `x_max > x_min`, `y_max > y_min`, all bounds finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    /// Create a viewport with explicit bounds, validating the invariant.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> crate::Result<Self> {
        let vp = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        vp.validate()?;
        Ok(vp)
    }

    /// The classic starting view: real axis spanning `[-2, 1]`, imaginary
    /// span derived from the display aspect ratio and centred on zero.
    pub fn initial_map(display_width: u32, display_height: u32) -> Self {
        let aspect = display_width as f64 / display_height as f64;
        let y_half = 3.0 / aspect / 2.0;
        Self {
            x_min: -2.0,
            x_max: 1.0,
            y_min: -y_half,
            y_max: y_half,
        }
    }

    /// Check the viewport invariant without consuming the value.
    ///
    /// A degenerate viewport must be rejected before it reaches the
    /// sampling code, where a zero range would divide by zero.
    pub fn validate(&self) -> crate::Result<()> {
        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(CoreError::InvalidViewport {
                reason: format!("bounds must be finite, got {self:?}"),
            });
        }
        if self.x_max <= self.x_min || self.y_max <= self.y_min {
            return Err(CoreError::InvalidViewport {
                reason: format!(
                    "ranges must be positive, got x: {}..{}, y: {}..{}",
                    self.x_min, self.x_max, self.y_min, self.y_max
                ),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn x_range(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn y_range(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Centre of the viewport on the complex plane.
    pub fn center(&self) -> Complex {
        Complex::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Map a display pixel to a point on the complex plane.
    ///
    /// The projection is linear over the full display dimensions: pixel
    /// `(0, 0)` maps to `(x_min, y_min)` and `(w, h)` to `(x_max, y_max)`.
    #[inline]
    pub fn screen_to_complex(
        &self,
        px: f64,
        py: f64,
        display_width: u32,
        display_height: u32,
    ) -> Complex {
        Complex::new(
            self.x_min + self.x_range() * px / display_width as f64,
            self.y_min + self.y_range() * py / display_height as f64,
        )
    }

    /// Inverse of [`screen_to_complex`](Self::screen_to_complex): project a
    /// complex coordinate to a display pixel.
    ///
    /// Points outside the viewport still produce a (possibly off-canvas)
    /// position; callers clip draws to canvas bounds.
    #[inline]
    pub fn complex_to_screen(
        &self,
        point: Complex,
        display_width: u32,
        display_height: u32,
    ) -> (i32, i32) {
        let sx = (point.re - self.x_min) / self.x_range() * display_width as f64;
        let sy = (point.im - self.y_min) / self.y_range() * display_height as f64;
        (sx as i32, sy as i32)
    }

    /// Shrink (factor < 1) or grow (factor > 1) the viewport toward/away
    /// from a fixed complex-plane pivot.
    ///
    /// Each bound moves by `pivot + (bound - pivot) * factor`, so the pivot
    /// itself keeps its screen position.
    pub fn zoomed_toward(&self, pivot: Complex, factor: f64) -> Self {
        Self {
            x_min: pivot.re + (self.x_min - pivot.re) * factor,
            x_max: pivot.re + (self.x_max - pivot.re) * factor,
            y_min: pivot.im + (self.y_min - pivot.im) * factor,
            y_max: pivot.im + (self.y_max - pivot.im) * factor,
        }
    }

    /// Shift all four bounds by a complex-plane delta.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x_min: self.x_min + dx,
            x_max: self.x_max + dx,
            y_min: self.y_min + dy,
            y_max: self.y_max + dy,
        }
    }

    /// Build a viewport centred on `center` with the given half-extents.
    pub fn centered_on(center: Complex, half_width: f64, half_height: f64) -> Self {
        Self {
            x_min: center.re - half_width,
            x_max: center.re + half_width,
            y_min: center.im - half_height,
            y_max: center.im + half_height,
        }
    }

    /// Zoom multiplier relative to an initial viewport, for display only.
    ///
    /// Takes the larger of the two per-axis ratios so a viewport squeezed
    /// on either axis reports the tighter zoom.
    pub fn magnification(&self, initial: &Viewport) -> f64 {
        let zoom_x = initial.x_range() / self.x_range();
        let zoom_y = initial.y_range() / self.y_range();
        zoom_x.max(zoom_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn initial_map_bounds() {
        let vp = Viewport::initial_map(900, 600);
        assert!((vp.x_min - (-2.0)).abs() < EPSILON);
        assert!((vp.x_max - 1.0).abs() < EPSILON);
        // Aspect 1.5 → imaginary span 2.0, centred on zero.
        assert!((vp.y_range() - 2.0).abs() < EPSILON);
        assert!((vp.y_min + vp.y_max).abs() < EPSILON);
    }

    #[test]
    fn degenerate_bounds_rejected() {
        assert!(Viewport::new(0.0, 0.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, 1.0, 1.0, 1.0).is_err());
        assert!(Viewport::new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, f64::INFINITY, -1.0, 1.0).is_err());
    }

    #[test]
    fn screen_complex_round_trip() {
        let vp = Viewport::new(-2.0, 1.0, -1.0, 1.0).unwrap();
        for &(px, py) in &[(0.0, 0.0), (450.0, 300.0), (899.0, 1.0), (13.0, 599.0)] {
            let c = vp.screen_to_complex(px, py, 900, 600);
            let (sx, sy) = vp.complex_to_screen(c, 900, 600);
            assert!((sx as f64 - px).abs() <= 1.0, "x: {sx} vs {px}");
            assert!((sy as f64 - py).abs() <= 1.0, "y: {sy} vs {py}");
        }
    }

    #[test]
    fn zoom_keeps_pivot_fixed() {
        let vp = Viewport::initial_map(900, 600);
        let pivot = vp.screen_to_complex(300.0, 200.0, 900, 600);
        let zoomed = vp.zoomed_toward(pivot, 0.5);
        let (sx, sy) = zoomed.complex_to_screen(pivot, 900, 600);
        assert!((sx - 300).abs() <= 1);
        assert!((sy - 200).abs() <= 1);
        assert!((zoomed.x_range() - vp.x_range() * 0.5).abs() < EPSILON);
    }

    #[test]
    fn magnification_is_one_initially_and_grows_under_zoom() {
        let initial = Viewport::initial_map(900, 600);
        assert!((initial.magnification(&initial) - 1.0).abs() < EPSILON);

        // Strictly shrinking the x range (fixed aspect) strictly increases zoom.
        let mut vp = initial;
        let mut last = 1.0;
        for _ in 0..8 {
            vp = vp.zoomed_toward(vp.center(), 0.5);
            let z = vp.magnification(&initial);
            assert!(z > last, "zoom must strictly increase: {z} <= {last}");
            last = z;
        }
    }

    #[test]
    fn translation_shifts_all_bounds() {
        let vp = Viewport::initial_map(900, 600);
        let moved = vp.translated(0.25, -0.5);
        assert!((moved.x_min - (vp.x_min + 0.25)).abs() < EPSILON);
        assert!((moved.x_max - (vp.x_max + 0.25)).abs() < EPSILON);
        assert!((moved.y_min - (vp.y_min - 0.5)).abs() < EPSILON);
        assert!((moved.y_range() - vp.y_range()).abs() < EPSILON);
    }

    #[test]
    fn centered_on_produces_symmetric_bounds() {
        let vp = Viewport::centered_on(Complex::new(-0.75, 0.1), 0.015, 0.01);
        let c = vp.center();
        assert!((c.re - (-0.75)).abs() < EPSILON);
        assert!((c.im - 0.1).abs() < EPSILON);
        assert!((vp.x_range() - 0.03).abs() < EPSILON);
        assert!((vp.y_range() - 0.02).abs() < EPSILON);
    }

    #[test]
    fn serde_round_trip() {
        let vp = Viewport::initial_map(800, 600);
        let json = serde_json::to_string(&vp).unwrap();
        let back: Viewport = serde_json::from_str(&json).unwrap();
        assert_eq!(vp, back);
    }
}
