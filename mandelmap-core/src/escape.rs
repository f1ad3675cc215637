use crate::complex::Complex;

/// Returns `true` if `c` lies inside the main cardioid.
///
/// This is a closed-form check that avoids iterating ~30–40% of visible
/// points at the default zoom level.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

/// Escape time of a single point under `z ← z² + c` from `z₀ = 0`.
///
/// Returns the 1-based index of the first iteration at which `|z| > 2`
/// (tested as `|z|² > 4`), or `0` if the orbit stays bounded for the whole
/// budget — interior points read as "never escaped".
///
/// Points inside the main cardioid or the period-2 bulb are known interior
/// and short-circuit to `0` without iterating.
#[inline]
pub fn escape_time(c: Complex, max_iterations: u32) -> u32 {
    if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
        return 0;
    }

    let mut z = Complex::ZERO;
    for i in 0..max_iterations {
        // z = z² + c
        z = Complex::new(z.re * z.re - z.im * z.im + c.re, 2.0 * z.re * z.im + c.im);
        if z.norm_sq() > 4.0 {
            return i + 1;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_ITER: u32 = 100;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_time(Complex::ZERO, MAX_ITER), 0);
    }

    #[test]
    fn far_point_escapes_on_first_iteration() {
        // c = 2 + 2i: z₁ = c, |z₁|² = 8 > 4 → escape value 1.
        assert_eq!(escape_time(Complex::new(2.0, 2.0), MAX_ITER), 1);
    }

    #[test]
    fn known_escape_count() {
        // c = 1: z₁ = 1, z₂ = 2 (|z|² = 4, not > 4), z₃ = 5 → escape value 3.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), MAX_ITER), 3);
    }

    #[test]
    fn period_two_orbit_is_interior() {
        // c = -1 gives the orbit 0 → -1 → 0 → -1 … (period 2).
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), MAX_ITER), 0);
    }

    #[test]
    fn cardioid_cusp_is_interior() {
        assert_eq!(escape_time(Complex::new(0.24, 0.0), MAX_ITER), 0);
    }

    #[test]
    fn positive_real_axis_escapes() {
        assert!(escape_time(Complex::new(0.5, 0.0), MAX_ITER) > 0);
    }

    #[test]
    fn values_bounded_by_budget() {
        for &(re, im) in &[(0.3, 0.5), (-0.75, 0.1), (-2.0, 0.0), (1.0, 1.0)] {
            let v = escape_time(Complex::new(re, im), MAX_ITER);
            assert!(v <= MAX_ITER, "escape value {v} exceeds budget");
        }
    }

    #[test]
    fn deterministic_results() {
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(-0.75, 0.1),
            Complex::new(0.3, 0.5),
            Complex::new(-2.0, 0.0),
            Complex::new(1.0, 1.0),
        ];
        let run1: Vec<_> = points.iter().map(|&c| escape_time(c, MAX_ITER)).collect();
        let run2: Vec<_> = points.iter().map(|&c| escape_time(c, MAX_ITER)).collect();
        assert_eq!(run1, run2, "iteration results must be deterministic");
    }
}
