//! Closed-Loop Stability Maps
//!
//! ## Overview
//!
//! The voltage regulation loop is a first-order lag followed by a pure
//! transport delay. Its stability is shown as a pole/zero map in two domains:
//!
//! ```text
//! S-plane (continuous)            Z-plane (sampled)
//!
//!   Im                              Im
//!    │   stable │ unstable           │   ╭───╮
//!    │   x      │                    │  │ x   │  unit circle
//! ───┼──────────┼──── Re        ─────┼──┼──o──┼──── Re
//!    │   x      │  o                 │  │     │
//!    │          │                    │   ╰───╯
//!   Re < 0 is stable               |z| < 1 is stable
//! ```
//!
//! - `s_domain`: Padé-approximated delay, characteristic quadratic
//! - `z_domain`: delay chain folded through the sampling grid
//!
//! ## Numeric Degeneracy
//!
//! Neither analyzer returns an error. Roots that come out non-finite (for
//! example a zero time constant makes the quadratic degenerate) are counted
//! in `singular_roots` and left out of the plotted set. The suggested viewport
//! always passes through `utils::clamp_axis_range`, which repairs NaN,
//! inverted and collapsed ranges.

pub mod s_domain;
pub mod utils;
pub mod z_domain;

pub use s_domain::{s_domain_map, CharacteristicQuadratic};
pub use utils::clamp_axis_range;
pub use z_domain::{delay_order, unit_circle, z_domain_map};

use num_complex::Complex64;

/// Domain of a pole/zero map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    /// Continuous-time Laplace domain
    S,
    /// Discrete-time sampled domain
    Z,
}

/// Suggested axis bounds for plotting a map
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Left edge of the real axis
    pub min_real: f64,
    /// Right edge of the real axis
    pub max_real: f64,
    /// Bottom edge of the imaginary axis
    pub min_imag: f64,
    /// Top edge of the imaginary axis
    pub max_imag: f64,
}

impl Viewport {
    /// Viewport with both axis ranges passed through `clamp_axis_range`
    pub fn clamped(min_real: f64, max_real: f64, min_imag: f64, max_imag: f64) -> Self {
        let (min_real, max_real) = clamp_axis_range(min_real, max_real);
        let (min_imag, max_imag) = clamp_axis_range(min_imag, max_imag);
        Self {
            min_real,
            max_real,
            min_imag,
            max_imag,
        }
    }

    /// Whether `point` lies inside the viewport (edges included)
    pub fn contains(&self, point: Complex64) -> bool {
        (self.min_real..=self.max_real).contains(&point.re)
            && (self.min_imag..=self.max_imag).contains(&point.im)
    }
}

/// Poles and zeros of the loop in one domain
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoleZeroMap {
    /// S or Z plane
    pub domain: Domain,
    /// Finite poles
    pub poles: Vec<Complex64>,
    /// Finite zeros
    pub zeros: Vec<Complex64>,
    /// Poles and zeros dropped because they were non-finite
    pub singular_roots: usize,
    /// Suggested plot bounds, always finite and non-empty
    pub viewport: Viewport,
    /// Stability boundary for Z maps, empty for S maps
    pub unit_circle: Vec<Complex64>,
}

impl PoleZeroMap {
    /// Whether every pole lies in the stable region of its domain
    ///
    /// A map that lost roots to numeric degeneracy is never reported stable.
    pub fn is_stable(&self) -> bool {
        if self.singular_roots > 0 {
            return false;
        }
        match self.domain {
            Domain::S => self.poles.iter().all(|p| p.re < 0.0),
            Domain::Z => self.poles.iter().all(|p| p.norm() < 1.0),
        }
    }
}

/// Split roots into finite ones and a count of singular ones
pub(crate) fn partition_roots(
    roots: impl IntoIterator<Item = Complex64>,
) -> (Vec<Complex64>, usize) {
    let mut finite = Vec::new();
    let mut singular = 0;
    for root in roots {
        if root.re.is_finite() && root.im.is_finite() {
            finite.push(root);
        } else {
            singular += 1;
        }
    }
    (finite, singular)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_drops_non_finite_roots() {
        let (finite, singular) = partition_roots([
            Complex64::new(-1.0, 0.0),
            Complex64::new(f64::NAN, 0.0),
            Complex64::new(2.0, f64::INFINITY),
        ]);
        assert_eq!(finite, vec![Complex64::new(-1.0, 0.0)]);
        assert_eq!(singular, 2);
    }

    #[test]
    fn clamped_viewport_repairs_axes() {
        let view = Viewport::clamped(3.0, -3.0, f64::NAN, 1.0);
        assert_eq!((view.min_real, view.max_real), (-3.0, 3.0));
        assert_eq!((view.min_imag, view.max_imag), (-1.0, 1.0));
        assert!(view.contains(Complex64::new(0.0, 0.0)));
        assert!(!view.contains(Complex64::new(4.0, 0.0)));
    }

    #[test]
    fn singular_map_is_not_stable() {
        let map = PoleZeroMap {
            domain: Domain::S,
            poles: vec![Complex64::new(-1.0, 0.0)],
            zeros: Vec::new(),
            singular_roots: 1,
            viewport: Viewport::clamped(-1.0, 1.0, -1.0, 1.0),
            unit_circle: Vec::new(),
        };
        assert!(!map.is_stable());
    }
}
