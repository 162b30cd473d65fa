//! Continuous-time stability via first-order Padé approximation
//!
//! ## Loop Model
//!
//! ```text
//! G(s) = K · e^{-s·Td} / (1 + s·τ)
//!
//! e^{-s·Td} ≈ (1 - s·Td/2) / (1 + s·Td/2)        first-order Padé
//! ```
//!
//! Closing the loop and clearing denominators gives the characteristic
//! quadratic `a·s² + b·s + c = 0` with
//!
//! ```text
//! a = τ·Td / 2
//! b = τ + Td/2 - K·Td/2
//! c = 1 + K
//! ```
//!
//! The single zero comes from the Padé numerator: `s = 2 / Td`.
//!
//! The discriminant `b² - 4ac` is a polynomial in `K`, so the poles move
//! continuously: as it crosses zero a complex pair meets on the real axis and
//! splits into two real poles.

use num_complex::Complex64;

use super::{partition_roots, Domain, PoleZeroMap, Viewport};
use crate::config::ControlConstants;
use crate::constants::control::{S_VIEW_MARGIN, S_VIEW_MAX_REAL, S_VIEW_MIN_IMAG, S_VIEW_MIN_REAL};

/// Characteristic polynomial `a·s² + b·s + c` of the closed loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicQuadratic {
    /// `s²` coefficient, `τ·Td/2`
    pub a: f64,
    /// `s` coefficient, `τ + Td/2 - K·Td/2`
    pub b: f64,
    /// Constant term, `1 + K`
    pub c: f64,
}

impl CharacteristicQuadratic {
    /// Closed-loop polynomial for `loop_gain` under `constants`
    pub fn for_loop(loop_gain: f64, constants: &ControlConstants) -> Self {
        let tau = constants.time_constant_s;
        let td = constants.delay_s;
        Self {
            a: 0.5 * tau * td,
            b: tau + 0.5 * td - 0.5 * loop_gain * td,
            c: 1.0 + loop_gain,
        }
    }

    /// `b² - 4ac`
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    /// Both roots; the first has the `+√` branch (or positive imaginary part
    /// when `a > 0`)
    pub fn roots(&self) -> [Complex64; 2] {
        let det = self.discriminant();
        let two_a = 2.0 * self.a;

        if det >= 0.0 {
            let root = det.sqrt();
            [
                Complex64::new((-self.b + root) / two_a, 0.0),
                Complex64::new((-self.b - root) / two_a, 0.0),
            ]
        } else {
            let re = -self.b / two_a;
            let im = (-det).sqrt() / two_a;
            [Complex64::new(re, im), Complex64::new(re, -im)]
        }
    }
}

/// S-plane pole/zero map of the Padé-approximated loop
///
/// `loop_gain` is the continuous loop gain `K` (the engine passes the voltage
/// sensor's amplitude scale times `S_DOMAIN_GAIN_MULTIPLIER`).
pub fn s_domain_map(loop_gain: f64, constants: &ControlConstants) -> PoleZeroMap {
    let quadratic = CharacteristicQuadratic::for_loop(loop_gain, constants);
    let [p1, p2] = quadratic.roots();
    let zero = Complex64::new(2.0 / constants.delay_s, 0.0);

    let (poles, singular_poles) = partition_roots([p1, p2]);
    let (zeros, singular_zeros) = partition_roots([zero]);
    let singular_roots = singular_poles + singular_zeros;
    if singular_roots > 0 {
        log_warn!(
            "s-domain: {} singular root(s) dropped (a={}, b={}, c={})",
            singular_roots, quadratic.a, quadratic.b, quadratic.c
        );
    }

    let lowest_pole = poles.iter().map(|p| p.re).fold(f64::INFINITY, f64::min);
    let min_real = S_VIEW_MIN_REAL.min(lowest_pole - S_VIEW_MARGIN);
    let max_real = zeros
        .iter()
        .map(|z| z.re + S_VIEW_MARGIN)
        .fold(S_VIEW_MAX_REAL, f64::max);
    let imag_bound = poles
        .first()
        .map(|p| p.im.abs() + S_VIEW_MARGIN)
        .map_or(S_VIEW_MIN_IMAG, |bound| bound.max(S_VIEW_MIN_IMAG));

    PoleZeroMap {
        domain: Domain::S,
        poles,
        zeros,
        singular_roots,
        viewport: Viewport::clamped(min_real, max_real, -imag_bound, imag_bound),
        unit_circle: Vec::new(),
    }
}
