//! Discrete-time stability of the delay-dominated loop
//!
//! ## Mapping
//!
//! A delay of `Td` sampled every `Ts` becomes a chain of `d` unit delays:
//!
//! ```text
//! d   = max(1, floor(Td / Ts))
//! r   = |K|^(1/d)
//! θ_k = (π + 2πk) / d                 k = 0..d
//! p_k = r · e^{iθ_k}
//! ```
//!
//! The poles sit evenly on a circle of radius `r`, the first one on the
//! negative real axis. The zero is the continuous Padé zero `2/Td` warped by
//! a direct exponential, `z = e^{(2/Td)·Ts}`, not a bilinear transform.

use core::f64::consts::PI;

use num_complex::Complex64;

use super::{partition_roots, Domain, PoleZeroMap, Viewport};
use crate::config::ControlConstants;
use crate::constants::control::{MAX_DELAY_ORDER, UNIT_CIRCLE_STEP_DEG, Z_VIEW_MARGIN, Z_VIEW_MIN_EXTENT};

/// Number of sampling periods in the loop delay, at least 1
///
/// A non-finite ratio (zero or negative period) degrades to 1. Orders above
/// `MAX_DELAY_ORDER` are capped.
pub fn delay_order(delay_s: f64, sampling_period_s: f64) -> usize {
    let ratio = (delay_s / sampling_period_s).floor();
    if !ratio.is_finite() || ratio < 1.0 {
        return 1;
    }
    if ratio > MAX_DELAY_ORDER as f64 {
        log_warn!(
            "z-domain: delay order {} capped at {}",
            ratio, MAX_DELAY_ORDER
        );
        return MAX_DELAY_ORDER;
    }
    ratio as usize
}

/// Points of the unit circle from 0° to 360° inclusive
pub fn unit_circle() -> Vec<Complex64> {
    (0..=360)
        .step_by(UNIT_CIRCLE_STEP_DEG)
        .map(|deg| Complex64::from_polar(1.0, (deg as f64).to_radians()))
        .collect()
}

/// Z-plane pole/zero map for `loop_gain`
///
/// `loop_gain` is the voltage sensor's amplitude scale, unscaled.
pub fn z_domain_map(loop_gain: f64, constants: &ControlConstants) -> PoleZeroMap {
    let d = delay_order(constants.delay_s, constants.sampling_period_s);
    let radius = loop_gain.abs().powf(1.0 / d as f64);

    let raw_poles = (0..d).map(|k| {
        let theta = (PI + 2.0 * PI * k as f64) / d as f64;
        Complex64::from_polar(radius, theta)
    });
    let zero = Complex64::new(
        ((2.0 / constants.delay_s) * constants.sampling_period_s).exp(),
        0.0,
    );

    let (poles, singular_poles) = partition_roots(raw_poles);
    let (zeros, singular_zeros) = partition_roots([zero]);
    let singular_roots = singular_poles + singular_zeros;
    if singular_roots > 0 {
        log_warn!("z-domain: {} singular root(s) dropped", singular_roots);
    }

    let extent = poles
        .iter()
        .chain(&zeros)
        .map(|root| root.norm() + Z_VIEW_MARGIN)
        .fold(Z_VIEW_MIN_EXTENT, f64::max);

    PoleZeroMap {
        domain: Domain::Z,
        poles,
        zeros,
        singular_roots,
        viewport: Viewport::clamped(-extent, extent, -extent, extent),
        unit_circle: unit_circle(),
    }
}
