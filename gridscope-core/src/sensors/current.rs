//! Current sensor: Hall-effect transducer with a first-order response
//!
//! The sensor's bandwidth shows up as a gain drop and phase lag at the grid
//! frequency. With τ = 4.375 µs both are tiny at 50 Hz, but they grow with
//! frequency deviation and matter for the harmonic-rich cases.

use super::{RawSample, SensorParameters};
use crate::constants::grid::NOMINAL_CURRENT_A;
use crate::constants::sensors::{CURRENT_BIAS_V, CURRENT_TIME_CONSTANT_S};
use crate::noise::NoiseSource;

/// Output volts per peak ampere before lag attenuation
const OUTPUT_SCALE: f64 = 0.1;

pub(super) fn synthesize(
    params: &SensorParameters,
    omega: f64,
    t: f64,
    phase_offset: f64,
    _noise: &mut dyn NoiseSource,
) -> RawSample {
    let (gain, lag) = first_order_response(omega, CURRENT_TIME_CONSTANT_S);
    let peak_current = NOMINAL_CURRENT_A * 2.0_f64.sqrt() * params.amplitude_scale;

    let signal = CURRENT_BIAS_V
        + OUTPUT_SCALE * gain * peak_current
            * (omega * t + phase_offset + params.phase_shift + lag).sin()
        + params.offset;

    RawSample::with_tail(signal, 1.0)
}

/// Magnitude and phase of `1 / (1 + jωτ)`
pub(super) fn first_order_response(omega: f64, tau: f64) -> (f64, f64) {
    let wt = omega * tau;
    let gain = 1.0 / (1.0 + wt * wt).sqrt();
    (gain, -wt.atan())
}
