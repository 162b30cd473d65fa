//! Power quality analyzer: delayed voltage with third-harmonic distortion
//!
//! The analyzer reports after one aggregation window, so its view of the
//! fundamental is delayed. The distortion term is injected on the undelayed
//! time axis and does not rotate with the phase shift.

use super::{RawSample, SensorParameters};
use crate::constants::sensors::POWER_QUALITY_DELAY_S;
use crate::noise::NoiseSource;

pub(super) fn synthesize(
    params: &SensorParameters,
    omega: f64,
    t: f64,
    phase_offset: f64,
    _noise: &mut dyn NoiseSource,
) -> RawSample {
    let amp = params.peak_voltage();
    let tp = t - POWER_QUALITY_DELAY_S;

    let base = if tp < 0.0 {
        0.0
    } else {
        amp * (omega * tp + phase_offset + params.phase_shift).sin()
    };
    let distortion = params.distortion_level * 0.3 * amp * (3.0 * omega * t + phase_offset).sin();

    RawSample::with_tail(base + distortion, amp)
}
