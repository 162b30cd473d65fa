//! Voltage sensor: phase voltage through an ideal resistive divider

use super::{RawSample, SensorParameters};
use crate::noise::NoiseSource;

pub(super) fn synthesize(
    params: &SensorParameters,
    omega: f64,
    t: f64,
    phase_offset: f64,
    _noise: &mut dyn NoiseSource,
) -> RawSample {
    let amp = params.peak_voltage();
    let signal = amp * (omega * t + phase_offset + params.phase_shift).sin() + params.offset;
    RawSample::with_tail(signal, amp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FixedNoise;
    use core::f64::consts::PI;

    #[test]
    fn amplitude_scale_scales_peak() {
        let params = SensorParameters { amplitude_scale: 0.5, ..Default::default() };
        let raw = synthesize(&params, 2.0 * PI * 50.0, 0.005, 0.0, &mut FixedNoise::centered());

        let expected = 110.0 * 2.0_f64.sqrt();
        assert!((raw.signal - expected).abs() < 1e-9);
        assert_eq!(raw.reference_amplitude, Some(expected));
    }

    #[test]
    fn phase_shift_moves_the_sine() {
        let params = SensorParameters { phase_shift: PI / 2.0, ..Default::default() };
        let raw = synthesize(&params, 2.0 * PI * 50.0, 0.0, 0.0, &mut FixedNoise::centered());
        assert!((raw.signal - 220.0 * 2.0_f64.sqrt()).abs() < 1e-9);
    }
}
