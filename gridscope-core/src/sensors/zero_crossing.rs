//! Zero-crossing detector: delayed comparator with digital jitter
//!
//! The detector's output is binary, so it takes no harmonic injection. Noise
//! shows up as a small additive jitter on the logic level instead.

use super::{RawSample, SensorParameters};
use crate::constants::sensors::{ZERO_CROSSING_DELAY_S, ZERO_CROSSING_JITTER_SCALE};
use crate::noise::NoiseSource;

pub(super) fn synthesize(
    params: &SensorParameters,
    omega: f64,
    t: f64,
    phase_offset: f64,
    noise: &mut dyn NoiseSource,
) -> RawSample {
    let td = t - ZERO_CROSSING_DELAY_S;
    let sine = if td < 0.0 {
        0.0
    } else {
        (omega * td + phase_offset + params.phase_shift).sin()
    };

    let level = if sine > 0.0 { 1.0 } else { 0.0 };
    let jitter = params.noise_level * (noise.uniform() - 0.5) * ZERO_CROSSING_JITTER_SCALE;

    RawSample::finished(level + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::FixedNoise;
    use core::f64::consts::PI;

    const OMEGA: f64 = 2.0 * PI * 50.0;

    #[test]
    fn output_is_low_before_delay_elapses() {
        let params = SensorParameters::default();
        for i in 0..10 {
            let raw = synthesize(&params, OMEGA, i as f64 * 1e-3, 0.0, &mut FixedNoise::centered());
            assert_eq!(raw.signal, 0.0);
            assert_eq!(raw.reference_amplitude, None);
        }
    }

    #[test]
    fn output_follows_delayed_sine_sign() {
        let params = SensorParameters::default();
        // 5 ms after the delay: positive half-cycle
        let high = synthesize(&params, OMEGA, 0.015, 0.0, &mut FixedNoise::centered());
        // 15 ms after the delay: negative half-cycle
        let low = synthesize(&params, OMEGA, 0.025, 0.0, &mut FixedNoise::centered());

        assert_eq!(high.signal, 1.0);
        assert_eq!(low.signal, 0.0);
    }

    #[test]
    fn jitter_is_bounded_by_noise_level() {
        let params = SensorParameters { noise_level: 1.0, ..Default::default() };
        let raw = synthesize(&params, OMEGA, 0.015, 0.0, &mut FixedNoise::new(1.0));
        assert!((raw.signal - 1.1).abs() < 1e-12);
    }
}
