//! Common test utilities for GridScope integration tests
//!
//! Fixtures for engines and waveforms, plus numeric assertion macros.

#![allow(dead_code)]

use std::f64::consts::PI;

use gridscope_core::{
    GridEngine, GridSnapshot, NoisePolicy, SensorKind, SensorParameters, SimulationConfig,
    Waveform, WaveformPoint,
};
use gridscope_core::noise::FixedNoise;
use gridscope_core::sensors;

/// Seed used wherever a test needs reproducible noise
pub const TEST_SEED: u64 = 0x5eed_0001;

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        let diff = (actual - expected).abs();
        if !(diff <= $tolerance) {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                actual, $tolerance, expected, diff
            );
        }
    }};
}

#[macro_export]
macro_rules! assert_complex_near {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let actual = $actual;
        let expected = $expected;
        let diff = (actual - expected).norm();
        if !(diff <= $tolerance) {
            panic!(
                "Complex {} not within {} of expected {} (|diff|: {})",
                actual, $tolerance, expected, diff
            );
        }
    }};
}

/// Engine on the default configuration with seeded noise
pub fn seeded_engine() -> GridEngine {
    GridEngine::new(SimulationConfig::default())
        .expect("default configuration is valid")
        .with_noise(NoisePolicy::Seeded(TEST_SEED))
}

/// Run a cycle that must not be superseded
pub fn complete(engine: &GridEngine) -> GridSnapshot {
    engine
        .recompute()
        .expect("validated configuration")
        .snapshot()
        .expect("no concurrent changes, cycle must complete")
}

/// Noise-free waveform of `kind` on the default sampling grid
pub fn clean_waveform(kind: SensorKind, params: &SensorParameters) -> Waveform {
    let config = SimulationConfig::default();
    sensors::waveform(
        kind,
        params,
        config.sample_count,
        config.sample_rate_hz,
        config.fundamental_hz,
        &mut FixedNoise::centered(),
    )
}

/// `count` samples of `amplitude · sin(2π·f·t)` at `sample_rate`
pub fn sine_points(amplitude: f64, frequency: f64, sample_rate: f64, count: usize) -> Vec<WaveformPoint> {
    (0..count)
        .map(|i| {
            let time = i as f64 / sample_rate;
            WaveformPoint {
                time,
                amplitude: amplitude * (2.0 * PI * frequency * time).sin(),
            }
        })
        .collect()
}
