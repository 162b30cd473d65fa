//! Spectral analysis integration tests
//!
//! FFT size contract, bin placement of pure tones and the spectrum of a full
//! engine cycle.

mod common;

use std::f64::consts::PI;

use gridscope_core::fft::{magnitude_spectrum, transform};
use gridscope_core::{Phase, SensorKind, SensorParameters, SimulationError};
use num_complex::Complex64;

use common::{clean_waveform, complete, seeded_engine, sine_points};

#[test]
fn test_power_of_two_lengths_accepted() {
    for exp in 0..=7 {
        let n = 1usize << exp;
        let samples = vec![Complex64::new(1.0, 0.0); n];
        let out = transform(&samples).unwrap();
        assert_eq!(out.len(), n);

        // Constant input puts everything in DC.
        assert_within_tolerance!(out[0].re, n as f64, 1e-9);
        for x in &out[1..] {
            assert!(x.norm() < 1e-9, "leak into non-DC bin for n={n}: {x}");
        }
    }
}

#[test]
fn test_other_lengths_rejected() {
    for n in [0usize, 3, 5, 6, 100, 127] {
        let samples = vec![Complex64::new(0.0, 0.0); n];
        assert_eq!(
            transform(&samples),
            Err(SimulationError::InvalidInput { length: n }),
            "length {n}"
        );
    }
}

#[test]
fn test_impulse_is_flat() {
    let mut samples = vec![Complex64::new(0.0, 0.0); 32];
    samples[0] = Complex64::new(1.0, 0.0);

    for x in transform(&samples).unwrap() {
        assert_complex_near!(x, Complex64::new(1.0, 0.0), 1e-12);
    }
}

#[test]
fn test_exact_bin_tone_peaks_at_its_bin() {
    // 1000 Hz / 128 = 7.8125 Hz per bin; 8 bins is exactly 62.5 Hz.
    let points = sine_points(3.0, 62.5, 1000.0, 128);
    let spectrum = magnitude_spectrum(&points, 1000.0).unwrap();

    let (index, peak) = spectrum.peak().unwrap();
    assert_eq!(index, 8);
    assert_within_tolerance!(peak.frequency, 62.5, 1e-12);
    assert_within_tolerance!(peak.magnitude, 3.0, 1e-9);

    for (k, bin) in spectrum.bins().iter().enumerate() {
        if k != 8 {
            assert!(bin.magnitude < 1e-9, "bin {k} = {}", bin.magnitude);
        }
    }
}

#[test]
fn test_single_sided_layout() {
    let points = sine_points(1.0, 50.0, 2000.0, 64);
    let spectrum = magnitude_spectrum(&points, 2000.0).unwrap();

    assert_eq!(spectrum.len(), 32);
    assert_within_tolerance!(spectrum.resolution_hz(), 31.25, 1e-12);
    for (k, bin) in spectrum.bins().iter().enumerate() {
        assert_within_tolerance!(bin.frequency, k as f64 * 31.25, 1e-9);
    }
}

#[test]
fn test_nominal_voltage_spectrum() {
    let waveform = clean_waveform(SensorKind::Voltage, &SensorParameters::default());
    let phase_r = waveform.phase(Phase::R);

    assert_eq!(phase_r[0].amplitude, 0.0);

    let spectrum = magnitude_spectrum(phase_r, 1000.0).unwrap();
    let (index, peak) = spectrum.peak().unwrap();

    // 50 Hz falls between bins 6 (46.875 Hz) and 7 (54.6875 Hz).
    assert_eq!(index, 6);
    assert_within_tolerance!(peak.frequency, 46.875, 1e-12);

    let amplitude = 220.0 * 2.0_f64.sqrt();
    assert!(
        peak.magnitude > 0.5 * amplitude && peak.magnitude < 1.05 * amplitude,
        "peak magnitude {} out of range for amplitude {}",
        peak.magnitude,
        amplitude
    );
}

#[test]
fn test_harmonic_injection_raises_thd() {
    let clean = clean_waveform(SensorKind::Voltage, &SensorParameters::default());
    let distorted = clean_waveform(
        SensorKind::Voltage,
        &SensorParameters {
            harmonic_magnitude: 1.0,
            ..SensorParameters::default()
        },
    );

    let thd = |waveform: &gridscope_core::Waveform| {
        magnitude_spectrum(waveform.phase(Phase::R), 1000.0)
            .unwrap()
            .total_harmonic_distortion(50.0)
            .unwrap()
    };

    assert!(thd(&distorted) > thd(&clean));
}

#[test]
fn test_engine_spectra_follow_phase_r() {
    let snapshot = complete(&seeded_engine());

    for report in &snapshot.sensors {
        let expected = magnitude_spectrum(report.waveform.phase(Phase::R), 1000.0).unwrap();
        assert_eq!(report.spectrum, expected, "{}", report.kind.name());
    }
}

#[test]
fn test_transform_matches_direct_dft_on_chirp() {
    let n = 16;
    let samples: Vec<Complex64> = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            Complex64::new((2.0 * PI * 3.0 * t * t).cos(), 0.25 * t)
        })
        .collect();

    let fast = transform(&samples).unwrap();
    for (k, x) in fast.iter().enumerate() {
        let direct: Complex64 = samples
            .iter()
            .enumerate()
            .map(|(j, s)| s * Complex64::from_polar(1.0, -2.0 * PI * (j * k) as f64 / n as f64))
            .sum();
        assert_complex_near!(*x, direct, 1e-9);
    }
}
