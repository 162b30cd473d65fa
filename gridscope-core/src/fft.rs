//! Spectral Analysis
//!
//! ## Algorithm
//!
//! Recursive radix-2 decimation-in-time Cooley–Tukey:
//!
//! ```text
//! E = FFT(x[0], x[2], x[4], ...)
//! O = FFT(x[1], x[3], x[5], ...)
//! W = exp(-2πi·k/N)
//!
//! X[k]       = E[k] + W·O[k]
//! X[k + N/2] = E[k] - W·O[k]        for k in 0..N/2
//! ```
//!
//! Only power-of-two lengths are supported. The sample count is validated when
//! the simulation is configured, so the `InvalidInput` path is reached only
//! by direct callers.
//!
//! ## Magnitude Spectrum
//!
//! `magnitude_spectrum` treats a waveform phase as a real signal and reports
//! bins `0..N/2` (below Nyquist) with single-sided amplitude normalization
//! `2/N · |X[k]|`, so a full-scale sine of amplitude `A` at an exact bin
//! frequency reads `A`.

use core::f64::consts::PI;

use num_complex::Complex64;

use crate::errors::{SimulationError, SimulationResult};
use crate::sensors::WaveformPoint;

/// Discrete Fourier transform of `samples`
///
/// Fails with `InvalidInput` unless the length is a power of two. A single
/// sample is returned unchanged.
pub fn transform(samples: &[Complex64]) -> SimulationResult<Vec<Complex64>> {
    if !samples.len().is_power_of_two() {
        return Err(SimulationError::InvalidInput {
            length: samples.len(),
        });
    }
    Ok(radix2(samples))
}

fn radix2(samples: &[Complex64]) -> Vec<Complex64> {
    let n = samples.len();
    if n == 1 {
        return samples.to_vec();
    }

    let even: Vec<Complex64> = samples.iter().step_by(2).copied().collect();
    let odd: Vec<Complex64> = samples.iter().skip(1).step_by(2).copied().collect();
    let even = radix2(&even);
    let odd = radix2(&odd);

    let half = n / 2;
    let mut out = vec![Complex64::new(0.0, 0.0); n];
    for k in 0..half {
        let twiddle = Complex64::from_polar(1.0, -2.0 * PI * k as f64 / n as f64);
        let t = twiddle * odd[k];
        out[k] = even[k] + t;
        out[k + half] = even[k] - t;
    }
    out
}

/// One bin of a magnitude spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpectrumBin {
    /// Bin center frequency (Hz)
    pub frequency: f64,
    /// Single-sided amplitude
    pub magnitude: f64,
}

/// Single-sided magnitude spectrum, frequency ascending
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spectrum {
    bins: Vec<SpectrumBin>,
    /// Width of one bin (Hz)
    resolution_hz: f64,
}

impl Spectrum {
    /// Bins in ascending frequency order
    pub fn bins(&self) -> &[SpectrumBin] {
        &self.bins
    }

    /// Number of bins, `N/2`
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the spectrum has no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Frequency spacing between bins (Hz)
    pub fn resolution_hz(&self) -> f64 {
        self.resolution_hz
    }

    /// Index and bin with the largest magnitude (first one on ties)
    pub fn peak(&self) -> Option<(usize, SpectrumBin)> {
        self.bins
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, bin)| match best {
                Some((_, top)) if top.magnitude >= bin.magnitude => best,
                _ => Some((i, bin)),
            })
    }

    /// Index of the bin closest to `frequency`, if it lies below Nyquist
    pub fn bin_nearest(&self, frequency: f64) -> Option<usize> {
        if !(frequency.is_finite() && self.resolution_hz > 0.0) || frequency < 0.0 {
            return None;
        }
        let index = (frequency / self.resolution_hz).round() as usize;
        (index < self.bins.len()).then_some(index)
    }

    /// Total harmonic distortion relative to the bin nearest `fundamental_hz`
    ///
    /// Sums harmonics 2, 3, ... up to the last one below Nyquist. Each bin
    /// counts once, and a harmonic that rounds onto the fundamental's bin (or
    /// an earlier harmonic's) is skipped. Returns `None` if the fundamental
    /// falls outside the spectrum or has no energy.
    pub fn total_harmonic_distortion(&self, fundamental_hz: f64) -> Option<f64> {
        // Bin 0 is DC; its "harmonics" would never leave it.
        let index = self.bin_nearest(fundamental_hz).filter(|&i| i > 0)?;
        let fundamental = self.bins[index].magnitude;
        if !(fundamental.is_finite() && fundamental > 0.0) {
            return None;
        }

        // Harmonic bins never decrease, so tracking the last one dedups them.
        let mut last = index;
        let harmonic_power: f64 = (2..)
            .map(|h| self.bin_nearest(fundamental_hz * h as f64))
            .take_while(Option::is_some)
            .flatten()
            .filter(|&i| {
                let fresh = i > last;
                last = last.max(i);
                fresh
            })
            .map(|i| self.bins[i].magnitude.powi(2))
            .sum();

        Some(harmonic_power.sqrt() / fundamental)
    }
}

/// Magnitude spectrum of one waveform phase sampled at `sample_rate` (Hz)
pub fn magnitude_spectrum(
    phase: &[WaveformPoint],
    sample_rate: f64,
) -> SimulationResult<Spectrum> {
    let samples: Vec<Complex64> = phase
        .iter()
        .map(|point| Complex64::new(point.amplitude, 0.0))
        .collect();
    let transformed = transform(&samples)?;

    let n = transformed.len();
    let resolution_hz = sample_rate / n as f64;
    let scale = 2.0 / n as f64;

    let bins = transformed[..n / 2]
        .iter()
        .enumerate()
        .map(|(k, x)| SpectrumBin {
            frequency: k as f64 * resolution_hz,
            magnitude: scale * x.norm(),
        })
        .collect();

    Ok(Spectrum { bins, resolution_hz })
}
