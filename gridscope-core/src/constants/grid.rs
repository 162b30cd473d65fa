//! Grid and Sampling Constants
//!
//! Nominal values for a low-voltage three-phase distribution grid and the
//! sampling setup used to digitize it.

use core::f64::consts::PI;

// ===== SAMPLING =====

/// Default sampling rate (Hz).
///
/// 1 kHz gives 20 samples per 50 Hz cycle and a Nyquist limit of 500 Hz,
/// enough to see harmonics up to the 9th.
pub const SAMPLE_RATE_HZ: f64 = 1000.0;

/// Default number of samples per waveform phase.
///
/// Must be a power of two (radix-2 FFT). 128 samples cover 0.128 s, i.e.
/// 6.4 cycles of the fundamental.
pub const SAMPLE_COUNT: usize = 128;

/// Nominal grid frequency (Hz).
///
/// Source: IEC 60038 (50 Hz systems)
pub const FUNDAMENTAL_HZ: f64 = 50.0;

// ===== NOMINAL QUANTITIES =====

/// Nominal phase-to-neutral RMS voltage (V).
///
/// Source: IEC 60038 (230 V nominal, 220 V legacy systems)
pub const NOMINAL_PHASE_VOLTAGE_V: f64 = 220.0;

/// Nominal RMS line current (A) seen by the current and Hall sensors.
pub const NOMINAL_CURRENT_A: f64 = 10.0;

// ===== PHASE LAYOUT =====

/// Number of phases (R, S, T).
pub const PHASE_COUNT: usize = 3;

/// Structural offset between adjacent phases (rad), 120°.
pub const PHASE_SEPARATION_RAD: f64 = 2.0 * PI / PHASE_COUNT as f64;
