//! Computational core for GridScope
//!
//! Simulates the sensors on a three-phase grid bus, analyzes their spectra and
//! maps the stability of the voltage regulation loop.
//!
//! Key pieces:
//! - `sensors`: per-sensor transfer-function models, three-phase waveforms
//! - `fft`: radix-2 FFT and single-sided magnitude spectra
//! - `stability`: S-domain (Padé) and Z-domain pole/zero maps
//! - `engine`: parameter ownership and last-request-wins recompute cycles
//!
//! ```no_run
//! use gridscope_core::{GridEngine, SimulationConfig, SensorKind, RecomputeOutcome};
//!
//! let engine = GridEngine::new(SimulationConfig::default())?;
//!
//! if let RecomputeOutcome::Completed(snapshot) = engine.recompute()? {
//!     let voltage = snapshot.sensor(SensorKind::Voltage);
//!     let (bin, peak) = voltage.spectrum.peak().unwrap();
//!     println!("peak at bin {bin}: {:.1} Hz", peak.frequency);
//!     println!("loop stable: {}", snapshot.s_domain.is_stable());
//! }
//! # Ok::<(), gridscope_core::SimulationError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod fft;
pub mod noise;
pub mod sensors;
pub mod stability;
pub mod worker;

// Public API
pub use config::{ControlConstants, SimulationConfig};
pub use engine::{
    GridEngine, GridSnapshot, ParameterChange, RecomputeOutcome, RecomputeRequest, SensorReport,
};
pub use errors::{SimulationError, SimulationResult};
pub use fft::{Spectrum, SpectrumBin};
pub use noise::{FixedNoise, NoisePolicy, NoiseSource, SeededNoise};
pub use sensors::{ParameterField, Phase, SensorKind, SensorParameters, Waveform, WaveformPoint};
pub use stability::{Domain, PoleZeroMap, Viewport};
pub use worker::RecomputeWorker;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
