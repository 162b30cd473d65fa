//! Simulation configuration
//!
//! Everything that is constant for the lifetime of an engine: the sampling
//! setup and the control-loop constants. Defaults come from `constants`.
//!
//! Validation happens once, when an engine is built, so the FFT never sees a
//! bad length at run time.
//!
//! ```rust
//! use gridscope_core::SimulationConfig;
//!
//! let config = SimulationConfig::default().with_sample_count(256);
//! assert!(config.validate().is_ok());
//!
//! let bad = SimulationConfig::default().with_sample_count(100);
//! assert!(bad.validate().is_err());
//! ```

use crate::constants::control::{
    LOOP_DELAY_S, LOOP_TIME_CONSTANT_S, SAMPLING_PERIOD_S, S_DOMAIN_GAIN_MULTIPLIER,
};
use crate::constants::grid::{FUNDAMENTAL_HZ, SAMPLE_COUNT, SAMPLE_RATE_HZ};
use crate::errors::{SimulationError, SimulationResult};

/// Constants of the regulation loop analyzed by the stability maps
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlConstants {
    /// Loop transport delay `Td` (s)
    pub delay_s: f64,
    /// First-order lag time constant `τ` (s)
    pub time_constant_s: f64,
    /// Discrete controller sampling period `Ts` (s)
    pub sampling_period_s: f64,
    /// Voltage amplitude scale → continuous loop gain
    pub s_gain_multiplier: f64,
}

impl Default for ControlConstants {
    fn default() -> Self {
        Self {
            delay_s: LOOP_DELAY_S,
            time_constant_s: LOOP_TIME_CONSTANT_S,
            sampling_period_s: SAMPLING_PERIOD_S,
            s_gain_multiplier: S_DOMAIN_GAIN_MULTIPLIER,
        }
    }
}

/// Engine-wide simulation settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Sampling rate of every waveform (Hz)
    pub sample_rate_hz: f64,
    /// Samples per phase; must be a power of two, at least 2
    pub sample_count: usize,
    /// Nominal grid frequency (Hz)
    pub fundamental_hz: f64,
    /// Regulation loop analyzed by the stability maps
    pub control: ControlConstants,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: SAMPLE_RATE_HZ,
            sample_count: SAMPLE_COUNT,
            fundamental_hz: FUNDAMENTAL_HZ,
            control: ControlConstants::default(),
        }
    }
}

impl SimulationConfig {
    /// Set the sampling rate (Hz)
    pub fn with_sample_rate(mut self, sample_rate_hz: f64) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Set the samples per phase
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Set the nominal grid frequency (Hz)
    pub fn with_fundamental(mut self, fundamental_hz: f64) -> Self {
        self.fundamental_hz = fundamental_hz;
        self
    }

    /// Replace the control-loop constants
    pub fn with_control(mut self, control: ControlConstants) -> Self {
        self.control = control;
        self
    }

    /// Reject settings that would make the engine fail or produce nonsense
    ///
    /// Control constants only need to be finite: zero or negative values are
    /// legal and show up as singular roots in the stability maps.
    pub fn validate(&self) -> SimulationResult<()> {
        if !self.sample_count.is_power_of_two() || self.sample_count < 2 {
            return Err(SimulationError::InvalidConfig {
                reason: "sample count must be a power of two of at least 2",
            });
        }
        if !(self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0) {
            return Err(SimulationError::InvalidConfig {
                reason: "sample rate must be positive and finite",
            });
        }
        if !(self.fundamental_hz.is_finite() && self.fundamental_hz > 0.0) {
            return Err(SimulationError::InvalidConfig {
                reason: "fundamental frequency must be positive and finite",
            });
        }

        let control = &self.control;
        let all_finite = [
            control.delay_s,
            control.time_constant_s,
            control.sampling_period_s,
            control.s_gain_multiplier,
        ]
        .iter()
        .all(|value| value.is_finite());
        if !all_finite {
            return Err(SimulationError::InvalidConfig {
                reason: "control constants must be finite",
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration document
    ///
    /// Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> SimulationResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|_err| {
            log_warn!("rejected configuration document: {}", _err);
            SimulationError::InvalidConfig {
                reason: "malformed configuration document",
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    #[cfg(feature = "serde")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> SimulationResult<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|_err| {
            log_warn!("cannot read {}: {}", path.as_ref().display(), _err);
            SimulationError::InvalidConfig {
                reason: "configuration file unreadable",
            }
        })?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> SimulationResult<String> {
        serde_json::to_string_pretty(self).map_err(|_err| {
            log_warn!("cannot serialize configuration: {}", _err);
            SimulationError::InvalidConfig {
                reason: "configuration not serializable",
            }
        })
    }
}
