//! Constants for GridScope Core
//!
//! Every fixed number the simulation depends on lives here, with a short note
//! on what it models and where it comes from.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Grid**: Sampling setup and nominal electrical quantities
//! - **Sensors**: Per-sensor time constants, delays and calibration
//! - **Control**: Loop constants for the S-domain and Z-domain analyzers
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Use descriptive names that include units
//! 3. Keep synthesis scaling factors (0.1, 0.2, 0.05...) next to the sensor
//!    model that uses them, not here

/// Sampling setup and nominal grid quantities.
pub mod grid;

/// Per-sensor physical constants baked into the synthesis engine.
pub mod sensors;

/// Control-loop constants for the stability analyzers.
pub mod control;

// Re-export commonly used constants for convenience
pub use grid::{
    SAMPLE_RATE_HZ, SAMPLE_COUNT, FUNDAMENTAL_HZ,
    NOMINAL_PHASE_VOLTAGE_V, NOMINAL_CURRENT_A, PHASE_COUNT, PHASE_SEPARATION_RAD,
};

pub use control::{
    LOOP_DELAY_S, LOOP_TIME_CONSTANT_S, SAMPLING_PERIOD_S, S_DOMAIN_GAIN_MULTIPLIER,
};
