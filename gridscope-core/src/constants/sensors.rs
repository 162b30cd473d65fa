//! Sensor Physical Constants
//!
//! Time constants, transport delays and calibration values for each sensor
//! model. These are properties of the hardware, not user parameters, so they
//! never appear in `SensorParameters`.

// ===== CURRENT SENSOR (Hall-effect, analog output) =====

/// Output bias of the current sensor at zero current (V).
///
/// Mid-scale of a 5 V single-supply output stage.
pub const CURRENT_BIAS_V: f64 = 2.5;

/// First-order response time constant of the current sensor (s).
///
/// Source: ACS712-class datasheets (~5 µs rise time)
pub const CURRENT_TIME_CONSTANT_S: f64 = 4.375e-6;

// ===== ZERO-CROSSING DETECTOR =====

/// Transport delay of the zero-crossing detector (s).
///
/// Optocoupler plus debounce filter.
pub const ZERO_CROSSING_DELAY_S: f64 = 0.01;

/// Peak-to-peak scale of the digital jitter at full noise level.
pub const ZERO_CROSSING_JITTER_SCALE: f64 = 0.2;

// ===== POWER QUALITY ANALYZER =====

/// Transport delay of the power quality analyzer (s).
///
/// One 100 ms aggregation window (IEC 61000-4-30, 10 cycles at 50 Hz).
pub const POWER_QUALITY_DELAY_S: f64 = 0.1;

// ===== MAGNETIC FIELD (Hall) SENSOR =====

/// First-order response time constant of the Hall field sensor (s).
pub const HALL_TIME_CONSTANT_S: f64 = 7.9e-6;

/// Quiescent output of the Hall sensor with no field (V).
pub const HALL_OFFSET_V: f64 = 2.5;

/// Hall sensor sensitivity (V per field unit).
///
/// Source: ACS712-05B (185 mV/A)
pub const HALL_SENSITIVITY_V: f64 = 0.185;
