//! Control-Loop Constants
//!
//! The stability analyzers model the voltage regulation loop as a first-order
//! lag in series with a pure transport delay.

// ===== LOOP MODEL =====

/// Transport delay of the regulation loop (s).
pub const LOOP_DELAY_S: f64 = 0.1;

/// Time constant of the loop's first-order lag (s).
pub const LOOP_TIME_CONSTANT_S: f64 = 4.375e-6;

/// Sampling period of the discrete controller (s).
pub const SAMPLING_PERIOD_S: f64 = 0.1;

/// Multiplier from the voltage sensor's amplitude scale to the continuous
/// loop gain. The discrete mapper uses the amplitude scale unscaled.
pub const S_DOMAIN_GAIN_MULTIPLIER: f64 = 1.5;

// ===== DISCRETE MAPPER LIMITS =====

/// Upper bound on the discrete delay order `d`.
///
/// Keeps a pathological `Td / Ts` ratio from allocating an unbounded pole set.
pub const MAX_DELAY_ORDER: usize = 256;

/// Angular step of the reference unit circle (degrees).
pub const UNIT_CIRCLE_STEP_DEG: usize = 5;

// ===== VIEWPORT MARGINS =====

/// Minimum left edge of the S-plane viewport.
pub const S_VIEW_MIN_REAL: f64 = -50.0;

/// Minimum right edge of the S-plane viewport.
pub const S_VIEW_MAX_REAL: f64 = 25.0;

/// Minimum half-height of the S-plane viewport.
pub const S_VIEW_MIN_IMAG: f64 = 30.0;

/// Headroom added around S-plane roots.
pub const S_VIEW_MARGIN: f64 = 10.0;

/// Minimum half-extent of the Z-plane viewport.
pub const Z_VIEW_MIN_EXTENT: f64 = 1.5;

/// Headroom added around Z-plane roots.
pub const Z_VIEW_MARGIN: f64 = 0.5;

// ===== AXIS CLAMPING =====

/// Span below which an axis range is considered collapsed.
pub const MIN_AXIS_SPAN: f64 = 1e-9;

/// Span a collapsed axis range is widened to.
pub const DEGENERATE_AXIS_SPAN: f64 = 2.0;

/// Range substituted for a non-finite axis range.
pub const DEFAULT_AXIS_RANGE: (f64, f64) = (-1.0, 1.0);
