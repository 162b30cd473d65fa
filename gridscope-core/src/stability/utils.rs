//! Axis range repair shared by the stability maps
//!
//! Viewport bounds are derived from computed roots, so they inherit every
//! numeric accident upstream. This module turns any pair of floats into a
//! usable axis range:
//!
//! ```text
//! NaN / ±inf in either bound  → DEFAULT_AXIS_RANGE (-1, 1)
//! min > max                   → swapped
//! max - min < MIN_AXIS_SPAN   → midpoint ± DEGENERATE_AXIS_SPAN / 2
//! ```

use crate::constants::control::{DEFAULT_AXIS_RANGE, DEGENERATE_AXIS_SPAN, MIN_AXIS_SPAN};

/// Repair an axis range so it is finite, ordered and has non-zero span
pub fn clamp_axis_range(min: f64, max: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() {
        log_warn!("non-finite axis range [{}, {}], using default", min, max);
        return DEFAULT_AXIS_RANGE;
    }

    let (min, max) = if min > max { (max, min) } else { (min, max) };

    if max - min < MIN_AXIS_SPAN {
        let mid = min + (max - min) / 2.0;
        let half = DEGENERATE_AXIS_SPAN / 2.0;
        return (mid - half, mid + half);
    }

    (min, max)
}
