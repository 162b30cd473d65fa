//! Error Types for the Simulation Core
//!
//! ## Design Philosophy
//!
//! Almost nothing in this crate can fail. Signal synthesis accepts any finite
//! input, and the stability analyzers absorb numeric degeneracy locally
//! (singular roots are dropped, broken axis ranges are repaired). What remains
//! are two caller mistakes:
//!
//! 1. **Bad FFT input**: a sequence whose length is not a power of two.
//! 2. **Bad configuration**: a sample count, rate or control constant that
//!    would lead to (1) or to meaningless output.
//!
//! Errors stay small and `Copy`, with `&'static str` reasons only, so they can
//! be returned from worker threads and compared in tests without allocation.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use gridscope_core::{fft, SimulationError};
//! use num_complex::Complex64;
//!
//! let samples = vec![Complex64::new(1.0, 0.0); 100];
//! match fft::transform(&samples) {
//!     Ok(_) => unreachable!("100 is not a power of two"),
//!     Err(SimulationError::InvalidInput { length }) => assert_eq!(length, 100),
//!     Err(other) => panic!("unexpected error: {other}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Simulation errors - kept small and copyable
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    /// FFT input length is not a power of two
    #[error("Invalid input: FFT length {length} is not a power of two")]
    InvalidInput {
        /// Length of the rejected sample sequence
        length: usize,
    },

    /// Configuration rejected before any computation ran
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration
        reason: &'static str,
    },
}
