//! Magnetic field probe: Hall element biased at mid-supply

use super::current::first_order_response;
use super::{RawSample, SensorParameters};
use crate::constants::grid::NOMINAL_CURRENT_A;
use crate::constants::sensors::{HALL_OFFSET_V, HALL_SENSITIVITY_V, HALL_TIME_CONSTANT_S};
use crate::noise::NoiseSource;

/// Field units per ampere of line current at the probe position
const COUPLING: f64 = 0.1;

pub(super) fn synthesize(
    params: &SensorParameters,
    omega: f64,
    t: f64,
    phase_offset: f64,
    _noise: &mut dyn NoiseSource,
) -> RawSample {
    // Only the phase lag of the element's response is modeled.
    let (_, lag) = first_order_response(omega, HALL_TIME_CONSTANT_S);

    let field = NOMINAL_CURRENT_A
        * params.magnetic_field_strength
        * COUPLING
        * (omega * t + phase_offset + params.phase_shift + lag).sin();

    RawSample::with_tail(HALL_OFFSET_V + field * HALL_SENSITIVITY_V, 1.0)
}
