//! Grid Sensor Models and Signal Synthesis
//!
//! ## Overview
//!
//! Each sensor on the simulated three-phase bus turns the grid voltage or
//! current into an output signal through its own small transfer function:
//!
//! ```text
//! Sensor          Model                              Output
//! --------------  ---------------------------------  ---------------------
//! Voltage         ideal divider                      √2·220 V sine
//! Current         first-order lag (τ = 4.375 µs)     2.5 V-biased sine
//! ZeroCrossing    10 ms transport delay + comparator digital 0/1
//! PowerQuality    100 ms transport delay + 3rd harm. delayed sine
//! MagneticField   first-order lag (τ = 7.9 µs), Hall 2.5 V-biased sine
//! ```
//!
//! ## Common Tail
//!
//! After the sensor-specific model, every kind except `ZeroCrossing` gets the
//! same two terms, scaled by the model's reference amplitude `amp`:
//!
//! ```text
//! signal += harmonic_magnitude · 0.2 · amp · sin(3ωt)
//! signal += noise_level · (u - 0.5) · (amp ≠ 0 ? 0.05·amp : 0.5)
//! ```
//!
//! `amp` is √2·220·amplitude_scale for Voltage and PowerQuality and 1.0 for
//! Current and MagneticField, whose physical scaling is already folded into
//! their own models. The zero-crossing detector has its own jitter term and
//! no harmonic term.
//!
//! ## Phases
//!
//! A waveform holds phases R, S and T. All three use the same parameters;
//! phase `p` adds `p · 2π/3` to the sine argument.
//!
//! ## Usage Example
//!
//! ```rust
//! use gridscope_core::noise::FixedNoise;
//! use gridscope_core::sensors::{waveform, Phase, SensorKind, SensorParameters};
//!
//! let params = SensorParameters::default();
//! let mut noise = FixedNoise::centered();
//! let wave = waveform(SensorKind::Voltage, &params, 128, 1000.0, 50.0, &mut noise);
//!
//! assert_eq!(wave.phase(Phase::R).len(), 128);
//! assert_eq!(wave.phase(Phase::R)[0].amplitude, 0.0);
//! ```

mod current;
mod magnetic;
mod power_quality;
mod voltage;
mod zero_crossing;

use core::f64::consts::PI;

use crate::constants::grid::{NOMINAL_PHASE_VOLTAGE_V, PHASE_COUNT, PHASE_SEPARATION_RAD};
use crate::noise::NoiseSource;

/// The five sensors on the simulated bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorKind {
    /// Phase voltage through a resistive divider
    Voltage,
    /// Hall-effect current sensor with analog output
    Current,
    /// Optocoupled zero-crossing detector (digital output)
    ZeroCrossing,
    /// Power quality analyzer with a 100 ms aggregation window
    PowerQuality,
    /// Hall magnetic field probe
    MagneticField,
}

impl SensorKind {
    /// Every sensor, in engine order
    pub const ALL: [SensorKind; 5] = [
        SensorKind::Voltage,
        SensorKind::Current,
        SensorKind::ZeroCrossing,
        SensorKind::PowerQuality,
        SensorKind::MagneticField,
    ];

    /// Position in `SensorKind::ALL`
    pub fn index(self) -> usize {
        match self {
            SensorKind::Voltage => 0,
            SensorKind::Current => 1,
            SensorKind::ZeroCrossing => 2,
            SensorKind::PowerQuality => 3,
            SensorKind::MagneticField => 4,
        }
    }

    /// Lowercase name for logs and labels
    pub fn name(self) -> &'static str {
        match self {
            SensorKind::Voltage => "voltage",
            SensorKind::Current => "current",
            SensorKind::ZeroCrossing => "zero-crossing",
            SensorKind::PowerQuality => "power-quality",
            SensorKind::MagneticField => "magnetic-field",
        }
    }

    /// Synthesis function for this sensor
    ///
    /// Resolved once per waveform and reused for every sample.
    pub fn synthesizer(self) -> SynthesisFn {
        match self {
            SensorKind::Voltage => voltage::synthesize,
            SensorKind::Current => current::synthesize,
            SensorKind::ZeroCrossing => zero_crossing::synthesize,
            SensorKind::PowerQuality => power_quality::synthesize,
            SensorKind::MagneticField => magnetic::synthesize,
        }
    }
}

/// User-controlled parameters of one sensor
///
/// All values are normalized scalars. Ranges are enforced by whoever produces
/// parameter changes; synthesis accepts any finite value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorParameters {
    /// Amplitude ratio, nominal 1.0
    pub amplitude_scale: f64,
    /// Additive uniform noise level (0..1)
    pub noise_level: f64,
    /// Third-harmonic injection level (0..1)
    pub harmonic_magnitude: f64,
    /// Extra phase shift (rad)
    pub phase_shift: f64,
    /// Deviation from the fundamental frequency (Hz, signed)
    pub frequency_deviation: f64,
    /// DC/bias offset in the sensor's output unit
    pub offset: f64,
    /// Power quality distortion level (0..1)
    pub distortion_level: f64,
    /// Magnetic field strength ratio, nominal 1.0
    pub magnetic_field_strength: f64,
}

impl Default for SensorParameters {
    fn default() -> Self {
        Self {
            amplitude_scale: 1.0,
            noise_level: 0.0,
            harmonic_magnitude: 0.0,
            phase_shift: 0.0,
            frequency_deviation: 0.0,
            offset: 0.0,
            distortion_level: 0.0,
            magnetic_field_strength: 1.0,
        }
    }
}

/// Names one field of `SensorParameters`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterField {
    /// `amplitude_scale`
    AmplitudeScale,
    /// `noise_level`
    NoiseLevel,
    /// `harmonic_magnitude`
    HarmonicMagnitude,
    /// `phase_shift`
    PhaseShift,
    /// `frequency_deviation`
    FrequencyDeviation,
    /// `offset`
    Offset,
    /// `distortion_level`
    DistortionLevel,
    /// `magnetic_field_strength`
    MagneticFieldStrength,
}

impl SensorParameters {
    /// Read one field
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::AmplitudeScale => self.amplitude_scale,
            ParameterField::NoiseLevel => self.noise_level,
            ParameterField::HarmonicMagnitude => self.harmonic_magnitude,
            ParameterField::PhaseShift => self.phase_shift,
            ParameterField::FrequencyDeviation => self.frequency_deviation,
            ParameterField::Offset => self.offset,
            ParameterField::DistortionLevel => self.distortion_level,
            ParameterField::MagneticFieldStrength => self.magnetic_field_strength,
        }
    }

    /// Overwrite one field
    pub fn set(&mut self, field: ParameterField, value: f64) {
        let slot = match field {
            ParameterField::AmplitudeScale => &mut self.amplitude_scale,
            ParameterField::NoiseLevel => &mut self.noise_level,
            ParameterField::HarmonicMagnitude => &mut self.harmonic_magnitude,
            ParameterField::PhaseShift => &mut self.phase_shift,
            ParameterField::FrequencyDeviation => &mut self.frequency_deviation,
            ParameterField::Offset => &mut self.offset,
            ParameterField::DistortionLevel => &mut self.distortion_level,
            ParameterField::MagneticFieldStrength => &mut self.magnetic_field_strength,
        };
        *slot = value;
    }

    /// Angular frequency of this sensor's fundamental (rad/s)
    pub fn omega(&self, fundamental_hz: f64) -> f64 {
        2.0 * PI * (fundamental_hz + self.frequency_deviation)
    }

    /// Peak line voltage after amplitude scaling, shared by the voltage-derived
    /// models
    pub(crate) fn peak_voltage(&self) -> f64 {
        NOMINAL_PHASE_VOLTAGE_V * 2.0_f64.sqrt() * self.amplitude_scale
    }
}

/// Output of a sensor model before the common tail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Model output
    pub signal: f64,
    /// Reference amplitude for the common tail, `None` to skip it
    pub reference_amplitude: Option<f64>,
}

impl RawSample {
    /// Sample that still receives harmonic and noise injection
    pub fn with_tail(signal: f64, reference_amplitude: f64) -> Self {
        Self {
            signal,
            reference_amplitude: Some(reference_amplitude),
        }
    }

    /// Sample that is final as produced by the model
    pub fn finished(signal: f64) -> Self {
        Self {
            signal,
            reference_amplitude: None,
        }
    }
}

/// Per-sensor synthesis function: `(params, ω, t, phase_offset, noise)`
pub type SynthesisFn =
    fn(&SensorParameters, f64, f64, f64, &mut dyn NoiseSource) -> RawSample;

/// Harmonic and noise injection shared by all analog sensor models
fn apply_common_tail(
    raw: RawSample,
    params: &SensorParameters,
    omega: f64,
    t: f64,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let Some(amp) = raw.reference_amplitude else {
        return raw.signal;
    };

    let mut signal = raw.signal;
    signal += params.harmonic_magnitude * 0.2 * amp * (3.0 * omega * t).sin();

    let noise_scale = if amp != 0.0 { amp * 0.05 } else { 0.5 };
    signal += params.noise_level * (noise.uniform() - 0.5) * noise_scale;
    signal
}

fn sample_with(
    synthesize: SynthesisFn,
    params: &SensorParameters,
    omega: f64,
    t: f64,
    phase_offset: f64,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let raw = synthesize(params, omega, t, phase_offset, noise);
    apply_common_tail(raw, params, omega, t, noise)
}

/// One output sample of `kind` at time `t` (s)
///
/// `omega` is the sensor's angular frequency (see `SensorParameters::omega`),
/// `phase_offset` the structural phase offset in radians.
pub fn sample(
    kind: SensorKind,
    params: &SensorParameters,
    omega: f64,
    t: f64,
    phase_offset: f64,
    noise: &mut dyn NoiseSource,
) -> f64 {
    sample_with(kind.synthesizer(), params, omega, t, phase_offset, noise)
}

/// One of the three grid phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Reference phase, no offset
    R,
    /// Leads R by 120°
    S,
    /// Leads R by 240°
    T,
}

impl Phase {
    /// Phases in generation order
    pub const ALL: [Phase; PHASE_COUNT] = [Phase::R, Phase::S, Phase::T];

    /// Position in `Phase::ALL`
    pub fn index(self) -> usize {
        match self {
            Phase::R => 0,
            Phase::S => 1,
            Phase::T => 2,
        }
    }

    /// Structural offset added to the sine argument (rad)
    pub fn offset_rad(self) -> f64 {
        self.index() as f64 * PHASE_SEPARATION_RAD
    }
}

/// A single (time, amplitude) sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveformPoint {
    /// Seconds since the start of the window
    pub time: f64,
    /// Sensor output in its own unit
    pub amplitude: f64,
}

/// Three-phase output of one sensor over one sampling window
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waveform {
    /// Sensor that produced the waveform
    pub kind: SensorKind,
    phases: [Vec<WaveformPoint>; PHASE_COUNT],
}

impl Waveform {
    /// Samples of one phase, time-ordered
    pub fn phase(&self, phase: Phase) -> &[WaveformPoint] {
        &self.phases[phase.index()]
    }

    /// Amplitudes of one phase without timestamps
    pub fn amplitudes(&self, phase: Phase) -> Vec<f64> {
        self.phase(phase).iter().map(|point| point.amplitude).collect()
    }

    /// Samples per phase
    pub fn len(&self) -> usize {
        self.phases[0].len()
    }

    /// Whether the phases hold no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Synthesize all three phases of `kind` over `sample_count` samples
///
/// Sample `i` is taken at `t = i / sample_rate`. Noise is drawn phase by
/// phase (all of R, then S, then T).
pub fn waveform(
    kind: SensorKind,
    params: &SensorParameters,
    sample_count: usize,
    sample_rate: f64,
    fundamental_hz: f64,
    noise: &mut dyn NoiseSource,
) -> Waveform {
    let synthesize = kind.synthesizer();
    let omega = params.omega(fundamental_hz);

    let phases = Phase::ALL.map(|phase| {
        let phase_offset = phase.offset_rad();
        (0..sample_count)
            .map(|i| {
                let time = i as f64 / sample_rate;
                WaveformPoint {
                    time,
                    amplitude: sample_with(synthesize, params, omega, time, phase_offset, noise),
                }
            })
            .collect()
    });

    Waveform { kind, phases }
}
