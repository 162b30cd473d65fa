//! Grid Engine
//!
//! ## Overview
//!
//! The engine owns one `SensorParameters` record per sensor and the validated
//! `SimulationConfig`. Parameter changes arrive as `ParameterChange` events;
//! each one bumps a generation counter. A recompute cycle produces:
//!
//! ```text
//! for each sensor (independent, parallel):
//!     waveform  = synthesize R, S, T
//!     spectrum  = FFT(phase R)
//! once per cycle (parallel with the sensors):
//!     S map     = Padé loop at K = voltage.amplitude_scale · 1.5
//!     Z map     = delay chain at K = voltage.amplitude_scale
//! ```
//!
//! ## Last Request Wins
//!
//! `GridEngine::request` snapshots the parameters into a `RecomputeRequest`
//! that can run on any thread. The request remembers the generation it was
//! issued at and shares the engine's counter. If a newer change lands while it
//! runs, it stops at the next sensor boundary and reports
//! `RecomputeOutcome::Superseded` instead of publishing stale results.
//!
//! ```rust
//! use gridscope_core::{GridEngine, ParameterChange, ParameterField, RecomputeOutcome, SensorKind};
//! use gridscope_core::SimulationConfig;
//!
//! let mut engine = GridEngine::new(SimulationConfig::default())?;
//! let stale = engine.request();
//!
//! engine.apply(ParameterChange {
//!     kind: SensorKind::Voltage,
//!     field: ParameterField::AmplitudeScale,
//!     value: 0.8,
//! });
//!
//! assert!(matches!(stale.run()?, RecomputeOutcome::Superseded { .. }));
//! assert!(matches!(engine.request().run()?, RecomputeOutcome::Completed(_)));
//! # Ok::<(), gridscope_core::SimulationError>(())
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SimulationConfig;
use crate::errors::SimulationResult;
use crate::fft::{self, Spectrum};
use crate::noise::NoisePolicy;
use crate::sensors::{self, ParameterField, Phase, SensorKind, SensorParameters, Waveform};
use crate::stability::{s_domain_map, z_domain_map, PoleZeroMap};

/// "Parameter changed" event from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterChange {
    /// Sensor whose parameter changed
    pub kind: SensorKind,
    /// Field that changed
    pub field: ParameterField,
    /// New value
    pub value: f64,
}

/// Per-sensor output of one recompute cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReport {
    /// Sensor this report belongs to
    pub kind: SensorKind,
    /// All three phases
    pub waveform: Waveform,
    /// Spectrum of phase R
    pub spectrum: Spectrum,
    /// THD of phase R relative to the sensor's own fundamental
    pub thd: Option<f64>,
}

/// Complete output of one recompute cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    /// Generation the snapshot was computed for
    pub generation: u64,
    /// One report per sensor, in `SensorKind::ALL` order
    pub sensors: Vec<SensorReport>,
    /// Continuous-time map of the voltage loop
    pub s_domain: PoleZeroMap,
    /// Sampled map of the voltage loop
    pub z_domain: PoleZeroMap,
}

impl GridSnapshot {
    /// Report for `kind`
    pub fn sensor(&self, kind: SensorKind) -> &SensorReport {
        &self.sensors[kind.index()]
    }
}

/// Result of running a `RecomputeRequest`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecomputeOutcome {
    /// Every sensor and both maps were computed for this generation
    Completed(GridSnapshot),
    /// A newer parameter change made this request stale
    Superseded {
        /// Generation the request was issued at
        generation: u64,
        /// Generation current when the request gave up
        latest: u64,
    },
}

impl RecomputeOutcome {
    /// The snapshot, if the request completed
    pub fn snapshot(self) -> Option<GridSnapshot> {
        match self {
            RecomputeOutcome::Completed(snapshot) => Some(snapshot),
            RecomputeOutcome::Superseded { .. } => None,
        }
    }
}

/// Owner of sensor parameters and the generation counter
#[derive(Debug)]
pub struct GridEngine {
    config: SimulationConfig,
    parameters: [SensorParameters; 5],
    noise: NoisePolicy,
    generation: Arc<AtomicU64>,
}

impl GridEngine {
    /// Engine with nominal parameters on every sensor
    ///
    /// Fails if `config` does not validate.
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        log_debug!(
            "engine: {} samples at {} Hz, fundamental {} Hz",
            config.sample_count, config.sample_rate_hz, config.fundamental_hz
        );
        Ok(Self {
            config,
            parameters: [SensorParameters::default(); 5],
            noise: NoisePolicy::default(),
            generation: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Use `policy` to seed per-sensor noise in every cycle
    pub fn with_noise(mut self, policy: NoisePolicy) -> Self {
        self.noise = policy;
        self
    }

    /// Validated configuration the engine was built with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current parameter record of `kind`
    pub fn parameters(&self, kind: SensorKind) -> &SensorParameters {
        &self.parameters[kind.index()]
    }

    /// Current generation; bumped by every parameter change
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Apply one parameter change and return the new generation
    pub fn apply(&mut self, change: ParameterChange) -> u64 {
        log_trace!(
            "engine: {} {:?} = {}",
            change.kind.name(), change.field, change.value
        );
        self.parameters[change.kind.index()].set(change.field, change.value);
        self.bump()
    }

    /// Replace a sensor's whole parameter record and return the new generation
    pub fn set_parameters(&mut self, kind: SensorKind, parameters: SensorParameters) -> u64 {
        self.parameters[kind.index()] = parameters;
        self.bump()
    }

    fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Snapshot the current parameters into a runnable request
    pub fn request(&self) -> RecomputeRequest {
        RecomputeRequest {
            generation: self.generation(),
            latest: Arc::clone(&self.generation),
            config: self.config,
            parameters: self.parameters,
            noise: self.noise,
        }
    }

    /// Run a cycle for the current parameters on the calling thread
    pub fn recompute(&self) -> SimulationResult<RecomputeOutcome> {
        self.request().run()
    }
}

/// A recompute cycle frozen at one generation
///
/// Owns copies of everything it needs, so it can be sent to a worker thread.
#[derive(Debug, Clone)]
pub struct RecomputeRequest {
    generation: u64,
    latest: Arc<AtomicU64>,
    config: SimulationConfig,
    parameters: [SensorParameters; 5],
    noise: NoisePolicy,
}

impl RecomputeRequest {
    /// Generation the request was issued at
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a newer parameter change has been applied since issue
    pub fn is_stale(&self) -> bool {
        self.latest.load(Ordering::Acquire) != self.generation
    }

    fn superseded(&self) -> RecomputeOutcome {
        let latest = self.latest.load(Ordering::Acquire);
        log_debug!(
            "recompute: generation {} superseded by {}",
            self.generation, latest
        );
        RecomputeOutcome::Superseded {
            generation: self.generation,
            latest,
        }
    }

    /// Compute waveforms, spectra and stability maps
    ///
    /// Errors only if the FFT rejects the sample count, which a validated
    /// configuration rules out.
    pub fn run(&self) -> SimulationResult<RecomputeOutcome> {
        if self.is_stale() {
            return Ok(self.superseded());
        }
        log_debug!("recompute: generation {} started", self.generation);

        let (sensors, (s_domain, z_domain)) =
            join(|| self.sensor_reports(), || self.stability_maps());

        let Some(sensors) = sensors? else {
            return Ok(self.superseded());
        };
        if self.is_stale() {
            return Ok(self.superseded());
        }

        log_debug!(
            "recompute: generation {} done, s-stable={} z-stable={}",
            self.generation,
            s_domain.is_stable(),
            z_domain.is_stable()
        );
        Ok(RecomputeOutcome::Completed(GridSnapshot {
            generation: self.generation,
            sensors,
            s_domain,
            z_domain,
        }))
    }

    /// Reports for every sensor, or `None` if the request went stale midway
    fn sensor_reports(&self) -> SimulationResult<Option<Vec<SensorReport>>> {
        #[cfg(feature = "parallel")]
        let kinds = SensorKind::ALL.into_par_iter();
        #[cfg(not(feature = "parallel"))]
        let kinds = SensorKind::ALL.into_iter();

        let reports: Vec<Option<SensorReport>> = kinds
            .map(|kind| {
                if self.is_stale() {
                    return Ok(None);
                }
                self.sensor_report(kind).map(Some)
            })
            .collect::<SimulationResult<_>>()?;

        Ok(reports.into_iter().collect())
    }

    fn sensor_report(&self, kind: SensorKind) -> SimulationResult<SensorReport> {
        let params = &self.parameters[kind.index()];
        let mut noise = self.noise.source_for(kind.index());

        let waveform = sensors::waveform(
            kind,
            params,
            self.config.sample_count,
            self.config.sample_rate_hz,
            self.config.fundamental_hz,
            &mut noise,
        );
        let spectrum = fft::magnitude_spectrum(waveform.phase(Phase::R), self.config.sample_rate_hz)?;
        let thd = spectrum.total_harmonic_distortion(self.config.fundamental_hz + params.frequency_deviation);

        Ok(SensorReport {
            kind,
            waveform,
            spectrum,
            thd,
        })
    }

    fn stability_maps(&self) -> (PoleZeroMap, PoleZeroMap) {
        let scale = self.parameters[SensorKind::Voltage.index()].amplitude_scale;
        let control = &self.config.control;
        join(
            || s_domain_map(scale * control.s_gain_multiplier, control),
            || z_domain_map(scale, control),
        )
    }
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
