//! Background recompute worker
//!
//! A UI slider dragged continuously produces a burst of parameter changes.
//! The worker runs recompute requests on its own thread and never builds a
//! backlog: when it wakes up it drops every queued request except the newest,
//! and a request that goes stale mid-run gives up on its own (see
//! `RecomputeRequest::run`).
//!
//! ```text
//! UI thread                 worker thread
//! ─────────                 ─────────────
//! submit(g1) ──┐
//! submit(g2) ──┼──► queue ──► take newest (g3), skip g1, g2
//! submit(g3) ──┘                   │
//!                                  ▼
//! recv() ◄──────────────────── outcome(g3)
//! ```

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::engine::{RecomputeOutcome, RecomputeRequest};
use crate::errors::SimulationResult;

/// Outcome delivered by the worker for each request it ran
pub type WorkerOutcome = SimulationResult<RecomputeOutcome>;

/// Thread that runs the newest pending `RecomputeRequest`
pub struct RecomputeWorker {
    requests: Option<Sender<RecomputeRequest>>,
    outcomes: Receiver<WorkerOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl RecomputeWorker {
    /// Start the worker thread
    pub fn spawn() -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<RecomputeRequest>();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("gridscope-recompute".into())
            .spawn(move || run_latest(request_rx, outcome_tx))?;

        Ok(Self {
            requests: Some(request_tx),
            outcomes: outcome_rx,
            handle: Some(handle),
        })
    }

    /// Queue a request; returns `false` if the worker has stopped
    pub fn submit(&self, request: RecomputeRequest) -> bool {
        self.requests
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok())
    }

    /// Block until the next outcome, `None` once the worker has stopped
    pub fn recv(&self) -> Option<WorkerOutcome> {
        self.outcomes.recv().ok()
    }

    /// Wait up to `timeout` for the next outcome
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerOutcome> {
        match self.outcomes.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drain finished outcomes without blocking and keep the newest one
    pub fn latest(&self) -> Option<WorkerOutcome> {
        self.outcomes.try_iter().last()
    }
}

impl Drop for RecomputeWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log_warn!("recompute worker panicked");
            }
        }
    }
}

fn run_latest(requests: Receiver<RecomputeRequest>, outcomes: Sender<WorkerOutcome>) {
    while let Ok(mut request) = requests.recv() {
        let mut skipped = 0usize;
        for newer in requests.try_iter() {
            request = newer;
            skipped += 1;
        }
        if skipped > 0 {
            log_debug!(
                "worker: skipped {} queued request(s), running generation {}",
                skipped,
                request.generation()
            );
        }

        if outcomes.send(request.run()).is_err() {
            break;
        }
    }
    log_trace!("worker: request channel closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GridEngine, ParameterChange};
    use crate::noise::NoisePolicy;
    use crate::sensors::{ParameterField, SensorKind};
    use crate::SimulationConfig;

    fn engine() -> GridEngine {
        GridEngine::new(SimulationConfig::default())
            .unwrap()
            .with_noise(NoisePolicy::Seeded(5))
    }

    #[test]
    fn runs_submitted_request() {
        let engine = engine();
        let worker = RecomputeWorker::spawn().unwrap();

        assert!(worker.submit(engine.request()));
        let outcome = worker.recv().unwrap().unwrap();
        assert_eq!(outcome.snapshot().map(|s| s.generation), Some(0));
    }

    #[test]
    fn burst_ends_with_latest_generation() {
        let mut engine = engine();
        let worker = RecomputeWorker::spawn().unwrap();

        let burst: Vec<_> = (0..20)
            .map(|step| {
                engine.apply(ParameterChange {
                    kind: SensorKind::Voltage,
                    field: ParameterField::AmplitudeScale,
                    value: 1.0 - step as f64 * 0.01,
                });
                engine.request()
            })
            .collect();
        for request in burst {
            assert!(worker.submit(request));
        }

        // Only the final generation may complete; everything older is either
        // skipped in the queue or reported as superseded.
        let mut last = None;
        while let Some(outcome) = worker.recv_timeout(Duration::from_secs(5)) {
            let outcome = outcome.unwrap();
            if let RecomputeOutcome::Completed(snapshot) = &outcome {
                assert_eq!(snapshot.generation, engine.generation());
            }
            let done = matches!(outcome, RecomputeOutcome::Completed(_));
            last = Some(outcome);
            if done {
                break;
            }
        }
        assert!(matches!(last, Some(RecomputeOutcome::Completed(_))));
    }
}
