use std::sync::{Mutex, MutexGuard, PoisonError};

use shared::protocol::{ReplayResponse, ReplayStep};
use tracing::{debug, info};

use crate::engine::{Action, Ledger};

/// The input sequence run by the `/example` endpoint.
pub const EXAMPLE_SEQUENCE: [i64; 3] = [5, 10, -6];

/// Owns the one live ledger and serializes every access to it.
///
/// Readers and writers always receive an independent copy; the guarded value
/// is never handed out by reference.
#[derive(Debug, Default)]
pub struct LedgerStore {
    ledger: Mutex<Ledger>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Each critical section ends with a single assignment, so a panic elsewhere
    // cannot leave a half-written ledger behind the poison flag.
    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Ledger {
        self.lock().clone()
    }

    pub fn apply(&self, input: i64) -> (Action, Ledger) {
        let mut guard = self.lock();
        let (action, next) = guard.apply(input);
        *guard = next.clone();
        drop(guard);

        debug!(input, %action, ledger = ?next.entries(), "applied input");
        if action.changed_sign() {
            info!(input, ledger = ?next.entries(), "ledger exhausted, sign flipped");
        }
        (action, next)
    }

    pub fn reset(&self) {
        *self.lock() = Ledger::new();
        info!("ledger reset");
    }

    /// Clears the ledger and applies `sequence` without releasing the lock in
    /// between, so no other caller can interleave with the run.
    pub fn replay(&self, sequence: &[i64]) -> Replay {
        let mut guard = self.lock();
        let replay = Replay::run(Ledger::new(), sequence);
        *guard = replay.final_ledger.clone();
        drop(guard);

        info!(
            inputs = sequence.len(),
            ledger = ?replay.final_ledger.entries(),
            "replayed sequence"
        );
        replay
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayedStep {
    pub input: i64,
    pub action: Action,
    pub ledger: Ledger,
}

/// Trace of a sequence applied one input at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub sequence: Vec<i64>,
    pub steps: Vec<ReplayedStep>,
    pub final_ledger: Ledger,
}

impl Replay {
    pub fn run(seed: Ledger, sequence: &[i64]) -> Self {
        let mut current = seed;
        let mut steps = Vec::with_capacity(sequence.len());
        for &input in sequence {
            let (action, next) = current.apply(input);
            steps.push(ReplayedStep {
                input,
                action,
                ledger: next.clone(),
            });
            current = next;
        }
        Self {
            sequence: sequence.to_vec(),
            steps,
            final_ledger: current,
        }
    }
}

impl From<Replay> for ReplayResponse {
    fn from(replay: Replay) -> Self {
        Self {
            sequence: replay.sequence,
            steps: replay
                .steps
                .into_iter()
                .map(|step| ReplayStep {
                    input: step.input,
                    list: step.ledger.into(),
                    action: step.action.to_string(),
                })
                .collect(),
            final_list: replay.final_ledger.into(),
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
