use std::ops::Range;
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::config::{Config, WorkerId};

/// Spacing between the seeds of consecutive workers.
const SEED_STRIDE: u64 = 7_919;

/// A simulated step that did not succeed.
///
/// This is an expected outcome: it is recorded in the worker's bar and never aborts the
/// worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("calculation error")]
pub struct StepFailure;

/// Randomness consumed by one simulated step.
///
/// For every step, [`roll_failure`](Self::roll_failure) is drawn first and
/// [`step_duration`](Self::step_duration) second. Keeping that order fixed keeps a
/// seeded run reproducible.
pub trait StepSource {
    fn roll_failure(&mut self) -> bool;
    fn step_duration(&mut self) -> Duration;
}

impl<S: StepSource + ?Sized> StepSource for Box<S> {
    fn roll_failure(&mut self) -> bool {
        (**self).roll_failure()
    }

    fn step_duration(&mut self) -> Duration {
        (**self).step_duration()
    }
}

/// Seed of the given worker.
pub fn seed_for(worker: WorkerId) -> u64 {
    u64::from(worker.get()) * SEED_STRIDE
}

/// The production source: a private generator seeded from the worker's identity.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: StdRng,
    millis: Range<u64>,
    failure_odds: u32,
}

impl SeededSource {
    pub fn new(seed: u64, config: &Config) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            millis: config.step_millis.clone(),
            failure_odds: config.failure_odds.max(1),
        }
    }

    pub fn for_worker(worker: WorkerId, config: &Config) -> Self {
        Self::new(seed_for(worker), config)
    }
}

impl StepSource for SeededSource {
    fn roll_failure(&mut self) -> bool {
        self.rng.gen_range(1..=self.failure_odds) == 1
    }

    fn step_duration(&mut self) -> Duration {
        if self.millis.is_empty() {
            return Duration::from_millis(self.millis.start);
        }
        Duration::from_millis(self.rng.gen_range(self.millis.clone()))
    }
}

/// Performs one unit of simulated work.
///
/// Both outcomes sleep for the drawn duration; only the returned value differs.
pub fn perform_step(source: &mut impl StepSource) -> Result<(), StepFailure> {
    let failed = source.roll_failure();
    thread::sleep(source.step_duration());
    if failed {
        Err(StepFailure)
    } else {
        Ok(())
    }
}
