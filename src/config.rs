use std::ops::Range;

/// Number of workers launched by the demo.
pub const WORKER_COUNT: usize = 5;
/// Number of steps each worker performs, which is also the width of its bar.
pub const BAR_LENGTH: usize = 30;
/// Worker `i` renders on row `BASE_ROW + i`. Rows 0 and 1 hold the banner.
pub const BASE_ROW: u16 = 2;

/// Compiled-in settings for a run.
///
/// The binary always uses [`Config::default`]. Other values only exist so that tests can
/// run smaller and faster setups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub workers: usize,
    pub bar_length: usize,
    pub base_row: u16,
    /// Simulated work time of one step, in milliseconds.
    pub step_millis: Range<u64>,
    /// One step in `failure_odds` fails.
    pub failure_odds: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: WORKER_COUNT,
            bar_length: BAR_LENGTH,
            base_row: BASE_ROW,
            step_millis: 50..200,
            failure_odds: 10,
        }
    }
}

impl Config {
    /// Row assigned to the worker with the given id.
    pub fn row_for(&self, worker: WorkerId) -> u16 {
        self.base_row + worker.get() as u16
    }

    /// Row below every worker row, where the completion banner goes.
    pub fn footer_row(&self) -> u16 {
        self.base_row + self.workers as u16 + 1
    }

    /// Ids of all workers in launch order, starting at 1.
    pub fn worker_ids(&self) -> impl Iterator<Item = WorkerId> {
        (1..=self.workers as u32).map(WorkerId)
    }
}

/// Identity of a worker, `1..=workers`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub u32);

impl WorkerId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
