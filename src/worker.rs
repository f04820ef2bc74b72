use std::io::{self, Write};
use std::time::Duration;

use tracing::debug;

use crate::config::WorkerId;
use crate::progressbar::ProgressBar;
use crate::step::StepSource;
use crate::OutputGate;

/// What a finished worker hands back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: WorkerId,
    pub steps: usize,
    pub failures: usize,
    pub elapsed: Duration,
}

/// Runs one worker to completion on the calling thread.
///
/// Draws the empty bar on `row`, performs exactly `bar_length` steps, redrawing after
/// each one, then draws the summary. Failed steps are recorded, they do not stop the loop.
pub fn run_worker<S: StepSource, W: Write>(
    worker: WorkerId,
    display_id: u64,
    bar_length: usize,
    row: u16,
    source: S,
    gate: &OutputGate<W>,
) -> io::Result<WorkerReport> {
    debug!(%worker, row, "worker started");
    let mut bar = ProgressBar::new(worker, display_id, bar_length, row, source, gate)?;
    while !bar.is_complete() {
        bar.advance_one_step(gate)?;
    }
    let elapsed = bar.render_final(gate)?;

    let report = WorkerReport {
        worker,
        steps: bar.completed_steps(),
        failures: bar.failures(),
        elapsed,
    };
    debug!(%worker, failures = report.failures, ?elapsed, "worker finished");
    Ok(report)
}
