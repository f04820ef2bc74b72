use std::io::Write;
use std::thread;

use anyhow::{anyhow, Context};
use tracing::{debug, error};

use crate::config::{Config, WorkerId};
use crate::step::{seed_for, SeededSource, StepSource};
use crate::worker::{run_worker, WorkerReport};
use crate::OutputGate;

pub const BANNER: &str = "Multithreaded calculation with progress bars (errors marked in red):";
pub const FINISHED: &str = "All workers finished.";

/// Runs the demo with every worker drawing from its own seeded generator.
pub fn run<W: Write + Send>(config: &Config, gate: &OutputGate<W>) -> anyhow::Result<Vec<WorkerReport>> {
    run_with(config, gate, |worker| SeededSource::for_worker(worker, config))
}

/// Runs the demo, building each worker's random source with `make_source`.
///
/// Clears the screen, prints the banner, runs one thread per worker on row
/// `base_row + id`, waits for all of them and prints the completion banner below the
/// last row. Reports come back in worker order.
pub fn run_with<W, S, F>(
    config: &Config,
    gate: &OutputGate<W>,
    make_source: F,
) -> anyhow::Result<Vec<WorkerReport>>
where
    W: Write + Send,
    S: StepSource + Send,
    F: Fn(WorkerId) -> S + Sync,
{
    gate.with_terminal(|term| {
        term.clear()?.print(BANNER)?;
        Ok(())
    })
    .context("failed to draw the banner")?;

    let results = thread::scope(|s| {
        let handles = config
            .worker_ids()
            .map(|worker| {
                let make_source = &make_source;
                thread::Builder::new()
                    .name(format!("worker-{}", worker))
                    .spawn_scoped(s, move || {
                        run_worker(
                            worker,
                            seed_for(worker),
                            config.bar_length,
                            config.row_for(worker),
                            make_source(worker),
                            gate,
                        )
                    })
                    .map(|handle| (worker, handle))
                    .with_context(|| format!("failed to spawn worker {}", worker))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|spawned| -> anyhow::Result<WorkerReport> {
                let (worker, handle) = spawned?;
                let report = handle
                    .join()
                    .map_err(|_| anyhow!("worker {} panicked", worker))?
                    .with_context(|| format!("worker {} failed to render", worker))?;
                Ok(report)
            })
            .collect::<Vec<_>>()
    });

    let mut reports = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                error!("{:#}", err);
                return Err(err);
            }
        }
    }

    let failures: usize = reports.iter().map(|r| r.failures).sum();
    debug!(workers = reports.len(), failures, "all workers joined");

    gate.with_terminal(|term| {
        term.move_cursor(0, config.footer_row())?
            .print(format_args!("\n{}\n", FINISHED))?;
        Ok(())
    })
    .context("failed to draw the completion banner")?;

    Ok(reports)
}
