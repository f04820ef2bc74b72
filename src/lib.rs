//! Concurrent workers painting fixed-row progress bars to a shared terminal.
//!
//! Every worker thread owns a [`ProgressBar`] on its own terminal row. Workers never
//! share state with each other; the only shared resource is the terminal, and every
//! write to it goes through an [`OutputGate`], one render frame at a time.
//!
//! ```
//! use std::time::Duration;
//! use worker_bars::{orchestrator, Config, OutputGate, StepSource};
//!
//! struct Quick;
//! impl StepSource for Quick {
//!     fn roll_failure(&mut self) -> bool { false }
//!     fn step_duration(&mut self) -> Duration { Duration::from_millis(1) }
//! }
//!
//! let config = Config { workers: 2, bar_length: 10, ..Config::default() };
//! let gate = OutputGate::new(Vec::new(), false);
//! let reports = orchestrator::run_with(&config, &gate, |_| Quick).unwrap();
//! assert_eq!(reports.len(), 2);
//! ```
mod config;
mod gate;
pub mod logging;
pub mod orchestrator;
mod progressbar;
mod step;
mod terminal;
mod worker;

pub use config::{Config, WorkerId, BAR_LENGTH, BASE_ROW, WORKER_COUNT};
pub use gate::{stdout_gate, OutputGate};
pub use progressbar::{percent, BarState, ProgressBar, StepOutcome};
pub use step::{perform_step, seed_for, SeededSource, StepFailure, StepSource};
pub use terminal::{Terminal, FAILURE, SUCCESS, TEXT};
pub use worker::{run_worker, WorkerReport};
