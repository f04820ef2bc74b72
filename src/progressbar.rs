use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::style::Color;
use tracing::trace;

use crate::config::WorkerId;
use crate::step::{perform_step, StepFailure, StepSource};
use crate::terminal::{Terminal, FAILURE, SUCCESS, TEXT};
use crate::OutputGate;

const SUCCESS_GLYPH: char = '#';
const FAILURE_GLYPH: char = '!';
const BLANK: char = ' ';
/// Width of `] 100%` following the bar cells.
const PERCENT_WIDTH: u16 = 6;

/// Where a bar is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarState {
    Initial,
    InProgress,
    Complete,
}

/// Result of a single step, as recorded in the bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed,
}

impl From<Result<(), StepFailure>> for StepOutcome {
    fn from(result: Result<(), StepFailure>) -> Self {
        match result {
            Ok(()) => StepOutcome::Succeeded,
            Err(StepFailure) => StepOutcome::Failed,
        }
    }
}

/// Percentage shown next to a bar. Truncates, so 10 of 30 steps is 33%.
pub fn percent(completed: usize, total: usize) -> usize {
    if total == 0 {
        100
    } else {
        100 * completed / total
    }
}

/// The progress of one worker, painted on its own terminal row.
///
/// A bar is owned by a single worker thread. Each render takes the [`OutputGate`] for the
/// duration of one frame, so bars on other rows may be painted in between but never in
/// the middle of a frame.
///
/// ```
/// use std::time::Duration;
/// use worker_bars::{OutputGate, ProgressBar, StepSource, WorkerId};
///
/// struct NeverFails;
/// impl StepSource for NeverFails {
///     fn roll_failure(&mut self) -> bool { false }
///     fn step_duration(&mut self) -> Duration { Duration::ZERO }
/// }
///
/// let gate = OutputGate::new(Vec::new(), false);
/// let mut bar = ProgressBar::new(WorkerId(1), 7, 4, 3, NeverFails, &gate).unwrap();
/// while !bar.is_complete() {
///     bar.advance_one_step(&gate).unwrap();
/// }
/// bar.render_final(&gate).unwrap();
/// assert_eq!(bar.completed_steps(), 4);
/// assert_eq!(bar.failures(), 0);
/// ```
pub struct ProgressBar<S: StepSource> {
    worker: WorkerId,
    label: String,
    row: u16,
    completed: usize,
    failed: Vec<bool>,
    started: Instant,
    source: S,
}

impl<S: StepSource> ProgressBar<S> {
    /// Creates a bar of `total_steps` cells on `row` and draws it empty.
    ///
    /// `display_id` is shown next to the worker number.
    pub fn new<W: Write>(
        worker: WorkerId,
        display_id: u64,
        total_steps: usize,
        row: u16,
        source: S,
        gate: &OutputGate<W>,
    ) -> io::Result<Self> {
        let bar = Self {
            worker,
            label: format!("Worker {:>2} (ID: {}): [", worker.get(), display_id),
            row,
            completed: 0,
            failed: vec![false; total_steps],
            started: Instant::now(),
            source,
        };
        bar.render_initial(gate)?;
        Ok(bar)
    }

    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn total_steps(&self) -> usize {
        self.failed.len()
    }

    pub fn completed_steps(&self) -> usize {
        self.completed
    }

    /// `true` for every completed step that failed.
    pub fn step_outcomes(&self) -> &[bool] {
        &self.failed[..self.completed]
    }

    pub fn failures(&self) -> usize {
        self.step_outcomes().iter().filter(|&&failed| failed).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total_steps()
    }

    pub fn state(&self) -> BarState {
        if self.is_complete() {
            BarState::Complete
        } else if self.completed == 0 {
            BarState::Initial
        } else {
            BarState::InProgress
        }
    }

    pub fn percent(&self) -> usize {
        percent(self.completed, self.total_steps())
    }

    fn bar_column(&self) -> u16 {
        self.label.len() as u16
    }

    fn summary_column(&self) -> u16 {
        self.bar_column() + self.total_steps() as u16 + PERCENT_WIDTH
    }

    fn render_initial<W: Write>(&self, gate: &OutputGate<W>) -> io::Result<()> {
        gate.with_terminal(|term| {
            term.move_cursor(0, self.row)?
                .set_color(TEXT)?
                .print(&self.label)?;
            self.draw_cells(term)
        })
    }

    /// Performs one simulated step and redraws the bar.
    ///
    /// Returns `None` without touching the bar or the terminal once the bar is complete.
    pub fn advance_one_step<W: Write>(
        &mut self,
        gate: &OutputGate<W>,
    ) -> io::Result<Option<StepOutcome>> {
        if self.is_complete() {
            return Ok(None);
        }

        let outcome = StepOutcome::from(perform_step(&mut self.source));
        self.failed[self.completed] = outcome == StepOutcome::Failed;
        self.completed += 1;
        trace!(worker = %self.worker, step = self.completed, ?outcome, "step done");

        gate.with_terminal(|term| {
            term.move_cursor(self.bar_column(), self.row)?;
            self.draw_cells(term)
        })?;
        Ok(Some(outcome))
    }

    /// Appends the error count and the elapsed time after the bar.
    ///
    /// Returns the elapsed time that was printed.
    pub fn render_final<W: Write>(&self, gate: &OutputGate<W>) -> io::Result<Duration> {
        let elapsed = self.started.elapsed();
        let failures = self.failures();
        gate.with_terminal(|term| {
            term.move_cursor(self.summary_column(), self.row)?.print(BLANK)?;
            if failures > 0 {
                term.set_color(FAILURE)?
                    .print(format_args!(" Errors: {} ", failures))?;
            }
            term.set_color(TEXT)?
                .print(format_args!(" Time: {} ms", elapsed.as_millis()))?
                .reset_color()?;
            Ok(())
        })?;
        Ok(elapsed)
    }

    /// Draws every cell from the cursor on, then the closing bracket and percentage.
    fn draw_cells<W: Write>(&self, term: &mut Terminal<W>) -> io::Result<()> {
        let mut current = None;
        for i in 0..self.total_steps() {
            let (color, glyph) = match self.cell(i) {
                Some(outcome) => cell_style(outcome),
                None => (TEXT, BLANK),
            };
            if current != Some(color) {
                term.set_color(color)?;
                current = Some(color);
            }
            term.print(glyph)?;
        }
        if current != Some(TEXT) {
            term.set_color(TEXT)?;
        }
        term.print(format_args!("] {:>3}%", self.percent()))?
            .reset_color()?;
        Ok(())
    }

    fn cell(&self, index: usize) -> Option<StepOutcome> {
        self.step_outcomes().get(index).map(|&failed| {
            if failed {
                StepOutcome::Failed
            } else {
                StepOutcome::Succeeded
            }
        })
    }
}

fn cell_style(outcome: StepOutcome) -> (Color, char) {
    match outcome {
        StepOutcome::Succeeded => (SUCCESS, SUCCESS_GLYPH),
        StepOutcome::Failed => (FAILURE, FAILURE_GLYPH),
    }
}
