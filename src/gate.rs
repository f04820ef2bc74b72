use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use lazy_static::lazy_static;

use crate::terminal::Terminal;

lazy_static! {
    static ref STDOUT_GATE: OutputGate<Stdout> =
        OutputGate::new(io::stdout(), atty::is(atty::Stream::Stdout));
}

/// The gate guarding the process' stdout.
///
/// Colors are only emitted when stdout is a terminal.
pub fn stdout_gate() -> &'static OutputGate<Stdout> {
    &STDOUT_GATE
}

/// Exclusive access to a shared terminal.
///
/// Every render frame (a cursor move followed by the writes it positions) runs inside a
/// single [`with_terminal`](Self::with_terminal) call, so frames from different threads
/// never interleave.
///
/// ```
/// use worker_bars::OutputGate;
///
/// let gate = OutputGate::new(Vec::new(), false);
/// gate.with_terminal(|term| {
///     term.move_cursor(0, 1)?.print("hello")?;
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(gate.into_inner(), b"\x1b[2;1Hhello");
/// ```
pub struct OutputGate<W: Write> {
    terminal: Mutex<Terminal<W>>,
}

impl<W: Write> OutputGate<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self {
            terminal: Mutex::new(Terminal::new(out, styled)),
        }
    }

    /// Runs `action` while holding the gate, then flushes the frame.
    ///
    /// The lock is released on every exit path. A lock poisoned by a panicking thread is
    /// taken over, since the terminal holds no invariant a half-written frame could break.
    pub fn with_terminal<T>(
        &self,
        action: impl FnOnce(&mut Terminal<W>) -> io::Result<T>,
    ) -> io::Result<T> {
        let mut terminal = self.terminal.lock().unwrap_or_else(PoisonError::into_inner);
        let result = action(&mut terminal);
        let flushed = terminal.flush();
        let value = result?;
        flushed?;
        Ok(value)
    }

    pub fn into_inner(self) -> W {
        self.terminal
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_inner()
    }
}
