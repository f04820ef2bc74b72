use std::fmt::Display;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Colors, Print, ResetColor, SetColors, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

/// Text color used for labels, brackets and blank cells.
pub const TEXT: Color = Color::Grey;
/// Glyph color of a successful step.
pub const SUCCESS: Color = Color::Green;
/// Glyph color of a failed step, and of the error count.
pub const FAILURE: Color = Color::Red;

/// Cursor and color driver over a shared terminal handle.
///
/// A `Terminal` is only handed out by [`OutputGate::with_terminal`](crate::OutputGate::with_terminal),
/// so every call below happens while the gate is held. Commands are queued on the
/// writer and reach the terminal when the gate flushes at the end of the frame.
pub struct Terminal<W: Write> {
    out: W,
    styled: bool,
}

impl<W: Write> Terminal<W> {
    pub(crate) fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    /// Moves the cursor to an absolute, zero based position.
    pub fn move_cursor(&mut self, column: u16, row: u16) -> io::Result<&mut Self> {
        queue!(self.out, MoveTo(column, row))?;
        Ok(self)
    }

    /// Sets the foreground color of subsequent text, on the default background.
    pub fn set_color(&mut self, foreground: Color) -> io::Result<&mut Self> {
        self.set_colors(foreground, Color::Reset)
    }

    pub fn set_colors(&mut self, foreground: Color, background: Color) -> io::Result<&mut Self> {
        if self.styled {
            if background == Color::Reset {
                queue!(self.out, ResetColor, SetForegroundColor(foreground))?;
            } else {
                queue!(self.out, SetColors(Colors::new(foreground, background)))?;
            }
        }
        Ok(self)
    }

    pub fn reset_color(&mut self) -> io::Result<&mut Self> {
        if self.styled {
            queue!(self.out, ResetColor)?;
        }
        Ok(self)
    }

    pub fn print(&mut self, text: impl Display) -> io::Result<&mut Self> {
        queue!(self.out, Print(text))?;
        Ok(self)
    }

    /// Clears the whole screen and homes the cursor.
    pub fn clear(&mut self) -> io::Result<&mut Self> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(self)
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}
