#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use worker_bars::StepSource;

/// Replays captured terminal output onto a grid of characters.
///
/// Understands absolute cursor moves (`CSI row;col H`), clearing the screen (`CSI 2 J`),
/// newlines and carriage returns. Every other escape sequence, colors included, is
/// skipped.
#[derive(Default)]
pub struct VirtualScreen {
    rows: Vec<Vec<char>>,
    row: usize,
    col: usize,
}

impl VirtualScreen {
    pub fn replay(bytes: &[u8]) -> Self {
        let mut screen = Self::default();
        screen.feed(&String::from_utf8_lossy(bytes));
        screen
    }

    pub fn feed(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\x1b' => {
                    if chars.peek() != Some(&'[') {
                        continue;
                    }
                    chars.next();
                    let mut params = String::new();
                    let mut command = None;
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            command = Some(c);
                            break;
                        }
                        params.push(c);
                    }
                    self.control(command, &params);
                }
                '\n' => {
                    self.row += 1;
                    self.col = 0;
                }
                '\r' => self.col = 0,
                c => {
                    self.put(c);
                    self.col += 1;
                }
            }
        }
    }

    fn control(&mut self, command: Option<char>, params: &str) {
        match command {
            Some('H') => {
                let mut parts = params.split(';').map(|p| p.parse::<usize>().unwrap_or(1));
                self.row = parts.next().unwrap_or(1).saturating_sub(1);
                self.col = parts.next().unwrap_or(1).saturating_sub(1);
            }
            Some('J') if params == "2" => self.rows.clear(),
            _ => {}
        }
    }

    fn put(&mut self, c: char) {
        if self.rows.len() <= self.row {
            self.rows.resize(self.row + 1, Vec::new());
        }
        let line = &mut self.rows[self.row];
        if line.len() <= self.col {
            line.resize(self.col + 1, ' ');
        }
        line[self.col] = c;
    }

    /// Text of a row, without trailing blanks.
    pub fn row(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|line| line.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub enum Record {
    Write {
        thread: ThreadId,
        at: Instant,
        bytes: Vec<u8>,
    },
    Flush {
        thread: ThreadId,
        at: Instant,
    },
}

/// A writer remembering which thread wrote what, and when.
#[derive(Clone, Default)]
pub struct RecordingWriter {
    records: Arc<Mutex<Vec<Record>>>,
}

impl RecordingWriter {
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.records()
            .into_iter()
            .flat_map(|record| match record {
                Record::Write { bytes, .. } => bytes,
                Record::Flush { .. } => Vec::new(),
            })
            .collect()
    }
}

impl Write for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.records.lock().unwrap().push(Record::Write {
            thread: thread::current().id(),
            at: Instant::now(),
            bytes: buf.to_vec(),
        });
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.records.lock().unwrap().push(Record::Flush {
            thread: thread::current().id(),
            at: Instant::now(),
        });
        Ok(())
    }
}

/// Fails on the listed 1-based steps, succeeds on every other one, never sleeps.
pub struct Scripted {
    step: usize,
    failing: Vec<usize>,
}

impl Scripted {
    pub fn failing_on(failing: &[usize]) -> Self {
        Scripted {
            step: 0,
            failing: failing.to_vec(),
        }
    }
}

impl StepSource for Scripted {
    fn roll_failure(&mut self) -> bool {
        self.step += 1;
        self.failing.contains(&self.step)
    }

    fn step_duration(&mut self) -> Duration {
        Duration::ZERO
    }
}
