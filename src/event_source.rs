use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::io::BufRead;

use crate::session::SessionEvent;

/// Trait for abstracting event sources to enable testing
pub trait EventSource {
    /// Next event, or `None` once the source is exhausted
    fn next_event(&mut self) -> Result<Option<SessionEvent>>;
}

/// Recorded session script, one JSON event per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub struct ScriptEventSource<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> ScriptEventSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> EventSource for ScriptEventSource<R> {
    fn next_event(&mut self) -> Result<Option<SessionEvent>> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .with_context(|| format!("reading script line {}", self.line_no + 1))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let event = serde_json::from_str(line)
                .with_context(|| format!("invalid event on line {}", self.line_no))?;
            return Ok(Some(event));
        }
    }
}

/// Simulated event source for testing
pub struct SimulatedEventSource {
    pub(crate) events: VecDeque<SessionEvent>,
}

impl SimulatedEventSource {
    pub fn new(events: Vec<SessionEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for SimulatedEventSource {
    fn next_event(&mut self) -> Result<Option<SessionEvent>> {
        Ok(self.events.pop_front())
    }
}
