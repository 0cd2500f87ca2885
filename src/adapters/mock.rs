//! A mock transport that replays scripted responses.
//!
//! The handle is clonable: tests keep one copy to queue responses and
//! inspect the command log while the [`Spectrometer`](crate::Spectrometer)
//! owns the other.

use crate::adapters::Transport;
use crate::error::DriverResult;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    commands: Vec<String>,
    responses: VecDeque<String>,
}

/// Scripted stand-in for a serial connection.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    /// Create an empty mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response line to be returned by a later `read_line`.
    pub fn queue_response(&self, line: impl Into<String>) {
        self.lock().responses.push_back(line.into());
    }

    /// All commands written so far, in order, without terminators.
    pub fn sent_commands(&self) -> Vec<String> {
        self.lock().commands.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Transport for MockTransport {
    fn write_command(&mut self, command: &str) -> DriverResult<()> {
        self.lock().commands.push(command.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> DriverResult<String> {
        // An exhausted script behaves like a read timeout: empty line.
        Ok(self.lock().responses.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_commands_and_replays_responses() {
        let mock = MockTransport::new();
        mock.queue_response("0.123\t540");

        let mut transport = mock.clone();
        transport.write_command("A").unwrap();
        assert_eq!(transport.read_line().unwrap(), "0.123\t540");
        assert_eq!(transport.read_line().unwrap(), "");
        assert_eq!(mock.sent_commands(), vec!["A".to_string()]);
    }
}
