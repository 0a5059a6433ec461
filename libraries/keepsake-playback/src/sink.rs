//! The audio element the controller drives
//!
//! A sink turns commands into sound somewhere else (a browser tab, a
//! speaker) and reports back through [`crate::SinkEvent`]s. Commands are
//! fire-and-forget.

use serde::{Deserialize, Serialize};
#[cfg(test)]
use std::sync::{Arc, Mutex, PoisonError};

/// Command sent to a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SinkCommand {
    /// Replace the current source
    Load { url: String },
    Play,
    Pause,
    /// Stop and drop the current source
    Stop,
}

/// Output side of the controller
pub trait AudioSink: Send {
    fn send(&mut self, command: SinkCommand);

    fn load(&mut self, url: &str) {
        self.send(SinkCommand::Load {
            url: url.to_string(),
        });
    }

    fn play(&mut self) {
        self.send(SinkCommand::Play);
    }

    fn pause(&mut self) {
        self.send(SinkCommand::Pause);
    }

    fn stop(&mut self) {
        self.send(SinkCommand::Stop);
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn send(&mut self, _command: SinkCommand) {}
}

/// Sink that records commands; clones share one log
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingSink {
    commands: Arc<Mutex<Vec<SinkCommand>>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every recorded command
    pub fn take(&self) -> Vec<SinkCommand> {
        std::mem::take(&mut *self.commands.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[cfg(test)]
impl AudioSink for RecordingSink {
    fn send(&mut self, command: SinkCommand) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }
}
