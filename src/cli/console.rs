//! Line input read on a background thread
//!
//! The frame loop polls for commands while a line is typing or auto mode is
//! running, and blocks for them when the session waits on the player.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Result of a non-blocking read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    Line(String),
    Empty,
    Closed,
}

/// Trimmed lines typed on stdin
pub struct Console {
    lines: Receiver<String>,
}

impl Console {
    /// Start reading stdin on its own thread
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("biringan_stdin".to_string())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line.trim().to_string()).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            log::warn!("stopped reading input: {err}");
                            break;
                        }
                    }
                }
            })?;
        Ok(Self::from_receiver(rx))
    }

    pub fn from_receiver(lines: Receiver<String>) -> Self {
        Self { lines }
    }

    /// Get user input with an optional prompt; None at end of input
    pub fn get_input(&self, prompt: &str) -> io::Result<Option<String>> {
        if !prompt.is_empty() {
            print!("{} ", prompt);
            io::stdout().flush()?;
        }
        Ok(self.lines.recv().ok())
    }

    /// Wait for Enter key; false at end of input
    pub fn wait_input(&self) -> bool {
        self.lines.recv().is_ok()
    }

    /// A line typed since the last read, without waiting
    pub fn poll(&self) -> Poll {
        match self.lines.try_recv() {
            Ok(line) => Poll::Line(line),
            Err(TryRecvError::Empty) => Poll::Empty,
            Err(TryRecvError::Disconnected) => Poll::Closed,
        }
    }
}
