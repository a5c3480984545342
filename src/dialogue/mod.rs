//! Dialogue queue with typewriter reveal
//!
//! The queue owns the active [`Script`]. Each frame the host calls
//! [`DialogueQueue::tick`] with the elapsed time; player input calls
//! [`DialogueQueue::advance`], which fast-forwards an unfinished line or
//! moves on to the next one.

use std::collections::VecDeque;

use crate::config::TextConfig;
use crate::types::{DialogueLine, DialoguePhase, DisplayState, Script, Speed};

/// Absorbs float error when frame times are summed
const REVEAL_EPSILON: f64 = 1e-6;

#[cfg(test)]
mod tests;

/// Outcome of an advance request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current line was revealed in full
    FastForward,
    /// The next line was loaded
    NextLine,
    /// The queue ran out and the box was hidden
    Finished,
    /// Nothing to advance, the box was already hidden
    Idle,
}

/// Plays a script one line at a time
#[derive(Debug, Clone)]
pub struct DialogueQueue {
    pending: VecDeque<DialogueLine>,
    current: Option<DialogueLine>,
    display: DisplayState,
    /// Seconds since the line started, or since the last speed change
    line_elapsed: f64,
    /// Characters already shown when the current speed took effect
    base_len: usize,
    /// Seconds spent with the line fully revealed
    dwell: f32,
    base_rate: f32,
    speed: Speed,
    auto_advance: bool,
    auto_delay: f32,
}

impl DialogueQueue {
    /// Create an empty queue revealing `base_rate` characters per second at 1x
    pub fn new(base_rate: f32) -> Self {
        Self {
            pending: VecDeque::new(),
            current: None,
            display: DisplayState::hidden(),
            line_elapsed: 0.0,
            base_len: 0,
            dwell: 0.0,
            base_rate,
            speed: Speed::Normal,
            auto_advance: false,
            auto_delay: 1.0,
        }
    }

    pub fn from_config(config: &TextConfig) -> Self {
        let mut queue = Self::new(config.chars_per_second);
        queue.speed = config.speed;
        queue.auto_advance = config.auto_advance;
        queue.auto_delay = config.auto_advance_delay;
        queue
    }

    /// Replace any pending lines with `script` and show its first line
    ///
    /// An empty script leaves the box hidden.
    pub fn start(&mut self, script: Script) {
        log::debug!("starting script with {} lines", script.len());
        self.pending = script.into_iter().collect();
        self.load_next();
    }

    /// Fast-forward the current line, or move to the next one once it is fully shown
    pub fn advance(&mut self) -> Advance {
        if !self.display.box_visible {
            return Advance::Idle;
        }

        if !self.display.typing_complete {
            self.reveal_all();
            return Advance::FastForward;
        }

        if self.load_next() {
            Advance::NextLine
        } else {
            Advance::Finished
        }
    }

    /// Advance the reveal by `elapsed` seconds
    ///
    /// Returns the auto-advance outcome when auto mode moved the queue on.
    pub fn tick(&mut self, elapsed: f32) -> Option<Advance> {
        if !self.display.box_visible {
            return None;
        }
        let elapsed = elapsed.max(0.0);

        if !self.display.typing_complete {
            let len = self.current_len();
            self.line_elapsed += f64::from(elapsed);
            let typed = self.line_elapsed * f64::from(self.chars_per_second()) + REVEAL_EPSILON;
            let target = (self.base_len + typed.floor() as usize).min(len);
            if target > self.display.revealed_len {
                self.display.revealed_len = target;
            }
            if self.display.revealed_len >= len {
                self.display.typing_complete = true;
                self.dwell = 0.0;
            }
            return None;
        }

        if self.auto_advance {
            self.dwell += elapsed;
            if self.dwell >= self.auto_delay {
                log::debug!("auto-advancing after {:.2}s", self.dwell);
                return Some(self.advance());
            }
        }

        None
    }

    /// The line in progress, in full regardless of how much is revealed
    pub fn current_line(&self) -> Option<&DialogueLine> {
        if self.display.box_visible {
            self.current.as_ref()
        } else {
            None
        }
    }

    /// The revealed prefix of the current line
    pub fn revealed_text(&self) -> &str {
        let Some(line) = self.current_line() else {
            return "";
        };
        match line.text.char_indices().nth(self.display.revealed_len) {
            Some((byte, _)) => &line.text[..byte],
            None => &line.text,
        }
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn phase(&self) -> DialoguePhase {
        if !self.display.box_visible {
            DialoguePhase::Empty
        } else if self.display.typing_complete {
            DialoguePhase::Revealed
        } else {
            DialoguePhase::Revealing
        }
    }

    pub fn is_visible(&self) -> bool {
        self.display.box_visible
    }

    /// Hide the box and drop the rest of the script
    pub fn hide(&mut self) {
        self.pending.clear();
        self.current = None;
        self.display = DisplayState::hidden();
    }

    /// Lines still waiting after the current one
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn chars_per_second(&self) -> f32 {
        self.base_rate * self.speed.multiplier()
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Change the multiplier; characters already shown stay shown
    pub fn set_speed(&mut self, speed: Speed) {
        if speed == self.speed {
            return;
        }
        self.speed = speed;
        self.base_len = self.display.revealed_len;
        self.line_elapsed = 0.0;
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
        self.dwell = 0.0;
    }

    pub fn toggle_auto_advance(&mut self) -> bool {
        self.set_auto_advance(!self.auto_advance);
        self.auto_advance
    }

    fn current_len(&self) -> usize {
        self.current.as_ref().map(DialogueLine::char_len).unwrap_or(0)
    }

    fn reveal_all(&mut self) {
        let len = self.current_len();
        self.display.revealed_len = len;
        self.display.typing_complete = true;
        self.dwell = 0.0;
    }

    fn load_next(&mut self) -> bool {
        match self.pending.pop_front() {
            Some(line) => {
                let empty = line.text.is_empty();
                self.current = Some(line);
                self.display = DisplayState::fresh();
                self.display.typing_complete = empty;
                self.line_elapsed = 0.0;
                self.base_len = 0;
                self.dwell = 0.0;
                true
            }
            None => {
                self.current = None;
                self.display = DisplayState::hidden();
                false
            }
        }
    }
}

impl Default for DialogueQueue {
    fn default() -> Self {
        Self::from_config(&TextConfig::default())
    }
}
