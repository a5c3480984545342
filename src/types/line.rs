//! Dialogue lines and scripts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier attached to a line at authoring time so scene triggers do not
/// depend on the prose itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CheckpointId(String);

impl CheckpointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CheckpointId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single line of dialogue as authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Full text of the line, may contain `\n`
    pub text: String,
    /// Label shown in the speaker box (empty hides the box)
    pub speaker: String,
    /// Optional scene checkpoint
    pub checkpoint: Option<CheckpointId>,
}

impl DialogueLine {
    pub fn new(text: impl Into<String>, speaker: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speaker: speaker.into(),
            checkpoint: None,
        }
    }

    /// Attach a checkpoint id to this line
    pub fn at(mut self, checkpoint: impl Into<CheckpointId>) -> Self {
        self.checkpoint = Some(checkpoint.into());
        self
    }

    /// Number of characters the typewriter has to reveal
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Ordered sequence of lines played back in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Script {
    lines: Vec<DialogueLine>,
}

impl Script {
    pub fn new(lines: Vec<DialogueLine>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[DialogueLine] {
        &self.lines
    }

    pub fn push(&mut self, line: DialogueLine) {
        self.lines.push(line);
    }
}

impl From<Vec<DialogueLine>> for Script {
    fn from(lines: Vec<DialogueLine>) -> Self {
        Self::new(lines)
    }
}

impl FromIterator<DialogueLine> for Script {
    fn from_iter<I: IntoIterator<Item = DialogueLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Script {
    type Item = DialogueLine;
    type IntoIter = std::vec::IntoIter<DialogueLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_len_counts_characters_not_bytes() {
        let line = DialogueLine::new("TANGINA- nasan–", "???");
        assert_eq!(line.char_len(), 15);
        assert!(line.text.len() > 15);
    }

    #[test]
    fn script_keeps_insertion_order() {
        let script: Script = vec![DialogueLine::new("Hi", "A"), DialogueLine::new("Bye", "B")]
            .into_iter()
            .collect();
        assert_eq!(script.len(), 2);
        assert_eq!(script.lines()[0].text, "Hi");
        assert_eq!(script.lines()[1].speaker, "B");
    }
}
