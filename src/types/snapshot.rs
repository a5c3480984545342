//! Persisted progress snapshot

use serde::{Deserialize, Serialize};

use super::line::{DialogueLine, Script};

/// Minimal state needed to resume at the last displayed line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub background_id: String,
    pub speaker: String,
    pub line_text: String,
}

impl ProgressSnapshot {
    pub fn new(
        background_id: impl Into<String>,
        speaker: impl Into<String>,
        line_text: impl Into<String>,
    ) -> Self {
        Self {
            background_id: background_id.into(),
            speaker: speaker.into(),
            line_text: line_text.into(),
        }
    }

    /// One-line script that replays the saved line
    pub fn resume_script(&self) -> Script {
        Script::new(vec![DialogueLine::new(
            self.line_text.clone(),
            self.speaker.clone(),
        )])
    }
}
