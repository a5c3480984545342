//! A parsed story: named scripts, named menus and scene triggers

use std::collections::BTreeMap;

use crate::triggers::{ScenePolicy, Trigger};
use crate::types::{CheckpointId, Choice, DialogueLine, ProgressSnapshot, Script};

/// Everything the player needs to run one narrative
#[derive(Debug, Clone, Default)]
pub struct Story {
    /// Title taken from the first `#` heading
    pub title: Option<String>,
    /// Script started by a new game
    pub entry: String,
    /// Background shown when a new game starts
    pub opening_background: Option<String>,
    /// Track started when a new game starts
    pub opening_music: Option<String>,
    /// Cards shown one at a time before a new game's first line
    pub intro: Vec<String>,
    pub(crate) scripts: BTreeMap<String, Script>,
    pub(crate) menus: BTreeMap<String, Vec<Choice>>,
    pub(crate) triggers: Vec<Trigger>,
}

/// Counts printed by `biringan check`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorySummary {
    pub scripts: usize,
    pub lines: usize,
    pub menus: usize,
    pub choices: usize,
    pub triggers: usize,
    pub checkpoints: usize,
}

impl Story {
    pub fn script(&self, name: &str) -> Option<&Script> {
        self.scripts.get(name)
    }

    pub fn menu(&self, name: &str) -> Option<&[Choice]> {
        self.menus.get(name).map(Vec::as_slice)
    }

    pub fn entry_script(&self) -> Option<&Script> {
        self.script(&self.entry)
    }

    pub fn script_names(&self) -> impl Iterator<Item = &str> {
        self.scripts.keys().map(String::as_str)
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// A fresh trigger policy for one run of this story
    pub fn scene_policy(&self) -> ScenePolicy {
        ScenePolicy::new(self.triggers.clone())
    }

    fn all_lines(&self) -> impl Iterator<Item = &DialogueLine> {
        self.scripts.values().flat_map(|script| script.lines().iter())
    }

    /// Checkpoint of the first authored line whose text is exactly `text`
    pub fn checkpoint_for_text(&self, text: &str) -> Option<CheckpointId> {
        self.all_lines()
            .find(|line| line.text == text && line.checkpoint.is_some())
            .and_then(|line| line.checkpoint.clone())
    }

    /// One-line script replaying a saved line
    ///
    /// The checkpoint is recovered from the story so triggers attached to
    /// the saved line (such as a menu) still fire after resuming.
    pub fn resume_script(&self, snapshot: &ProgressSnapshot) -> Script {
        let checkpoint = self.checkpoint_for_text(&snapshot.line_text);
        snapshot
            .resume_script()
            .into_iter()
            .map(|line| DialogueLine { checkpoint: checkpoint.clone(), ..line })
            .collect()
    }

    pub fn summary(&self) -> StorySummary {
        let mut checkpoints: Vec<&CheckpointId> =
            self.all_lines().filter_map(|l| l.checkpoint.as_ref()).collect();
        checkpoints.sort();
        checkpoints.dedup();

        StorySummary {
            scripts: self.scripts.len(),
            lines: self.scripts.values().map(Script::len).sum(),
            menus: self.menus.len(),
            choices: self.menus.values().map(Vec::len).sum(),
            triggers: self.triggers.len(),
            checkpoints: checkpoints.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story() -> Story {
        let mut story = Story {
            entry: "prologue".into(),
            ..Default::default()
        };
        story.scripts.insert(
            "prologue".into(),
            Script::new(vec![
                DialogueLine::new("Ang dilim.", "???").at("darkness"),
                DialogueLine::new("Rub eyes.", "???"),
            ]),
        );
        story
    }

    #[test]
    fn resume_script_recovers_checkpoint() {
        let story = story();
        let script = story.resume_script(&ProgressSnapshot::new("bgs.png", "???", "Ang dilim."));
        assert_eq!(script.len(), 1);
        assert_eq!(
            script.lines()[0].checkpoint,
            Some(CheckpointId::new("darkness"))
        );
    }

    #[test]
    fn resume_script_of_unknown_text_has_no_checkpoint() {
        let story = story();
        let script = story.resume_script(&ProgressSnapshot::new("", "???", "edited line"));
        assert_eq!(script.lines()[0].checkpoint, None);
        assert_eq!(script.lines()[0].text, "edited line");
    }

    #[test]
    fn summary_counts_lines_and_checkpoints() {
        let summary = story().summary();
        assert_eq!(summary.scripts, 1);
        assert_eq!(summary.lines, 2);
        assert_eq!(summary.checkpoints, 1);
    }
}
