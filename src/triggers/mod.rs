//! One-shot scene triggers
//!
//! Triggers are stored in declaration order and addressed by index. The
//! policy keeps a single set of fired indices, so a trigger can fire at
//! most once per run no matter how often its line comes back.

use std::collections::HashSet;

use crate::types::{CheckpointId, DialogueLine, SceneEffect};

/// What a trigger listens for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKey {
    /// A checkpoint id attached to a line
    Checkpoint(CheckpointId),
    /// The exact text of a line
    ///
    /// Breaks silently when the prose is edited; prefer checkpoints.
    LineText(String),
}

impl TriggerKey {
    pub fn matches(&self, line: &DialogueLine) -> bool {
        match self {
            TriggerKey::Checkpoint(id) => line.checkpoint.as_ref() == Some(id),
            TriggerKey::LineText(text) => line.text == *text,
        }
    }
}

/// A key and the effects it fires
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub key: TriggerKey,
    pub effects: Vec<SceneEffect>,
}

impl Trigger {
    pub fn on_checkpoint(id: impl Into<CheckpointId>, effects: Vec<SceneEffect>) -> Self {
        Self {
            key: TriggerKey::Checkpoint(id.into()),
            effects,
        }
    }

    pub fn on_text(text: impl Into<String>, effects: Vec<SceneEffect>) -> Self {
        Self {
            key: TriggerKey::LineText(text.into()),
            effects,
        }
    }
}

/// Index of a trigger inside its policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(usize);

impl TriggerId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Maps the current line to the effects that should fire now
#[derive(Debug, Clone, Default)]
pub struct ScenePolicy {
    triggers: Vec<Trigger>,
    fired: HashSet<TriggerId>,
}

impl ScenePolicy {
    pub fn new(triggers: Vec<Trigger>) -> Self {
        let text_keyed = triggers
            .iter()
            .filter(|t| matches!(t.key, TriggerKey::LineText(_)))
            .count();
        if text_keyed > 0 {
            log::warn!(
                "{} trigger(s) are keyed on exact line text and will break if the prose changes",
                text_keyed
            );
        }
        Self {
            triggers,
            fired: HashSet::new(),
        }
    }

    /// Fire every unfired trigger matching `line`, in declaration order
    pub fn evaluate(&mut self, line: &DialogueLine) -> Vec<SceneEffect> {
        let mut effects = Vec::new();
        for (index, trigger) in self.triggers.iter().enumerate() {
            let id = TriggerId(index);
            if self.fired.contains(&id) || !trigger.key.matches(line) {
                continue;
            }
            log::debug!("trigger {} fired on {:?}", index, trigger.key);
            self.fired.insert(id);
            effects.extend(trigger.effects.iter().cloned());
        }
        effects
    }

    pub fn has_fired(&self, id: TriggerId) -> bool {
        self.fired.contains(&id)
    }

    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }

    /// Forget fired triggers, for a fresh run
    pub fn reset(&mut self) {
        self.fired.clear();
    }

    pub fn triggers(&self) -> impl Iterator<Item = (TriggerId, &Trigger)> {
        self.triggers
            .iter()
            .enumerate()
            .map(|(index, trigger)| (TriggerId(index), trigger))
    }
}
