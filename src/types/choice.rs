//! Choice options and their targets

use serde::{Deserialize, Serialize};

/// Where a selected choice leads; resolved by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceTarget {
    /// Start the named script
    Script(String),
}

/// One labelled option of a menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub target: ChoiceTarget,
}

impl Choice {
    pub fn to_script(label: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: ChoiceTarget::Script(script.into()),
        }
    }
}
