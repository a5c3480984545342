//! Typewriter display state

use serde::{Deserialize, Serialize};

/// What the dialogue box currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Number of characters of the current line already revealed
    pub revealed_len: usize,
    /// Whether the whole line is on screen
    pub typing_complete: bool,
    /// Whether the dialogue box is drawn at all
    pub box_visible: bool,
}

impl DisplayState {
    /// State right after a new line is loaded
    pub fn fresh() -> Self {
        Self {
            revealed_len: 0,
            typing_complete: false,
            box_visible: true,
        }
    }

    /// State with nothing to show
    pub fn hidden() -> Self {
        Self {
            revealed_len: 0,
            typing_complete: false,
            box_visible: false,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::hidden()
    }
}

/// Phase of the dialogue queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialoguePhase {
    /// No line loaded, box hidden
    Empty,
    /// Characters are still being revealed
    Revealing,
    /// The whole line is visible, waiting for input
    Revealed,
}

/// Typewriter speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    #[default]
    Normal,
    Fast,
    Fastest,
}

impl Speed {
    pub fn multiplier(self) -> f32 {
        match self {
            Speed::Normal => 1.0,
            Speed::Fast => 2.0,
            Speed::Fastest => 3.0,
        }
    }

    /// Next speed in the 1x → 2x → 3x → 1x cycle
    pub fn cycle(self) -> Self {
        match self {
            Speed::Normal => Speed::Fast,
            Speed::Fast => Speed::Fastest,
            Speed::Fastest => Speed::Normal,
        }
    }

    /// Parse "1", "1x", "normal" and friends
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "1x" | "normal" => Some(Speed::Normal),
            "2" | "2x" | "fast" => Some(Speed::Fast),
            "3" | "3x" | "fastest" => Some(Speed::Fastest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_cycles_through_all_multipliers() {
        let mut speed = Speed::Normal;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(speed.multiplier());
            speed = speed.cycle();
        }
        assert_eq!(seen, vec![1.0, 2.0, 3.0]);
        assert_eq!(speed, Speed::Normal);
    }

    #[test]
    fn speed_parse_accepts_multiplier_forms() {
        assert_eq!(Speed::parse("2x"), Some(Speed::Fast));
        assert_eq!(Speed::parse(" FASTEST "), Some(Speed::Fastest));
        assert_eq!(Speed::parse("4x"), None);
    }
}
