//! Scene side effects fired by triggers

use serde::{Deserialize, Serialize};

/// A side effect drawn from the fixed scene vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "args")]
pub enum SceneEffect {
    /// Replace the background image
    SwapBackground(String),
    /// Fade the background to black over the given seconds
    FadeOut(f32),
    /// Play a named sound cue once
    PlayCue(String),
    /// Start looping a background track
    PlayMusic(String),
    /// Stop the background track
    StopMusic,
    /// Show a blocking chapter title card
    ChapterCard(String),
    /// Replace the active script
    StartScript(String),
    /// Present the named choice menu
    PresentMenu(String),
}
