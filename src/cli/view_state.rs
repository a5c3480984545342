//! View state management for the terminal player
//!
//! Tracks what the terminal has already announced (background, music,
//! chapter card) so each frame only prints what changed.

use crate::player::FrameReport;
use crate::types::SceneEffect;

/// Clear the terminal screen
pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");

    // Fallback when the terminal cannot be flushed
    if std::io::Write::flush(&mut std::io::stdout()).is_err() {
        for _ in 0..50 {
            println!();
        }
    }
}

/// What the terminal currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub background: Option<String>,
    pub music: Option<String>,
    pub chapter_card: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a frame report into the view and return what to print
    pub fn apply_report(&mut self, report: &FrameReport) -> RenderDelta {
        let mut delta = RenderDelta::default();

        for effect in &report.effects {
            match effect {
                SceneEffect::SwapBackground(id) => {
                    if self.background.as_ref() != Some(id) {
                        delta.effects_added.push(format!("Background: {id}"));
                        self.background = Some(id.clone());
                    }
                }
                SceneEffect::FadeOut(seconds) => {
                    delta.effects_added.push(format!("FadeOut: {seconds}s"));
                }
                SceneEffect::PlayCue(name) => {
                    delta.effects_added.push(format!("Cue: {name}"));
                }
                SceneEffect::PlayMusic(name) => {
                    if self.music.as_ref() != Some(name) {
                        delta.effects_added.push(format!("Music: {name}"));
                        self.music = Some(name.clone());
                    }
                }
                SceneEffect::StopMusic => {
                    if self.music.take().is_some() {
                        delta.effects_added.push("StopMusic".to_string());
                    }
                }
                // Visible through the dialogue and choices themselves
                SceneEffect::ChapterCard(_)
                | SceneEffect::StartScript(_)
                | SceneEffect::PresentMenu(_) => {}
            }
        }

        if report.chapter_card != self.chapter_card {
            delta.chapter_card = report.chapter_card.clone();
            self.chapter_card = report.chapter_card.clone();
        }

        delta
    }
}

/// What needs to be printed for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderDelta {
    /// Chapter card that just came up
    pub chapter_card: Option<String>,
    /// Effects that were added (human-readable strings)
    pub effects_added: Vec<String>,
}

impl RenderDelta {
    pub fn is_empty(&self) -> bool {
        self.chapter_card.is_none() && self.effects_added.is_empty()
    }
}

/// Render a delta to the console
pub fn render_delta(delta: &RenderDelta) {
    if !delta.effects_added.is_empty() {
        println!("[Effects]");
        for effect in &delta.effects_added {
            println!("  {}", effect);
        }
        println!();
    }

    if let Some(card) = &delta.chapter_card {
        clear_screen();
        println!();
        if card.contains('\n') {
            for line in card.lines() {
                println!("  {line}");
            }
        } else {
            println!("=== {} ===", card);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(effects: Vec<SceneEffect>) -> FrameReport {
        FrameReport {
            effects,
            ..Default::default()
        }
    }

    #[test]
    fn test_background_change() {
        let mut view = ViewState::new();
        let delta = view.apply_report(&report(vec![SceneEffect::SwapBackground(
            "bgs.png".into(),
        )]));

        assert_eq!(delta.effects_added, vec!["Background: bgs.png".to_string()]);
        assert_eq!(view.background.as_deref(), Some("bgs.png"));
    }

    #[test]
    fn test_music_no_change_on_same_track() {
        let mut view = ViewState::new();
        view.music = Some("BeginM.ogg".to_string());

        let delta = view.apply_report(&report(vec![SceneEffect::PlayMusic(
            "BeginM.ogg".into(),
        )]));

        assert!(delta.is_empty());
    }

    #[test]
    fn test_cue_always_printed() {
        let mut view = ViewState::new();
        let cue = report(vec![SceneEffect::PlayCue("ECH1".into())]);

        assert_eq!(view.apply_report(&cue).effects_added, vec!["Cue: ECH1"]);
        assert_eq!(view.apply_report(&cue).effects_added, vec!["Cue: ECH1"]);
    }

    #[test]
    fn test_chapter_card_printed_once() {
        let mut view = ViewState::new();
        let mut frame = report(Vec::new());
        frame.chapter_card = Some("Chapter 2: Biringan".into());

        let first = view.apply_report(&frame);
        assert_eq!(first.chapter_card.as_deref(), Some("Chapter 2: Biringan"));

        let second = view.apply_report(&frame);
        assert!(second.is_empty());
    }

    #[test]
    fn test_stop_music_only_when_playing() {
        let mut view = ViewState::new();
        assert!(view.apply_report(&report(vec![SceneEffect::StopMusic])).is_empty());

        view.music = Some("BeginM.ogg".into());
        let delta = view.apply_report(&report(vec![SceneEffect::StopMusic]));
        assert_eq!(delta.effects_added, vec!["StopMusic"]);
        assert_eq!(view.music, None);
    }
}
