//! # biringan
//!
//! The playable core of the visual novel "Escape from Biringan": a
//! typewriter dialogue queue, one-shot choice menus, checkpoint-driven
//! scene triggers and a single-slot save ledger, assembled into a
//! frame-driven [`PlayerSession`].
//!
//! Stories are written as Markdown command documents and parsed with
//! [`parse_story`]. The host owns the window (or terminal), the audio sink
//! and the progress store, and calls [`PlayerSession::frame`] once per
//! frame.
//!
//! ## Quick Start
//!
//! ```rust
//! use biringan::{parse_story, GameConfig, InputEvent, Key, MemoryStore, NullAudio, PlayerSession};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let markdown = r#"
//! [START script=intro background=bgs.png]
//!
//! [SCRIPT name=intro]
//! [SAY speaker=???]
//! Dito ba talaga ang daan?
//! "#;
//! let story = parse_story(markdown)?;
//! let mut session = PlayerSession::new_game(story, GameConfig::default());
//! let mut audio = NullAudio;
//! let mut store = MemoryStore::new();
//!
//! // One second at 50 characters per second reveals the whole line
//! session.frame(&[], 1.0, &mut audio, &mut store);
//! assert_eq!(session.dialogue().revealed_text(), "Dito ba talaga ang daan?");
//!
//! // Advancing past the last line ends the story
//! let report = session.frame(&[InputEvent::KeyPressed(Key::Space)], 0.0, &mut audio, &mut store);
//! assert!(report.finished);
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod backdrop;
pub mod choice;
pub mod cli;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod parser;
pub mod player;
pub mod resolve;
pub mod storage;
pub mod story;
pub mod triggers;
pub mod types;

pub use audio::{AudioSink, NullAudio, RecordingAudio};
pub use backdrop::Backdrop;
pub use choice::ChoiceMenu;
pub use config::GameConfig;
pub use dialogue::{Advance, DialogueQueue};
pub use error::{ConfigError, StorageError, StoryError};
pub use parser::parse as parse_story;
pub use player::{FrameReport, PlayerSession};
pub use resolve::{BasicResolver, Resolver};
pub use storage::{MemoryStore, ProgressStore, SaveLedger};
pub use story::Story;
pub use triggers::ScenePolicy;
pub use types::{
    CheckpointId, Choice, ChoiceTarget, DialogueLine, DialoguePhase, DisplayState, InputEvent,
    Key, Point, ProgressSnapshot, Rect, SceneEffect, Script, Speed, Viewport,
};
