//! Core types for the biringan library
//!
//! - Line/Script: authored dialogue
//! - DisplayState: typewriter state of the dialogue box
//! - Choice: menu options and their targets
//! - SceneEffect: side effects fired by triggers
//! - ProgressSnapshot: the persisted resume point
//! - InputEvent: per-frame input from the host

pub mod choice;
pub mod display;
pub mod effect;
pub mod event;
pub mod geometry;
pub mod line;
pub mod snapshot;

pub use choice::{Choice, ChoiceTarget};
pub use display::{DialoguePhase, DisplayState, Speed};
pub use effect::SceneEffect;
pub use event::{InputEvent, Key};
pub use geometry::{Point, Rect, Viewport};
pub use line::{CheckpointId, DialogueLine, Script};
pub use snapshot::ProgressSnapshot;
