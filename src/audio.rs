//! Audio output
//!
//! The host owns exactly one sink for the whole process and lends it to
//! the player each frame. Playback is best-effort: a sink that cannot
//! find an asset logs it and carries on.

use crate::resolve::Resolver;

/// Fire-and-forget audio output
pub trait AudioSink {
    /// Play a one-shot cue
    fn play_cue(&mut self, name: &str);

    /// Loop a background track; asking for the track already playing does nothing
    fn play_music(&mut self, name: &str);

    fn stop_music(&mut self);
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_cue(&mut self, _name: &str) {}
    fn play_music(&mut self, _name: &str) {}
    fn stop_music(&mut self) {}
}

/// Something the [`RecordingAudio`] sink was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCall {
    Cue(String),
    Music(String),
    Stop,
}

/// Remembers every call, with the same restart rules as a real mixer
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
    current_music: Option<String>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_deref()
    }

    pub fn cues(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                AudioCall::Cue(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl AudioSink for RecordingAudio {
    fn play_cue(&mut self, name: &str) {
        self.calls.push(AudioCall::Cue(name.to_string()));
    }

    fn play_music(&mut self, name: &str) {
        if self.current_music.as_deref() == Some(name) {
            return;
        }
        self.current_music = Some(name.to_string());
        self.calls.push(AudioCall::Music(name.to_string()));
    }

    fn stop_music(&mut self) {
        if self.current_music.take().is_some() {
            self.calls.push(AudioCall::Stop);
        }
    }
}

/// Wraps another sink and skips assets the resolver cannot find
pub struct ResolvedAudio<S, R> {
    inner: S,
    resolver: R,
}

impl<S: AudioSink, R: Resolver> ResolvedAudio<S, R> {
    pub fn new(inner: S, resolver: R) -> Self {
        Self { inner, resolver }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn available(&self, name: &str) -> bool {
        if self.resolver.resolve_sound(name).is_some() {
            return true;
        }
        log::warn!("sound '{name}' not found, skipping");
        false
    }
}

impl<S: AudioSink, R: Resolver> AudioSink for ResolvedAudio<S, R> {
    fn play_cue(&mut self, name: &str) {
        if self.available(name) {
            self.inner.play_cue(name);
        }
    }

    fn play_music(&mut self, name: &str) {
        if self.available(name) {
            self.inner.play_music(name);
        }
    }

    fn stop_music(&mut self) {
        self.inner.stop_music();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct Only(&'static str);

    impl Resolver for Only {
        fn resolve_sound(&self, logical: &str) -> Option<PathBuf> {
            (logical == self.0).then(|| PathBuf::from(logical))
        }
    }

    #[test]
    fn same_track_is_not_restarted() {
        let mut audio = RecordingAudio::new();
        audio.play_music("BeginM.ogg");
        audio.play_music("BeginM.ogg");
        audio.stop_music();
        audio.stop_music();
        assert_eq!(
            audio.calls,
            vec![AudioCall::Music("BeginM.ogg".into()), AudioCall::Stop]
        );
    }

    #[test]
    fn missing_sounds_are_skipped() {
        let mut audio = ResolvedAudio::new(RecordingAudio::new(), Only("ECH1"));
        audio.play_cue("ECH1");
        audio.play_cue("DUM");
        audio.play_music("BeginM.ogg");
        assert_eq!(audio.inner().calls, vec![AudioCall::Cue("ECH1".into())]);
    }
}
