//! Background image state and fade-to-black

/// Tracks the current background and an optional fade-out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Backdrop {
    current: Option<String>,
    fade: Option<Fade>,
    hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    duration: f32,
    elapsed: f32,
}

impl Backdrop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `id`, cancelling any fade in progress
    pub fn set(&mut self, id: impl Into<String>) {
        let id = id.into();
        log::info!("background -> {id}");
        self.current = Some(id);
        self.fade = None;
        self.hidden = false;
    }

    /// Identifier of the background on screen, empty when none
    pub fn current(&self) -> &str {
        self.current.as_deref().unwrap_or("")
    }

    /// Start fading the background to black over `duration` seconds
    pub fn start_fade_out(&mut self, duration: f32) {
        if duration <= 0.0 {
            self.fade = None;
            self.hidden = true;
            return;
        }
        self.fade = Some(Fade {
            duration,
            elapsed: 0.0,
        });
        self.hidden = false;
    }

    pub fn update(&mut self, elapsed: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        fade.elapsed += elapsed.max(0.0);
        if fade.elapsed >= fade.duration {
            self.fade = None;
            self.hidden = true;
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Fully faded out; only black is drawn
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Opacity of the black overlay, 0.0 to 1.0
    pub fn overlay_opacity(&self) -> f32 {
        match self.fade {
            Some(fade) => (fade.elapsed / fade.duration).min(1.0),
            None if self.hidden => 1.0,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_records_current_background() {
        let mut backdrop = Backdrop::new();
        assert_eq!(backdrop.current(), "");
        backdrop.set("bgs.png");
        assert_eq!(backdrop.current(), "bgs.png");
    }

    #[test]
    fn fade_progresses_and_hides() {
        let mut backdrop = Backdrop::new();
        backdrop.set("bgs.png");
        backdrop.start_fade_out(2.0);

        backdrop.update(0.5);
        assert!(backdrop.is_fading());
        assert_eq!(backdrop.overlay_opacity(), 0.25);

        backdrop.update(1.5);
        assert!(!backdrop.is_fading());
        assert!(backdrop.is_hidden());
        assert_eq!(backdrop.overlay_opacity(), 1.0);
    }

    #[test]
    fn new_background_clears_fade() {
        let mut backdrop = Backdrop::new();
        backdrop.start_fade_out(0.0);
        assert!(backdrop.is_hidden());
        backdrop.set("Biringan2.jpg");
        assert!(!backdrop.is_hidden());
        assert_eq!(backdrop.overlay_opacity(), 0.0);
    }
}
