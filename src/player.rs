//! Frame-driven player session
//!
//! [`PlayerSession`] wires the dialogue queue, choice menu, scene triggers,
//! backdrop and save ledger together. The host calls
//! [`PlayerSession::frame`] once per frame with the input gathered since the
//! previous frame and the elapsed time, lending it the audio sink and the
//! progress store for the duration of the call.

use std::collections::VecDeque;

use crate::audio::AudioSink;
use crate::backdrop::Backdrop;
use crate::choice::ChoiceMenu;
use crate::config::GameConfig;
use crate::dialogue::{Advance, DialogueQueue};
use crate::storage::ProgressStore;
use crate::story::Story;
use crate::triggers::ScenePolicy;
use crate::types::{
    ChoiceTarget, InputEvent, Key, Point, ProgressSnapshot, Rect, SceneEffect, Speed, Viewport,
};

const BOX_WIDTH: f32 = 900.0;
const BOX_HEIGHT: f32 = 150.0;
const BOX_BOTTOM_MARGIN: f32 = 30.0;
const PANEL_GAP: f32 = 10.0;
const PANEL_WIDTH: f32 = 80.0;
const BUTTON_WIDTH: f32 = 60.0;
const BUTTON_HEIGHT: f32 = 30.0;

/// Screen geometry of the dialogue box and its side panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialogueLayout {
    pub text_box: Rect,
    pub panel: Rect,
    pub auto_button: Rect,
    pub back_button: Rect,
}

impl DialogueLayout {
    pub fn for_viewport(viewport: Viewport) -> Self {
        let x = (viewport.width - BOX_WIDTH) / 2.0;
        let y = viewport.height - BOX_HEIGHT - BOX_BOTTOM_MARGIN;
        let text_box = Rect::new(x, y, BOX_WIDTH, BOX_HEIGHT);
        let panel = Rect::new(x + BOX_WIDTH + PANEL_GAP, y, PANEL_WIDTH, BOX_HEIGHT);
        let auto_button = Rect::new(panel.x + 10.0, panel.y + 10.0, BUTTON_WIDTH, BUTTON_HEIGHT);
        let back_button = Rect::new(
            panel.x + 10.0,
            auto_button.y + 40.0,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        );
        Self {
            text_box,
            panel,
            auto_button,
            back_button,
        }
    }
}

/// What happened during one [`PlayerSession::frame`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Scene effects applied this frame, in order
    pub effects: Vec<SceneEffect>,
    /// Chapter card blocking the screen after this frame
    pub chapter_card: Option<String>,
    /// The player asked to leave for the title screen
    pub back_to_title: bool,
    /// A snapshot was written to the store
    pub saved: bool,
    /// Nothing is left to show
    pub finished: bool,
}

/// One run through a story
pub struct PlayerSession {
    story: Story,
    config: GameConfig,
    layout: DialogueLayout,
    dialogue: DialogueQueue,
    choices: ChoiceMenu,
    policy: ScenePolicy,
    backdrop: Backdrop,
    cards: VecDeque<String>,
    opening: Vec<SceneEffect>,
    last_saved: Option<ProgressSnapshot>,
}

impl PlayerSession {
    fn with_story(story: Story, config: GameConfig) -> Self {
        let layout = DialogueLayout::for_viewport(config.viewport);
        let dialogue = DialogueQueue::from_config(&config.text);
        let policy = story.scene_policy();
        Self {
            story,
            config,
            layout,
            dialogue,
            choices: ChoiceMenu::new(),
            policy,
            backdrop: Backdrop::new(),
            cards: VecDeque::new(),
            opening: Vec::new(),
            last_saved: None,
        }
    }

    /// Start the story from its entry script
    pub fn new_game(story: Story, config: GameConfig) -> Self {
        let mut session = Self::with_story(story, config);
        if let Some(background) = session.story.opening_background.clone() {
            session.opening.push(SceneEffect::SwapBackground(background));
        }
        if let Some(music) = session.story.opening_music.clone() {
            session.opening.push(SceneEffect::PlayMusic(music));
        }
        let entry = session.story.entry.clone();
        session.opening.push(SceneEffect::StartScript(entry));
        session.cards.extend(session.story.intro.iter().cloned());
        log::info!("new game");
        session
    }

    /// Continue from a saved snapshot by replaying its line
    pub fn resume(story: Story, config: GameConfig, snapshot: &ProgressSnapshot) -> Self {
        let mut session = Self::with_story(story, config);
        if !snapshot.background_id.is_empty() {
            session
                .opening
                .push(SceneEffect::SwapBackground(snapshot.background_id.clone()));
        }
        if let Some(music) = session.story.opening_music.clone() {
            session.opening.push(SceneEffect::PlayMusic(music));
        }
        let script = session.story.resume_script(snapshot);
        session.dialogue.start(script);
        session.last_saved = Some(snapshot.clone());
        log::info!("resuming at \"{}\"", snapshot.line_text);
        session
    }

    /// Run one frame
    pub fn frame(
        &mut self,
        events: &[InputEvent],
        elapsed: f32,
        audio: &mut dyn AudioSink,
        store: &mut dyn ProgressStore,
    ) -> FrameReport {
        let mut report = FrameReport::default();

        for effect in std::mem::take(&mut self.opening) {
            self.apply(&effect, audio);
            report.effects.push(effect);
        }

        for event in events {
            self.handle_event(*event, &mut report);
        }

        self.backdrop.update(elapsed);
        if self.cards.is_empty() {
            if let Some(outcome) = self.dialogue.tick(elapsed) {
                log::debug!("auto advance: {outcome:?}");
            }
        }

        if self.cards.is_empty() && self.dialogue.is_visible() {
            let effects = match self.dialogue.current_line() {
                Some(line) => self.policy.evaluate(line),
                None => Vec::new(),
            };
            for effect in effects {
                self.apply(&effect, audio);
                report.effects.push(effect);
            }
        }

        if self.dialogue.is_visible() {
            report.saved = self.autosave(store);
        }

        report.chapter_card = self.cards.front().cloned();
        report.finished = self.is_finished();
        report
    }

    fn handle_event(&mut self, event: InputEvent, report: &mut FrameReport) {
        if let Some(card) = self.cards.pop_front() {
            log::debug!("dismissed chapter card \"{card}\"");
            return;
        }

        if event == InputEvent::KeyPressed(Key::Escape) {
            report.back_to_title = true;
            return;
        }

        if self.choices.is_visible() {
            if let InputEvent::PointerPressed(position) = event {
                if let Some(target) = self.choices.handle_pointer(position) {
                    self.follow(target);
                }
            }
            return;
        }

        match event {
            InputEvent::PointerPressed(position) => self.handle_pointer(position, report),
            InputEvent::KeyPressed(Key::Space) => {
                self.dialogue.advance();
            }
            InputEvent::KeyPressed(_) => {}
        }
    }

    fn handle_pointer(&mut self, position: Point, report: &mut FrameReport) {
        if !self.dialogue.is_visible() {
            return;
        }
        if self.layout.auto_button.contains(position) {
            let enabled = self.dialogue.toggle_auto_advance();
            log::debug!("auto advance {}", if enabled { "on" } else { "off" });
            return;
        }
        if self.layout.back_button.contains(position) {
            self.dialogue.hide();
            report.back_to_title = true;
            return;
        }
        if self.dialogue.advance() == Advance::Finished {
            log::debug!("script finished");
        }
    }

    fn apply(&mut self, effect: &SceneEffect, audio: &mut dyn AudioSink) {
        match effect {
            SceneEffect::SwapBackground(id) => self.backdrop.set(id.clone()),
            SceneEffect::FadeOut(seconds) => self.backdrop.start_fade_out(*seconds),
            SceneEffect::PlayCue(name) => audio.play_cue(name),
            SceneEffect::PlayMusic(name) => audio.play_music(name),
            SceneEffect::StopMusic => audio.stop_music(),
            SceneEffect::ChapterCard(title) => {
                log::info!("chapter card \"{title}\"");
                self.cards.push_back(title.clone());
            }
            SceneEffect::StartScript(name) => self.start_script(name),
            SceneEffect::PresentMenu(name) => match self.story.menu(name) {
                Some(options) => {
                    let options = options.to_vec();
                    self.choices.present(options, self.config.viewport);
                }
                None => log::warn!("menu '{name}' is not defined"),
            },
        }
    }

    fn start_script(&mut self, name: &str) {
        match self.story.script(name) {
            Some(script) => {
                log::info!("script -> {name}");
                self.dialogue.start(script.clone());
            }
            None => log::warn!("script '{name}' is not defined"),
        }
    }

    fn follow(&mut self, target: ChoiceTarget) {
        match target {
            ChoiceTarget::Script(name) => self.start_script(&name),
        }
    }

    fn autosave(&mut self, store: &mut dyn ProgressStore) -> bool {
        if !self.config.save.autosave {
            return false;
        }
        let Some(snapshot) = self.snapshot() else {
            return false;
        };
        if self.last_saved.as_ref() == Some(&snapshot) {
            return false;
        }
        match store.save(&snapshot) {
            Ok(()) => {
                self.last_saved = Some(snapshot);
                true
            }
            Err(err) => {
                log::warn!("autosave failed: {err}");
                false
            }
        }
    }

    /// Pick a visible choice by its position, as the keyboard host does
    pub fn choose(&mut self, index: usize) -> bool {
        match self.choices.select(index) {
            Some(target) => {
                self.follow(target);
                true
            }
            None => false,
        }
    }

    /// Snapshot of what is on screen, None while no line is shown
    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        let line = self.dialogue.current_line()?;
        Some(ProgressSnapshot::new(
            self.backdrop.current(),
            line.speaker.clone(),
            line.text.clone(),
        ))
    }

    pub fn toggle_auto_advance(&mut self) -> bool {
        self.dialogue.toggle_auto_advance()
    }

    pub fn cycle_speed(&mut self) -> Speed {
        let speed = self.dialogue.speed().cycle();
        self.dialogue.set_speed(speed);
        speed
    }

    pub fn is_finished(&self) -> bool {
        self.opening.is_empty()
            && self.cards.is_empty()
            && !self.dialogue.is_visible()
            && !self.choices.is_visible()
    }

    pub fn chapter_card(&self) -> Option<&str> {
        self.cards.front().map(String::as_str)
    }

    pub fn dialogue(&self) -> &DialogueQueue {
        &self.dialogue
    }

    pub fn choices(&self) -> &ChoiceMenu {
        &self.choices
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn layout(&self) -> &DialogueLayout {
        &self.layout
    }

    pub fn policy(&self) -> &ScenePolicy {
        &self.policy
    }

    pub fn story(&self) -> &Story {
        &self.story
    }
}
