//! Terminal player
//!
//! Runs the title menu and drives a [`PlayerSession`] at a fixed frame
//! rate, printing dialogue as it is revealed. Keyboard commands are read
//! a line at a time: polled while text types or auto mode runs, awaited
//! when the session is waiting on the player.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::{
    audio::{NullAudio, ResolvedAudio},
    cli::console::{Console, Poll},
    cli::view_state::{clear_screen, render_delta, ViewState},
    config::GameConfig,
    dialogue::DialogueQueue,
    player::PlayerSession,
    resolve::{BasicResolver, Resolver},
    storage::{ProgressStore, SaveLedger},
    story::Story,
    types::{DialoguePhase, InputEvent, Key, SceneEffect},
};

const FRAME_SECONDS: f32 = 1.0 / 60.0;

/// Options for `biringan play`
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub debug: bool,
    pub config: GameConfig,
}

/// How a play-through ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Title,
    Finished,
    Quit,
}

/// Run the player mode
pub fn run_play(markdown: &str, options: PlayOptions) -> anyhow::Result<()> {
    let story = crate::parser::parse(markdown)?;
    let config = options.config;
    let resolver = BasicResolver::new(&config.assets.dir);
    let mut audio = ResolvedAudio::new(NullAudio, BasicResolver::new(&config.assets.dir));
    let mut ledger = SaveLedger::new(&config.save.path);
    let title = story.title.clone().unwrap_or_else(|| "Biringan".to_string());
    let console = Console::spawn()?;

    loop {
        clear_screen();
        println!("=== {} ===", title);
        println!();
        println!("  1. New game");
        println!("  2. Load");
        println!("  3. About");
        println!("  4. Quit");
        println!();

        let Some(input) = console.get_input("Select (1-4):")? else {
            return Ok(());
        };

        let session = match input.as_str() {
            "1" => PlayerSession::new_game(story.clone(), config.clone()),
            "2" => match ledger.load() {
                Some(snapshot) => PlayerSession::resume(story.clone(), config.clone(), &snapshot),
                None => {
                    println!("No saved game found.");
                    if !console.wait_input() {
                        return Ok(());
                    }
                    continue;
                }
            },
            "3" => {
                show_about(&story);
                if !console.wait_input() {
                    return Ok(());
                }
                continue;
            }
            "4" | "q" => return Ok(()),
            _ => continue,
        };

        let outcome = play_session(
            session,
            &console,
            &resolver,
            &mut audio,
            &mut ledger,
            options.debug,
        )?;
        log::debug!("play-through ended: {outcome:?}");
        match outcome {
            Outcome::Quit => {
                println!("Goodbye!");
                return Ok(());
            }
            Outcome::Finished => {
                println!();
                println!("== THE END ==");
                if !console.wait_input() {
                    return Ok(());
                }
            }
            Outcome::Title => {}
        }
    }
}

fn show_about(story: &Story) {
    let summary = story.summary();
    println!();
    println!("A visual novel about a trip through the hidden city of Biringan.");
    println!(
        "{} scripts, {} lines, {} menus.",
        summary.scripts, summary.lines, summary.menus
    );
    println!();
    println!("Controls:");
    println!("  Enter: next");
    println!("  1-9:   select choice");
    println!("  a:     toggle auto");
    println!("  s:     cycle text speed");
    println!("  b:     back to title");
    println!("  q:     quit");
}

fn play_session(
    mut session: PlayerSession,
    console: &Console,
    resolver: &impl Resolver,
    audio: &mut ResolvedAudio<NullAudio, BasicResolver>,
    ledger: &mut SaveLedger,
    debug: bool,
) -> anyhow::Result<Outcome> {
    let mut view = ViewState::new();
    let mut typewriter = Typewriter::default();
    let mut events: Vec<InputEvent> = Vec::new();
    let mut menu_shown = false;

    loop {
        let report = session.frame(&events, FRAME_SECONDS, audio, ledger);
        events.clear();

        for effect in &report.effects {
            if let SceneEffect::SwapBackground(id) = effect {
                if resolver.resolve_image(id).is_none() {
                    log::warn!("image '{id}' not found");
                }
            }
        }
        if debug && !report.effects.is_empty() {
            println!("[debug] effects={}", serde_json::to_string(&report.effects)?);
        }

        let delta = view.apply_report(&report);
        if delta.chapter_card.is_some() {
            typewriter.reset();
        }
        render_delta(&delta);

        if report.back_to_title {
            return Ok(Outcome::Title);
        }
        if report.finished {
            typewriter.finish();
            return Ok(Outcome::Finished);
        }

        if report.chapter_card.is_some() {
            match console.get_input("")? {
                Some(input) if input == "q" => return Ok(Outcome::Quit),
                Some(_) => events.push(InputEvent::KeyPressed(Key::Space)),
                None => return Ok(Outcome::Quit),
            }
            continue;
        }

        typewriter.show(session.dialogue())?;

        if session.choices().is_visible() {
            if !menu_shown {
                typewriter.finish();
                println!("--- Choice ---");
                for (i, region) in session.choices().regions().iter().enumerate() {
                    println!("{}. {}", i + 1, region.choice.label);
                }
                println!();
                menu_shown = true;
            }

            let Some(input) = console.get_input("Select (1-9):")? else {
                return Ok(Outcome::Quit);
            };
            match input.as_str() {
                "q" => return Ok(Outcome::Quit),
                "b" => return Ok(Outcome::Title),
                _ => match input.parse::<usize>() {
                    Ok(n) if n > 0 && session.choose(n - 1) => menu_shown = false,
                    _ => println!("Invalid choice."),
                },
            }
            continue;
        }
        menu_shown = false;

        let busy = session.dialogue().phase() == DialoguePhase::Revealing
            || session.dialogue().auto_advance();
        let input = if busy {
            match console.poll() {
                Poll::Line(input) => input,
                // a closed stdin is noticed by the next blocking read
                Poll::Empty | Poll::Closed => {
                    thread::sleep(Duration::from_secs_f32(FRAME_SECONDS));
                    continue;
                }
            }
        } else {
            typewriter.finish();
            match console.get_input("")? {
                Some(input) => input,
                None => return Ok(Outcome::Quit),
            }
        };

        if let Some(outcome) = dialogue_command(&mut session, &input, &mut events) {
            return Ok(outcome);
        }
    }
}

/// Apply a command typed while dialogue is on screen
fn dialogue_command(
    session: &mut PlayerSession,
    input: &str,
    events: &mut Vec<InputEvent>,
) -> Option<Outcome> {
    match input {
        "" => events.push(InputEvent::KeyPressed(Key::Space)),
        "a" => {
            let enabled = session.toggle_auto_advance();
            println!("(auto {})", if enabled { "on" } else { "off" });
        }
        "s" => println!("(speed {:?})", session.cycle_speed()),
        "b" => {
            let back = session.layout().back_button.center();
            events.push(InputEvent::PointerPressed(back));
        }
        "q" => return Some(Outcome::Quit),
        _ => println!("Press Enter to continue, 'a' auto, 's' speed, 'b' back, 'q' quit."),
    }
    None
}

/// Prints the revealed part of the current line as it grows
#[derive(Debug, Default)]
struct Typewriter {
    text: String,
    printed: usize,
    open: bool,
}

impl Typewriter {
    fn show(&mut self, dialogue: &DialogueQueue) -> io::Result<()> {
        let Some(line) = dialogue.current_line() else {
            return Ok(());
        };
        let revealed = dialogue.revealed_text();

        if line.text != self.text || revealed.len() < self.printed {
            self.finish();
            if !line.speaker.is_empty() {
                println!("{}:", line.speaker);
            }
            self.text = line.text.clone();
            self.printed = 0;
            self.open = true;
        }

        if revealed.len() > self.printed {
            print!("{}", &revealed[self.printed..]);
            io::stdout().flush()?;
            self.printed = revealed.len();
        }
        Ok(())
    }

    /// End the line being typed, if any
    fn finish(&mut self) {
        if self.open {
            println!();
            println!();
            self.open = false;
        }
    }

    fn reset(&mut self) {
        self.finish();
        self.text.clear();
        self.printed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const STORY: &str = "[START script=a]\n[SCRIPT name=a]\n[SAY speaker=A]\nHi\n[SAY speaker=A]\nBye\n";

    fn auto_session() -> PlayerSession {
        let mut config = GameConfig::default();
        config.text.auto_advance = true;
        let story = crate::parser::parse(STORY).unwrap();
        PlayerSession::new_game(story, config)
    }

    #[test]
    fn commands_reach_the_session_while_auto_runs() {
        let mut session = auto_session();
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        session.frame(&[], 0.1, &mut NullAudio, &mut store);
        assert!(session.dialogue().auto_advance());

        assert_eq!(dialogue_command(&mut session, "a", &mut events), None);
        assert!(!session.dialogue().auto_advance());
        session.frame(&events, 5.0, &mut NullAudio, &mut store);
        assert_eq!(session.dialogue().current_line().unwrap().text, "Hi");

        assert_eq!(dialogue_command(&mut session, "q", &mut events), Some(Outcome::Quit));
    }

    #[test]
    fn back_command_clicks_the_back_button() {
        let mut session = auto_session();
        let mut store = MemoryStore::new();
        let mut events = Vec::new();
        session.frame(&[], 0.1, &mut NullAudio, &mut store);

        assert_eq!(dialogue_command(&mut session, "b", &mut events), None);
        let report = session.frame(&events, FRAME_SECONDS, &mut NullAudio, &mut store);
        assert!(report.back_to_title);
    }

    #[test]
    fn typewriter_reports_and_tracks_what_it_printed() {
        let mut queue = DialogueQueue::new(10.0);
        queue.start(crate::types::Script::new(vec![crate::types::DialogueLine::new(
            "Ang dilim.",
            "???",
        )]));
        queue.tick(0.3);

        let mut typewriter = Typewriter::default();
        typewriter.show(&queue).unwrap();
        assert_eq!(typewriter.printed, 3);
        assert!(typewriter.open);

        queue.advance();
        typewriter.show(&queue).unwrap();
        assert_eq!(typewriter.printed, "Ang dilim.".len());
    }
}
