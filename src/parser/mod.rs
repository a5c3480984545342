//! Markdown story parser
//!
//! Converts a story document into a [`Story`]. Commands sit on their own
//! line in square brackets; the text of a `SAY` is the run of plain lines
//! that follows it.

use std::collections::{BTreeMap, HashSet};

use crate::error::StoryError;
use crate::story::Story;
use crate::triggers::{Trigger, TriggerKey};
use crate::types::{CheckpointId, Choice, ChoiceTarget, DialogueLine, SceneEffect, Script};


/// Parse a story document
pub fn parse(markdown: &str) -> Result<Story, StoryError> {
    StoryParser::new(markdown).parse()
}

/// Ordered `key=value` parameters of one command
type Params = Vec<(String, String)>;

enum Section {
    None,
    Script(String),
    Menu(String),
}

/// A name referenced somewhere, checked once the whole document is read
struct Reference {
    line: usize,
    kind: &'static str,
    name: String,
}

struct StoryParser<'a> {
    lines: Vec<&'a str>,
    current_line: usize,
    section: Section,
    title: Option<String>,
    start: Option<(usize, Params)>,
    intro: Vec<String>,
    scripts: BTreeMap<String, Script>,
    menus: BTreeMap<String, Vec<Choice>>,
    menu_lines: BTreeMap<String, usize>,
    triggers: Vec<Trigger>,
    references: Vec<Reference>,
}

impl<'a> StoryParser<'a> {
    fn new(markdown: &'a str) -> Self {
        Self {
            lines: markdown.lines().collect(),
            current_line: 0,
            section: Section::None,
            title: None,
            start: None,
            intro: Vec::new(),
            scripts: BTreeMap::new(),
            menus: BTreeMap::new(),
            menu_lines: BTreeMap::new(),
            triggers: Vec::new(),
            references: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Story, StoryError> {
        while self.current_line < self.lines.len() {
            self.parse_line()?;
            self.current_line += 1;
        }

        self.validate()?;
        self.build()
    }

    /// 1-based number of the line being parsed
    fn line_no(&self) -> usize {
        self.current_line + 1
    }

    fn parse_line(&mut self) -> Result<(), StoryError> {
        let trimmed = self.lines[self.current_line].trim();

        if trimmed.is_empty() || trimmed.starts_with("<!--") {
            return Ok(());
        }
        if let Some(heading) = trimmed.strip_prefix("# ") {
            if self.title.is_none() {
                self.title = Some(heading.trim().to_string());
            }
            return Ok(());
        }
        if trimmed.starts_with('#') {
            return Ok(());
        }

        let Some((command, rest)) = split_command(trimmed) else {
            return Err(StoryError::syntax(
                self.line_no(),
                format!("text outside of a SAY command: '{trimmed}'"),
            ));
        };

        let (name, params) = self.parse_params(command)?;
        match name.as_str() {
            "START" => self.parse_start(params),
            "INTRO" => self.parse_intro(rest),
            "SCRIPT" => self.parse_script(&params),
            "SAY" => self.parse_say(&params, rest, false),
            "NARRATE" => self.parse_say(&params, rest, true),
            "MENU" => self.parse_menu(&params),
            "CHOICE" => self.parse_choice(&params),
            "ON" => self.parse_trigger(&params),
            other => Err(StoryError::syntax(
                self.line_no(),
                format!("unknown command '{other}'"),
            )),
        }
    }

    /// Split `NAME key=value key="quoted value" flag` into its parts
    fn parse_params(&self, command: &str) -> Result<(String, Params), StoryError> {
        let mut chars = command.trim().chars().peekable();
        let mut tokens: Vec<(String, Option<String>)> = Vec::new();

        loop {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            if chars.peek().is_none() {
                break;
            }

            let mut key = String::new();
            while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
                key.push(c);
            }

            if chars.next_if_eq(&'=').is_none() {
                tokens.push((key, None));
                continue;
            }

            let mut value = String::new();
            if chars.next_if_eq(&'"').is_some() {
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    value.push(c);
                }
                if !closed {
                    return Err(StoryError::syntax(
                        self.line_no(),
                        format!("unterminated quote in parameter '{key}'"),
                    ));
                }
            } else {
                while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                    value.push(c);
                }
            }
            tokens.push((key, Some(value)));
        }

        let mut tokens = tokens.into_iter();
        let name = match tokens.next() {
            Some((name, None)) if !name.is_empty() => name,
            _ => return Err(StoryError::syntax(self.line_no(), "empty command")),
        };
        let params = tokens
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect();
        Ok((name, params))
    }

    fn require_param(&self, params: &Params, key: &str, command: &str) -> Result<String, StoryError> {
        find_param(params, key)
            .map(str::to_string)
            .ok_or_else(|| StoryError::missing_param(self.line_no(), command, key))
    }

    fn parse_start(&mut self, params: Params) -> Result<(), StoryError> {
        if self.start.is_some() {
            return Err(StoryError::Duplicate {
                line: self.line_no(),
                kind: "START",
                name: "START".into(),
            });
        }
        let script = self.require_param(&params, "script", "START")?;
        self.reference("script", script);
        self.start = Some((self.line_no(), params));
        Ok(())
    }

    fn parse_intro(&mut self, inline: &str) -> Result<(), StoryError> {
        let text = if inline.trim().is_empty() {
            self.take_text("INTRO")?
        } else {
            inline.trim().to_string()
        };
        self.intro.push(text);
        Ok(())
    }

    fn parse_script(&mut self, params: &Params) -> Result<(), StoryError> {
        let name = self.require_param(params, "name", "SCRIPT")?;
        if self.scripts.contains_key(&name) {
            return Err(StoryError::Duplicate {
                line: self.line_no(),
                kind: "script",
                name,
            });
        }
        self.scripts.insert(name.clone(), Script::default());
        self.section = Section::Script(name);
        Ok(())
    }

    fn parse_say(&mut self, params: &Params, inline: &str, narration: bool) -> Result<(), StoryError> {
        let command = if narration { "NARRATE" } else { "SAY" };
        let speaker = if narration {
            String::new()
        } else {
            self.require_param(params, "speaker", command)?
        };
        let checkpoint = find_param(params, "checkpoint").map(CheckpointId::from);

        let Section::Script(script_name) = &self.section else {
            return Err(StoryError::syntax(
                self.line_no(),
                format!("{command} must appear inside a SCRIPT"),
            ));
        };
        let script_name = script_name.clone();

        let text = if inline.trim().is_empty() {
            self.take_text(command)?
        } else {
            inline.trim().to_string()
        };

        let line = DialogueLine {
            text,
            speaker,
            checkpoint,
        };
        if let Some(script) = self.scripts.get_mut(&script_name) {
            script.push(line);
        }
        Ok(())
    }

    /// Consume the plain lines after a SAY, joined with `\n`
    ///
    /// Text runs until a blank line, a comment or a known command. Lines
    /// starting with `#` or a bracketed aside are prose here.
    fn take_text(&mut self, command: &str) -> Result<String, StoryError> {
        let mut parts: Vec<&str> = Vec::new();
        let mut next = self.current_line + 1;
        while next < self.lines.len() {
            let line = self.lines[next].trim();
            if line.is_empty() || line.starts_with("<!--") || is_command(line) {
                break;
            }
            parts.push(line);
            next += 1;
        }

        if parts.is_empty() {
            return Err(StoryError::syntax(
                self.line_no(),
                format!("{command} is missing its text"),
            ));
        }

        self.current_line = next - 1;
        Ok(parts.join("\n"))
    }

    fn parse_menu(&mut self, params: &Params) -> Result<(), StoryError> {
        let name = self.require_param(params, "name", "MENU")?;
        if self.menus.contains_key(&name) {
            return Err(StoryError::Duplicate {
                line: self.line_no(),
                kind: "menu",
                name,
            });
        }
        self.menus.insert(name.clone(), Vec::new());
        self.menu_lines.insert(name.clone(), self.line_no());
        self.section = Section::Menu(name);
        Ok(())
    }

    fn parse_choice(&mut self, params: &Params) -> Result<(), StoryError> {
        let label = self.require_param(params, "label", "CHOICE")?;
        let script = self.require_param(params, "script", "CHOICE")?;

        let Section::Menu(menu_name) = &self.section else {
            return Err(StoryError::syntax(
                self.line_no(),
                "CHOICE must appear inside a MENU",
            ));
        };
        let menu_name = menu_name.clone();

        self.reference("script", script.clone());
        if let Some(menu) = self.menus.get_mut(&menu_name) {
            menu.push(Choice {
                label,
                target: ChoiceTarget::Script(script),
            });
        }
        Ok(())
    }

    fn parse_trigger(&mut self, params: &Params) -> Result<(), StoryError> {
        let key = match (find_param(params, "checkpoint"), find_param(params, "text")) {
            (Some(id), None) => {
                self.reference("checkpoint", id.to_string());
                TriggerKey::Checkpoint(CheckpointId::from(id))
            }
            (None, Some(text)) => TriggerKey::LineText(text.replace("\\n", "\n")),
            _ => {
                return Err(StoryError::syntax(
                    self.line_no(),
                    "ON needs exactly one of checkpoint= or text=",
                ));
            }
        };

        let mut effects = Vec::new();
        for (name, value) in params {
            let effect = match name.as_str() {
                "checkpoint" | "text" => continue,
                "background" => SceneEffect::SwapBackground(value.clone()),
                "fade" => SceneEffect::FadeOut(self.parse_seconds(value)?),
                "cue" => SceneEffect::PlayCue(value.clone()),
                "music" => SceneEffect::PlayMusic(value.clone()),
                "stop_music" => SceneEffect::StopMusic,
                "chapter" => SceneEffect::ChapterCard(value.clone()),
                "script" => {
                    self.reference("script", value.clone());
                    SceneEffect::StartScript(value.clone())
                }
                "menu" => {
                    self.reference("menu", value.clone());
                    SceneEffect::PresentMenu(value.clone())
                }
                other => {
                    return Err(StoryError::syntax(
                        self.line_no(),
                        format!("unknown trigger effect '{other}'"),
                    ));
                }
            };
            effects.push(effect);
        }

        if effects.is_empty() {
            return Err(StoryError::syntax(self.line_no(), "ON has no effects"));
        }

        self.triggers.push(Trigger { key, effects });
        Ok(())
    }

    fn parse_seconds(&self, value: &str) -> Result<f32, StoryError> {
        let number = value.strip_suffix('s').unwrap_or(value);
        match number.parse::<f32>() {
            Ok(seconds) if seconds >= 0.0 => Ok(seconds),
            _ => Err(StoryError::syntax(
                self.line_no(),
                format!("invalid duration '{value}'"),
            )),
        }
    }

    fn reference(&mut self, kind: &'static str, name: String) {
        self.references.push(Reference {
            line: self.line_no(),
            kind,
            name,
        });
    }

    fn validate(&self) -> Result<(), StoryError> {
        let checkpoints: HashSet<&str> = self
            .scripts
            .values()
            .flat_map(|script| script.lines().iter())
            .filter_map(|line| line.checkpoint.as_ref().map(CheckpointId::as_str))
            .collect();

        for reference in &self.references {
            let defined = match reference.kind {
                "script" => self.scripts.contains_key(&reference.name),
                "menu" => self.menus.contains_key(&reference.name),
                _ => checkpoints.contains(reference.name.as_str()),
            };
            if !defined {
                return Err(StoryError::Undefined {
                    line: reference.line,
                    kind: reference.kind,
                    name: reference.name.clone(),
                });
            }
        }

        for (name, choices) in &self.menus {
            if choices.is_empty() {
                return Err(StoryError::syntax(
                    self.menu_lines.get(name).copied().unwrap_or(0),
                    format!("menu '{name}' has no choices"),
                ));
            }
        }

        for (name, script) in &self.scripts {
            if script.is_empty() {
                log::warn!("script '{name}' has no lines");
            }
        }

        Ok(())
    }

    fn build(self) -> Result<Story, StoryError> {
        let (_, start) = self.start.ok_or(StoryError::MissingStart)?;
        let entry = find_param(&start, "script").unwrap_or_default().to_string();

        Ok(Story {
            title: self.title,
            entry,
            opening_background: find_param(&start, "background").map(str::to_string),
            opening_music: find_param(&start, "music").map(str::to_string),
            intro: self.intro,
            scripts: self.scripts,
            menus: self.menus,
            triggers: self.triggers,
        })
    }
}

/// `[NAME ...] rest` → (`NAME ...`, `rest`)
fn split_command(line: &str) -> Option<(&str, &str)> {
    let inner = line.strip_prefix('[')?;
    let mut in_quotes = false;
    for (i, c) in inner.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ']' if !in_quotes => return Some((&inner[..i], &inner[i + 1..])),
            _ => {}
        }
    }
    None
}

const COMMANDS: &[&str] = &[
    "START", "INTRO", "SCRIPT", "SAY", "NARRATE", "MENU", "CHOICE", "ON",
];

fn is_command(line: &str) -> bool {
    split_command(line)
        .and_then(|(command, _)| command.split_whitespace().next())
        .is_some_and(|name| COMMANDS.contains(&name))
}

fn find_param<'p>(params: &'p Params, key: &str) -> Option<&'p str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
