//! Save/resume ledger
//!
//! Progress is a three-line text file: background id, speaker, line text.
//! Each field is escaped so dialogue containing newlines still fits on
//! its line; files written before escaping was introduced load unchanged.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::types::ProgressSnapshot;

/// Somewhere a single progress snapshot can live
pub trait ProgressStore {
    /// Overwrite the stored snapshot
    fn save(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StorageError>;

    /// The stored snapshot, or None when there is no usable one
    fn load(&self) -> Option<ProgressSnapshot>;
}

/// Serialize a snapshot to the three-line format
pub fn encode(snapshot: &ProgressSnapshot) -> String {
    let mut out = String::new();
    for field in [
        &snapshot.background_id,
        &snapshot.speaker,
        &snapshot.line_text,
    ] {
        out.push_str(&escape(field));
        out.push('\n');
    }
    out
}

/// Parse the three-line format; None when fewer than three lines are present
pub fn decode(content: &str) -> Option<ProgressSnapshot> {
    let mut lines = content.lines();
    let background_id = unescape(lines.next()?);
    let speaker = unescape(lines.next()?);
    let line_text = unescape(lines.next()?);
    Some(ProgressSnapshot {
        background_id,
        speaker,
        line_text,
    })
}

fn escape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// File-backed ledger
#[derive(Debug, Clone)]
pub struct SaveLedger {
    path: PathBuf,
}

impl SaveLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like [`ProgressStore::load`] but reports I/O failures other than a missing file
    pub fn try_load(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(decode(&content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProgressStore for SaveLedger {
    fn save(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let temp = self.temp_path();
        let write_err = |source: std::io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        fs::write(&temp, encode(snapshot)).map_err(write_err)?;
        fs::rename(&temp, &self.path).map_err(write_err)?;
        Ok(())
    }

    fn load(&self) -> Option<ProgressSnapshot> {
        match self.try_load() {
            Ok(snapshot) => {
                if snapshot.is_none() {
                    log::debug!("no usable progress at {}", self.path.display());
                }
                snapshot
            }
            Err(err) => {
                log::warn!("{err}");
                None
            }
        }
    }
}

/// In-memory ledger holding the encoded form, for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    content: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored text
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Number of saves performed
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ProgressStore for MemoryStore {
    fn save(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        self.content = Some(encode(snapshot));
        self.writes += 1;
        Ok(())
    }

    fn load(&self) -> Option<ProgressSnapshot> {
        self.content.as_deref().and_then(decode)
    }
}
