//! Asset resolution - mapping logical asset names to file paths.

use std::path::PathBuf;

pub trait Resolver {
    fn resolve_image(&self, logical: &str) -> Option<PathBuf> {
        let _ = logical;
        None
    }

    fn resolve_sound(&self, logical: &str) -> Option<PathBuf> {
        let _ = logical;
        None
    }
}

/// Looks assets up in a single directory, with or without an extension
pub struct BasicResolver {
    pub base_dir: PathBuf,
}

impl BasicResolver {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn find_file(&self, logical: &str, extensions: &[&str]) -> Option<PathBuf> {
        let exact = self.base_dir.join(logical);
        if exact.is_file() {
            return Some(exact);
        }

        for ext in extensions {
            let path = self.base_dir.join(format!("{logical}{ext}"));
            if path.is_file() {
                return Some(path);
            }
        }

        None
    }
}

impl Resolver for BasicResolver {
    fn resolve_image(&self, logical: &str) -> Option<PathBuf> {
        self.find_file(logical, &[".png", ".jpg", ".jpeg"])
    }

    fn resolve_sound(&self, logical: &str) -> Option<PathBuf> {
        self.find_file(logical, &[".ogg", ".wav", ".mp3"])
    }
}
