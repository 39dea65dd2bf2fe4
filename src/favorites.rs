use anyhow::Context;
use std::path::Path;

/// Shortcut paths the user starred, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet {
    paths: Vec<String>,
}

impl FavoritesSet {
    /// Parse newline separated paths. Blank lines are skipped and repeated
    /// paths kept once.
    pub fn parse(content: &str) -> Self {
        let mut set = Self::default();
        for line in content.lines() {
            let line = line.trim();
            if !line.is_empty() && !set.contains(line) {
                set.paths.push(line.to_string());
            }
        }
        set
    }

    /// Load the favourites file. A missing file is an empty set; an
    /// unreadable one is logged and also treated as empty.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load favorites");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let mut out = String::new();
        for p in &self.paths {
            out.push_str(p);
            out.push('\n');
        }
        std::fs::write(path, out).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn contains(&self, shortcut: &str) -> bool {
        self.paths.iter().any(|p| p == shortcut)
    }

    /// Flip membership of `shortcut`; returns whether it is now a favourite.
    pub fn toggle(&mut self, shortcut: &str) -> bool {
        if let Some(pos) = self.paths.iter().position(|p| p == shortcut) {
            self.paths.remove(pos);
            false
        } else {
            self.paths.push(shortcut.to_string());
            true
        }
    }

    /// Point an existing entry at a renamed shortcut. Returns false when
    /// `old` was not a favourite.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        let Some(pos) = self.paths.iter().position(|p| p == old) else {
            return false;
        };
        if self.contains(new) {
            self.paths.remove(pos);
        } else {
            self.paths[pos] = new.to_string();
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
