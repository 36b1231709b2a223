//! Hidden-entry filtering.
//!
//! Entries are judged by their path relative to the source root. A dot-prefixed name hides the
//! entry, and a dot-prefixed directory hides everything beneath it. The single exception is a
//! file called `.env`, which is uploaded as long as none of its ancestors is hidden.
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

const ALLOWED_DOTFILE: &str = ".env";

/// Hidden directories seen so far in one traversal, keyed by their path relative to the root.
///
/// Directories must be passed to [`observe_dir`](HiddenDirs::observe_dir) before any of their
/// children are checked, which depth-first traversal guarantees.
#[derive(Clone, Debug, Default)]
pub struct HiddenDirs {
    dirs: HashSet<PathBuf>,
}

impl HiddenDirs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visited directory. Returns `true` if it (or one of its ancestors) is hidden.
    pub fn observe_dir(&mut self, relative: &Path) -> bool {
        if self.is_ignored(relative, true) {
            self.dirs.insert(relative.to_owned());
            true
        } else {
            false
        }
    }

    /// Whether the entry at `relative` must be left out of the upload.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        if self.has_hidden_ancestor(relative) {
            return true;
        }
        let name = match relative.file_name() {
            Some(name) => name.to_string_lossy(),
            // The root itself
            None => return false,
        };
        if !is_dir && name == ALLOWED_DOTFILE {
            return false;
        }
        is_dot_prefixed(&name)
    }

    fn has_hidden_ancestor(&self, relative: &Path) -> bool {
        relative
            .ancestors()
            .skip(1)
            .any(|ancestor| self.dirs.contains(ancestor))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.dirs.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

fn is_dot_prefixed(name: &str) -> bool {
    name.starts_with('.')
}
