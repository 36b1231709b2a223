use std::{collections::BTreeMap, fmt};

/// What happened to a single file during a traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Stored in the bucket; `bytes` is the size of the uploaded body.
    Uploaded { bytes: u64 },
    /// Left out by the hidden-entry filter.
    SkippedIgnored,
    /// The file could not be opened for reading.
    SkippedOpenError(String),
    /// The store rejected the upload.
    UploadFailed(String),
    /// A directory (or entry) below the root could not be read. Not a file, so it is left
    /// out of `processed`.
    Unreadable(String),
}

impl Outcome {
    fn error(&self) -> Option<&str> {
        match self {
            Outcome::SkippedOpenError(reason)
            | Outcome::UploadFailed(reason)
            | Outcome::Unreadable(reason) => Some(reason.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileOutcome {
    /// Object key, or the relative path for files that never got one
    pub key: String,
    pub outcome: Outcome,
}

/// Outcomes of one traversal, in visiting order. Every counter is derived from this list, so
/// each file is accounted for exactly once.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    outcomes: Vec<FileOutcome>,
}

impl RunStats {
    pub fn record<K: Into<String>>(&mut self, key: K, outcome: Outcome) {
        self.outcomes.push(FileOutcome {
            key: key.into(),
            outcome,
        });
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Number of files (not directories) visited
    pub fn processed(&self) -> usize {
        self.count(|o| !matches!(o, Outcome::Unreadable(_)))
    }

    pub fn uploaded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Uploaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| *o == Outcome::SkippedIgnored)
    }

    pub fn bytes_uploaded(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|f| match f.outcome {
                Outcome::Uploaded { bytes } => bytes,
                _ => 0,
            })
            .sum()
    }

    /// Last error recorded for each key
    pub fn errors(&self) -> BTreeMap<&str, &str> {
        self.outcomes
            .iter()
            .filter_map(|f| f.outcome.error().map(|e| (f.key.as_str(), e)))
            .collect()
    }

    fn count<F: Fn(&Outcome) -> bool>(&self, pred: F) -> usize {
        self.outcomes.iter().filter(|f| pred(&f.outcome)).count()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "uploaded: {}; skipped: {}, errors: {}",
            self.uploaded(),
            self.skipped(),
            self.errors().len()
        )
    }
}
