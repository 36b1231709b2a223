use crate::{
    err,
    filter::HiddenDirs,
    key::{self, ObjectTarget},
    stats::{Outcome, RunStats},
    store::ObjectStore,
    upload, Error, UploadSession,
};
use snafu::ResultExt;
use std::path::{Component, Path, PathBuf};
use tokio::fs::File;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

impl<S: ObjectStore> UploadSession<S> {
    /// Upload every visible file below `source` to the configured bucket.
    ///
    /// Connects first if needed; a failed connection aborts before anything is read. Files are
    /// visited depth-first in name order and uploaded one at a time. A file that cannot be
    /// opened or uploaded, or a directory that cannot be read, is recorded in the returned
    /// [`RunStats`] and the walk goes on. Only a failure to read the source root itself is
    /// returned as [`Error::Walk`], which carries the stats gathered so far.
    pub async fn upload_from<P: AsRef<Path>>(&mut self, source: P) -> Result<RunStats, Error> {
        self.connect().await?;

        let root = resolve_source(source.as_ref())?;
        let parent = key::parent_segment(&root);
        info!(source = %root.display(), parent = %parent, "uploading directory");

        let mut hidden = HiddenDirs::new();
        let mut stats = RunStats::default();
        let mut walk_error = None;

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) if source.depth() == 0 => {
                    walk_error = Some(source);
                    break;
                }
                Err(source) => {
                    record_unreadable(&root, &hidden, &mut stats, &source);
                    continue;
                }
            };
            let path = entry.path();
            let relative = match path.strip_prefix(&root) {
                Ok(relative) => relative,
                Err(_) => continue,
            };

            if entry.file_type().is_dir() {
                if hidden.observe_dir(relative) {
                    debug!(path = %path.display(), "hidden directory");
                }
                continue;
            }

            if hidden.is_ignored(relative, false) {
                debug!(path = %path.display(), "skipping hidden file");
                let name = key::relative_key(relative).unwrap_or_default();
                stats.record(name, Outcome::SkippedIgnored);
                continue;
            }

            let target = match key::derive_key(
                &root,
                &parent,
                path,
                &self.config.bucket_destination_prefix,
            ) {
                Some(target) => target,
                None => {
                    warn!(path = %path.display(), "source is not a directory, nothing to upload");
                    let name = key::parent_segment(path);
                    stats.record(name, Outcome::SkippedIgnored);
                    continue;
                }
            };
            let outcome = self.upload_file(path, &target).await;
            stats.record(target.key, outcome);
        }

        info!(
            processed = stats.processed(),
            bytes = stats.bytes_uploaded(),
            "{}",
            stats
        );
        match walk_error {
            Some(source) => Err(Error::Walk { source, stats }),
            None => Ok(stats),
        }
    }

    async fn upload_file(&self, path: &Path, target: &ObjectTarget) -> Outcome {
        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot open file, skipping");
                return Outcome::SkippedOpenError(e.to_string());
            }
        };

        info!(
            source = %path.display(),
            endpoint = %self.config.bucket_endpoint,
            bucket = %self.config.bucket_name,
            key = %target.key,
            "uploading"
        );
        match upload::put_file(&self.store, &self.config.bucket_name, target, file).await {
            Ok(report) => {
                debug!(
                    key = %target.key,
                    bytes = report.size,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    "uploaded"
                );
                Outcome::Uploaded { bytes: report.size }
            }
            Err(e) => {
                error!(key = %target.key, error = %e, "upload failed");
                Outcome::UploadFailed(e.to_string())
            }
        }
    }
}

/// Record a walk error below the root. Entries inside hidden directories would never be
/// uploaded, so errors there are dropped.
fn record_unreadable(
    root: &Path,
    hidden: &HiddenDirs,
    stats: &mut RunStats,
    source: &walkdir::Error,
) {
    let relative = source
        .path()
        .and_then(|path| path.strip_prefix(root).ok())
        .unwrap_or_else(|| Path::new(""));
    if hidden.is_ignored(relative, true) {
        debug!(path = %relative.display(), error = %source, "unreadable hidden entry");
        return;
    }
    warn!(path = %relative.display(), error = %source, "cannot read entry, skipping");
    let name = key::relative_key(relative).unwrap_or_default();
    stats.record(name, Outcome::Unreadable(source.to_string()));
}

/// Absolute, lexically normalized form of `path`: `.` components are dropped and `..` removes
/// the component before it. Symlinks are left alone.
pub fn resolve_source(path: &Path) -> Result<PathBuf, Error> {
    let absolute = std::path::absolute(path).context(err::ResolvePath {
        path: path.display().to_string(),
    })?;
    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_drops_dots() {
        assert_eq!(
            normalize(Path::new("/data/./site/../www/")),
            PathBuf::from("/data/www")
        );
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn relative_sources_resolve_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = resolve_source(Path::new("some/./dir")).unwrap();
        assert_eq!(resolved, normalize(&cwd.join("some/dir")));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn empty_source_cannot_be_resolved() {
        match resolve_source(Path::new("")) {
            Err(Error::ResolvePath { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
