//! Mapping from local file paths to object keys and content types.
use std::path::{Component, Path};

/// Content type used when the extension is missing or not in the table.
pub const DEFAULT_CONTENT_TYPE: &str = "binary/octet-stream";

/// Destination of one upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectTarget {
    pub key: String,
    pub content_type: &'static str,
}

/// Last component of the source root, used to namespace keys so that `/data/site` lands under
/// `<prefix>/site/...`. Empty for a filesystem root.
pub fn parent_segment(source_root: &Path) -> String {
    source_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Derive the object key and content type for the file at `path`, which must lie below
/// `source_root`. The key is `destination_prefix/parent_segment/<path relative to root>` with
/// empty segments dropped.
///
/// Returns `None` if `path` is not strictly below `source_root`.
pub fn derive_key(
    source_root: &Path,
    parent_segment: &str,
    path: &Path,
    destination_prefix: &str,
) -> Option<ObjectTarget> {
    let relative = path.strip_prefix(source_root).ok()?;
    let relative = relative_key(relative)?;

    let key = destination_prefix
        .split('/')
        .chain(std::iter::once(parent_segment))
        .chain(std::iter::once(relative.as_str()))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    let content_type = content_type(&key);
    Some(ObjectTarget { key, content_type })
}

/// `/`-joined form of a relative path, independent of the platform separator. `None` for an
/// empty path.
pub fn relative_key(relative: &Path) -> Option<String> {
    let segments = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Infer the content type from the extension of `key`, using the standard extension table
/// shipped with `mime_guess`.
pub fn content_type(key: &str) -> &'static str {
    let name = key.rsplit('/').next().unwrap_or(key);
    mime_guess::from_path(name)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
