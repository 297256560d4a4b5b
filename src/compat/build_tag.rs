//! Build tag inspection for distributed artifacts
//!
//! Accepted spellings for runtime `3.8`:
//! - Dotted: `3.8`
//! - Compact: `cp38`, `py38`
//! - Universal: `py3` (any 3.x), also inside compound tags like `py2.py3`

use crate::registry::PackageMetadata;

/// Build tags of every artifact attached to `version`
///
/// An empty result means the signal is unavailable, not that the release is
/// unsupported.
pub fn artifact_tags_for_release(package: &PackageMetadata, version: &str) -> Vec<String> {
    package.artifact_tags(version)
}

/// Whether a single build tag covers runtime `version`
pub fn tag_covers(tag: &str, version: &str) -> bool {
    let tag = tag.trim();
    if tag == version {
        return true;
    }

    let mut parts = version.split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or_default();
    let compact = format!("{}{}", major, minor);

    tag.split('.').any(|component| {
        let Some(digits) = component
            .strip_prefix("cp")
            .or_else(|| component.strip_prefix("py"))
        else {
            return false;
        };
        digits == compact || (component.starts_with("py") && digits == major)
    })
}

/// Whether the tag list covers `version`; `None` when there are no artifacts
pub fn tags_cover(tags: &[String], version: &str) -> Option<bool> {
    if tags.is_empty() {
        return None;
    }
    Some(tags.iter().any(|tag| tag_covers(tag, version)))
}
