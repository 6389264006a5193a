//! Markdown link extraction and resolution

use std::path::{Component, Path, PathBuf};

use comrak::nodes::NodeValue;
use comrak::{Arena, Options, parse_document};

/// Destinations of every link in a Markdown document, in document order
///
/// Inline, reference-style and autolinks are all reported; images are not.
pub fn link_destinations(markdown: &str) -> Vec<String> {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &Options::default());

    root.descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Link(link) => Some(link.url.clone()),
            _ => None,
        })
        .collect()
}

/// Resolve a link destination to a file path relative to `base`
///
/// `source` is the Markdown file containing the link, either relative to
/// `base` or absolute. Returns `None` for URLs, fragment-only links and
/// anything that resolves outside `base`. Destinations starting with `/`
/// are taken relative to `base`.
pub fn as_file_destination(dest: &str, source: &Path, base: &Path) -> Option<String> {
    if has_scheme(dest) {
        return None;
    }

    let dest = dest.split(['#', '?']).next().unwrap_or_default();
    if dest.is_empty() {
        return None;
    }

    let joined = match dest.strip_prefix('/') {
        Some(rooted) => base.join(rooted),
        None => base
            .join(source.parent().unwrap_or_else(|| Path::new("")))
            .join(dest),
    };

    let resolved = normalize(&joined)?;
    let base = normalize(base)?;
    let relative = resolved.strip_prefix(&base).ok()?;

    if relative.as_os_str().is_empty() {
        return None;
    }

    Some(slash_path(relative))
}

/// `/`-separated form of a relative path
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Lexical normalisation; `None` when `..` climbs above the start
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}

/// `scheme:` prefix as in RFC 3986 (`http:`, `mailto:`, ...)
fn has_scheme(dest: &str) -> bool {
    let Some((scheme, _)) = dest.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
