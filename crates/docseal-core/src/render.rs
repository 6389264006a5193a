//! Markdown converter - wraps files into static site pages
//!
//! Every page starts with a Zola front matter block carrying the title.
//! Markdown files keep their body; everything else is placed in a fenced
//! code block tagged with a highlighting language.
//!
//! Conversion is total and deterministic: the same path and content always
//! produce the same page.

use std::collections::BTreeMap;
use std::path::Path;

use crate::manifest::{ManifestFormat, extension};

const FRONT_MATTER_DELIMITER: &str = "+++";

/// A converted page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Output path relative to the output directory
    pub path: String,
    pub title: String,
    pub text: String,
}

/// Converts files into Markdown pages
#[derive(Debug, Clone)]
pub struct MarkdownConverter {
    languages: BTreeMap<String, String>,
}

impl MarkdownConverter {
    pub fn new() -> Self {
        Self {
            languages: default_languages(),
        }
    }

    /// Add or replace extension → language mappings on top of the defaults
    pub fn with_languages<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (ext, lang) in overrides {
            let ext: String = ext.into();
            self.languages
                .insert(ext.trim_start_matches('.').to_ascii_lowercase(), lang.into());
        }
        self
    }

    /// Highlighting language for a path; unknown extensions map to themselves
    pub fn language_for(&self, path: &str) -> String {
        let ext = extension(Path::new(path));
        self.languages.get(&ext).cloned().unwrap_or(ext)
    }

    pub fn convert(&self, path: &str, content: &str) -> RenderedPage {
        match ManifestFormat::from_path(path) {
            ManifestFormat::Markdown => markdown_page(path, content),
            _ => self.code_page(path, content),
        }
    }

    fn code_page(&self, path: &str, content: &str) -> RenderedPage {
        let title = file_name(path);
        let mut text = front_matter(&title);
        text.push_str(&code_fence(&self.language_for(path), content));

        RenderedPage {
            path: format!("{path}.md"),
            title,
            text,
        }
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// The first line is taken as the title when it is a heading
fn markdown_page(path: &str, content: &str) -> RenderedPage {
    let (first, rest) = content.split_once('\n').unwrap_or((content, ""));
    let first = first.trim_end_matches('\r');

    let (title, body) = if first.trim_start().starts_with('#') {
        (first.trim().trim_start_matches('#').trim().to_string(), rest)
    } else {
        (file_stem(path), content)
    };

    let mut text = front_matter(&title);
    text.push_str(body);

    RenderedPage {
        path: path.to_string(),
        title,
        text,
    }
}

/// Zola TOML front matter with an escaped title
pub fn front_matter(title: &str) -> String {
    let title = toml::Value::String(title.to_string());
    format!("{FRONT_MATTER_DELIMITER}\ntitle = {title}\n{FRONT_MATTER_DELIMITER}\n")
}

/// Fenced code block long enough to never be closed by the content itself
pub fn code_fence(lang: &str, content: &str) -> String {
    let fence = "`".repeat(longest_backtick_run(content).max(2) + 1);
    let newline = if content.is_empty() || content.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    format!("{fence}{lang}\n{content}{newline}{fence}\n")
}

fn longest_backtick_run(content: &str) -> usize {
    content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0)
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn default_languages() -> BTreeMap<String, String> {
    // Zola's highlighter has no HCL grammar; tcl reads closest.
    [
        ("yml", "yaml"),
        ("yaml", "yaml"),
        ("tf", "tcl"),
        ("tfvars", "tcl"),
        ("hcl", "tcl"),
    ]
    .into_iter()
    .map(|(ext, lang)| (ext.to_string(), lang.to_string()))
    .collect()
}
