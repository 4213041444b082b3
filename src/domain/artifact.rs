//! Artifact naming.
//!
//! An artifact is the PDF file produced for one request. Its filename is a
//! deterministic slug of the topic: lowercase, runs of non-alphanumeric
//! characters collapsed to a single `_`, with a `.pdf` extension. The same
//! derivation doubles as the download route identifier, so [`ArtifactName`]
//! also validates inbound names before they touch the filesystem.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Fallback stem when the topic contains no alphanumeric characters at all.
const FALLBACK_STEM: &str = "documento";

/// Derives a filesystem-safe slug from a topic.
///
/// Lowercases the input and collapses every run of non-ASCII-alphanumeric
/// characters into a single underscore. Leading and trailing separators are
/// dropped so the slug never starts or ends with `_`.
pub fn slugify(topic: &str) -> String {
    let mut slug = String::with_capacity(topic.len());
    let mut pending_separator = false;

    for c in topic.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            slug.push(c);
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Validated filename of a PDF artifact.
///
/// Construct from a topic with [`ArtifactName::from_topic`], or from an
/// untrusted route parameter with [`ArtifactName::parse`], which rejects
/// anything that could escape the storage directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Derives the artifact name for a topic: `{slug}.pdf`.
    pub fn from_topic(topic: &str) -> Self {
        let slug = slugify(topic);
        let stem = if slug.is_empty() { FALLBACK_STEM } else { &slug };
        Self(format!("{stem}.pdf"))
    }

    /// Validates an untrusted name from a route parameter.
    ///
    /// Accepts only plain `{stem}.pdf` filenames: no path separators, no
    /// parent-directory components, no hidden files, non-empty stem.
    pub fn parse(name: &str) -> Result<Self, InvalidArtifactName> {
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(InvalidArtifactName::PathTraversal);
        }
        match name.strip_suffix(".pdf") {
            Some(stem) if stem.is_empty() => Err(InvalidArtifactName::NotAPdfName),
            Some(stem) if stem.starts_with('.') => Err(InvalidArtifactName::HiddenFile),
            Some(_) => Ok(Self(name.to_string())),
            None => Err(InvalidArtifactName::NotAPdfName),
        }
    }

    /// The filename, including the `.pdf` extension.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejection reasons for untrusted artifact names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidArtifactName {
    #[error("name contains path separators or parent components")]
    PathTraversal,

    #[error("hidden files are not served")]
    HiddenFile,

    #[error("name is not a plain .pdf filename")]
    NotAPdfName,
}
