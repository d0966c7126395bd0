//! URL-safe page slugs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ModelError;

/// Longest slug accepted.
pub const MAX_SLUG_LEN: usize = 120;

/// Immutable page identifier used in public URLs.
///
/// Lowercase ASCII letters, digits and single hyphens between them, e.g.
/// `waste-collection-2024`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validates and wraps a slug.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        if is_valid_slug(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ModelError::InvalidSlug(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returns true if `s` satisfies the slug format.
pub fn is_valid_slug(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_SLUG_LEN {
        return false;
    }
    if s.starts_with('-') || s.ends_with('-') || s.contains("--") {
        return false;
    }
    s.bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

impl TryFrom<String> for Slug {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_slug(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidSlug(value))
        }
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
