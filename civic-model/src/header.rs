//! Page header: bilingual title block shown above the content blocks.

use serde::{Deserialize, Serialize};

/// Maximum number of images a media header may carry.
pub const MAX_HEADER_IMAGES: usize = 5;

/// Header of a page.
///
/// Titles may be empty while drafting; publish requires both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub title_hr: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_hr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_en: Option<String>,
    #[serde(flatten)]
    pub kind: HeaderKind,
}

impl Header {
    /// A simple header with the given titles and no icon.
    pub fn simple(title_hr: impl Into<String>, title_en: impl Into<String>) -> Self {
        Self {
            title_hr: title_hr.into(),
            title_en: title_en.into(),
            subtitle_hr: None,
            subtitle_en: None,
            kind: HeaderKind::Simple { icon: None },
        }
    }

    /// A media header showing the given images.
    pub fn media(
        title_hr: impl Into<String>,
        title_en: impl Into<String>,
        images: Vec<String>,
    ) -> Self {
        Self {
            kind: HeaderKind::Media { images },
            ..Self::simple(title_hr, title_en)
        }
    }
}

/// Visual style of the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeaderKind {
    Simple {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
    /// Between one and [`MAX_HEADER_IMAGES`] image URLs.
    Media {
        #[serde(default)]
        images: Vec<String>,
    },
}

impl Default for HeaderKind {
    fn default() -> Self {
        Self::Simple { icon: None }
    }
}
