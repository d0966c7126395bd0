//! Configuration for the page content core.

use serde::{Deserialize, Serialize};

use crate::error::{PageError, PageResult};

/// Tunables for [`PageService`](crate::PageService) and the notice boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Reject malformed content (bad URLs, out-of-range coordinates, too
    /// many items) as soon as it is written to the draft. Incomplete
    /// content is always accepted in the draft and only checked at publish.
    pub validate_on_draft: bool,
    /// Page size used by listings when the caller does not choose one.
    pub default_page_size: usize,
    /// Upper bound on any listing page size.
    pub max_page_size: usize,
    /// How many times the notice boundary refetches and retries after a
    /// revision conflict before giving up.
    pub notice_retry_limit: u32,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            validate_on_draft: true,
            default_page_size: 20,
            max_page_size: 100,
            notice_retry_limit: 3,
        }
    }
}

impl PagesConfig {
    /// Parses a JSON configuration document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> PageResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> PageResult<()> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(PageError::Config("page sizes must be positive".into()));
        }
        if self.default_page_size > self.max_page_size {
            return Err(PageError::Config(format!(
                "default_page_size {} exceeds max_page_size {}",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }

    /// Resolves a caller-supplied page size against the configured bounds.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|n| *n > 0)
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }
}
