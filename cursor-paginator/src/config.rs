//! Paginator limits.
//!
//! ```
//! use cursor_paginator::PaginatorConfig;
//!
//! let env_vars = vec![
//!     ("CURSOR_PAGINATOR_MAX_PAGE_SIZE".to_string(), "100".to_string()),
//! ];
//! let config = PaginatorConfig::from_env(&env_vars);
//! assert_eq!(config.max_page_size, Some(100));
//! assert_eq!(config.max_cursor_len, 4096);
//! ```

use crate::cursor::DEFAULT_MAX_CURSOR_LEN;

/// Environment variable holding the page size clamp.
pub const ENV_MAX_PAGE_SIZE: &str = "CURSOR_PAGINATOR_MAX_PAGE_SIZE";

/// Environment variable holding the maximum accepted cursor length.
pub const ENV_MAX_CURSOR_LEN: &str = "CURSOR_PAGINATOR_MAX_CURSOR_LEN";

/// Limits applied by a [`Paginator`](crate::Paginator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PaginatorConfig {
    /// Upper bound for `first` / `last`; larger requests are clamped.
    /// `None` leaves page sizes unbounded.
    pub max_page_size: Option<usize>,
    /// Cursors longer than this many bytes are rejected before decoding.
    pub max_cursor_len: usize,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            max_page_size: None,
            max_cursor_len: DEFAULT_MAX_CURSOR_LEN,
        }
    }
}

impl PaginatorConfig {
    /// Defaults: no page size clamp, 4KB cursors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size clamp.
    #[must_use]
    pub const fn with_max_page_size(mut self, max: usize) -> Self {
        self.max_page_size = Some(max);
        self
    }

    /// Set the maximum accepted cursor length in bytes.
    #[must_use]
    pub const fn with_max_cursor_len(mut self, max: usize) -> Self {
        self.max_cursor_len = max;
        self
    }

    /// Read limits from environment pairs.
    ///
    /// Missing or unparsable values keep their defaults.
    #[must_use]
    pub fn from_env(env: &[(String, String)]) -> Self {
        let lookup = |name: &str| {
            env.iter()
                .find(|(k, _)| k == name)
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        };

        let mut config = Self::default();
        if let Some(max) = lookup(ENV_MAX_PAGE_SIZE) {
            config.max_page_size = Some(max);
        }
        if let Some(max) = lookup(ENV_MAX_CURSOR_LEN) {
            config.max_cursor_len = max;
        }
        config
    }

    /// Apply the page size clamp.
    #[must_use]
    pub fn clamp_page_size(&self, requested: usize) -> usize {
        self.max_page_size
            .map_or(requested, |max| requested.min(max))
    }
}
