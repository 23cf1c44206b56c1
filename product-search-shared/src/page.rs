//! Pagination window for search requests.

use serde::{Deserialize, Serialize};

/// Number of hits returned when the caller does not ask for a size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound for `from + size`, matching the engine's default
/// `max_result_window`.
pub const MAX_PAGE_SIZE: usize = 10_000;

/// A `from`/`size` window over an ordered result set.
///
/// Every listing operation takes a page, so result sizes are always bounded
/// by the caller rather than by the engine's implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub from: usize,
    #[serde(default = "default_size")]
    pub size: usize,
}

fn default_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Page {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    /// Create a page whose window ends within [`MAX_PAGE_SIZE`].
    ///
    /// `size` is shrunk so `from + size` never exceeds the limit; a `from`
    /// past the limit yields an empty page at the limit.
    pub fn new(from: usize, size: usize) -> Self {
        let from = from.min(MAX_PAGE_SIZE);
        Self {
            from,
            size: size.min(MAX_PAGE_SIZE - from),
        }
    }

    /// Return a copy with the window clamped as in [`Page::new`].
    pub fn clamped(self) -> Self {
        Self::new(self.from, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        let page = Page::default();
        assert_eq!(page.from, 0);
        assert_eq!(page.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_is_clamped() {
        let page = Page::new(0, 1_000_000);
        assert_eq!(page.size, MAX_PAGE_SIZE);

        let page = Page { from: 0, size: 50_000 }.clamped();
        assert_eq!(page.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_deserialize_defaults() {
        let page: Page = serde_json::from_str("{}").unwrap();
        assert_eq!(page, Page::default());

        let page: Page = serde_json::from_str(r#"{"size": 3}"#).unwrap();
        assert_eq!(page, Page::new(0, 3));
    }

    #[test]
    fn test_page_window_stays_inside_limit() {
        let page = Page::new(9_995, 10);
        assert_eq!(page, Page { from: 9_995, size: 5 });

        let page = Page::new(20, 1_000_000);
        assert_eq!(page.from + page.size, MAX_PAGE_SIZE);

        let page = Page { from: 50_000, size: 10 }.clamped();
        assert_eq!(page, Page { from: MAX_PAGE_SIZE, size: 0 });
    }
}
