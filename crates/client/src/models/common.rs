//! Shared list envelope and query types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use provisio_config::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// One page of a paginated collection.
///
/// The backend answers either with an envelope (`items`/`results`/`data` plus
/// `total`, `page`, `page_size`) or with a bare array. A bare array is
/// treated as a single complete page.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Page with no items, used when the backend answers with no content.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size: 0,
        }
    }

    /// Number of pages implied by `total` and `page_size`.
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr<T> {
    Bare(Vec<T>),
    Envelope {
        #[serde(alias = "results", alias = "data")]
        items: Vec<T>,
        #[serde(default, alias = "count")]
        total: Option<u64>,
        #[serde(default)]
        page: Option<u32>,
        #[serde(default, alias = "size", alias = "limit")]
        page_size: Option<u32>,
    },
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Page<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match PageRepr::<T>::deserialize(deserializer)? {
            PageRepr::Bare(items) => {
                let len = items.len();
                Page {
                    total: len as u64,
                    page: 1,
                    page_size: u32::try_from(len).unwrap_or(u32::MAX),
                    items,
                }
            }
            PageRepr::Envelope {
                items,
                total,
                page,
                page_size,
            } => Page {
                total: total.unwrap_or(items.len() as u64),
                page: page.unwrap_or(1),
                page_size: page_size.unwrap_or_else(|| u32::try_from(items.len()).unwrap_or(u32::MAX)),
                items,
            },
        })
    }
}

/// Pagination and free-text search shared by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    /// Resource-specific filters, sent verbatim as query parameters.
    pub filters: Vec<(String, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            filters: Vec::new(),
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Add a filter only when a value is present.
    pub fn filter_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.filter(key, v),
            None => self,
        }
    }

    /// Render as query-string pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array_is_single_page() {
        let page: Page<u32> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_envelope_with_aliases() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"results": [1, 2], "count": 5, "page": 2, "limit": 2}"#)
                .unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_empty_envelope() {
        let page: Page<u32> = serde_json::from_str(r#"{"items": [], "total": 0}"#).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_list_query_pairs() {
        let query = ListQuery::new()
            .page(0)
            .page_size(500)
            .search("  web  ")
            .filter("status", "active")
            .filter_opt("plugin_id", None::<String>);

        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, MAX_PAGE_SIZE);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("page_size".to_string(), "100".to_string()),
                ("search".to_string(), "web".to_string()),
                ("status".to_string(), "active".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_dropped() {
        assert!(ListQuery::new().search("   ").search.is_none());
    }
}
