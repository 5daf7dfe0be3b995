//! Listing options and paginated results exchanged with the repository.

use serde::{Deserialize, Serialize};

/// Filter passed to the repository for paged listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListOptions {
    /// Options requesting a single page
    pub fn page(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            search: None,
        }
    }

    /// Add a search term
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Zero-based offset of the first item, assuming 1-based pages.
    ///
    /// Saturates at `u64::MAX` for pages far past the end.
    pub fn offset(&self) -> u64 {
        let page = self.page.unwrap_or(1).max(1);
        (page - 1).saturating_mul(self.limit.unwrap_or(0))
    }
}

/// One page of results together with the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl<T> Paginated<T> {
    /// Create a new page
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        Self {
            items,
            total,
            page,
            limit,
        }
    }

    /// Number of pages needed to show every match
    pub fn total_pages(&self) -> u64 {
        if self.limit > 0 {
            (self.total + self.limit - 1) / self.limit
        } else {
            0
        }
    }

    /// Transform every item, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(ListOptions::page(1, 10).offset(), 0);
        assert_eq!(ListOptions::page(3, 10).offset(), 20);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        assert_eq!(ListOptions::page(u64::MAX, 100).offset(), u64::MAX);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Paginated<u8> = Paginated::new(vec![], 21, 1, 10);
        assert_eq!(page.total_pages(), 3);

        let empty: Paginated<u8> = Paginated::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Paginated::new(vec![1, 2], 12, 2, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!((page.total, page.page, page.limit), (12, 2, 2));
    }
}
