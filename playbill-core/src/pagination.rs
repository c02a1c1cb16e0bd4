//! Page slicing for question listings

use serde::Deserialize;

/// Questions per page
pub const QUESTIONS_PER_PAGE: u32 = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination from a caller-supplied page number.
    ///
    /// - Page is clamped to a minimum of 1 (zero and negative pages read as 1)
    /// - Per page is clamped to a minimum of 1
    pub fn new(page: i64, per_page: u32) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        Self {
            page,
            per_page: per_page.max(1),
        }
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.per_page as usize)
    }

    pub fn limit(&self) -> usize {
        self.per_page as usize
    }

    /// The items of `items` that fall on this page; empty past the end.
    ///
    /// ```
    /// use playbill_core::pagination::Pagination;
    ///
    /// let items: Vec<u32> = (0..25).collect();
    /// assert_eq!(Pagination::new(3, 10).slice(&items), &[20, 21, 22, 23, 24]);
    /// assert!(Pagination::new(4, 10).slice(&items).is_empty());
    /// ```
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.limit()).min(items.len());
        &items[start..end]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: QUESTIONS_PER_PAGE,
        }
    }
}

/// `?page=` query parameter.
///
/// Kept as raw text so that a non-numeric value falls back to page 1
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn page_number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

impl From<PageParams> for Pagination {
    fn from(params: PageParams) -> Self {
        Self::new(params.page_number(), QUESTIONS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_calculation() {
        let p = Pagination::new(1, 10);
        assert_eq!(p.offset(), 0);

        let p = Pagination::new(2, 10);
        assert_eq!(p.offset(), 10);

        let p = Pagination::new(3, 25);
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn clamps_page() {
        assert_eq!(Pagination::new(0, 10).page, 1);
        assert_eq!(Pagination::new(-7, 10).page, 1);
        assert_eq!(Pagination::new(i64::MAX, 10).page, u32::MAX);
    }

    #[test]
    fn clamps_per_page() {
        let p = Pagination::new(1, 0);
        assert_eq!(p.per_page, 1);
    }

    #[test]
    fn slices_last_partial_page() {
        let items: Vec<i32> = (1..=23).collect();
        let page = Pagination::new(3, 10);
        assert_eq!(page.slice(&items), &[21, 22, 23]);
    }

    #[test]
    fn beyond_extent_is_empty() {
        let items: Vec<i32> = (1..=5).collect();
        assert!(Pagination::new(2, 10).slice(&items).is_empty());
        assert!(Pagination::new(i64::MAX, 10).slice(&items).is_empty());
    }

    #[test]
    fn page_params_fall_back_to_first_page() {
        let params = PageParams { page: None };
        assert_eq!(params.page_number(), 1);

        let params = PageParams {
            page: Some("abc".into()),
        };
        assert_eq!(params.page_number(), 1);

        let params = PageParams {
            page: Some("4".into()),
        };
        assert_eq!(Pagination::from(params), Pagination::new(4, QUESTIONS_PER_PAGE));

        let params = PageParams {
            page: Some("-2".into()),
        };
        assert_eq!(Pagination::from(params).page, 1);
    }
}
