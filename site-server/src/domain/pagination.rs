//! Page arithmetic for ordered listings.
//!
//! Out-of-range requests are clamped instead of rejected: anything that is
//! not a positive integer becomes page 1, and pages past the end become the
//! last page. An empty listing still has one (empty) page.

pub(crate) const HTML_PAGE_SIZE: u32 = 5;
pub(crate) const DEFAULT_API_LIMIT: u32 = 5;

/// Parses a raw `page` query value. Missing, non-numeric, zero and negative
/// values all map to page 1. Numbers too large for `u32` saturate, so they
/// still clamp to the last page.
pub(crate) fn parse_page_number(raw: Option<&str>) -> u32 {
    raw.and_then(parse_positive).unwrap_or(1)
}

/// Parses a raw `limit` query value for the JSON API. The requested size is
/// used as is; only missing or non-positive values fall back to the default.
pub(crate) fn parse_page_size(raw: Option<&str>) -> u32 {
    raw.and_then(parse_positive).unwrap_or(DEFAULT_API_LIMIT)
}

fn parse_positive(raw: &str) -> Option<u32> {
    let value = raw.trim();
    let digits = value.strip_prefix('+').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // All digits, so the only possible failure is overflow.
    let number = digits.parse::<u32>().unwrap_or(u32::MAX);
    (number >= 1).then_some(number)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Paginator {
    total_items: u64,
    per_page: u32,
}

impl Paginator {
    pub(crate) fn new(total_items: u64, per_page: u32) -> Self {
        Self {
            total_items,
            per_page: per_page.max(1),
        }
    }

    pub(crate) fn total_pages(&self) -> u32 {
        if self.total_items == 0 {
            return 1;
        }
        let pages = self.total_items.div_ceil(u64::from(self.per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Window for the requested page, clamped into `1..=total_pages`.
    pub(crate) fn page(&self, requested: u32) -> PageWindow {
        let total_pages = self.total_pages();
        let number = requested.clamp(1, total_pages);
        PageWindow {
            number,
            total_pages,
            total_items: self.total_items,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageWindow {
    pub(crate) number: u32,
    pub(crate) total_pages: u32,
    pub(crate) total_items: u64,
    pub(crate) per_page: u32,
}

impl PageWindow {
    pub(crate) fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub(crate) fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub(crate) fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.per_page)
    }

    pub(crate) fn limit(&self) -> u32 {
        self.per_page
    }

    pub(crate) fn next_number(&self) -> Option<u32> {
        self.has_next().then_some(self.number + 1)
    }

    pub(crate) fn previous_number(&self) -> Option<u32> {
        self.has_previous().then_some(self.number - 1)
    }
}

/// One page of an ordered listing.
#[derive(Debug, Clone)]
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
    pub(crate) window: PageWindow,
}
