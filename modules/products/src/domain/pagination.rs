//! Page-window arithmetic for the listing endpoint.

use crate::contract::model::{PageRequest, PaginationMeta};
use crate::domain::error::DomainError;

/// Validated `(page, limit)` pair with the limit already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
}

impl PageWindow {
    /// Validate a raw request. Non-positive values are rejected; a limit above
    /// `max_page_size` is clamped down to it.
    pub fn resolve(req: PageRequest, max_page_size: u64) -> Result<Self, DomainError> {
        if req.page < 1 {
            return Err(DomainError::invalid_page_window("page", req.page));
        }
        if req.limit < 1 {
            return Err(DomainError::invalid_page_window("limit", req.limit));
        }
        let limit = (req.limit as u64).min(max_page_size.max(1));
        Ok(Self {
            page: req.page as u64,
            limit,
        })
    }

    /// Rows to skip, or `None` when the window starts past what the store can
    /// address (SQLite offsets are signed 64-bit).
    pub fn offset(&self) -> Option<u64> {
        (self.page - 1)
            .checked_mul(self.limit)
            .filter(|offset| i64::try_from(*offset).is_ok())
    }

    pub fn meta(&self, total_items: u64) -> PaginationMeta {
        PaginationMeta {
            total_items,
            total_pages: PaginationMeta::page_count(total_items, self.limit),
            current_page: self.page,
            items_per_page: self.limit,
        }
    }
}

/// Parse a raw query value by its leading integer (`"2.5"` is 2, `"5abc"` is 5),
/// falling back to `default` when absent or when no digits lead.
/// Out-of-range values saturate.
pub fn parse_or_default(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_integer).unwrap_or(default)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = rest[..digits].bytes().fold(0i64, |acc, d| {
        let d = i64::from(d - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        }
    });
    Some(value)
}
