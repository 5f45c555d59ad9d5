//! Derived view: search, category filter and sort over the loaded page.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use products::contract::model::Product;

/// Sort applied by [`derive_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    PriceLow,
    PriceHigh,
    Category,
    /// Any key the view does not know: keep page order.
    Unsorted,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Category => "category",
            Self::Unsorted => "none",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Title => text_order(&a.title, &b.title),
            Self::PriceLow => a.price.total_cmp(&b.price),
            Self::PriceHigh => b.price.total_cmp(&a.price),
            Self::Category => text_order(
                a.category.as_deref().unwrap_or_default(),
                b.category.as_deref().unwrap_or_default(),
            ),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "title" => Self::Title,
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "category" => Self::Category,
            _ => Self::Unsorted,
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Case-insensitive first so "apple" and "Banana" sort like a reader expects.
fn text_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Filter and sort `items` for display. Pure: same inputs, same output.
///
/// 1. keep titles containing `search_term`, ignoring case (empty matches all);
/// 2. if `category_filter` is non-empty keep exact category matches;
/// 3. stable sort by `sort_key`.
pub fn derive_view(
    items: &[Product],
    search_term: &str,
    category_filter: &str,
    sort_key: SortKey,
) -> Vec<Product> {
    let needle = search_term.to_lowercase();
    let mut view: Vec<Product> = items
        .iter()
        .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
        .filter(|p| category_filter.is_empty() || p.category.as_deref() == Some(category_filter))
        .cloned()
        .collect();
    // sort_by is stable
    view.sort_by(|a, b| sort_key.compare(a, b));
    view
}

/// Distinct non-empty categories of `items`, in first-seen order.
pub fn categories(items: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in items.iter().filter_map(|p| p.category.as_deref()) {
        if !category.is_empty() && !seen.iter().any(|c| c == category) {
            seen.push(category.to_owned());
        }
    }
    seen
}

/// Counts shown above the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSummary {
    /// Items on the loaded page.
    pub on_page: usize,
    /// Items left after search and category filtering.
    pub filtered: usize,
    /// Distinct categories on the loaded page.
    pub categories: usize,
}
