//! Plain-text rendering of the listing state.

use std::fmt::Write;

use products::contract::Product;
use products_store::ListingState;

/// Table of the derived view followed by the pagination footer.
pub fn listing(state: &ListingState) -> String {
    let view = state.view();
    let summary = state.summary();
    let mut out = String::new();

    if view.is_empty() {
        if state.is_filtered() {
            out.push_str("No products match the current filters.\n");
        } else {
            out.push_str("No products found.\n");
        }
    } else {
        let _ = writeln!(out, "{:<36}  {:>10}  {:<14}  TITLE", "ID", "PRICE", "CATEGORY");
        for p in &view {
            let _ = writeln!(
                out,
                "{:<36}  {:>10.2}  {:<14}  {}",
                p.id,
                p.price,
                p.category.as_deref().unwrap_or("-"),
                p.title
            );
        }
    }

    let pg = &state.pagination;
    let _ = writeln!(
        out,
        "\nPage {} of {} ({} products total, {} per page)",
        pg.current_page, pg.total_pages, pg.total_items, pg.items_per_page
    );
    if state.is_filtered() {
        let _ = writeln!(out, "Showing {} of {} on this page", summary.filtered, summary.on_page);
    }
    out
}

/// Multi-line detail view of one product.
pub fn detail(p: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", p.title);
    let _ = writeln!(out, "  id:          {}", p.id);
    let _ = writeln!(out, "  price:       {:.2}", p.price);
    let _ = writeln!(out, "  category:    {}", p.category.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "  description: {}", p.description.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "  image:       {}", p.image.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "  created:     {}", p.created_at.to_rfc3339());
    let _ = writeln!(out, "  updated:     {}", p.updated_at.to_rfc3339());
    out
}
