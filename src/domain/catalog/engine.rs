//! The catalog pipeline: filter -> stable sort -> paginate.
//!
//! Everything here is pure. Persisting the selection and announcing that
//! filters were applied is the session's job.

use crate::domain::catalog::filters::{FilterKey, FilterState};
use crate::domain::catalog::product::{Catalog, Product};
use crate::domain::catalog::vocabulary::SortKey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;
use utoipa::ToSchema;

/// A page request outside `1..=total_pages`. Page 1 is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page {requested} is out of range (1..={total_pages})")]
pub struct PageOutOfRange {
    pub requested: usize,
    pub total_pages: usize,
}

/// One page of filtered, sorted products plus the numbers the result bar shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FilteredView {
    pub items: Vec<Product>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    /// 1-based, inclusive. 0 when there are no results.
    pub from: usize,
    /// 1-based, inclusive. 0 when there are no results.
    pub to: usize,
}

impl FilteredView {
    /// The view of a search that matched nothing.
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            page: 1,
            page_size,
            from: 0,
            to: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// "Showing 7–8 of 8 templates".
    pub fn summary(&self) -> String {
        if self.total_count == 0 {
            return "Showing 0 of 0 templates".to_string();
        }
        format!(
            "Showing {}\u{2013}{} of {} templates",
            self.from, self.to, self.total_count
        )
    }
}

/// A removable "active filter" tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterChip {
    pub key: FilterKey,
    pub label: String,
}

/// Runs the whole pipeline for `state` over `catalog`.
pub fn apply_filters(catalog: &Catalog, state: &FilterState) -> Result<FilteredView, PageOutOfRange> {
    let mut matched = filter_products(catalog, state);
    sort_products(&mut matched, state.sort_key());
    paginate(matched, state.page(), state.page_size())
}

/// Filtered products in catalog order.
pub fn filter_products<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a Product> {
    let needle = state.search_text().to_lowercase();
    catalog
        .products()
        .iter()
        .filter(|p| matches(p, state, &needle))
        .collect()
}

/// Conjunction of every active predicate. `needle` is the lowercased search text.
fn matches(product: &Product, state: &FilterState, needle: &str) -> bool {
    if let Some(category) = state.category() {
        if product.category != category {
            return false;
        }
    }
    if let Some(range) = state.price_range() {
        if !range.contains(product.price) {
            return false;
        }
    }
    if let Some(format) = state.format() {
        if !product.has_format(format) {
            return false;
        }
    }
    if let Some(difficulty) = state.difficulty() {
        if product.difficulty != difficulty {
            return false;
        }
    }
    if !needle.is_empty()
        && !product.title.to_lowercase().contains(needle)
        && !product.description.to_lowercase().contains(needle)
    {
        return false;
    }
    true
}

/// Stable sort; equal keys keep their incoming order.
pub fn sort_products(products: &mut [&Product], sort_key: SortKey) {
    match sort_key {
        SortKey::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Popular | SortKey::Newest => {
            products.sort_by(|a, b| b.downloads.cmp(&a.downloads))
        }
        SortKey::Name => products.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

/// Case-insensitive title order with the raw title as tie-break, so
/// "meal" and "Meal" still land in a fixed order.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Cuts one page out of the sorted result.
pub fn paginate(
    sorted: Vec<&Product>,
    page: usize,
    page_size: usize,
) -> Result<FilteredView, PageOutOfRange> {
    let total_count = sorted.len();
    let total_pages = total_pages(total_count, page_size);

    if page < 1 || (page > total_pages && page != 1) {
        return Err(PageOutOfRange {
            requested: page,
            total_pages,
        });
    }

    if total_count == 0 {
        return Ok(FilteredView::empty(page_size));
    }

    let start = (page - 1) * page_size;
    let end = (page * page_size).min(total_count);
    let items = sorted[start..end].iter().map(|p| (*p).clone()).collect();

    Ok(FilteredView {
        items,
        total_count,
        total_pages,
        page,
        page_size,
        from: start + 1,
        to: end,
    })
}

/// Chips for every criterion that currently narrows the catalog.
pub fn active_filters(state: &FilterState) -> Vec<FilterChip> {
    let mut chips = Vec::new();
    if let Some(category) = state.category() {
        chips.push(FilterChip {
            key: FilterKey::Category,
            label: format!("Category: {}", category.label()),
        });
    }
    if let Some(range) = state.price_range() {
        chips.push(FilterChip {
            key: FilterKey::Price,
            label: format!("Price: {}", range.label()),
        });
    }
    if let Some(format) = state.format() {
        chips.push(FilterChip {
            key: FilterKey::Format,
            label: format!("Format: {}", format.label()),
        });
    }
    if let Some(difficulty) = state.difficulty() {
        chips.push(FilterChip {
            key: FilterKey::Difficulty,
            label: format!("Level: {}", difficulty.label()),
        });
    }
    let search = state.search_text();
    if !search.is_empty() {
        chips.push(FilterChip {
            key: FilterKey::Search,
            label: format!("Search: \"{}\"", search),
        });
    }
    chips
}

/// One slot of the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLink {
    Page { number: usize, current: bool },
    Gap,
}

/// Model of the pagination bar: prev/next, a window of two pages either side
/// of the current one, plus the first and last page behind gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageLinks {
    pub has_previous: bool,
    pub has_next: bool,
    pub links: Vec<PageLink>,
}

/// Hidden (no links) when everything fits on one page.
pub fn page_links(current: usize, total_pages: usize) -> PageLinks {
    if total_pages <= 1 {
        return PageLinks {
            has_previous: false,
            has_next: false,
            links: Vec::new(),
        };
    }

    let current = current.clamp(1, total_pages);
    let start = current.saturating_sub(2).max(1);
    let end = (current + 2).min(total_pages);
    let page = |number| PageLink::Page {
        number,
        current: number == current,
    };

    let mut links = Vec::new();
    if start > 1 {
        links.push(page(1));
        if start > 2 {
            links.push(PageLink::Gap);
        }
    }
    links.extend((start..=end).map(page));
    if end < total_pages {
        if end < total_pages - 1 {
            links.push(PageLink::Gap);
        }
        links.push(page(total_pages));
    }

    PageLinks {
        has_previous: current > 1,
        has_next: current < total_pages,
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::vocabulary::{Category, Format};

    fn numbers(links: &PageLinks) -> Vec<Option<usize>> {
        links
            .links
            .iter()
            .map(|l| match l {
                PageLink::Page { number, .. } => Some(*number),
                PageLink::Gap => None,
            })
            .collect()
    }

    #[test]
    fn default_state_lists_first_page_by_downloads() {
        let view = apply_filters(&Catalog::builtin(), &FilterState::default()).unwrap();
        assert_eq!(view.total_count, 8);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.items.len(), 6);
        assert_eq!(view.items[0].id, "basic-budget-planner");
        assert_eq!((view.from, view.to), (1, 6));
    }

    #[test]
    fn empty_result_has_zero_bounds_and_page_one() {
        let mut state = FilterState::default();
        state.set_category(Some(Category::Debt));
        state.set_format(Some(Format::Pdf));
        let view = apply_filters(&Catalog::builtin(), &state).unwrap();
        assert!(view.is_empty());
        assert_eq!((view.page, view.from, view.to, view.total_pages), (1, 0, 0, 0));
        assert_eq!(view.summary(), "Showing 0 of 0 templates");
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        let catalog = Catalog::builtin();
        let mut state = FilterState::default();
        state.set_page(0);
        assert!(apply_filters(&catalog, &state).is_err());
        state.set_page(3);
        let err = apply_filters(&catalog, &state).unwrap_err();
        assert_eq!(err, PageOutOfRange { requested: 3, total_pages: 2 });
    }

    #[test]
    fn chips_follow_active_criteria() {
        let mut state = FilterState::default();
        assert!(active_filters(&state).is_empty());
        state.set_category(Some(Category::Budget));
        state.set_format(Some(Format::Excel));
        state.set_search_text("planner");
        let labels: Vec<_> = active_filters(&state).into_iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec!["Category: Budget Planning", "Format: EXCEL", "Search: \"planner\""]
        );
    }

    #[test]
    fn search_whitespace_is_part_of_the_needle() {
        let catalog = Catalog::builtin();
        let mut state = FilterState::default();
        state.set_search_text("   ");
        assert!(filter_products(&catalog, &state).is_empty());
        assert_eq!(active_filters(&state).len(), 1);

        state.set_search_text("tracker ");
        let ids: Vec<&str> = filter_products(&catalog, &state)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        let substring: Vec<&str> = catalog
            .products()
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains("tracker ")
                    || p.description.to_lowercase().contains("tracker ")
            })
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, substring);
        assert!(!ids.contains(&"expense-tracker"));
    }

    #[test]
    fn page_window_has_gaps_on_both_sides() {
        let links = page_links(6, 12);
        assert_eq!(
            numbers(&links),
            vec![Some(1), None, Some(4), Some(5), Some(6), Some(7), Some(8), None, Some(12)]
        );
        assert!(links.has_previous && links.has_next);
    }

    #[test]
    fn page_window_near_edges() {
        assert_eq!(numbers(&page_links(1, 2)), vec![Some(1), Some(2)]);
        assert_eq!(numbers(&page_links(4, 5)), vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
        assert!(page_links(1, 1).links.is_empty());
        assert!(!page_links(1, 3).has_previous);
        assert!(!page_links(3, 3).has_next);
    }
}
