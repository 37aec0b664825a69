//! Catalog pipeline over the built-in eight templates:
//! filter soundness/completeness, stable sorting, pagination arithmetic,
//! chips and the page reset on any criterion change.

use rust_decimal::Decimal;
use std::str::FromStr;
use template_storefront::domain::catalog::{
    active_filters, apply_filters, engine, page_links, Catalog, Category, FilterKey, FilterState,
    FilterUpdate, Format, PageLink, PriceRange, Product, SortKey,
};

fn price(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn ids(items: &[Product]) -> Vec<&str> {
    items.iter().map(|p| p.id.as_str()).collect()
}

fn state_with(update: FilterUpdate) -> FilterState {
    let mut state = FilterState::default();
    state.apply(&update);
    state
}

#[test]
fn free_filter_returns_the_single_free_template() {
    let catalog = Catalog::builtin();
    let state = state_with(FilterUpdate {
        category: Some("all".into()),
        price: Some("free".into()),
        format: Some("all".into()),
        difficulty: Some("all".into()),
        ..Default::default()
    });

    let view = apply_filters(&catalog, &state).unwrap();
    assert_eq!(view.total_count, 1);
    assert_eq!(ids(&view.items), ["basic-budget-planner"]);
    assert!(view.items[0].is_free());
}

#[test]
fn search_is_case_insensitive_over_title_and_description() {
    let catalog = Catalog::builtin();
    let state = state_with(FilterUpdate {
        search: Some("BUDGET".into()),
        sort: Some("name".into()),
        ..Default::default()
    });

    let view = apply_filters(&catalog, &state).unwrap();
    assert_eq!(
        ids(&view.items),
        [
            "basic-budget-planner",
            "complete-budget-suite",
            "meal-planning-budget",
            "yearly-financial-planner",
        ]
    );
}

#[test]
fn price_low_sorts_ascending() {
    let catalog = Catalog::builtin();
    let state = state_with(FilterUpdate {
        sort: Some("price-low".into()),
        ..Default::default()
    });

    let mut sorted = engine::filter_products(&catalog, &state);
    engine::sort_products(&mut sorted, state.sort_key());
    let prices: Vec<Decimal> = sorted.iter().map(|p| p.price).collect();
    let expected: Vec<Decimal> = ["0", "7.99", "9.99", "12.99", "14.99", "15.99", "19.99", "49.99"]
        .into_iter()
        .map(price)
        .collect();
    assert_eq!(prices, expected);
}

#[test]
fn second_page_of_eight_holds_the_last_two() {
    let catalog = Catalog::builtin();
    let mut state = FilterState::default();
    state.set_page(2);

    let view = apply_filters(&catalog, &state).unwrap();
    assert_eq!(view.total_count, 8);
    assert_eq!(view.items.len(), 2);
    assert_eq!((view.from, view.to), (7, 8));
    assert_eq!(view.total_pages, 2);
    assert_eq!(view.summary(), "Showing 7\u{2013}8 of 8 templates");
}

#[test]
fn every_match_satisfies_all_predicates_and_nothing_is_missed() {
    let catalog = Catalog::builtin();
    let state = state_with(FilterUpdate {
        price: Some("under-15".into()),
        format: Some("sheets".into()),
        ..Default::default()
    });

    let matched = engine::filter_products(&catalog, &state);
    for p in &matched {
        assert!(PriceRange::Under15.contains(p.price));
        assert!(p.has_format(Format::Sheets));
    }
    let expected = catalog
        .products()
        .iter()
        .filter(|p| PriceRange::Under15.contains(p.price) && p.has_format(Format::Sheets))
        .count();
    assert_eq!(matched.len(), expected);
    assert_eq!(matched.len(), 5);
}

#[test]
fn equal_ratings_keep_catalog_order() {
    let catalog = Catalog::builtin();
    let state = state_with(FilterUpdate {
        sort: Some("rating".into()),
        ..Default::default()
    });

    let view = apply_filters(&catalog, &state).unwrap();
    assert_eq!(
        ids(&view.items),
        [
            "advanced-savings-planner",
            "debt-snowball-tracker",
            "complete-budget-suite",
            "basic-budget-planner",
            "yearly-financial-planner",
            "meal-planning-budget",
        ]
    );
}

#[test]
fn pagination_covers_every_result_exactly_once() {
    let catalog = Catalog::builtin();
    let mut seen = Vec::new();
    let first = apply_filters(&catalog, &FilterState::default()).unwrap();
    for page in 1..=first.total_pages {
        let mut state = FilterState::default();
        state.set_page(page);
        let view = apply_filters(&catalog, &state).unwrap();
        assert!(view.items.len() <= view.page_size);
        assert_eq!(view.to - view.from + 1, view.items.len());
        seen.extend(view.items.into_iter().map(|p| p.id));
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), catalog.len());

    let mut state = FilterState::default();
    state.set_page(3);
    let err = apply_filters(&catalog, &state).unwrap_err();
    assert_eq!((err.requested, err.total_pages), (3, 2));
}

#[test]
fn no_match_is_an_empty_first_page() {
    let catalog = Catalog::builtin();
    let state = state_with(FilterUpdate {
        search: Some("spaceship".into()),
        ..Default::default()
    });
    let view = apply_filters(&catalog, &state).unwrap();
    assert!(view.is_empty());
    assert_eq!((view.page, view.from, view.to, view.total_pages), (1, 0, 0, 0));
    assert_eq!(view.summary(), "Showing 0 of 0 templates");
}

#[test]
fn changing_a_criterion_returns_to_page_one() {
    let mut state = FilterState::default();
    state.set_page(2);
    state.set_category(Some(Category::Planning));
    assert_eq!(state.page(), 1);

    state.set_page(2);
    state.set_sort_key(SortKey::PriceHigh);
    assert_eq!(state.page(), 1);

    state.set_page(2);
    state.clear(FilterKey::Category);
    assert_eq!(state.page(), 1);
}

#[test]
fn chips_describe_active_criteria() {
    let state = state_with(FilterUpdate {
        category: Some("budget".into()),
        price: Some("under-15".into()),
        format: Some("excel".into()),
        difficulty: Some("beginner".into()),
        search: Some("planner".into()),
        ..Default::default()
    });
    let labels: Vec<String> = active_filters(&state).into_iter().map(|c| c.label).collect();
    assert_eq!(
        labels,
        [
            "Category: Budget Planning",
            "Price: Under $15",
            "Format: EXCEL",
            "Level: Beginner",
            "Search: \"planner\"",
        ]
    );
    assert!(active_filters(&FilterState::default()).is_empty());
}

#[test]
fn page_bar_windows_around_current_page() {
    let links = page_links(5, 10);
    assert!(links.has_previous && links.has_next);
    let rendered: Vec<String> = links
        .links
        .iter()
        .map(|l| match l {
            PageLink::Page { number, current: true } => format!("[{}]", number),
            PageLink::Page { number, .. } => number.to_string(),
            PageLink::Gap => "...".to_string(),
        })
        .collect();
    assert_eq!(rendered, ["1", "...", "3", "4", "[5]", "6", "7", "...", "10"]);

    assert!(page_links(1, 1).links.is_empty());
}

#[test]
fn name_sort_is_repeatable_and_keeps_tied_titles_in_catalog_order() {
    let retitled: Vec<Product> = Catalog::builtin()
        .products()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut p = p.clone();
            if i % 2 == 0 {
                p.title = "Budget Planner".to_string();
            }
            p
        })
        .collect();
    let catalog = Catalog::new(retitled);
    let mut state = FilterState::default();
    state.set_sort_key(SortKey::Name);

    let mut first = engine::filter_products(&catalog, &state);
    engine::sort_products(&mut first, state.sort_key());
    let mut second = engine::filter_products(&catalog, &state);
    engine::sort_products(&mut second, state.sort_key());
    engine::sort_products(&mut second, state.sort_key());
    assert_eq!(ids_of(&first), ids_of(&second));

    let tied: Vec<&str> = first
        .iter()
        .filter(|p| p.title == "Budget Planner")
        .map(|p| p.id.as_str())
        .collect();
    let in_catalog_order: Vec<&str> = catalog
        .products()
        .iter()
        .filter(|p| p.title == "Budget Planner")
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(tied.len(), 4);
    assert_eq!(tied, in_catalog_order);
}

fn ids_of(items: &[&Product]) -> Vec<String> {
    items.iter().map(|p| p.id.clone()).collect()
}
