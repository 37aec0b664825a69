//! Filter, sort and pagination selection for one browsing session.

use crate::domain::catalog::vocabulary::{
    parse_selection, selection_str, Category, Difficulty, Format, PriceRange, SortKey, UnknownValue,
    ViewMode,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Products per catalog page.
pub const PAGE_SIZE: usize = 6;

/// The shopper's current filter/sort/pagination selection.
///
/// `None` on a criterion means "all". Every mutation of a filter criterion goes
/// through a method that also moves `page` back to 1; only [`FilterState::set_page`]
/// leaves the criteria alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterState {
    category: Option<Category>,
    price_range: Option<PriceRange>,
    format: Option<Format>,
    difficulty: Option<Difficulty>,
    search_text: String,
    sort_key: SortKey,
    page: usize,
    page_size: usize,
    view_mode: ViewMode,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: None,
            price_range: None,
            format: None,
            difficulty: None,
            search_text: String::new(),
            sort_key: SortKey::default(),
            page: 1,
            page_size: PAGE_SIZE,
            view_mode: ViewMode::default(),
        }
    }
}

impl FilterState {
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_price_range(&mut self, price_range: Option<PriceRange>) {
        self.price_range = price_range;
        self.page = 1;
    }

    pub fn set_format(&mut self, format: Option<Format>) {
        self.format = format;
        self.page = 1;
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.difficulty = difficulty;
        self.page = 1;
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
        self.page = 1;
    }

    /// Pure page navigation. Range checking happens in the engine, which knows
    /// the filtered count; callers keep the old page when it rejects the new one.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Presentation only; neither the criteria nor the page change.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Applies a partial update. Returns true if any field was present, in which
    /// case the page is back at 1.
    pub fn apply(&mut self, update: &FilterUpdate) -> bool {
        let mut touched = false;
        if let Some(raw) = update.category.as_deref() {
            self.set_category(parse_selection(raw));
            touched = true;
        }
        if let Some(raw) = update.price.as_deref() {
            self.set_price_range(parse_selection(raw));
            touched = true;
        }
        if let Some(raw) = update.format.as_deref() {
            self.set_format(parse_selection(raw));
            touched = true;
        }
        if let Some(raw) = update.difficulty.as_deref() {
            self.set_difficulty(parse_selection(raw));
            touched = true;
        }
        if let Some(text) = update.search.as_deref() {
            self.set_search_text(text);
            touched = true;
        }
        if let Some(raw) = update.sort.as_deref() {
            self.set_sort_key(raw.parse().unwrap_or_default());
            touched = true;
        }
        touched
    }

    /// Resets one criterion to its default.
    pub fn clear(&mut self, key: FilterKey) {
        match key {
            FilterKey::Category => self.set_category(None),
            FilterKey::Price => self.set_price_range(None),
            FilterKey::Format => self.set_format(None),
            FilterKey::Difficulty => self.set_difficulty(None),
            FilterKey::Search => self.set_search_text(String::new()),
        }
    }

    /// Resets every criterion. Sort order and view mode are kept.
    pub fn clear_all(&mut self) {
        for key in FilterKey::ALL {
            self.clear(*key);
        }
    }

    /// True when at least one criterion narrows the catalog.
    pub fn has_active_criteria(&self) -> bool {
        self.category.is_some()
            || self.price_range.is_some()
            || self.format.is_some()
            || self.difficulty.is_some()
            || !self.search_text.is_empty()
    }

    pub fn to_preferences(&self) -> FilterPreferences {
        FilterPreferences {
            category: selection_str(self.category.as_ref()),
            price: selection_str(self.price_range.as_ref()),
            format: selection_str(self.format.as_ref()),
            difficulty: selection_str(self.difficulty.as_ref()),
            search: self.search_text.clone(),
        }
    }

    /// Restores the criteria from persisted preferences. Unknown values load as "all".
    pub fn from_preferences(prefs: &FilterPreferences, view_mode: ViewMode) -> Self {
        Self {
            category: parse_selection(&prefs.category),
            price_range: parse_selection(&prefs.price),
            format: parse_selection(&prefs.format),
            difficulty: parse_selection(&prefs.difficulty),
            search_text: prefs.search.clone(),
            view_mode,
            ..Self::default()
        }
    }
}

/// A batch of filter control values as the controls report them (plain strings).
///
/// Absent fields are left untouched. Values follow the persisted vocabulary;
/// `"all"` or anything unrecognised clears that criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterUpdate {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// The criteria that show up as removable chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    Category,
    Price,
    Format,
    Difficulty,
    Search,
}

impl FilterKey {
    pub const ALL: &'static [FilterKey] = &[
        FilterKey::Category,
        FilterKey::Price,
        FilterKey::Format,
        FilterKey::Difficulty,
        FilterKey::Search,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Category => "category",
            FilterKey::Price => "price",
            FilterKey::Format => "format",
            FilterKey::Difficulty => "difficulty",
            FilterKey::Search => "search",
        }
    }
}

impl FromStr for FilterKey {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| UnknownValue {
                kind: "filter key",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted filter selection: `{category, price, format, difficulty, search}`, all strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilterPreferences {
    #[serde(default = "all")]
    pub category: String,
    #[serde(default = "all")]
    pub price: String,
    #[serde(default = "all")]
    pub format: String,
    #[serde(default = "all")]
    pub difficulty: String,
    #[serde(default)]
    pub search: String,
}

fn all() -> String {
    "all".to_string()
}

impl Default for FilterPreferences {
    fn default() -> Self {
        FilterState::default().to_preferences()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changing_any_filter_resets_page() {
        let mut state = FilterState::default();
        state.set_page(3);
        state.set_format(Some(Format::Pdf));
        assert_eq!(state.page(), 1);

        state.set_page(2);
        let touched = state.apply(&FilterUpdate {
            sort: Some("rating".into()),
            ..Default::default()
        });
        assert!(touched);
        assert_eq!(state.page(), 1);
        assert_eq!(state.sort_key(), SortKey::Rating);
        assert_eq!(state.format(), Some(Format::Pdf));
    }

    #[test]
    fn page_navigation_keeps_criteria() {
        let mut state = FilterState::default();
        state.set_category(Some(Category::Debt));
        state.set_search_text("tracker");
        let before = state.clone();

        state.set_page(2);
        assert_eq!(state.page(), 2);
        assert_eq!(state.category(), before.category());
        assert_eq!(state.search_text(), before.search_text());
        assert_eq!(state.sort_key(), before.sort_key());
    }

    #[test]
    fn empty_update_touches_nothing() {
        let mut state = FilterState::default();
        state.set_page(2);
        assert!(!state.apply(&FilterUpdate::default()));
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn unknown_values_clear_the_criterion() {
        let mut state = FilterState::default();
        state.set_category(Some(Category::Meal));
        state.apply(&FilterUpdate {
            category: Some("lottery".into()),
            sort: Some("random".into()),
            ..Default::default()
        });
        assert_eq!(state.category(), None);
        assert_eq!(state.sort_key(), SortKey::Popular);
    }

    #[test]
    fn clear_all_keeps_sort_and_view_mode() {
        let mut state = FilterState::default();
        state.set_sort_key(SortKey::Name);
        state.set_view_mode(ViewMode::List);
        state.set_price_range(Some(PriceRange::Over30));
        state.set_search_text("suite");

        state.clear_all();
        assert!(!state.has_active_criteria());
        assert_eq!(state.sort_key(), SortKey::Name);
        assert_eq!(state.view_mode(), ViewMode::List);
    }

    #[test]
    fn preferences_tolerate_missing_and_unknown_fields() {
        let prefs: FilterPreferences =
            serde_json::from_str(r#"{"category":"savings","price":"cheap"}"#).unwrap();
        let state = FilterState::from_preferences(&prefs, ViewMode::Grid);
        assert_eq!(state.category(), Some(Category::Savings));
        assert_eq!(state.price_range(), None);
        assert_eq!(state.format(), None);
        assert_eq!(state.search_text(), "");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn preferences_round_trip() {
        let mut state = FilterState::default();
        state.set_difficulty(Some(Difficulty::Advanced));
        state.set_search_text("Planner");
        let restored = FilterState::from_preferences(&state.to_preferences(), ViewMode::List);
        assert_eq!(restored.difficulty(), Some(Difficulty::Advanced));
        assert_eq!(restored.search_text(), "Planner");
        assert_eq!(restored.view_mode(), ViewMode::List);
        assert_eq!(restored.to_preferences().price, "all");
    }
}
