//! The storefront session.
//!
//! One value owns the catalog selection, the cart and the shopper extras, and
//! every UI action is a method on it. Observers subscribe to a broadcast of
//! [`StorefrontEvent`]s instead of poking at shared globals.

use crate::app::events::StorefrontEvent;
use crate::domain::cart::{AddOutcome, CartError, CartStore, CartView, CheckoutSummary};
use crate::domain::catalog::{
    active_filters, apply_filters, page_links, Catalog, FilterChip, FilterKey, FilterPreferences,
    FilterState, FilterUpdate, FilteredView, PageLinks, PageOutOfRange, ProductLookup, ProductRegistry,
    ViewMode,
};
use crate::domain::preferences::{Experiments, RecentlyViewed, Wishlist, WishlistToggle};
use crate::infra::config::StorefrontSettings;
use crate::storage::{keys, load_json, save_json, KeyValueStore};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 64;

pub struct Storefront {
    catalog: Arc<Catalog>,
    registry: Arc<ProductRegistry>,
    storage: Arc<dyn KeyValueStore>,
    filters: FilterState,
    view: FilteredView,
    cart: CartStore,
    wishlist: Wishlist,
    recent: RecentlyViewed,
    experiments: Experiments,
    events: broadcast::Sender<StorefrontEvent>,
}

impl Storefront {
    /// Restores filter preferences, view mode, cart and shopper extras from
    /// `storage` and computes the first page. Nothing is written back.
    pub fn open(
        catalog: Arc<Catalog>,
        registry: Arc<ProductRegistry>,
        storage: Arc<dyn KeyValueStore>,
        settings: &StorefrontSettings,
    ) -> Self {
        let prefs: FilterPreferences =
            load_json(storage.as_ref(), keys::CATALOG_FILTERS).unwrap_or_default();
        let view_mode = read_view_mode(storage.as_ref());
        let filters = FilterState::from_preferences(&prefs, view_mode);
        let view = first_page(&catalog, &filters);

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let storefront = Self {
            cart: CartStore::load(storage.clone(), settings.duplicate_policy),
            wishlist: Wishlist::load(storage.clone()),
            recent: RecentlyViewed::load(storage.clone()),
            experiments: Experiments::load(storage.clone()),
            catalog,
            registry,
            storage,
            filters,
            view,
            events,
        };
        info!(
            products = storefront.catalog.len(),
            results = storefront.view.total_count,
            view_mode = %storefront.filters.view_mode(),
            "Storefront: session opened"
        );
        storefront
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: StorefrontEvent) {
        debug!(event = event.name(), "Storefront: event");
        // No receivers is fine: events are dropped.
        let _ = self.events.send(event);
    }

    // ---- read models ----

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn active_filters(&self) -> Vec<FilterChip> {
        active_filters(&self.filters)
    }

    pub fn page_links(&self) -> PageLinks {
        page_links(self.view.page, self.view.total_pages)
    }

    pub fn cart_view(&self) -> CartView {
        self.cart.view()
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn wishlist(&self) -> &[String] {
        self.wishlist.ids()
    }

    pub fn recently_viewed(&self) -> &[String] {
        self.recent.ids()
    }

    pub fn experiments(&self) -> &Experiments {
        &self.experiments
    }

    // ---- catalog commands ----

    /// Applies the present fields of `update`. An update with no fields is a no-op.
    pub fn update_filters(&mut self, update: &FilterUpdate) -> &FilteredView {
        if self.filters.apply(update) {
            self.filters_changed();
        }
        &self.view
    }

    pub fn set_search(&mut self, text: &str) -> &FilteredView {
        self.update_filters(&FilterUpdate {
            search: Some(text.to_string()),
            ..Default::default()
        })
    }

    /// Chip removal.
    pub fn remove_filter(&mut self, key: FilterKey) -> &FilteredView {
        self.filters.clear(key);
        self.filters_changed();
        &self.view
    }

    pub fn clear_filters(&mut self) -> &FilteredView {
        self.filters.clear_all();
        self.filters_changed();
        &self.view
    }

    /// Recomputes page 1, persists the selection once and announces it.
    fn filters_changed(&mut self) {
        self.view = first_page(&self.catalog, &self.filters);
        let prefs = self.filters.to_preferences();
        if let Err(e) = save_json(self.storage.as_ref(), keys::CATALOG_FILTERS, &prefs) {
            warn!(error = %e, "Storefront: failed to persist filter preferences");
        }
        info!(
            results = self.view.total_count,
            sort = %self.filters.sort_key(),
            "Storefront: filters applied"
        );
        self.emit(StorefrontEvent::FiltersApplied {
            filters: prefs,
            sort: self.filters.sort_key(),
            results_count: self.view.total_count,
        });
    }

    /// Moves to `page`. Out of range pages leave the session untouched.
    pub fn change_page(&mut self, page: usize) -> Result<&FilteredView, PageOutOfRange> {
        let mut next = self.filters.clone();
        next.set_page(page);
        let view = apply_filters(&self.catalog, &next)?;
        self.filters = next;
        self.view = view;
        self.emit(StorefrontEvent::PageChanged {
            page: self.view.page,
            total_pages: self.view.total_pages,
        });
        Ok(&self.view)
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.filters.set_view_mode(view_mode);
        if let Err(e) = self
            .storage
            .set(keys::CATALOG_VIEW_MODE, view_mode.as_str().to_string())
        {
            warn!(error = %e, "Storefront: failed to persist view mode");
        }
        self.emit(StorefrontEvent::ViewModeChanged { view_mode });
    }

    // ---- cart commands ----

    /// Adds one unit of any product the storefront sells.
    pub fn add_to_cart(&mut self, product_id: &str) -> AddOutcome {
        let outcome = self.cart.add(product_id, &*self.registry);
        self.after_add(product_id, outcome)
    }

    /// The catalog card's quick-add button: catalog products only.
    pub fn quick_add(&mut self, product_id: &str) -> AddOutcome {
        let outcome = self.cart.add(product_id, &*self.catalog);
        self.after_add(product_id, outcome)
    }

    /// Product page add. A quantity of 0 is read as 1.
    pub fn add_to_cart_with_quantity(&mut self, product_id: &str, quantity: u32) -> AddOutcome {
        let quantity = NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN);
        let outcome = self
            .cart
            .add_quantity(product_id, quantity, &*self.registry);
        self.after_add(product_id, outcome)
    }

    fn after_add(&self, product_id: &str, outcome: AddOutcome) -> AddOutcome {
        if outcome == AddOutcome::UnknownProduct {
            warn!(product_id, "Storefront: add for unknown product ignored");
            return outcome;
        }
        self.emit(StorefrontEvent::AddToCart {
            product_id: product_id.to_string(),
            outcome: outcome.clone(),
        });
        if outcome.changed_cart() {
            self.cart_changed();
        }
        outcome
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        let removed = self.cart.remove(product_id);
        if removed {
            self.cart_changed();
        }
        removed
    }

    pub fn set_cart_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        let changed = self.cart.set_quantity(product_id, quantity);
        if changed {
            self.cart_changed();
        }
        changed
    }

    /// Re-reads the cart another tab or process may have written.
    pub fn reload_cart(&mut self) {
        self.cart.reload();
        self.cart_changed();
    }

    fn cart_changed(&self) {
        self.emit(StorefrontEvent::CartChanged {
            totals: self.cart.totals(),
        });
    }

    pub fn checkout(&self) -> Result<CheckoutSummary, CartError> {
        let summary = self.cart.checkout()?;
        info!(
            items = summary.item_count,
            subtotal = %summary.subtotal,
            "Storefront: checkout started"
        );
        self.emit(StorefrontEvent::CheckoutStarted {
            item_count: summary.item_count,
            subtotal: summary.subtotal,
        });
        Ok(summary)
    }

    // ---- shopper extras ----

    pub fn toggle_wishlist(&mut self, product_id: &str) -> WishlistToggle {
        let outcome = self.wishlist.toggle(product_id, &*self.registry);
        if outcome != WishlistToggle::UnknownProduct {
            self.emit(StorefrontEvent::WishlistChanged {
                product_id: product_id.to_string(),
                outcome,
            });
        }
        outcome
    }

    /// Records a product page visit. Returns false for unknown ids.
    pub fn view_product(&mut self, product_id: &str) -> bool {
        if !self.registry.contains(product_id) {
            return false;
        }
        self.recent.record(product_id);
        self.emit(StorefrontEvent::ProductViewed {
            product_id: product_id.to_string(),
        });
        true
    }

    pub fn experiment_variant(&self, experiment: &str) -> String {
        self.experiments.variant(experiment).to_string()
    }

    pub fn set_experiment_variant(&mut self, experiment: &str, variant: &str) {
        self.experiments.set_variant(experiment, variant);
    }

    pub fn assign_experiment(&mut self, experiment: &str, variants: &[&str]) -> String {
        self.experiments.assign(experiment, variants)
    }
}

/// Accepts both a bare `list` and a JSON string `"list"`.
fn read_view_mode(storage: &dyn KeyValueStore) -> ViewMode {
    storage
        .get(keys::CATALOG_VIEW_MODE)
        .and_then(|raw| raw.trim().trim_matches('"').parse().ok())
        .unwrap_or_default()
}

fn first_page(catalog: &Catalog, filters: &FilterState) -> FilteredView {
    let mut state = filters.clone();
    state.set_page(1);
    apply_filters(catalog, &state).unwrap_or_else(|e| {
        warn!(error = %e, "Storefront: first page unavailable");
        FilteredView::empty(state.page_size())
    })
}
