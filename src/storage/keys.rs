//! Storage keys shared by every page of the storefront.

pub const CATALOG_FILTERS: &str = "catalogFilters";
pub const CATALOG_VIEW_MODE: &str = "catalogViewMode";
pub const CART: &str = "budgetMasterCart";
/// Key the landing-page cart used to write. Read once and migrated into [`CART`].
pub const LEGACY_CART: &str = "cart";
pub const WISHLIST: &str = "budgetMasterWishlist";
pub const EXPERIMENTS: &str = "abTests";
pub const RECENTLY_VIEWED: &str = "recentlyViewed";
