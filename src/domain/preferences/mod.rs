//! Per-shopper extras kept next to the cart: wishlist, recently viewed products
//! and A/B experiment assignments.

pub mod experiments;
pub mod recent;
pub mod wishlist;

pub use experiments::{Experiments, CONTROL_VARIANT};
pub use recent::{RecentlyViewed, RECENTLY_VIEWED_CAP};
pub use wishlist::{Wishlist, WishlistToggle};
