pub mod debounce;
pub mod events;
pub mod storefront;

pub use debounce::{Debouncer, SearchDebouncer};
pub use events::StorefrontEvent;
pub use storefront::Storefront;
