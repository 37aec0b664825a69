//! Shopping cart: the pure `Cart` value and the persisted `CartStore`.

pub mod line;
pub mod state;
pub mod store;

pub use line::CartLine;
pub use state::{AddOutcome, Cart, CartTotals, DuplicatePolicy};
pub use store::{CartError, CartStore, CartView, CheckoutSummary};
