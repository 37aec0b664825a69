pub mod cart;
pub mod catalog;
pub mod preferences;
pub mod pricing;
