//! Closed vocabularies shared by products, filters and persisted preferences.
//!
//! Every type round-trips through the same lowercase string used in storage and
//! on the wire. An unknown string never fails a load: `parse_selection` yields
//! `None`, which filter code reads as "all".

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Returned by the `FromStr` impls below for strings outside a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownValue {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Template category.
    Category, "category" {
        Budget => "budget",
        Savings => "savings",
        Debt => "debt",
        Expense => "expense",
        Planning => "planning",
        Investment => "investment",
        Meal => "meal",
    }
}

vocabulary! {
    /// Skill level a template targets. `All` is a real product value (bundles),
    /// not the "no filter" selection.
    Difficulty, "difficulty" {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
        All => "all",
    }
}

vocabulary! {
    /// Delivery format of a template.
    Format, "format" {
        Excel => "excel",
        Sheets => "sheets",
        Pdf => "pdf",
        Notion => "notion",
    }
}

vocabulary! {
    Badge, "badge" {
        Free => "free",
        Premium => "premium",
        Sale => "sale",
        Bestseller => "bestseller",
        New => "new",
    }
}

vocabulary! {
    /// Price bucket used by the price filter.
    PriceRange, "price range" {
        Free => "free",
        Under15 => "under-15",
        From15To30 => "15-30",
        Over30 => "over-30",
    }
}

vocabulary! {
    SortKey, "sort key" {
        Popular => "popular",
        PriceLow => "price-low",
        PriceHigh => "price-high",
        Rating => "rating",
        /// There is no release timestamp on products, so this sorts by
        /// downloads exactly like `Popular`. Switch it to the timestamp once
        /// products carry one.
        Newest => "newest",
        Name => "name",
    }
}

vocabulary! {
    ViewMode, "view mode" {
        Grid => "grid",
        List => "list",
    }
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Budget => "Budget Planning",
            Category::Savings => "Savings & Goals",
            Category::Debt => "Debt Management",
            Category::Expense => "Expense Tracking",
            Category::Planning => "Financial Planning",
            Category::Investment => "Investment Tracking",
            Category::Meal => "Meal Planning",
        }
    }
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::All => "All levels",
        }
    }
}

impl Format {
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl Badge {
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl PriceRange {
    /// Bucket membership. The boundaries are inclusive on both ends of `15-30`.
    pub fn contains(&self, price: Decimal) -> bool {
        let fifteen = Decimal::from(15);
        let thirty = Decimal::from(30);
        match self {
            PriceRange::Free => price.is_zero(),
            PriceRange::Under15 => price < fifteen,
            PriceRange::From15To30 => price >= fifteen && price <= thirty,
            PriceRange::Over30 => price > thirty,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::Free => "Free",
            PriceRange::Under15 => "Under $15",
            PriceRange::From15To30 => "$15 - $30",
            PriceRange::Over30 => "Over $30",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Popular
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Grid
    }
}

/// Parses a persisted selection where `"all"`, the empty string and any
/// unrecognised value all mean "no filter".
pub fn parse_selection<T: FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "all" {
        return None;
    }
    raw.parse().ok()
}

/// Inverse of [`parse_selection`].
pub fn selection_str<T: fmt::Display>(value: Option<&T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "all".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_buckets_match_storefront_boundaries() {
        let p = |cents: i64| Decimal::new(cents, 2);
        assert!(PriceRange::Free.contains(Decimal::ZERO));
        assert!(!PriceRange::Free.contains(p(799)));
        assert!(PriceRange::Under15.contains(p(1499)));
        assert!(!PriceRange::Under15.contains(p(1500)));
        assert!(PriceRange::From15To30.contains(p(1500)));
        assert!(PriceRange::From15To30.contains(p(3000)));
        assert!(!PriceRange::From15To30.contains(p(3001)));
        assert!(PriceRange::Over30.contains(p(4999)));
        assert!(!PriceRange::Over30.contains(p(3000)));
    }

    #[test]
    fn unknown_selection_reads_as_all() {
        assert_eq!(parse_selection::<Category>("all"), None);
        assert_eq!(parse_selection::<Category>(""), None);
        assert_eq!(parse_selection::<Category>("crypto"), None);
        assert_eq!(parse_selection::<Category>("debt"), Some(Category::Debt));
        assert_eq!(selection_str::<Category>(None), "all");
        assert_eq!(selection_str(Some(&PriceRange::Under15)), "under-15");
    }

    #[test]
    fn wire_strings_round_trip_through_serde() {
        let json = serde_json::to_string(&SortKey::PriceHigh).unwrap();
        assert_eq!(json, "\"price-high\"");
        let back: PriceRange = serde_json::from_str("\"15-30\"").unwrap();
        assert_eq!(back, PriceRange::From15To30);
    }
}
