//! The storefront's built-in template catalog.

use crate::domain::catalog::product::{Catalog, Product};
use crate::domain::catalog::vocabulary::{Badge, Category, Difficulty, Format};
use rust_decimal::Decimal;

/// Id of the free template handed out from the landing pages. It is sold
/// through the cart but is not listed in the catalog.
pub const FREE_TEMPLATE_ID: &str = "free-budget-template";

fn usd(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

struct Seed {
    id: &'static str,
    title: &'static str,
    category: Category,
    description: &'static str,
    price: Decimal,
    original_price: Option<Decimal>,
    rating: f64,
    downloads: u64,
    difficulty: Difficulty,
    formats: &'static [Format],
    features: &'static [&'static str],
    icon: &'static str,
    badge: Option<Badge>,
    is_popular: bool,
    is_bundle: bool,
}

impl From<Seed> for Product {
    fn from(s: Seed) -> Self {
        Product {
            id: s.id.to_string(),
            title: s.title.to_string(),
            description: s.description.to_string(),
            category: s.category,
            price: s.price,
            original_price: s.original_price,
            rating: s.rating,
            downloads: s.downloads,
            difficulty: s.difficulty,
            formats: s.formats.to_vec(),
            features: s.features.iter().map(|f| f.to_string()).collect(),
            icon: s.icon.to_string(),
            badge: s.badge,
            is_popular: s.is_popular,
            is_bundle: s.is_bundle,
        }
    }
}

impl Catalog {
    /// The eight templates the storefront ships with, in listing order.
    pub fn builtin() -> Self {
        use Format::{Excel, Notion, Pdf, Sheets};

        let seeds = vec![
            Seed {
                id: "basic-budget-planner",
                title: "Basic Budget Planner",
                category: Category::Budget,
                description: "Perfect starting template for beginners with simple monthly income and expense tracking.",
                price: Decimal::ZERO,
                original_price: None,
                rating: 4.8,
                downloads: 12_500,
                difficulty: Difficulty::Beginner,
                formats: &[Excel, Sheets, Pdf],
                features: &["Excel", "Google Sheets", "PDF"],
                icon: "spreadsheet",
                badge: Some(Badge::Free),
                is_popular: true,
                is_bundle: false,
            },
            Seed {
                id: "advanced-savings-planner",
                title: "Advanced Savings Planner",
                category: Category::Savings,
                description: "Multi-goal savings tracker with automated calculations and visual progress tracking.",
                price: usd(1299),
                original_price: None,
                rating: 4.9,
                downloads: 8_900,
                difficulty: Difficulty::Intermediate,
                formats: &[Excel, Sheets],
                features: &["Excel", "Google Sheets"],
                icon: "piggy-bank",
                badge: None,
                is_popular: true,
                is_bundle: false,
            },
            Seed {
                id: "debt-snowball-tracker",
                title: "Debt Snowball Tracker",
                category: Category::Debt,
                description: "Strategic debt payoff planner with payment scheduling and visual progress tracking.",
                price: usd(1599),
                original_price: None,
                rating: 4.9,
                downloads: 7_200,
                difficulty: Difficulty::Intermediate,
                formats: &[Excel, Sheets, Notion],
                features: &["Excel", "Google Sheets", "Notion"],
                icon: "credit-card",
                badge: None,
                is_popular: true,
                is_bundle: false,
            },
            Seed {
                id: "meal-planning-budget",
                title: "Meal Planning & Budget",
                category: Category::Meal,
                description: "Weekly meal planner with grocery budget tracking and cost analysis.",
                price: usd(999),
                original_price: None,
                rating: 4.7,
                downloads: 5_600,
                difficulty: Difficulty::Beginner,
                formats: &[Excel, Sheets],
                features: &["Excel", "Google Sheets"],
                icon: "utensils",
                badge: None,
                is_popular: false,
                is_bundle: false,
            },
            Seed {
                id: "yearly-financial-planner",
                title: "Yearly Financial Planner",
                category: Category::Planning,
                description: "Comprehensive annual budget with monthly breakdowns and goal tracking.",
                price: usd(1999),
                original_price: None,
                rating: 4.8,
                downloads: 4_800,
                difficulty: Difficulty::Advanced,
                formats: &[Excel, Sheets, Pdf],
                features: &["Excel", "Google Sheets", "PDF"],
                icon: "calendar",
                badge: None,
                is_popular: false,
                is_bundle: false,
            },
            Seed {
                id: "investment-tracker",
                title: "Investment Tracker",
                category: Category::Investment,
                description: "Portfolio performance tracker with dividend tracking and ROI analysis.",
                price: usd(1499),
                original_price: None,
                rating: 4.6,
                downloads: 3_400,
                difficulty: Difficulty::Advanced,
                formats: &[Excel, Sheets],
                features: &["Excel", "Google Sheets"],
                icon: "target",
                badge: None,
                is_popular: false,
                is_bundle: false,
            },
            Seed {
                id: "expense-tracker",
                title: "Daily Expense Tracker",
                category: Category::Expense,
                description: "Detailed daily expense tracking with categorization and reporting.",
                price: usd(799),
                original_price: None,
                rating: 4.5,
                downloads: 6_800,
                difficulty: Difficulty::Beginner,
                formats: &[Excel, Sheets],
                features: &["Excel", "Google Sheets"],
                icon: "receipt",
                badge: Some(Badge::Sale),
                is_popular: false,
                is_bundle: false,
            },
            Seed {
                id: "complete-budget-suite",
                title: "Complete Budget Suite",
                category: Category::Planning,
                description: "All templates in one package - best value for serious budgeters.",
                price: usd(4999),
                original_price: Some(usd(6999)),
                rating: 4.9,
                downloads: 2_100,
                difficulty: Difficulty::All,
                formats: &[Excel, Sheets, Pdf, Notion],
                features: &["All Formats", "Lifetime Updates"],
                icon: "briefcase",
                badge: Some(Badge::Bestseller),
                is_popular: true,
                is_bundle: true,
            },
        ];

        Catalog::new(seeds.into_iter().map(Product::from).collect())
    }
}
