//! Catalog builder: categories, products and users.
//!
//! The catalog is reference data built once before the simulation runs.
//! Shapes are fixed by the configuration; contents are drawn from the
//! seeded RNG.

use crate::generators::{geo, text, timestamp};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use synth_core::{
    round2, Category, ConfigError, GenerationConfig, GeoData, PricePoint, Product, Subcategory,
    User,
};
use tracing::info;

/// Inclusive range of subcategories per category.
pub const SUBCATEGORIES_PER_CATEGORY: (usize, usize) = (3, 5);

/// Inclusive range of profit margins.
pub const PROFIT_MARGIN_RANGE: (f64, f64) = (0.1, 0.4);

/// Inclusive range of initial base prices.
pub const BASE_PRICE_RANGE: (f64, f64) = (5.0, 500.0);

/// Maximum price changes after the initial price.
pub const MAX_PRICE_CHANGES: usize = 2;

/// Relative jitter applied to later prices.
pub const PRICE_JITTER: f64 = 0.2;

/// Inclusive range of initial stock.
pub const INITIAL_STOCK_RANGE: (u32, u32) = (10, 1000);

/// Probability that a product is active.
pub const ACTIVE_PROBABILITY: f64 = 0.95;

/// Reference data consumed by the simulation.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub users: Vec<User>,
}

/// Builds a [`Catalog`] from a [`GenerationConfig`].
pub struct CatalogBuilder<'a> {
    config: &'a GenerationConfig,
    now: DateTime<Utc>,
}

impl<'a> CatalogBuilder<'a> {
    /// Create a builder anchored at `now`.
    pub fn new(config: &'a GenerationConfig, now: DateTime<Utc>) -> Self {
        Self { config, now }
    }

    fn span(&self) -> Duration {
        Duration::days(self.config.timespan_days as i64)
    }

    /// Validate the configuration and build categories, products and users.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Catalog, ConfigError> {
        self.config.validate_at(self.now)?;

        let categories = self.build_categories(rng);
        info!("Generated {} categories", categories.len());

        let products = self.build_products(rng, &categories);
        info!("Generated {} products", products.len());

        let users = self.build_users(rng);
        info!("Generated {} users", users.len());

        Ok(Catalog {
            categories,
            products,
            users,
        })
    }

    /// Generate `num_categories` categories with 3-5 subcategories each.
    pub fn build_categories<R: Rng>(&self, rng: &mut R) -> Vec<Category> {
        (0..self.config.num_categories)
            .map(|cat_idx| {
                let (min_subs, max_subs) = SUBCATEGORIES_PER_CATEGORY;
                let name = text::company(rng);
                let subcategories = (0..rng.gen_range(min_subs..=max_subs))
                    .map(|sub_idx| Subcategory {
                        subcategory_id: format!("sub_{cat_idx:03}_{sub_idx:02}"),
                        name: text::bs(rng),
                        profit_margin: round2(
                            rng.gen_range(PROFIT_MARGIN_RANGE.0..=PROFIT_MARGIN_RANGE.1),
                        ),
                    })
                    .collect();

                Category {
                    category_id: format!("cat_{cat_idx:03}"),
                    name,
                    subcategories,
                }
            })
            .collect()
    }

    /// Generate `num_products` products spread over `categories`.
    ///
    /// Each product gets a 1-3 entry price history. The first price is dated
    /// within the first third of the pre-launch window, which starts two
    /// spans before `now`; later prices are dated after the previous one and
    /// jitter the base price by up to 20%.
    pub fn build_products<R: Rng>(&self, rng: &mut R, categories: &[Category]) -> Vec<Product> {
        let creation_start = self.now - self.span() * 2;
        let creation_end =
            creation_start + Duration::days(self.config.timespan_days as i64 / 3);

        (0..self.config.num_products)
            .filter_map(|prod_idx| {
                let category = categories.choose(rng)?;

                let base_price = round2(rng.gen_range(BASE_PRICE_RANGE.0..=BASE_PRICE_RANGE.1));
                let mut last_date = timestamp::between(rng, creation_start, creation_end);
                let mut price_history = vec![PricePoint {
                    price: base_price,
                    date: last_date,
                }];

                for _ in 0..rng.gen_range(0..=MAX_PRICE_CHANGES) {
                    let date = timestamp::between(rng, last_date, self.now);
                    let jitter = rng.gen_range(1.0 - PRICE_JITTER..=1.0 + PRICE_JITTER);
                    price_history.push(PricePoint {
                        price: round2(base_price * jitter),
                        date,
                    });
                    last_date = date;
                }
                price_history.sort_by_key(|point| point.date);

                let current_price = price_history.last()?.price;
                let creation_date = price_history.first()?.date;

                Some(Product {
                    product_id: format!("prod_{prod_idx:05}"),
                    name: text::catch_phrase(rng),
                    category_id: category.category_id.clone(),
                    base_price: current_price,
                    current_stock: rng.gen_range(INITIAL_STOCK_RANGE.0..=INITIAL_STOCK_RANGE.1),
                    is_active: rng.gen_bool(ACTIVE_PROBABILITY),
                    price_history,
                    creation_date,
                })
            })
            .collect()
    }

    /// Generate `num_users` users registered between three spans and one
    /// span before `now`.
    pub fn build_users<R: Rng>(&self, rng: &mut R) -> Vec<User> {
        let registration_start = self.now - self.span() * 3;
        let registration_end = self.now - self.span();

        (0..self.config.num_users)
            .map(|user_idx| {
                let registration_date =
                    timestamp::between(rng, registration_start, registration_end);
                let geo_data = GeoData {
                    city: geo::city(rng),
                    state: geo::state_abbr(rng),
                    country: "US".to_string(),
                };
                let last_active = timestamp::between(rng, registration_date, self.now);

                User {
                    user_id: format!("user_{user_idx:06}"),
                    geo_data,
                    registration_date,
                    last_active,
                }
            })
            .collect()
    }
}
