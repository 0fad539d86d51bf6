//! Journey simulator: one browsing session as a walk over page types.
//!
//! The next page type depends only on the current one and is drawn from a
//! fixed weighted table. Product pages may add the product to the cart;
//! checkout and confirmation pages may convert a non-empty cart. The
//! simulator reads stock to choose products but never reserves any.

use crate::generators::{weighted_choice, WeightedTable};
use crate::inventory::InventoryLedger;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use synth_core::{CartLine, Category, PageType, PageView, Product};

/// Inclusive range of pages per session.
pub const PAGES_PER_SESSION: (usize, usize) = (1, 15);

/// Inclusive range of seconds spent on a page.
pub const VIEW_DURATION_RANGE: (u32, u32) = (5, 180);

/// Draws spent looking for an active, in-stock product before settling
/// for any product.
pub const PRODUCT_PICK_ATTEMPTS: usize = 10;

/// Chance that a product page adds its product to the cart.
pub const ADD_TO_CART_PROBABILITY: f64 = 0.2;

/// Inclusive range of units added to the cart at once.
pub const CART_QUANTITY_RANGE: (u32, u32) = (1, 3);

/// Chance that a purchase step with a non-empty cart converts.
pub const CONVERSION_PROBABILITY: f64 = 0.7;

use PageType::*;

const ENTRY: WeightedTable<PageType> = &[(Home, 1.0), (Search, 1.0), (CategoryListing, 1.0)];

const FROM_HOME: WeightedTable<PageType> =
    &[(CategoryListing, 0.5), (Search, 0.3), (ProductDetail, 0.2)];

const FROM_CATEGORY_LISTING: WeightedTable<PageType> = &[
    (ProductDetail, 0.7),
    (CategoryListing, 0.1),
    (Search, 0.1),
    (Home, 0.1),
];

const FROM_SEARCH: WeightedTable<PageType> = &[
    (ProductDetail, 0.6),
    (Search, 0.2),
    (CategoryListing, 0.1),
    (Home, 0.1),
];

const FROM_PRODUCT_DETAIL: WeightedTable<PageType> = &[
    (ProductDetail, 0.3),
    (Cart, 0.3),
    (CategoryListing, 0.2),
    (Search, 0.1),
    (Home, 0.1),
];

const FROM_CART: WeightedTable<PageType> = &[
    (Checkout, 0.6),
    (ProductDetail, 0.2),
    (CategoryListing, 0.1),
    (Home, 0.1),
];

const FROM_CHECKOUT: WeightedTable<PageType> = &[(Confirmation, 0.8), (Cart, 0.1), (Home, 0.1)];

const FROM_CONFIRMATION: WeightedTable<PageType> =
    &[(Home, 0.6), (ProductDetail, 0.2), (CategoryListing, 0.2)];

/// Outgoing transitions of a page type. `None` is the session entry point.
pub fn transitions(from: Option<PageType>) -> WeightedTable<PageType> {
    match from {
        None => ENTRY,
        Some(Home) => FROM_HOME,
        Some(CategoryListing) => FROM_CATEGORY_LISTING,
        Some(Search) => FROM_SEARCH,
        Some(ProductDetail) => FROM_PRODUCT_DETAIL,
        Some(Cart) => FROM_CART,
        Some(Checkout) => FROM_CHECKOUT,
        Some(Confirmation) => FROM_CONFIRMATION,
    }
}

/// Draw the page type following `previous`.
pub fn next_page_type<R: Rng>(rng: &mut R, previous: Option<PageType>) -> PageType {
    weighted_choice(rng, transitions(previous)).unwrap_or(Home)
}

/// Result of one simulated session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journey {
    pub page_views: Vec<PageView>,
    pub viewed_products: BTreeSet<String>,

    /// Cart lines, all with positive quantity
    pub cart: BTreeMap<String, CartLine>,

    /// Set once a purchase step won the conversion draw
    pub converted: bool,
}

/// Simulates browsing sessions over a catalog.
pub struct JourneySimulator<'a> {
    categories: &'a [Category],
    products: &'a [Product],
    ledger: &'a InventoryLedger,
}

impl<'a> JourneySimulator<'a> {
    pub fn new(
        categories: &'a [Category],
        products: &'a [Product],
        ledger: &'a InventoryLedger,
    ) -> Self {
        Self {
            categories,
            products,
            ledger,
        }
    }

    /// Simulate a session starting at `start` and lasting `duration_seconds`.
    ///
    /// Page `i` of `n` is stamped `start + i * floor(duration / n)`, so
    /// timestamps never decrease and never pass the session end.
    pub fn simulate<R: Rng>(
        &self,
        rng: &mut R,
        start: DateTime<Utc>,
        duration_seconds: u32,
    ) -> Journey {
        let (min_pages, max_pages) = PAGES_PER_SESSION;
        let page_count = rng.gen_range(min_pages..=max_pages);
        let step = (duration_seconds as i64) / (page_count as i64);

        let mut journey = Journey::default();
        let mut previous = None;

        for page_idx in 0..page_count {
            let page_type = next_page_type(rng, previous);
            previous = Some(page_type);

            let (product, category_id) = self.bind_content(rng, page_type);

            journey.page_views.push(PageView {
                timestamp: start + Duration::seconds(page_idx as i64 * step),
                page_type,
                product_id: product.map(|p| p.product_id.clone()),
                category_id,
                view_duration: rng.gen_range(VIEW_DURATION_RANGE.0..=VIEW_DURATION_RANGE.1),
            });

            if let Some(product) = product {
                journey.viewed_products.insert(product.product_id.clone());

                if page_type == ProductDetail && rng.gen_bool(ADD_TO_CART_PROBABILITY) {
                    let line = journey
                        .cart
                        .entry(product.product_id.clone())
                        .or_insert(CartLine {
                            quantity: 0,
                            price: product.base_price,
                        });
                    line.quantity += rng.gen_range(CART_QUANTITY_RANGE.0..=CART_QUANTITY_RANGE.1);
                }
            }

            if page_type.is_purchase_step()
                && !journey.cart.is_empty()
                && rng.gen_bool(CONVERSION_PROBABILITY)
            {
                journey.converted = true;
            }
        }

        journey.cart.retain(|_, line| line.quantity > 0);
        journey
    }

    /// Product and category shown on a page of the given type.
    fn bind_content<R: Rng>(
        &self,
        rng: &mut R,
        page_type: PageType,
    ) -> (Option<&'a Product>, Option<String>) {
        match page_type {
            ProductDetail => {
                let product = self.pick_product(rng);
                let category_id = product.map(|p| p.category_id.clone());
                (product, category_id)
            }
            CategoryListing => {
                let category_id = self.categories.choose(rng).map(|c| c.category_id.clone());
                (None, category_id)
            }
            _ => (None, None),
        }
    }

    /// Best-effort pick of an active product with stock.
    ///
    /// After [`PRODUCT_PICK_ATTEMPTS`] misses any product is returned, which
    /// may be inactive or sold out. Stock is read without reserving, so a
    /// product chosen here can still fail to settle later.
    pub fn pick_product<R: Rng>(&self, rng: &mut R) -> Option<&'a Product> {
        for _ in 0..PRODUCT_PICK_ATTEMPTS {
            let product = self.products.choose(rng)?;
            if self.ledger.is_available(&product.product_id) {
                return Some(product);
            }
        }
        self.products.choose(rng)
    }
}
