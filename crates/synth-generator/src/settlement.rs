//! Transaction settlement: turning baskets into committed transactions.
//!
//! Two paths share the inventory ledger:
//!
//! - **Checkout**: the cart of a converted session. Every line must be
//!   reserved; the first refusal aborts the whole transaction.
//! - **Independent**: a basket sampled straight from the catalog. Lines
//!   that cannot be reserved are dropped and the rest still settle.
//!
//! Neither path fails; running out of stock only means no transaction.

use crate::generators::timestamp;
use crate::ids::IdGenerator;
use crate::inventory::InventoryLedger;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use synth_core::{
    round2, ConversionStatus, LineItem, PaymentMethod, Product, Session, Transaction,
    TransactionStatus,
};
use tracing::debug;

/// Chance that a transaction gets a discount.
pub const DISCOUNT_PROBABILITY: f64 = 0.2;

/// Discount rates, drawn uniformly.
pub const DISCOUNT_RATES: [f64; 4] = [0.05, 0.10, 0.15, 0.20];

/// Maximum distinct products in an independent basket.
pub const INDEPENDENT_BASKET_SIZE: usize = 3;

/// Inclusive range of units per independent line.
pub const INDEPENDENT_QUANTITY_RANGE: (u32, u32) = (1, 3);

/// Money totals of a transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

/// Sum line subtotals and maybe apply a discount.
pub fn price_items<R: Rng>(rng: &mut R, items: &[LineItem]) -> Pricing {
    let subtotal = round2(items.iter().map(|item| item.subtotal).sum());

    let discount = if rng.gen_bool(DISCOUNT_PROBABILITY) {
        let rate = DISCOUNT_RATES.choose(rng).copied().unwrap_or(0.0);
        round2(subtotal * rate)
    } else {
        0.0
    };

    Pricing {
        subtotal,
        discount,
        total: round2(subtotal - discount),
    }
}

fn line_item(product_id: &str, quantity: u32, unit_price: f64) -> LineItem {
    LineItem {
        product_id: product_id.to_string(),
        quantity,
        unit_price,
        subtotal: round2(quantity as f64 * unit_price),
    }
}

/// A checkout that could not reserve every cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct AbortedCheckout {
    pub session_id: String,

    /// The cart line whose reservation was refused
    pub failed_product_id: String,

    /// Lines reserved before the refusal, as `(product_id, quantity)`
    pub reserved_before_failure: Vec<(String, u32)>,

    /// Whether those reservations were returned to stock
    pub rolled_back: bool,
}

impl AbortedCheckout {
    /// Units taken from stock that no transaction accounts for.
    pub fn stranded_units(&self) -> u64 {
        if self.rolled_back {
            return 0;
        }
        self.reserved_before_failure
            .iter()
            .map(|(_, quantity)| *quantity as u64)
            .sum()
    }
}

/// Result of settling a session's cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// All lines reserved and the transaction recorded
    Committed(Transaction),
    /// A line could not be reserved; no transaction
    Aborted(AbortedCheckout),
    /// The session did not convert or its cart was empty
    NothingToSettle,
}

/// Settles baskets against an [`InventoryLedger`].
pub struct Settlement<'a> {
    ledger: &'a InventoryLedger,
    now: DateTime<Utc>,
    timespan_days: i64,
    rollback_failed_checkout: bool,
}

impl<'a> Settlement<'a> {
    /// Create a settlement over `ledger`. Independent transactions are dated
    /// within the `timespan_days` before `now`.
    pub fn new(ledger: &'a InventoryLedger, now: DateTime<Utc>, timespan_days: u32) -> Self {
        Self {
            ledger,
            now,
            timespan_days: timespan_days as i64,
            rollback_failed_checkout: false,
        }
    }

    /// Return earlier reservations to stock when a checkout aborts.
    pub fn with_rollback(mut self, rollback_failed_checkout: bool) -> Self {
        self.rollback_failed_checkout = rollback_failed_checkout;
        self
    }

    /// Settle the cart of a converted session.
    ///
    /// Lines are reserved in cart order. If one is refused the checkout
    /// aborts; reservations already made for earlier lines stay taken
    /// unless rollback is enabled.
    pub fn settle_session<R: Rng>(
        &self,
        rng: &mut R,
        ids: &mut IdGenerator,
        session: &Session,
    ) -> CheckoutOutcome {
        if session.conversion_status != ConversionStatus::Converted {
            return CheckoutOutcome::NothingToSettle;
        }

        let mut items = Vec::with_capacity(session.cart_contents.len());
        for (product_id, line) in &session.cart_contents {
            if line.quantity == 0 {
                continue;
            }

            if self.ledger.reserve(product_id, line.quantity) {
                items.push(line_item(product_id, line.quantity, line.price));
                continue;
            }

            let reserved_before_failure: Vec<(String, u32)> = items
                .iter()
                .map(|item| (item.product_id.clone(), item.quantity))
                .collect();
            if self.rollback_failed_checkout {
                for (reserved_id, quantity) in &reserved_before_failure {
                    self.ledger.release(reserved_id, *quantity);
                }
            }

            debug!(
                "Checkout of session {} aborted: {} x {} not reservable",
                session.session_id, line.quantity, product_id
            );
            return CheckoutOutcome::Aborted(AbortedCheckout {
                session_id: session.session_id.clone(),
                failed_product_id: product_id.clone(),
                reserved_before_failure,
                rolled_back: self.rollback_failed_checkout,
            });
        }

        if items.is_empty() {
            return CheckoutOutcome::NothingToSettle;
        }

        let pricing = price_items(rng, &items);
        let payment_method = PaymentMethod::CHECKOUT
            .choose(rng)
            .copied()
            .unwrap_or(PaymentMethod::CreditCard);

        CheckoutOutcome::Committed(Transaction {
            transaction_id: ids.next_transaction_id(rng),
            session_id: Some(session.session_id.clone()),
            user_id: session.user_id.clone(),
            timestamp: session.end_time,
            items,
            subtotal: pricing.subtotal,
            discount: pricing.discount,
            total: pricing.total,
            payment_method,
            status: TransactionStatus::Completed,
        })
    }

    /// Sample up to three products and settle them for `user_id`.
    pub fn settle_independent<R: Rng>(
        &self,
        rng: &mut R,
        ids: &mut IdGenerator,
        user_id: &str,
        products: &[Product],
    ) -> Option<Transaction> {
        let basket: Vec<&Product> = products
            .choose_multiple(rng, INDEPENDENT_BASKET_SIZE.min(products.len()))
            .collect();
        self.settle_basket(rng, ids, user_id, &basket)
    }

    /// Settle a basket outside any session.
    ///
    /// Inactive products are skipped and so are lines whose reservation is
    /// refused. Returns `None` when no line survives.
    pub fn settle_basket<R: Rng>(
        &self,
        rng: &mut R,
        ids: &mut IdGenerator,
        user_id: &str,
        basket: &[&Product],
    ) -> Option<Transaction> {
        let mut items = Vec::with_capacity(basket.len());
        for product in basket {
            if !product.is_active {
                continue;
            }
            let quantity =
                rng.gen_range(INDEPENDENT_QUANTITY_RANGE.0..=INDEPENDENT_QUANTITY_RANGE.1);
            if self.ledger.reserve(&product.product_id, quantity) {
                items.push(line_item(&product.product_id, quantity, product.base_price));
            }
        }

        if items.is_empty() {
            return None;
        }

        let pricing = price_items(rng, &items);
        let payment_method = PaymentMethod::OFFLINE
            .choose(rng)
            .copied()
            .unwrap_or(PaymentMethod::CreditCard);
        let status = TransactionStatus::ALL
            .choose(rng)
            .copied()
            .unwrap_or(TransactionStatus::Completed);

        Some(Transaction {
            transaction_id: ids.next_transaction_id(rng),
            session_id: None,
            user_id: user_id.to_string(),
            timestamp: timestamp::within_last_days(rng, self.now, self.timespan_days),
            items,
            subtotal: pricing.subtotal,
            discount: pricing.discount,
            total: pricing.total,
            payment_method,
            status,
        })
    }
}
