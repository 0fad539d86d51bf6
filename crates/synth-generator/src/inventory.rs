//! Inventory ledger: the single owner of product stock.
//!
//! Every stock decrement in the system goes through [`InventoryLedger::reserve`].
//! The ledger keeps its state behind a mutex so it can be shared by a
//! concurrent driver without interface changes, even though the bundled
//! driver is sequential.

use parking_lot::Mutex;
use std::collections::HashMap;
use synth_core::Product;
use tracing::trace;

struct LedgerState {
    /// Products in catalog order
    products: Vec<Product>,
    /// product_id -> position in `products`
    index: HashMap<String, usize>,
}

impl LedgerState {
    fn product_mut(&mut self, product_id: &str) -> Option<&mut Product> {
        let position = *self.index.get(product_id)?;
        self.products.get_mut(position)
    }

    fn product(&self, product_id: &str) -> Option<&Product> {
        let position = *self.index.get(product_id)?;
        self.products.get(position)
    }
}

/// Mutually exclusive mapping from product id to remaining stock.
pub struct InventoryLedger {
    state: Mutex<LedgerState>,
}

impl InventoryLedger {
    /// Take ownership of the catalog's products.
    pub fn new(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.product_id.clone(), position))
            .collect();
        Self {
            state: Mutex::new(LedgerState { products, index }),
        }
    }

    /// Atomically take `quantity` units of a product.
    ///
    /// Returns `false` without changing anything if the product is unknown
    /// or has fewer than `quantity` units left. There are no partial
    /// reservations.
    pub fn reserve(&self, product_id: &str, quantity: u32) -> bool {
        let mut state = self.state.lock();
        let Some(product) = state.product_mut(product_id) else {
            trace!("Reservation of unknown product {}", product_id);
            return false;
        };

        if product.current_stock < quantity {
            trace!(
                "Reservation of {} x {} refused, {} left",
                quantity,
                product_id,
                product.current_stock
            );
            return false;
        }

        product.current_stock -= quantity;
        true
    }

    /// Return previously reserved units to stock.
    ///
    /// Only used to undo reservations of a checkout that could not complete.
    pub fn release(&self, product_id: &str, quantity: u32) -> bool {
        let mut state = self.state.lock();
        match state.product_mut(product_id) {
            Some(product) => {
                product.current_stock = product.current_stock.saturating_add(quantity);
                true
            }
            None => false,
        }
    }

    /// Snapshot of a product, including its current stock.
    pub fn get(&self, product_id: &str) -> Option<Product> {
        self.state.lock().product(product_id).cloned()
    }

    /// Current stock of a product. May be stale by the time it is used.
    pub fn stock(&self, product_id: &str) -> Option<u32> {
        self.state
            .lock()
            .product(product_id)
            .map(|product| product.current_stock)
    }

    /// Whether a product is active and has stock left. May be stale.
    pub fn is_available(&self, product_id: &str) -> bool {
        self.state
            .lock()
            .product(product_id)
            .is_some_and(Product::is_available)
    }

    /// Sum of the stock of all products.
    pub fn total_stock(&self) -> u64 {
        self.state
            .lock()
            .products
            .iter()
            .map(|product| product.current_stock as u64)
            .sum()
    }

    /// Consume the ledger, returning the products with their final stock.
    pub fn into_products(self) -> Vec<Product> {
        self.state.into_inner().products
    }

    pub fn len(&self) -> usize {
        self.state.lock().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use synth_core::PricePoint;

    fn product(id: &str, stock: u32, active: bool) -> Product {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Product {
            product_id: id.to_string(),
            name: id.to_string(),
            category_id: "cat_000".to_string(),
            base_price: 9.99,
            current_stock: stock,
            is_active: active,
            price_history: vec![PricePoint { price: 9.99, date }],
            creation_date: date,
        }
    }

    #[test]
    fn test_reserve_decrements() {
        let ledger = InventoryLedger::new(vec![product("prod_00000", 10, true)]);

        assert!(ledger.reserve("prod_00000", 4));
        assert_eq!(ledger.stock("prod_00000"), Some(6));
        assert!(ledger.reserve("prod_00000", 6));
        assert_eq!(ledger.stock("prod_00000"), Some(0));
    }

    #[test]
    fn test_reserve_refuses_oversell() {
        let ledger = InventoryLedger::new(vec![product("prod_00000", 3, true)]);

        assert!(!ledger.reserve("prod_00000", 4));
        assert_eq!(ledger.stock("prod_00000"), Some(3));
    }

    #[test]
    fn test_reserve_unknown_product() {
        let ledger = InventoryLedger::new(vec![product("prod_00000", 3, true)]);
        assert!(!ledger.reserve("prod_99999", 1));
        assert!(ledger.get("prod_99999").is_none());
    }

    #[test]
    fn test_zero_stock_never_reserved() {
        let ledger = InventoryLedger::new(vec![product("prod_00000", 0, true)]);
        assert!(!ledger.reserve("prod_00000", 1));
        assert!(!ledger.is_available("prod_00000"));
    }

    #[test]
    fn test_release_restores_stock() {
        let ledger = InventoryLedger::new(vec![product("prod_00000", 5, true)]);
        assert!(ledger.reserve("prod_00000", 5));
        assert!(ledger.release("prod_00000", 2));
        assert_eq!(ledger.stock("prod_00000"), Some(2));
        assert!(!ledger.release("prod_99999", 2));
    }

    #[test]
    fn test_snapshots_keep_catalog_order() {
        let ledger = InventoryLedger::new(vec![
            product("prod_00001", 5, true),
            product("prod_00000", 7, false),
        ]);
        assert!(ledger.reserve("prod_00000", 2));

        assert_eq!(ledger.total_stock(), 10);
        assert_eq!(ledger.len(), 2);
        assert!(!ledger.is_available("prod_00000"));

        let products = ledger.into_products();
        assert_eq!(products[0].product_id, "prod_00001");
        assert_eq!(products[1].current_stock, 5);
    }

    #[test]
    fn test_concurrent_reservations_never_oversell() {
        let ledger = InventoryLedger::new(vec![product("prod_00000", 100, true)]);

        let granted: u32 = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..50)
                            .filter(|_| ledger.reserve("prod_00000", 1))
                            .count() as u32
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(granted, 100);
        assert_eq!(ledger.stock("prod_00000"), Some(0));
    }
}
