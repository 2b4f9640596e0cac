//! Product subscription model
//!
//! A `ProductList` holds the product subscriptions attached to one audit
//! segment. There are two insertion paths with deliberately different
//! semantics: [`ProductList::add_product`] upserts on a non-zero `ref_id`,
//! while [`ProductList::push_product`] always appends even when a `ref_id`
//! collides. Both are exercised by the external provisioning feed and both
//! behaviors are relied on downstream.

use crate::error::AppError;
use crate::time::HIGH_DATE;
use crate::AppResult;
use serde::{Deserialize, Serialize};

/// One product subscription instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustProductInfo {
    /// Provisioning reference id; 0 means "no identity" and can never be
    /// matched for update
    pub ref_id: i64,

    /// Product identifier
    pub product_id: String,

    /// Subscription identifier
    pub sub_id: String,

    /// Service the product applies to
    pub service: String,

    /// Start of validity (UTC seconds, inclusive)
    pub valid_from: i64,

    /// End of validity (UTC seconds, exclusive)
    pub valid_to: i64,

    /// Subscribed quantity
    pub quantity: i32,

    /// Provisioning status code
    pub status: i32,

    /// Evaluation priority
    pub priority: i32,
}

impl Default for CustProductInfo {
    fn default() -> Self {
        Self {
            ref_id: 0,
            product_id: String::new(),
            sub_id: String::new(),
            service: String::new(),
            valid_from: 0,
            valid_to: HIGH_DATE,
            quantity: 0,
            status: 0,
            priority: 0,
        }
    }
}

/// Ordered collection of product subscriptions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductList {
    products: Vec<CustProductInfo>,

    /// Balance group this product set charges against
    balance_group: i64,
}

impl ProductList {
    /// Create an empty product list
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a product subscription
    ///
    /// When `ref_id` is non-zero and an entry with the same `ref_id`
    /// exists, that entry is updated in place: product id, sub id, service,
    /// validity, and quantity are overwritten, but `status` and `priority`
    /// are deliberately left as they were (they are only settable through
    /// [`push_product`](Self::push_product) with a fully built
    /// `CustProductInfo`). When `ref_id` is zero or no entry matches, a new
    /// entry is appended.
    #[allow(clippy::too_many_arguments)]
    pub fn add_product(
        &mut self,
        ref_id: i64,
        product_id: &str,
        sub_id: &str,
        service: &str,
        valid_from: i64,
        valid_to: i64,
        quantity: i32,
    ) {
        if ref_id != 0 {
            if let Some(existing) = self.products.iter_mut().find(|p| p.ref_id == ref_id) {
                existing.product_id = product_id.to_string();
                existing.sub_id = sub_id.to_string();
                existing.service = service.to_string();
                existing.valid_from = valid_from;
                existing.valid_to = valid_to;
                existing.quantity = quantity;
                return;
            }
        }

        self.products.push(CustProductInfo {
            ref_id,
            product_id: product_id.to_string(),
            sub_id: sub_id.to_string(),
            service: service.to_string(),
            valid_from,
            valid_to,
            quantity,
            ..Default::default()
        });
    }

    /// Append a fully built product record
    ///
    /// Always appends, with no upsert check, even if the `ref_id` collides
    /// with an existing entry.
    pub fn push_product(&mut self, product: CustProductInfo) {
        self.products.push(product);
    }

    /// Get a product by position
    pub fn product(&self, index: usize) -> AppResult<&CustProductInfo> {
        self.products.get(index).ok_or(AppError::ProductIndex {
            index,
            len: self.products.len(),
        })
    }

    /// Iterate over the products in insertion order
    pub fn products(&self) -> impl Iterator<Item = &CustProductInfo> {
        self.products.iter()
    }

    /// Number of product entries
    pub fn count(&self) -> usize {
        self.products.len()
    }

    /// Balance group this product set charges against
    pub fn balance_group(&self) -> i64 {
        self.balance_group
    }

    /// Set the associated balance group id
    pub fn set_balance_group(&mut self, balance_group: i64) {
        self.balance_group = balance_group;
    }
}
