//! Audit segment model
//!
//! An audit segment is a time-versioned snapshot of a customer's product
//! and ERA state, kept so past events can be rated against the state that
//! was in force when they happened.

use crate::models::product::ProductList;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point-in-time snapshot of a customer's product/ERA state
///
/// Segments are owned and ordered by [`CustInfo`](crate::models::CustInfo);
/// `valid_from` is the segment's position in that ordering and must be
/// unique per customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSegment {
    /// Segment identifier, assigned by the persistence layer
    pub id: i64,

    /// Instant this snapshot takes effect (UTC seconds)
    pub valid_from: i64,

    /// Account validity start carried from the customer record
    pub account_valid_from: i64,

    /// Account validity end carried from the customer record
    pub account_valid_to: i64,

    /// Product subscriptions in force during this segment
    products: ProductList,

    /// Extended Rating Attributes keyed by name
    eras: HashMap<String, String>,
}

impl AuditSegment {
    /// Create a segment taking effect at the given instant
    pub fn new(valid_from: i64) -> Self {
        Self {
            valid_from,
            ..Default::default()
        }
    }

    /// Set or replace an Extended Rating Attribute
    pub fn put_era(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.eras.insert(key.into(), value.into());
    }

    /// Look up an Extended Rating Attribute
    pub fn era(&self, key: &str) -> Option<&str> {
        self.eras.get(key).map(String::as_str)
    }

    /// Iterate over all ERAs
    ///
    /// Iteration order is unspecified.
    pub fn eras(&self) -> impl Iterator<Item = (&String, &String)> {
        self.eras.iter()
    }

    /// Product subscriptions in force during this segment
    pub fn products(&self) -> &ProductList {
        &self.products
    }

    /// Mutable access to the segment's product list
    pub fn products_mut(&mut self) -> &mut ProductList {
        &mut self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_put_is_upsert() {
        let mut segment = AuditSegment::new(100);
        segment.put_era("DISCOUNT", "10");
        segment.put_era("DISCOUNT", "25");

        assert_eq!(segment.era("DISCOUNT"), Some("25"));
        assert_eq!(segment.eras().count(), 1);
    }

    #[test]
    fn test_era_lookup_miss() {
        let segment = AuditSegment::new(100);
        assert_eq!(segment.era("MISSING"), None);
    }

    #[test]
    fn test_products_attached_to_segment() {
        let mut segment = AuditSegment::new(100);
        segment
            .products_mut()
            .add_product(1, "P1", "s", "voice", 0, 100, 1);

        assert_eq!(segment.products().count(), 1);
    }
}
