//! Customer model
//!
//! `CustInfo` owns a customer's audit segments, kept strictly ascending by
//! `valid_from`. Event rating asks for the segment in force at the event
//! date ("as-of" lookup); provisioning inserts new segments as the
//! customer's state changes. Segment creation is not thread safe; callers
//! process one customer per thread.

use crate::models::audit::AuditSegment;
use crate::time::{HIGH_DATE, LOW_DATE};
use serde::{Deserialize, Serialize};

/// One customer's identity, validity, and versioned state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustInfo {
    /// Customer identifier in the external CRM
    pub external_id: String,

    /// Balance group this customer charges against
    pub balance_group_id: i64,

    /// Customer validity start (UTC seconds, inclusive)
    pub valid_from: i64,

    /// Customer validity end (UTC seconds, exclusive)
    pub valid_to: i64,

    /// Audit segments, strictly ascending by `valid_from`
    segments: Vec<AuditSegment>,
}

impl CustInfo {
    /// Create a customer with unbounded validity
    pub fn new(external_id: impl Into<String>, balance_group_id: i64) -> Self {
        Self {
            external_id: external_id.into(),
            balance_group_id,
            valid_from: LOW_DATE,
            valid_to: HIGH_DATE,
            segments: Vec::new(),
        }
    }

    /// Create an audit segment taking effect at the given instant
    ///
    /// The segment is inserted at its ordered position. Returns `None`
    /// without mutating anything when a segment with exactly this
    /// `valid_from` already exists; two snapshots cannot take effect at the
    /// same instant.
    pub fn create_audit_segment(&mut self, valid_from: i64) -> Option<&mut AuditSegment> {
        let mut insert_at = self.segments.len();

        for (i, segment) in self.segments.iter().enumerate() {
            if segment.valid_from == valid_from {
                return None;
            }
            if segment.valid_from > valid_from {
                insert_at = i;
                break;
            }
        }

        self.segments.insert(insert_at, AuditSegment::new(valid_from));
        Some(&mut self.segments[insert_at])
    }

    /// Find the segment in force at the given date
    ///
    /// Scans from the newest segment backward and returns the first whose
    /// `valid_from` is at or before `date`, which is the latest snapshot
    /// already in effect. `None` when the date predates every segment.
    pub fn best_audit_segment(&self, date: i64) -> Option<&AuditSegment> {
        self.segments.iter().rev().find(|s| s.valid_from <= date)
    }

    /// Mutable variant of [`best_audit_segment`](Self::best_audit_segment)
    pub fn best_audit_segment_mut(&mut self, date: i64) -> Option<&mut AuditSegment> {
        self.segments
            .iter_mut()
            .rev()
            .find(|s| s.valid_from <= date)
    }

    /// Find a segment by exact id
    pub fn audit_segment_by_id(&self, id: i64) -> Option<&AuditSegment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Iterate over the segments in ascending `valid_from` order
    pub fn audit_segments(&self) -> impl Iterator<Item = &AuditSegment> {
        self.segments.iter()
    }

    /// Number of audit segments held
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_with_segments(dates: &[i64]) -> CustInfo {
        let mut cust = CustInfo::new("CUST-001", 42);
        for &d in dates {
            cust.create_audit_segment(d).unwrap();
        }
        cust
    }

    #[test]
    fn test_segments_kept_sorted_regardless_of_insert_order() {
        let cust = customer_with_segments(&[100, 50, 200]);

        let order: Vec<i64> = cust.audit_segments().map(|s| s.valid_from).collect();
        assert_eq!(order, vec![50, 100, 200]);
    }

    #[test]
    fn test_duplicate_valid_from_rejected_without_mutation() {
        let mut cust = customer_with_segments(&[100, 50, 200]);

        assert!(cust.create_audit_segment(100).is_none());
        let order: Vec<i64> = cust.audit_segments().map(|s| s.valid_from).collect();
        assert_eq!(order, vec![50, 100, 200]);
    }

    #[test]
    fn test_as_of_lookup() {
        let cust = customer_with_segments(&[50, 100, 200]);

        // Latest segment starting at or before the query date
        assert_eq!(cust.best_audit_segment(150).unwrap().valid_from, 100);
        assert_eq!(cust.best_audit_segment(100).unwrap().valid_from, 100);
        assert_eq!(cust.best_audit_segment(5000).unwrap().valid_from, 200);

        // Date before every segment
        assert!(cust.best_audit_segment(40).is_none());
    }

    #[test]
    fn test_lookup_by_id() {
        let mut cust = CustInfo::new("CUST-002", 7);
        cust.create_audit_segment(100).unwrap().id = 11;
        cust.create_audit_segment(200).unwrap().id = 12;

        assert_eq!(cust.audit_segment_by_id(12).unwrap().valid_from, 200);
        assert!(cust.audit_segment_by_id(99).is_none());
    }

    #[test]
    fn test_created_segment_is_mutable_in_place() {
        let mut cust = CustInfo::new("CUST-003", 7);
        let segment = cust.create_audit_segment(100).unwrap();
        segment.put_era("HOME_ZONE", "51");
        segment
            .products_mut()
            .add_product(1, "P1", "s", "voice", 0, 100, 1);

        let segment = cust.best_audit_segment(100).unwrap();
        assert_eq!(segment.era("HOME_ZONE"), Some("51"));
        assert_eq!(segment.products().count(), 1);
    }

    #[test]
    fn test_default_customer_validity_unbounded() {
        let cust = CustInfo::new("CUST-004", 1);
        assert_eq!(cust.valid_from, LOW_DATE);
        assert_eq!(cust.valid_to, HIGH_DATE);
    }
}
