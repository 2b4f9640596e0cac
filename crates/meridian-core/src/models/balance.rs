//! Balance group model
//!
//! A balance group indexes counter groups by counter id for one customer
//! account, and mints record ids for new counters. None of this is
//! internally synchronized: callers performing multi-step read-modify-write
//! sequences across counter groups wrap the whole group in a `Mutex` and
//! serialize per customer.

use crate::error::AppError;
use crate::models::counter::{Counter, CounterGroup};
use crate::AppResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Per-account map of counter id to counter group
///
/// Carries the record-id allocation cursor and a dirty flag the persistence
/// layer uses to decide whether this group needs to be written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceGroup {
    groups: HashMap<i32, CounterGroup>,
    current_rec_id: i64,
    dirty: bool,
}

impl BalanceGroup {
    /// Create an empty balance group
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a counter with an automatically allocated record id
    ///
    /// Lazily creates the counter group for `counter_id`. Ids are minted by
    /// pre-incrementing the cursor, so the first counter of a fresh group
    /// gets rec_id 1. The window is validated before the cursor moves, so a
    /// rejected add never burns an id. The dirty flag is not touched; that
    /// is the caller's decision via [`mark_dirty`](Self::mark_dirty).
    pub fn add_counter(
        &mut self,
        counter_id: i32,
        valid_from: i64,
        valid_to: i64,
        balance: Decimal,
    ) -> AppResult<&Counter> {
        if valid_to <= valid_from {
            return Err(AppError::InvalidValidity {
                valid_from,
                valid_to,
            });
        }

        self.current_rec_id += 1;
        let rec_id = self.current_rec_id;

        self.groups
            .entry(counter_id)
            .or_default()
            .add_counter(rec_id, valid_from, valid_to, balance)
    }

    /// Add a counter with a caller-supplied record id
    ///
    /// Used by the persistence layer when reloading stored counters. The
    /// allocation cursor is left untouched: callers mixing this with the
    /// auto-id path on the same group must manage collisions themselves
    /// (normally by calling [`set_rec_id`](Self::set_rec_id) after a
    /// reload).
    pub fn add_counter_with_id(
        &mut self,
        counter_id: i32,
        rec_id: i64,
        valid_from: i64,
        valid_to: i64,
        balance: Decimal,
    ) -> AppResult<&Counter> {
        self.groups
            .entry(counter_id)
            .or_default()
            .add_counter(rec_id, valid_from, valid_to, balance)
    }

    /// Install an empty counter group at the given counter id
    ///
    /// Any existing group at that id is replaced, counters and all. Check
    /// with [`counter_group`](Self::counter_group) first when that matters.
    pub fn add_counter_group(&mut self, counter_id: i32) -> &mut CounterGroup {
        match self.groups.entry(counter_id) {
            Entry::Occupied(mut entry) => {
                entry.insert(CounterGroup::new());
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(CounterGroup::new()),
        }
    }

    /// Look up the counter group for a counter id
    pub fn counter_group(&self, counter_id: i32) -> Option<&CounterGroup> {
        self.groups.get(&counter_id)
    }

    /// Mutable variant of [`counter_group`](Self::counter_group)
    pub fn counter_group_mut(&mut self, counter_id: i32) -> Option<&mut CounterGroup> {
        self.groups.get_mut(&counter_id)
    }

    /// Iterate over `(counter_id, group)` pairs
    ///
    /// Iteration order is unspecified.
    pub fn counter_groups(&self) -> impl Iterator<Item = (&i32, &CounterGroup)> {
        self.groups.iter()
    }

    /// Number of counter groups held
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Current value of the record-id allocation cursor
    pub fn rec_id(&self) -> i64 {
        self.current_rec_id
    }

    /// Restore the record-id allocation cursor
    ///
    /// Called after reloading from storage so subsequent auto-id inserts do
    /// not collide with persisted counters.
    pub fn set_rec_id(&mut self, rec_id: i64) {
        self.current_rec_id = rec_id;
    }

    /// Flag this group as needing persistence
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag, normally after a successful write-back
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Whether this group has been flagged for persistence
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_auto_ids_are_sequential_across_groups() {
        let mut balance = BalanceGroup::new();

        // Ids run 1..N in call order regardless of counter-id grouping
        let id1 = balance.add_counter(10, 0, 100, dec!(0)).unwrap().rec_id;
        let id2 = balance.add_counter(20, 0, 100, dec!(0)).unwrap().rec_id;
        let id3 = balance.add_counter(10, 100, 200, dec!(0)).unwrap().rec_id;

        assert_eq!((id1, id2, id3), (1, 2, 3));
        assert_eq!(balance.rec_id(), 3);
    }

    #[test]
    fn test_rejected_add_does_not_burn_an_id() {
        let mut balance = BalanceGroup::new();
        assert!(balance.add_counter(1, 200, 100, dec!(0)).is_err());
        let counter = balance.add_counter(1, 0, 100, dec!(0)).unwrap();
        assert_eq!(counter.rec_id, 1);
    }

    #[test]
    fn test_explicit_id_leaves_cursor_alone() {
        let mut balance = BalanceGroup::new();
        balance
            .add_counter_with_id(1, 500, 0, 100, dec!(0))
            .unwrap();
        assert_eq!(balance.rec_id(), 0);

        // Next auto id starts from the untouched cursor
        let counter = balance.add_counter(1, 100, 200, dec!(0)).unwrap();
        assert_eq!(counter.rec_id, 1);
    }

    #[test]
    fn test_set_rec_id_for_reload() {
        let mut balance = BalanceGroup::new();
        balance
            .add_counter_with_id(1, 41, 0, 100, dec!(9.99))
            .unwrap();
        balance.set_rec_id(41);

        let counter = balance.add_counter(1, 100, 200, dec!(0)).unwrap();
        assert_eq!(counter.rec_id, 42);
    }

    #[test]
    fn test_add_counter_group_replaces() {
        let mut balance = BalanceGroup::new();
        balance.add_counter(5, 0, 100, dec!(1.00)).unwrap();
        assert_eq!(balance.counter_group(5).unwrap().len(), 1);

        // Replacement discards the previous group's counters
        balance.add_counter_group(5);
        assert!(balance.counter_group(5).unwrap().is_empty());
    }

    #[test]
    fn test_dirty_flag_is_caller_managed() {
        let mut balance = BalanceGroup::new();
        balance.add_counter(1, 0, 100, dec!(0)).unwrap();
        assert!(!balance.is_dirty());

        balance.mark_dirty();
        assert!(balance.is_dirty());
        balance.clear_dirty();
        assert!(!balance.is_dirty());
    }

    #[test]
    fn test_lookup_missing_group() {
        let balance = BalanceGroup::new();
        assert!(balance.counter_group(99).is_none());
    }

    #[test]
    fn test_persistence_round_trip_keeps_cursor() {
        let mut balance = BalanceGroup::new();
        balance.add_counter(1, 0, 100, dec!(3.50)).unwrap();
        balance.add_counter(2, 0, 100, dec!(1.25)).unwrap();

        let json = serde_json::to_string(&balance).unwrap();
        let mut reloaded: BalanceGroup = serde_json::from_str(&json).unwrap();

        assert_eq!(reloaded.rec_id(), 2);
        assert_eq!(
            reloaded.counter_group(1).unwrap().counter_by_id(1).unwrap().balance,
            dec!(3.50)
        );

        // Inserts after a reload continue the id sequence
        let counter = reloaded.add_counter(1, 100, 200, dec!(0)).unwrap();
        assert_eq!(counter.rec_id, 3);
    }
}
