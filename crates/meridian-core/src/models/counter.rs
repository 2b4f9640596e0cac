//! Counter model
//!
//! A counter is a single balance bucket valid over a half-open time window.
//! Counters sharing an identifier live in a `CounterGroup`, which preserves
//! insertion order: when validity windows overlap, the earliest-added
//! matching counter wins point-in-time lookups. Downstream balance
//! selection depends on that tie-break, so it must not be reordered.

use crate::error::AppError;
use crate::time::{HIGH_DATE, LOW_DATE};
use crate::AppResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single balance bucket with a validity window
///
/// Identity (`rec_id`) is fixed at creation; the balance is mutated by the
/// rating engine as events are charged against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    /// Record identifier, unique within the owning balance group
    ///
    /// Exists to support persistence round-tripping.
    pub rec_id: i64,

    /// Start of validity (UTC seconds, inclusive)
    pub valid_from: i64,

    /// End of validity (UTC seconds, exclusive)
    pub valid_to: i64,

    /// Current accumulated balance
    pub balance: Decimal,
}

impl Counter {
    /// Check whether `date` falls inside this counter's window
    ///
    /// The window is half-open: `valid_from <= date < valid_to`.
    #[inline]
    pub fn contains(&self, date: i64) -> bool {
        self.valid_from <= date && date < self.valid_to
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            rec_id: 0,
            valid_from: LOW_DATE,
            valid_to: HIGH_DATE,
            balance: Decimal::ZERO,
        }
    }
}

/// Ordered collection of counters sharing a counter identifier
///
/// Insertion order is creation order, not validity order. Lookups scan in
/// that order and return the first match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CounterGroup {
    counters: Vec<Counter>,
}

impl CounterGroup {
    /// Create an empty counter group
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new counter to the group
    ///
    /// No deduplication is performed on `rec_id`; callers that care about
    /// id uniqueness must enforce it themselves (normally by letting
    /// `BalanceGroup` mint ids). Rejects windows where `valid_to` is not
    /// after `valid_from`.
    pub fn add_counter(
        &mut self,
        rec_id: i64,
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

        let index = self.counters.len();
        self.counters.push(Counter {
            rec_id,
            valid_from,
            valid_to,
            balance,
        });

        Ok(&self.counters[index])
    }

    /// Find the counter valid at the given UTC date
    ///
    /// Linear scan in insertion order; the first counter whose half-open
    /// window contains `date` wins, even if a later counter's window also
    /// matches.
    pub fn counter_by_utc_date(&self, date: i64) -> Option<&Counter> {
        self.counters.iter().find(|c| c.contains(date))
    }

    /// Mutable variant of [`counter_by_utc_date`](Self::counter_by_utc_date)
    pub fn counter_by_utc_date_mut(&mut self, date: i64) -> Option<&mut Counter> {
        self.counters.iter_mut().find(|c| c.contains(date))
    }

    /// Find a counter by exact record id
    pub fn counter_by_id(&self, rec_id: i64) -> Option<&Counter> {
        self.counters.iter().find(|c| c.rec_id == rec_id)
    }

    /// Mutable variant of [`counter_by_id`](Self::counter_by_id)
    pub fn counter_by_id_mut(&mut self, rec_id: i64) -> Option<&mut Counter> {
        self.counters.iter_mut().find(|c| c.rec_id == rec_id)
    }

    /// Iterate over the counters in insertion order
    pub fn counters(&self) -> impl Iterator<Item = &Counter> {
        self.counters.iter()
    }

    /// Number of counters in the group
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Whether the group holds no counters
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
