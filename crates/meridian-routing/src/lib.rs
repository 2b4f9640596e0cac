//! Meridian Routing Library
//!
//! Longest-prefix-match digit trees for number and dial-plan resolution.
//! Trees are populated once at cache-load time (see [`loader`]) and then
//! queried per event; after population completes they are read-only, so a
//! shared reference (or `Arc`) can serve many concurrent lookup threads.

pub mod digit_tree;
pub mod fixed_line;
pub mod loader;

pub use digit_tree::DigitTree;
pub use fixed_line::FixedLineDigitTree;
