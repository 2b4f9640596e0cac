//! Longest-prefix-match digit tree
//!
//! A 10-ary trie keyed by decimal digit, used to resolve a dialed number to
//! the most specific registered prefix. The root payload, set by
//! registering the empty prefix, acts as the catch-all default; a lookup
//! that matches nothing and finds no default is an explicit miss, not a
//! fault.

use meridian_core::{AppError, AppResult};

/// Number of branches per node, one per decimal digit
pub const PREFIX_BRANCHES: usize = 10;

#[derive(Debug, Default)]
struct Node {
    children: [Option<Box<Node>>; PREFIX_BRANCHES],
    results: Option<Vec<String>>,
}

/// Map a character to its branch index, rejecting non-digits
pub(crate) fn digit_index(ch: char, position: usize) -> AppResult<usize> {
    ch.to_digit(10)
        .map(|d| d as usize)
        .ok_or(AppError::InvalidDigit { ch, position })
}

/// Prefix trie over decimal digit strings
#[derive(Debug, Default)]
pub struct DigitTree {
    root: Node,
    node_count: usize,
}

impl DigitTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prefix with its result payload
    ///
    /// Creates one node per digit and stores `results` at the terminal
    /// node, replacing any payload already there. The empty prefix sets the
    /// root payload, which serves as the catch-all default for lookups.
    /// Non-digit characters are rejected before any node is created, so a
    /// bad prefix leaves the tree untouched.
    pub fn add_prefix(&mut self, prefix: &str, results: Vec<String>) -> AppResult<()> {
        let mut path = Vec::with_capacity(prefix.len());
        for (position, ch) in prefix.chars().enumerate() {
            path.push(digit_index(ch, position)?);
        }

        let mut node = &mut self.root;
        for idx in path {
            if node.children[idx].is_none() {
                node.children[idx] = Some(Box::default());
                self.node_count += 1;
            }
            node = node.children[idx].as_deref_mut().unwrap();
        }
        node.results = Some(results);

        Ok(())
    }

    /// Resolve a number to its longest matching prefix's first result
    ///
    /// Walks the tree digit by digit, remembering the deepest
    /// payload-carrying node, and stops early when the next digit has no
    /// child. Falls back to the root payload when no deeper node matched;
    /// `Ok(None)` when there is no payload anywhere on the walked path.
    pub fn best_match(&self, number: &str) -> AppResult<Option<&str>> {
        Ok(self
            .best_match_results(number)?
            .and_then(|r| r.first())
            .map(String::as_str))
    }

    /// As [`best_match`](Self::best_match), returning the full result list
    pub fn best_match_results(&self, number: &str) -> AppResult<Option<&[String]>> {
        let mut node = &self.root;
        let mut best = self.root.results.as_deref();

        for (position, ch) in number.chars().enumerate() {
            let idx = digit_index(ch, position)?;
            match node.children[idx].as_deref() {
                Some(child) => {
                    node = child;
                    if let Some(results) = child.results.as_deref() {
                        best = Some(results);
                    }
                }
                None => break,
            }
        }

        Ok(best)
    }

    /// Total non-root nodes ever created
    ///
    /// Monotonic diagnostic counter; overwriting a prefix's payload does
    /// not change it.
    pub fn node_count(&self) -> usize {
        self.node_count
    }
}
