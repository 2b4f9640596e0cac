//! Two-key (A-number / B-number) digit tree
//!
//! Extends the single-key trie with a secondary check on the calling-party
//! ("B") number: each registered A-prefix carries a flat B-number prefix
//! string, compared with `starts_with` at match time. Used for fixed-line
//! dial plans where the destination depends on both numbers, e.g. local
//! versus national routing of the same dialed prefix.
//!
//! The two ways a lookup can terminate resolve differently, and downstream
//! routing depends on the difference:
//!
//! - **ran out of tree** (the next A-digit has no child): candidates
//!   collected along the path are checked against the B-number, most
//!   specific first, before falling back to the deepest A-only match;
//! - **ran out of input** (the A-number is exhausted): the deepest A-only
//!   match is returned directly and the B-number is never consulted.

use crate::digit_tree::{digit_index, PREFIX_BRANCHES};
use meridian_core::AppResult;

#[derive(Debug, Default)]
struct Node {
    children: [Option<Box<Node>>; PREFIX_BRANCHES],
    results: Option<Vec<String>>,
    b_prefix: Option<String>,
}

/// Prefix trie over A-numbers with a per-terminal B-number prefix
#[derive(Debug, Default)]
pub struct FixedLineDigitTree {
    root: Node,
    node_count: usize,
}

impl FixedLineDigitTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an A-prefix with its B-prefix and result payload
    ///
    /// The trie is built on the A-prefix digits exactly as in
    /// [`DigitTree`](crate::DigitTree); the B-prefix is stored as a flat
    /// string at the terminal node. Re-registering an A-prefix replaces
    /// both the payload and the B-prefix at that node (last write wins).
    pub fn add_prefix(
        &mut self,
        a_prefix: &str,
        b_prefix: &str,
        results: Vec<String>,
    ) -> AppResult<()> {
        let mut path = Vec::with_capacity(a_prefix.len());
        for (position, ch) in a_prefix.chars().enumerate() {
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
        node.b_prefix = Some(b_prefix.to_string());

        Ok(())
    }

    /// Resolve an A/B number pair to the first result of the best match
    pub fn best_match(&self, a_number: &str, b_number: &str) -> AppResult<Option<&str>> {
        Ok(self
            .best_match_results(a_number, b_number)?
            .and_then(|r| r.first())
            .map(String::as_str))
    }

    /// As [`best_match`](Self::best_match), returning the full result list
    pub fn best_match_results(
        &self,
        a_number: &str,
        b_number: &str,
    ) -> AppResult<Option<&[String]>> {
        let mut node = &self.root;
        let mut best = self.root.results.as_deref();
        let mut partials: Vec<&Node> = Vec::new();
        if self.root.results.is_some() {
            partials.push(&self.root);
        }

        for (position, ch) in a_number.chars().enumerate() {
            let idx = digit_index(ch, position)?;
            match node.children[idx].as_deref() {
                Some(child) => {
                    node = child;
                    if child.results.is_some() {
                        partials.push(child);
                        best = child.results.as_deref();
                    }
                }
                None => {
                    // Ran out of tree: B-number decides, most specific first
                    for candidate in partials.iter().rev() {
                        if let Some(bp) = candidate.b_prefix.as_deref() {
                            if b_number.starts_with(bp) {
                                return Ok(candidate.results.as_deref());
                            }
                        }
                    }
                    // No B-prefix matched: deepest A-only match
                    return Ok(best);
                }
            }
        }

        // Ran out of input: B-number is never consulted on this path
        Ok(best)
    }

    /// Total non-root nodes ever created
    pub fn node_count(&self) -> usize {
        self.node_count
    }
}
