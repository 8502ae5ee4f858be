//! Crawl frontier: discovered-but-unprocessed URLs
//!
//! A double-ended queue with two priority tiers. Links found on the seed
//! page go to the front so the most representative pages are fetched while
//! the budgets are still fresh; everything else goes to the back in plain
//! breadth-first order.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Queue of `(url, depth)` entries awaiting a fetch
///
/// Membership is tracked alongside the queue so the same URL is never held
/// twice, regardless of how many pages link to it. The visited check lives
/// with the caller, which owns the visited set.
#[derive(Debug)]
pub struct Frontier {
    entries: VecDeque<(Url, u32)>,
    queued: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier seeded with one entry at depth 0
    pub fn seeded(seed: Url) -> Self {
        let mut frontier = Self {
            entries: VecDeque::new(),
            queued: HashSet::new(),
        };
        frontier.push_back(seed, 0);
        frontier
    }

    /// Appends an entry at the back unless the URL is already queued
    ///
    /// Returns `true` if the entry was added.
    pub fn push_back(&mut self, url: Url, depth: u32) -> bool {
        if !self.queued.insert(url.as_str().to_owned()) {
            return false;
        }
        self.entries.push_back((url, depth));
        true
    }

    /// Inserts an entry at the front unless the URL is already queued
    ///
    /// Returns `true` if the entry was added.
    pub fn push_front(&mut self, url: Url, depth: u32) -> bool {
        if !self.queued.insert(url.as_str().to_owned()) {
            return false;
        }
        self.entries.push_front((url, depth));
        true
    }

    /// Removes and returns the front entry
    pub fn pop_front(&mut self) -> Option<(Url, u32)> {
        let (url, depth) = self.entries.pop_front()?;
        self.queued.remove(url.as_str());
        Some((url, depth))
    }

    /// Whether a URL is currently queued
    pub fn contains(&self, url: &Url) -> bool {
        self.queued.contains(url.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
