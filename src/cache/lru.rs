//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::HashMap;

// == List Node ==
#[derive(Debug)]
struct Node {
    key: String,
    /// Neighbour towards the most recently used end
    prev: Option<usize>,
    /// Neighbour towards the least recently used end
    next: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in a doubly linked list stored in a slab of nodes, with a
/// key -> slot index for O(1) lookup:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Freed slots are recycled, so touch/remove/evict are all O(1).
#[derive(Debug, Default)]
pub struct LruTracker {
    nodes: Vec<Node>,
    free: Vec<usize>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker with room for `capacity` keys before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to head).
    ///
    /// If key exists, unlinks it first then relinks at the head.
    /// If key is new, allocates a slot at the head.
    pub fn touch(&mut self, key: &str) {
        if let Some(&idx) = self.index.get(key) {
            self.unlink(idx);
            self.push_front(idx);
            return;
        }

        let node = Node {
            key: key.to_string(),
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        self.index.insert(key.to_string(), idx);
        self.push_front(idx);
    }

    // == Remove ==
    /// Removes a key from the tracker. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(idx) = self.index.remove(key) {
            self.unlink(idx);
            self.release(idx);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let idx = self.tail?;
        self.unlink(idx);
        let key = self.release(idx);
        self.index.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.tail.map(|idx| self.nodes[idx].key.as_str())
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::successors(self.head, move |&idx| self.nodes[idx].next)
            .map(move |idx| self.nodes[idx].key.as_str())
    }

    // == Internal list plumbing ==
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }

        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        self.nodes[idx].prev = None;
        self.nodes[idx].next = old_head;

        match old_head {
            Some(h) => self.nodes[h].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Returns the slot to the free list and hands back its key.
    fn release(&mut self, idx: usize) -> String {
        self.free.push(idx);
        std::mem::take(&mut self.nodes[idx].key)
    }
}
