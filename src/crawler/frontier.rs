//! Frontier queue for the breadth-first crawl
//!
//! Plain FIFO over (url, depth) pairs. The same URL may sit in the queue more
//! than once; deduplication happens at dequeue time against the visited set,
//! which keeps enqueueing cheap and the traversal order well-defined.

use std::collections::VecDeque;

/// A URL awaiting visitation, with the depth it was discovered at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedPage {
    /// The URL to visit
    pub url: String,

    /// Crawl depth at which this URL was first enqueued
    pub depth: u32,
}

/// FIFO frontier of pages awaiting visitation
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<QueuedPage>,
}

impl Frontier {
    /// Creates a frontier seeded with a single entry at depth 0
    pub fn seeded(seed_url: String) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(QueuedPage {
            url: seed_url,
            depth: 0,
        });
        Self { queue }
    }

    /// Enqueues a URL at the given depth
    pub fn push(&mut self, url: String, depth: u32) {
        self.queue.push_back(QueuedPage { url, depth });
    }

    /// Dequeues the next page in FIFO order
    pub fn pop(&mut self) -> Option<QueuedPage> {
        self.queue.pop_front()
    }

    /// Returns the number of queued entries (duplicates included)
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
