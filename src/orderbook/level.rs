//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all orders resting at a single price. Orders
//! form a FIFO queue (singly-linked through the arena) so that matching
//! consumes them in time priority.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) -> order2 -> order3 -> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Zero-quantity nodes (filled or canceled) are skipped and unlinked
//!   lazily by advancing the head during traversal; nothing is ever removed
//!   from the middle of the queue

use slab::Slab;

use crate::orderbook::OrderNode;

/// A price level containing orders at a single price.
///
/// The actual order data lives in the slab arena; this struct only holds
/// the queue metadata. An empty queue means no resting liquidity at this
/// price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level, in ticks
    pub price: u32,

    /// Total live resting quantity at this level
    /// Reduced by fills and cancellations as they happen, so it never
    /// counts the zero-quantity nodes still sitting in the queue
    pub total_quantity: u64,

    /// Head of the order queue (oldest order, slab key)
    /// This is the first order to be matched
    pub head: Option<usize>,

    /// Tail of the order queue (newest order, slab key)
    /// New orders are appended here
    pub tail: Option<usize>,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: u32) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
        }
    }

    /// Check if the price level queue is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Add an order to the tail of the queue.
    ///
    /// This maintains FIFO ordering - oldest orders are matched first.
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the arena
    pub fn push_back(&mut self, key: usize, arena: &mut Slab<OrderNode>) {
        let node = arena.get_mut(key).expect("invalid slab key");
        let quantity = node.remaining();
        node.next = None;

        match self.tail {
            Some(tail_key) => {
                // Link the old tail to the new node
                let tail_node = arena.get_mut(tail_key).expect("invalid tail key");
                tail_node.next = Some(key);
            }
            None => {
                // Empty queue - this is also the head
                self.head = Some(key);
            }
        }

        self.tail = Some(key);
        self.total_quantity = self.total_quantity.saturating_add(quantity);
    }

    /// Unlink the head node and advance to its successor.
    ///
    /// Called by matching once the head order's quantity has reached zero,
    /// which also evicts canceled (quantity-zeroed) orders without explicit
    /// filtering. Does not touch `total_quantity`: the quantity of an
    /// advanced-past node was already drained by the fill or cancellation
    /// that zeroed it.
    ///
    /// Returns the unlinked key, or `None` if the queue was empty.
    pub fn advance_head(&mut self, arena: &mut Slab<OrderNode>) -> Option<usize> {
        let key = self.head?;
        let node = arena.get_mut(key).expect("invalid head key");
        let next = node.next.take();

        self.head = next;
        if next.is_none() {
            self.tail = None;
        }
        Some(key)
    }

    /// Get the head order's slab key (oldest order).
    ///
    /// This is the first order to be matched at this price level.
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Reduce the live quantity after a fill or cancellation
    pub fn reduce_quantity(&mut self, amount: u64) {
        self.total_quantity = self.total_quantity.saturating_sub(amount);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
