//! Price-time-priority order book implementation.
//!
//! ## Architecture
//!
//! The book uses a hybrid data structure:
//!
//! - **Slab**: Pre-allocated arena for O(1) order storage
//! - **HashMap price index**: Sparse price -> level lookup, levels created
//!   on demand (the full tick range is 10M prices; a dense array would
//!   mostly hold empty slots)
//! - **HashMap order index**: Order id -> arena key for O(1) cancel and
//!   audit lookup
//! - **Cursors**: `bid`/`ask` fields tracking the best prices incrementally
//!
//! ## Cursor Semantics
//!
//! `bid` and `ask` are monotone cursors, not recomputed best prices. No
//! resting buy interest exists above `bid` and no resting sell interest
//! below `ask`; the prices the cursors point at may themselves be empty.
//! Matching walks the cursor one tick at a time toward less favorable
//! prices as it drains levels, and only an order that tightens the book
//! moves a cursor the other way. A fresh book has `bid = 0` and
//! `ask = MAX_PRICE` (sentinel).
//!
//! ## Matching
//!
//! An incoming order is first matched against the opposite side, walking
//! price levels from the best price and each level's queue in FIFO order.
//! Fills always execute at the resting order's price. Residual quantity is
//! then opened on the book. Every state transition is emitted as an
//! [`Action`] through the caller-provided [`ActionSink`].
//!
//! ## Example
//!
//! ```
//! use matchbook::{Action, Order, OrderBook, Side};
//!
//! let mut book = OrderBook::with_capacity(1_000);
//! let mut actions: Vec<Action> = Vec::new();
//!
//! book.submit(Order::new(1, Side::Sell, 100, 10), &mut actions).unwrap();
//! book.submit(Order::new(2, Side::Buy, 100, 4), &mut actions).unwrap();
//!
//! assert_eq!(actions, vec![Action::Filled {
//!     order_id: 2,
//!     from_order_id: 1,
//!     amount: 4,
//!     price: 100,
//! }]);
//! ```

use std::collections::HashMap;

use slab::Slab;
use thiserror::Error;
use tracing::{debug, trace};

use crate::orderbook::{OrderNode, PriceLevel};
use crate::sink::ActionSink;
use crate::types::price::{in_range, MAX_PRICE};
use crate::types::{Action, Order, OrderStatus, Side};

/// Rejection reasons for [`OrderBook::submit`].
///
/// These are caller precondition violations surfaced at the submission
/// boundary; the matching core itself never rejects input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// An order with this id is already held by the book
    #[error("order id {0} already exists on the book")]
    DuplicateId(u64),

    /// The limit price is zero or at/above `MAX_PRICE`
    #[error("price {0} is outside the representable range")]
    PriceOutOfRange(u32),

    /// The order has no quantity to trade
    #[error("order quantity must be positive")]
    ZeroQuantity,
}

/// A single-instrument limit order book.
///
/// All operations are synchronous and the book holds no internal locking:
/// one logical matching thread per book instance, with external mutual
/// exclusion if multiple callers submit concurrently.
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// Pre-allocated order storage
    orders: Slab<OrderNode>,

    /// Price levels, created on demand and dropped when matching drains them
    levels: HashMap<u32, PriceLevel>,

    /// Order id to arena key mapping
    /// Terminal orders stay indexed for audit lookup until evicted by the
    /// caller (eviction is out of core scope)
    index: HashMap<u64, usize>,

    /// Best-bid cursor: no resting buy interest above this price
    bid: u32,

    /// Best-ask cursor: no resting sell interest below this price
    ask: u32,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            levels: HashMap::new(),
            index: HashMap::new(),
            bid: 0,
            ask: MAX_PRICE,
        }
    }

    /// Create an order book with pre-allocated capacity for `order_capacity`
    /// orders
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            levels: HashMap::new(),
            index: HashMap::with_capacity(order_capacity),
            bid: 0,
            ask: MAX_PRICE,
        }
    }

    // ========================================================================
    // Submission entry points
    // ========================================================================

    /// Submit a limit order.
    ///
    /// The order is first matched against resting orders on the opposite
    /// side; any residual quantity is then opened on the book. Actions for
    /// every fill are emitted to `sink` in match order.
    ///
    /// Returns an error without touching the book if the order violates a
    /// caller precondition (duplicate id, out-of-range price, zero
    /// quantity).
    pub fn submit(
        &mut self,
        mut order: Order,
        sink: &mut impl ActionSink,
    ) -> Result<(), SubmitError> {
        if !in_range(order.price) {
            return Err(SubmitError::PriceOutOfRange(order.price));
        }
        if order.remaining == 0 {
            return Err(SubmitError::ZeroQuantity);
        }
        if self.index.contains_key(&order.id) {
            return Err(SubmitError::DuplicateId(order.id));
        }

        debug!(
            id = order.id,
            side = ?order.side,
            price = order.price,
            quantity = order.remaining,
            "submit"
        );

        match order.side {
            Side::Buy => self.fill_buy(&mut order, sink),
            Side::Sell => self.fill_sell(&mut order, sink),
        }

        if order.remaining > 0 {
            self.open_order(order);
        }
        Ok(())
    }

    /// Cancel an order by id.
    ///
    /// A known, non-terminal order has its remaining quantity zeroed and its
    /// status set to `Canceled`; the node keeps its queue position and is
    /// skipped lazily on the next matching traversal. Terminal orders are
    /// never mutated.
    ///
    /// A `Canceled` action is always emitted, including for unknown ids:
    /// the action acknowledges cancellation intent, it does not confirm
    /// resting state existed. (Fire-and-forget semantics for already-settled
    /// or racing cancellations - flagged for product-level confirmation.)
    pub fn cancel_order(&mut self, id: u64, sink: &mut impl ActionSink) {
        if let Some(&key) = self.index.get(&id) {
            let order = &mut self.orders[key].order;
            if !order.status.is_terminal() {
                let voided = order.remaining;
                let price = order.price;
                order.remaining = 0;
                order.status = OrderStatus::Canceled;

                if let Some(level) = self.levels.get_mut(&price) {
                    level.reduce_quantity(voided);
                }
                debug!(id, voided, "order canceled");
            }
        }

        sink.publish(Action::canceled(id));
    }

    // ========================================================================
    // Book maintenance
    // ========================================================================

    /// Insert an order into the book without matching.
    ///
    /// Appends the order to the price level for its limit price (creating
    /// the level on demand), moves it from `New` to `Open`, advances the
    /// bid/ask cursor if the order tightens the book, and records it in the
    /// id index.
    ///
    /// No matching is attempted: callers are expected to run the fill
    /// routine first for crossing orders and open only the residual. A
    /// residual that was partially filled on entry keeps its `Partial`
    /// status.
    pub fn open_order(&mut self, mut order: Order) {
        debug_assert!(in_range(order.price));
        debug_assert!(order.remaining > 0);

        if order.status == OrderStatus::New {
            order.status = OrderStatus::Open;
        }

        let id = order.id;
        let price = order.price;
        let side = order.side;

        let key = self.orders.insert(OrderNode::new(order));
        let level = self
            .levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price));
        level.push_back(key, &mut self.orders);

        match side {
            Side::Buy if price > self.bid => self.bid = price,
            Side::Sell if price < self.ask => self.ask = price,
            _ => {}
        }

        self.index.insert(id, key);
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Match an incoming sell order against resting buys.
    ///
    /// Starts at the bid cursor and walks price levels downward, consuming
    /// each level's queue in FIFO order, until the incoming order fills or
    /// no resting buy price at or above its limit remains.
    ///
    /// The cursor moves one tick per drained or empty level, so a thin
    /// book's worst case is O(price range) - a scalability caveat inherited
    /// from the incremental cursor design.
    pub fn fill_sell(&mut self, incoming: &mut Order, sink: &mut impl ActionSink) {
        debug_assert!(incoming.price > 0);

        while self.bid >= incoming.price && incoming.remaining > 0 {
            let cursor = self.bid;
            let Some(level) = self.levels.get_mut(&cursor) else {
                self.bid -= 1;
                continue;
            };

            Self::fill_at_level(level, &mut self.orders, incoming, sink);

            if level.is_empty() {
                self.levels.remove(&cursor);
                self.bid -= 1;
            } else {
                // Liquidity remains at the cursor: the incoming order is done.
                break;
            }
        }
    }

    /// Match an incoming buy order against resting sells.
    ///
    /// Symmetric to [`fill_sell`](Self::fill_sell): starts at the ask
    /// cursor and walks upward while `ask <= incoming.price`, consuming
    /// while quantity remains.
    pub fn fill_buy(&mut self, incoming: &mut Order, sink: &mut impl ActionSink) {
        debug_assert!(incoming.price < MAX_PRICE);

        while self.ask <= incoming.price && incoming.remaining > 0 {
            let cursor = self.ask;
            let Some(level) = self.levels.get_mut(&cursor) else {
                self.ask += 1;
                continue;
            };

            Self::fill_at_level(level, &mut self.orders, incoming, sink);

            if level.is_empty() {
                self.levels.remove(&cursor);
                self.ask += 1;
            } else {
                break;
            }
        }
    }

    /// Walk one price level's queue from the head, filling the incoming
    /// order.
    ///
    /// Heads whose quantity reaches zero (consumed, or canceled earlier)
    /// are unlinked as they are passed, which is the lazy eviction path for
    /// canceled orders. Stops when the incoming order fills or the queue
    /// empties.
    fn fill_at_level<S: ActionSink>(
        level: &mut PriceLevel,
        arena: &mut Slab<OrderNode>,
        incoming: &mut Order,
        sink: &mut S,
    ) {
        while let Some(key) = level.peek_head() {
            let resting = &mut arena.get_mut(key).expect("invalid head key").order;
            let before = resting.remaining;
            Self::fill_order(incoming, resting, sink);
            let consumed = before - resting.remaining;
            let resting_done = resting.remaining == 0;

            level.reduce_quantity(consumed);
            if resting_done {
                let _ = level.advance_head(arena);
            }
            if incoming.remaining == 0 {
                return;
            }
        }
    }

    /// Core matching step between the incoming order and one resting order.
    ///
    /// - Resting covers the incoming remainder: emit `Filled` for the
    ///   incoming order's full remaining quantity at the resting order's
    ///   price, decrement the resting order, zero the incoming order.
    /// - Resting is smaller but non-zero: emit `PartialFilled` for the
    ///   resting order's remaining quantity at its price, decrement the
    ///   incoming order, zero the resting order.
    /// - Resting already has zero quantity: silent no-op; the caller
    ///   advances past it.
    ///
    /// Actions are built before quantities move, so the amounts reflect the
    /// pre-fill state the way downstream consumers expect.
    fn fill_order<S: ActionSink>(incoming: &mut Order, resting: &mut Order, sink: &mut S) {
        debug_assert!(incoming.remaining > 0);
        debug_assert_eq!(incoming.side, resting.side.opposite());

        if resting.remaining >= incoming.remaining {
            sink.publish(Action::filled(incoming, resting));
            trace!(
                incoming = incoming.id,
                resting = resting.id,
                amount = incoming.remaining,
                price = resting.price,
                "filled"
            );

            resting.remaining -= incoming.remaining;
            resting.status = if resting.remaining == 0 {
                OrderStatus::Filled
            } else {
                OrderStatus::Partial
            };

            incoming.remaining = 0;
            incoming.status = OrderStatus::Filled;
            return;
        }

        if resting.remaining > 0 {
            sink.publish(Action::partial_filled(incoming, resting));
            trace!(
                incoming = incoming.id,
                resting = resting.id,
                amount = resting.remaining,
                price = resting.price,
                "partial fill"
            );

            incoming.remaining -= resting.remaining;
            incoming.status = OrderStatus::Partial;

            resting.remaining = 0;
            resting.status = OrderStatus::Filled;
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The bid cursor: upper bound on resting buy prices
    #[inline]
    pub fn best_bid(&self) -> u32 {
        self.bid
    }

    /// The ask cursor: lower bound on resting sell prices
    /// (`MAX_PRICE` sentinel while no sell has ever tightened the book)
    #[inline]
    pub fn best_ask(&self) -> u32 {
        self.ask
    }

    /// Look up an order by id.
    ///
    /// Terminal (filled/canceled) orders remain visible here for audit
    /// until the caller evicts them. Incoming orders that fully filled on
    /// submission were never opened and are not indexed.
    #[inline]
    pub fn get(&self, id: u64) -> Option<&Order> {
        let key = *self.index.get(&id)?;
        self.orders.get(key).map(|node| &node.order)
    }

    /// Check if an order id is held by the book
    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.index.contains_key(&id)
    }

    /// Live resting quantity at a price level (0 if the level is absent)
    #[inline]
    pub fn depth_at(&self, price: u32) -> u64 {
        self.levels
            .get(&price)
            .map(|level| level.total_quantity)
            .unwrap_or(0)
    }

    /// Number of orders held in the arena, including terminal orders
    /// retained for audit
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Check if the book holds no orders at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Current pre-allocated arena capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
