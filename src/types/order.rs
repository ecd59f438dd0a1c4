//! Order types for the matchbook core.
//!
//! ## Fixed-Point Representation
//!
//! Prices are discrete tick counts (`u32`, bounded by
//! [`MAX_PRICE`](crate::types::price::MAX_PRICE)) and quantities are `u64`
//! lot counts. No floating point is used anywhere in the core.
//!
//! ## Lifecycle
//!
//! ```text
//! New -> Open -> { Partial -> Filled | Canceled }
//! ```
//!
//! `Filled` and `Canceled` are terminal: once reached, the order is never
//! mutated again. It stays in the book's id index for audit lookup until the
//! caller evicts it.

use serde::{Deserialize, Serialize};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid) - wants to purchase the asset
    #[default]
    Buy,
    /// Sell order (ask) - wants to sell the asset
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderStatus enum
// ============================================================================

/// Status of an order on the book.
///
/// Matching and cancellation only ever move an order forward through the
/// lifecycle; terminal states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Created but not yet resting on the book
    #[default]
    New,
    /// Resting on the book, untouched by matching
    Open,
    /// Partially consumed by matching
    Partial,
    /// Fully consumed by matching (terminal)
    Filled,
    /// Voided by a cancellation (terminal)
    Canceled,
}

impl OrderStatus {
    /// Check if the status permits no further mutation
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Canceled)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order.
///
/// The identifier is caller-assigned, unique, and stable for the order's
/// lifetime. `quantity` is the original requested size and never changes;
/// `remaining` is decremented as matching consumes the order.
///
/// ## Example
///
/// ```
/// use matchbook::types::{Order, OrderStatus, Side};
///
/// // Buy 100 lots at 50.00 (price in ticks, two decimal places)
/// let order = Order::new(1, Side::Buy, 5_000, 100);
///
/// assert_eq!(order.status, OrderStatus::New);
/// assert_eq!(order.remaining, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier (caller-assigned)
    pub id: u64,

    /// Buy or Sell
    pub side: Side,

    /// Limit price in ticks
    pub price: u32,

    /// Original requested quantity in lots
    pub quantity: u64,

    /// Remaining unfilled quantity in lots
    /// Decremented as the order is matched, zeroed on cancellation
    pub remaining: u64,

    /// Current lifecycle status
    pub status: OrderStatus,
}

impl Order {
    /// Create a new limit order.
    ///
    /// The order starts in [`OrderStatus::New`] with its full quantity
    /// remaining.
    pub fn new(id: u64, side: Side, price: u32, quantity: u64) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            remaining: quantity,
            status: OrderStatus::New,
        }
    }

    /// Check if the order has no remaining quantity
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the quantity consumed so far
    #[inline]
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Consume a portion of this order's remaining quantity.
    ///
    /// Returns the actual quantity consumed, which may be less than
    /// requested if the order does not have enough remaining.
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
