//! # matchbook
//!
//! Price-time-priority limit order matching core.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: Core data structures (Order, Action, price ticks)
//! - **OrderBook**: Slab-backed book with per-price FIFO queues and
//!   incremental best-bid/best-ask cursors
//! - **Sink**: The event stream abstraction the book emits through
//!
//! ## Design Principles
//!
//! 1. **Price-time priority**: Best price matches first, FIFO within a
//!    price, and the resting order always sets the execution price
//! 2. **No Floating Point**: Prices are tick counts, quantities lot counts
//! 3. **Pre-allocated Memory**: Slab allocation for O(1) order operations
//! 4. **Synchronous Execution**: One matching thread per book, no locking
//!    or async in the hot path
//! 5. **Lazy Eviction**: Cancellation zeroes quantity in place; matching
//!    traversals skip and unlink the dead nodes
//!
//! ## Example
//!
//! ```
//! use matchbook::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::with_capacity(10_000);
//! let mut actions = Vec::new();
//!
//! book.submit(Order::new(1, Side::Sell, 100, 10), &mut actions).unwrap();
//! book.submit(Order::new(2, Side::Buy, 100, 4), &mut actions).unwrap();
//!
//! assert_eq!(actions.len(), 1);
//! assert_eq!(book.get(1).unwrap().remaining, 6);
//! ```

/// Core data types: Order, Action, price ticks
pub mod types;

/// Order book: slab storage, price levels, matching
pub mod orderbook;

/// Action sinks: event stream consumers
pub mod sink;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use orderbook::{OrderBook, OrderNode, PriceLevel, SubmitError};
pub use sink::ActionSink;
pub use types::price::MAX_PRICE;
pub use types::{Action, Order, OrderStatus, Side};
