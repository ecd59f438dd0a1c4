//! Action events emitted by the order book.
//!
//! ## Terminology
//!
//! - **Resting order**: the order that was already on the book (the maker)
//! - **Incoming order**: the order whose submission triggered the match
//!
//! ## Price Discovery
//!
//! Fill actions always carry the resting order's price, never the incoming
//! order's limit. Whoever posted first sets the execution price; this is the
//! price-time-priority contract.
//!
//! ## Wire Format
//!
//! Actions serialize to JSON tagged by `actionType`, with camelCase fields:
//!
//! ```json
//! {"actionType":"FILLED","orderId":2,"fromOrderId":1,"amount":4,"price":100}
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Order;

/// A state transition of the order book, as seen by downstream observers.
///
/// The emission order of actions is significant: it reflects the exact
/// sequence of matches as the book is walked, and consumers must preserve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actionType")]
pub enum Action {
    /// A cancellation signal for `order_id`.
    ///
    /// Emitted for every cancellation request, including requests naming an
    /// unknown id: this is a notification of cancellation intent, not a
    /// confirmation of removed resting state.
    #[serde(rename = "CANCELED", rename_all = "camelCase")]
    Canceled {
        /// The id named by the cancellation request
        order_id: u64,
    },

    /// The incoming order `order_id` was fully satisfied by the resting
    /// order `from_order_id`.
    #[serde(rename = "FILLED", rename_all = "camelCase")]
    Filled {
        /// The incoming (fully filled) order
        order_id: u64,
        /// The resting order that satisfied it
        from_order_id: u64,
        /// The incoming order's entire quantity at this fill step
        amount: u64,
        /// The resting order's limit price
        price: u32,
    },

    /// The incoming order `order_id` consumed all of the resting order
    /// `from_order_id` and still has quantity left.
    #[serde(rename = "PARTIAL_FILLED", rename_all = "camelCase")]
    PartialFilled {
        /// The incoming (partially filled) order
        order_id: u64,
        /// The resting order that was fully consumed
        from_order_id: u64,
        /// The resting order's consumed quantity
        amount: u64,
        /// The resting order's limit price
        price: u32,
    },
}

impl Action {
    /// Create a canceled action.
    pub fn canceled(id: u64) -> Self {
        Action::Canceled { order_id: id }
    }

    /// Create a filled action.
    ///
    /// Must be built *before* the fill is applied: `amount` is the incoming
    /// order's remaining quantity at the time of the match.
    pub fn filled(order: &Order, from_order: &Order) -> Self {
        Action::Filled {
            order_id: order.id,
            from_order_id: from_order.id,
            amount: order.remaining,
            price: from_order.price,
        }
    }

    /// Create a partial filled action.
    ///
    /// Must be built *before* the fill is applied: `amount` is the resting
    /// order's remaining quantity at the time of the match.
    pub fn partial_filled(order: &Order, from_order: &Order) -> Self {
        Action::PartialFilled {
            order_id: order.id,
            from_order_id: from_order.id,
            amount: from_order.remaining,
            price: from_order.price,
        }
    }

    /// The id of the order this action is about
    pub fn order_id(&self) -> u64 {
        match self {
            Action::Canceled { order_id }
            | Action::Filled { order_id, .. }
            | Action::PartialFilled { order_id, .. } => *order_id,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use serde_json::json;

    #[test]
    fn test_canceled_action() {
        let action = Action::canceled(42);
        assert_eq!(action, Action::Canceled { order_id: 42 });
        assert_eq!(action.order_id(), 42);
    }

    #[test]
    fn test_filled_action_amount_is_incoming_remaining() {
        let mut incoming = Order::new(2, Side::Buy, 100, 10);
        incoming.fill(6); // already matched 6 elsewhere
        let resting = Order::new(1, Side::Sell, 99, 50);

        let action = Action::filled(&incoming, &resting);
        assert_eq!(
            action,
            Action::Filled {
                order_id: 2,
                from_order_id: 1,
                amount: 4,
                price: 99, // resting order's price, not the incoming limit
            }
        );
    }

    #[test]
    fn test_partial_filled_action_amount_is_resting_remaining() {
        let incoming = Order::new(3, Side::Buy, 100, 10);
        let mut resting = Order::new(1, Side::Sell, 100, 10);
        resting.fill(4); // 6 left on the book

        let action = Action::partial_filled(&incoming, &resting);
        assert_eq!(
            action,
            Action::PartialFilled {
                order_id: 3,
                from_order_id: 1,
                amount: 6,
                price: 100,
            }
        );
    }

    #[test]
    fn test_action_json_shape() {
        let action = Action::Filled {
            order_id: 2,
            from_order_id: 1,
            amount: 4,
            price: 100,
        };

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "actionType": "FILLED",
                "orderId": 2,
                "fromOrderId": 1,
                "amount": 4,
                "price": 100,
            })
        );

        let canceled = serde_json::to_value(Action::canceled(7)).unwrap();
        assert_eq!(canceled, json!({"actionType": "CANCELED", "orderId": 7}));
    }

    #[test]
    fn test_action_json_roundtrip() {
        let action = Action::PartialFilled {
            order_id: 3,
            from_order_id: 1,
            amount: 6,
            price: 100,
        };

        let text = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&text).unwrap();
        assert_eq!(action, back);
    }
}
