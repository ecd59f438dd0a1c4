//! Action sinks: where the book's event stream goes.
//!
//! The matching core stays agnostic to how events are consumed. Callers
//! pass an [`ActionSink`] into every mutating operation and the book
//! publishes each [`Action`] in emission order - a synchronous callback, a
//! buffered channel, or a plain collection vector all work.
//!
//! Emission must not block matching: a bounded or back-pressured sink
//! risks stalling the match loop, so the provided channel impl uses an
//! unbounded non-blocking send.

use std::sync::mpsc;

use tracing::warn;

use crate::types::Action;

/// Consumer of the book's outbound event stream.
///
/// Implementations must preserve emission order; it reflects the exact
/// sequence of matches as the book is walked.
pub trait ActionSink {
    /// Receive one action.
    fn publish(&mut self, action: Action);
}

/// Collects actions in memory. The simplest sink, used by tests and
/// batch-style callers that drain the vector between submissions.
impl ActionSink for Vec<Action> {
    fn publish(&mut self, action: Action) {
        self.push(action);
    }
}

/// Forwards actions over an unbounded channel.
///
/// A disconnected receiver does not halt matching: the action is dropped
/// with a warning, since the book's state transition has already happened
/// and cannot be rolled back.
impl ActionSink for mpsc::Sender<Action> {
    fn publish(&mut self, action: Action) {
        if self.send(action).is_err() {
            warn!("action receiver disconnected, dropping event");
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
