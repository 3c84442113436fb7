//! Order processing context.
//!
//! Wraps "which order of the batch am I working on" so log lines carry the
//! same identifier everywhere.

use std::fmt::Display;

/// Context for one order being processed
#[derive(Debug, Clone)]
pub struct OrderCtx {
    /// Order number from the feed
    pub order_number: String,

    /// Position in the batch (1-based, for log display only)
    pub order_index: usize,
}

impl OrderCtx {
    pub fn new(order_number: String, order_index: usize) -> Self {
        Self {
            order_number,
            order_index,
        }
    }
}

impl Display for OrderCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[order #{} ({})]", self.order_number, self.order_index)
    }
}
