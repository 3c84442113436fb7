pub mod order_ctx;
pub mod order_flow;
pub mod submission;

pub use order_ctx::OrderCtx;
pub use order_flow::OrderFlow;
pub use submission::submit_with_retry;
