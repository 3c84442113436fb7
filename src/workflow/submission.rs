//! Bounded retry around the submit step.
//!
//! The order button sometimes trips a transient server error; the page shows
//! a rejection banner instead of the receipt. The policy is the simplest one
//! that works for UI-transient failures: a fixed attempt count, no backoff,
//! no jitter. Exhausting all attempts is a hard failure for the order; the
//! last error is returned and the batch boundary decides what to do with it.

use tracing::{info, warn};

use crate::error::{OrderError, ServerRejection};
use crate::infrastructure::UiSession;
use crate::selectors;
use crate::utils::logging::truncate_text;
use crate::workflow::order_ctx::OrderCtx;

/// Click the order button until one attempt passes without the error banner,
/// up to `max_retries` attempts in total.
pub async fn submit_with_retry<S: UiSession>(
    session: &S,
    ctx: &OrderCtx,
    max_retries: usize,
) -> Result<(), OrderError> {
    let mut last_error = None;

    for attempt in 1..=max_retries {
        match try_submit(session).await {
            Ok(()) => {
                if attempt > 1 {
                    info!("{} ✓ submit succeeded on attempt {}", ctx, attempt);
                }
                return Ok(());
            }
            Err(e) => {
                warn!(
                    "{} submit attempt {}/{} failed: {}",
                    ctx,
                    attempt,
                    max_retries,
                    truncate_text(&e.to_string(), 120)
                );
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        // max_retries == 0 means the submit was never even attempted
        OrderError::Server(ServerRejection::new("no submit attempts configured"))
    }))
}

/// One submit attempt: click, then check for the rejection banner
async fn try_submit<S: UiSession>(session: &S) -> Result<(), OrderError> {
    session.click(selectors::ORDER_BUTTON).await?;

    if session.is_visible(selectors::ERROR_BANNER).await? {
        let message = session.inner_text(selectors::ERROR_BANNER).await?;
        return Err(ServerRejection::new(message).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::UiError;
    use std::path::Path;
    use std::sync::Mutex;
    use tokio_test::assert_ok;

    /// Submit fails (banner shown) for the first `failures` attempts
    struct FlakyServer {
        failures: usize,
        clicks: Mutex<usize>,
    }

    impl FlakyServer {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                clicks: Mutex::new(0),
            }
        }

        fn click_count(&self) -> usize {
            *self.clicks.lock().expect("lock")
        }
    }

    impl UiSession for FlakyServer {
        async fn navigate(&self, _url: &str) -> Result<(), UiError> {
            Ok(())
        }

        async fn click(&self, selector: &str) -> Result<(), UiError> {
            if selector == selectors::ORDER_BUTTON {
                *self.clicks.lock().expect("lock") += 1;
            }
            Ok(())
        }

        async fn select_option(&self, _selector: &str, _value: &str) -> Result<(), UiError> {
            Ok(())
        }

        async fn fill(&self, _selector: &str, _text: &str) -> Result<(), UiError> {
            Ok(())
        }

        async fn is_visible(&self, selector: &str) -> Result<bool, UiError> {
            if selector == selectors::ERROR_BANNER {
                return Ok(self.click_count() <= self.failures);
            }
            Ok(false)
        }

        async fn inner_text(&self, _selector: &str) -> Result<String, UiError> {
            Ok("Found a dusty bin in the vault.".to_string())
        }

        async fn inner_html(&self, _selector: &str) -> Result<String, UiError> {
            Ok(String::new())
        }

        async fn screenshot(&self, _selector: &str, _path: &Path) -> Result<(), UiError> {
            Ok(())
        }
    }

    fn ctx() -> OrderCtx {
        OrderCtx::new("42".to_string(), 1)
    }

    #[tokio::test]
    async fn succeeds_once_the_banner_clears() {
        // Fails twice, succeeds on the third attempt
        let session = FlakyServer::new(2);

        submit_with_retry(&session, &ctx(), 3).await.expect("submit");
        assert_eq!(session.click_count(), 3);
    }

    #[tokio::test]
    async fn first_attempt_can_be_enough() {
        let session = FlakyServer::new(0);

        assert_ok!(submit_with_retry(&session, &ctx(), 3).await);
        assert_eq!(session.click_count(), 1);
    }

    #[tokio::test]
    async fn exhaustion_returns_the_last_rejection() {
        // Needs 4 attempts but only 3 are allowed
        let session = FlakyServer::new(3);

        let result = submit_with_retry(&session, &ctx(), 3).await;
        match result {
            Err(OrderError::Server(rejection)) => {
                assert!(rejection.message.contains("dusty bin"));
            }
            other => panic!("expected server rejection, got {:?}", other),
        }
        assert_eq!(session.click_count(), 3, "no attempts beyond the budget");
    }

    #[tokio::test]
    async fn zero_attempts_is_an_error() {
        let session = FlakyServer::new(0);

        let result = submit_with_retry(&session, &ctx(), 0).await;
        assert!(result.is_err());
        assert_eq!(session.click_count(), 0);
    }
}
