use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Runs `body` until it succeeds, up to `max_attempts` times with a fixed
/// `interval` between attempts. Every failure is logged under `operation`;
/// exhaustion hands the last error back to the caller unchanged.
///
/// Deadlines and cancellation are deliberately not handled here: a caller
/// that needs a bounded wait interrupts the underlying connection instead.
pub async fn with_retries<T, E, F, Fut>(
  max_attempts: u32,
  interval: Duration,
  operation: &str,
  mut body: F,
) -> Result<T, E>
where
  F: FnMut() -> Fut,
  Fut: Future<Output = Result<T, E>>,
  E: fmt::Display,
{
  let mut attempt = 0;
  loop {
    match body().await {
      Ok(value) => return Ok(value),
      Err(err) => {
        attempt += 1;
        if attempt >= max_attempts {
          return Err(err);
        }
        warn!(operation, attempt, error = %err, "operation failed, retrying");
        tokio::time::sleep(interval).await;
      }
    }
  }
}
