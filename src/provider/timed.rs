//! Duration logging around upstream calls.

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, warn};

/// Awaits `fut`, logging how long `operation` took and whether it failed.
pub async fn timed<T, E, F>(operation: &str, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let start = Instant::now();
    let result = fut.await;
    let elapsed_ms = start.elapsed().as_millis();

    match &result {
        Ok(_) => debug!("{} completed in {}ms", operation, elapsed_ms),
        Err(err) => warn!("{} failed after {}ms: {}", operation, elapsed_ms, err),
    }
    result
}
