//! Downstream handlers served behind the gate.

use std::time::Duration;

use axum::extract::Path;

/// Longest simulated work accepted by [`work`].
const MAX_WORK_MS: u64 = 60_000;

pub async fn root() -> &'static str {
    "ok"
}

/// Simulate a request that takes `ms` milliseconds.
pub async fn work(Path(ms): Path<u64>) -> String {
    let ms = ms.min(MAX_WORK_MS);
    tokio::time::sleep(Duration::from_millis(ms)).await;
    format!("done after {ms}ms")
}
