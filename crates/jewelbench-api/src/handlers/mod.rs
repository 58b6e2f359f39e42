//! Route handlers organized by domain.

pub mod export;
pub mod health;
pub mod materials;
pub mod valuation;

use jewelbench_core::error::AppError;

/// Run CPU-bound pipeline work on the blocking pool.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::internal(format!("Pipeline task failed: {e}")))?
}
