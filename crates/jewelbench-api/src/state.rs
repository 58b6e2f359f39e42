//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use jewelbench_cad::CadExporter;
use jewelbench_core::config::AppConfig;
use jewelbench_service::{ExportService, UploadStaging, ValuationPipeline};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Upload valuation pipeline
    pub pipeline: Arc<ValuationPipeline>,
    /// CAD export service
    pub export_service: Arc<ExportService>,
    /// Process start time, for uptime reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wire the services from configuration.
    pub fn new(config: AppConfig) -> Self {
        let temp_dir = config.storage.temp_path();
        let pipeline = ValuationPipeline::with_stl(UploadStaging::from_config(&config.storage));
        let export_service = ExportService::new(pipeline.clone(), CadExporter::new(temp_dir));

        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            export_service: Arc::new(export_service),
            started_at: Utc::now(),
        }
    }

    /// Seconds since the state was created.
    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
