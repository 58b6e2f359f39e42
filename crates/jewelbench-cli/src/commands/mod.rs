//! CLI command definitions and dispatch.

pub mod analyze;
pub mod export;
pub mod materials;
pub mod serve;

use clap::{Parser, Subcommand};

use jewelbench_core::config::AppConfig;
use jewelbench_core::error::AppError;
use jewelbench_core::types::Material;
use jewelbench_service::{UploadStaging, ValuationPipeline};

use crate::output::OutputFormat;

/// JewelBench: jewelry mesh valuation and CAD export
#[derive(Debug, Parser)]
#[command(name = "jewelbench", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads config/default.toml then config/<ENV>.toml)
    #[arg(short, long, env = "JEWELBENCH_ENV", default_value = "development")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute metrics and valuation for an STL file
    Analyze(analyze::AnalyzeArgs),
    /// Write an STL file as a layered 3MF document
    Export(export::ExportArgs),
    /// List materials with density and spot price
    Materials,
    /// Start the HTTP server
    Serve(serve::ServeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Analyze(args) => analyze::execute(args, &self.config, self.format),
            Commands::Export(args) => export::execute(args, &self.config, self.format),
            Commands::Materials => materials::execute(self.format),
            Commands::Serve(args) => serve::execute(args, &self.config).await,
        }
    }
}

/// Helper: load configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Helper: build a pipeline over the configured staging area
pub fn build_pipeline(config: &AppConfig) -> ValuationPipeline {
    ValuationPipeline::with_stl(UploadStaging::from_config(&config.storage))
}

/// Helper: parse a material argument
pub fn parse_material(raw: &str) -> Result<Material, AppError> {
    raw.parse::<Material>().map_err(AppError::from)
}
