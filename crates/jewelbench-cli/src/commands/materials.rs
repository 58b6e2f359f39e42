//! List the material table.

use tabled::Tabled;

use jewelbench_core::error::AppError;
use jewelbench_service::{MaterialInfo, material_catalog};

use crate::output::{self, OutputFormat};

#[derive(Debug, Tabled)]
struct MaterialRow {
    #[tabled(rename = "Material")]
    material: String,
    #[tabled(rename = "Density (g/cm³)")]
    density: String,
    #[tabled(rename = "Spot Price")]
    spot_price: String,
}

impl From<&MaterialInfo> for MaterialRow {
    fn from(info: &MaterialInfo) -> Self {
        Self {
            material: info.material.name().to_string(),
            density: format!("{:.2}", info.density_g_cm3),
            spot_price: info.spot_price_display.clone(),
        }
    }
}

/// Execute the materials command
pub fn execute(format: OutputFormat) -> Result<(), AppError> {
    let catalog = material_catalog()?;
    match format {
        OutputFormat::Json => output::print_json(&catalog),
        OutputFormat::Table => {
            let rows: Vec<MaterialRow> = catalog.iter().map(MaterialRow::from).collect();
            output::print_table(&rows);
        }
    }
    Ok(())
}
