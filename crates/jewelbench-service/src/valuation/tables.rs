//! Fixed density and spot-price tables.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use jewelbench_core::error::AppError;
use jewelbench_core::types::Material;

use super::display::format_currency;

// Both maps are generated from one row list so they cannot drift apart
macro_rules! define_material_tables {
    ($($material:ident => density: $density:literal, spot: $spot:literal),* $(,)?) => {
        /// Density in g/cm³.
        static DENSITIES: LazyLock<HashMap<Material, f64>> = LazyLock::new(|| {
            HashMap::from([$((Material::$material, $density),)*])
        });

        /// Spot price in ₹ per gram.
        static SPOT_PRICES: LazyLock<HashMap<Material, f64>> = LazyLock::new(|| {
            HashMap::from([$((Material::$material, $spot),)*])
        });
    };
}

define_material_tables! {
    Gold18K   => density: 15.58, spot: 5680.0,
    Gold22K   => density: 17.50, spot: 6920.0,
    Gold24K   => density: 19.32, spot: 7550.0,
    Platinum  => density: 21.45, spot: 2850.0,
    Silver925 => density: 10.36, spot: 92.0,
}

/// Density of a material in g/cm³.
pub fn density(material: Material) -> Result<f64, AppError> {
    DENSITIES
        .get(&material)
        .copied()
        .ok_or_else(|| AppError::validation(format!("No density on record for {material}")))
}

/// Spot price of a material in ₹ per gram.
pub fn spot_price(material: Material) -> Result<f64, AppError> {
    SPOT_PRICES
        .get(&material)
        .copied()
        .ok_or_else(|| AppError::validation(format!("No spot price on record for {material}")))
}

/// Table row for one material.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialInfo {
    /// The material.
    pub material: Material,
    /// Density in g/cm³.
    pub density_g_cm3: f64,
    /// Spot price in ₹ per gram.
    pub spot_price_per_g: f64,
    /// Spot price formatted for display.
    pub spot_price_display: String,
}

/// All materials with their table values, in selection order.
pub fn material_catalog() -> Result<Vec<MaterialInfo>, AppError> {
    Material::ALL
        .into_iter()
        .map(|material| {
            let spot = spot_price(material)?;
            Ok(MaterialInfo {
                material,
                density_g_cm3: density(material)?,
                spot_price_per_g: spot,
                spot_price_display: format!("{}/g", format_currency(spot)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_exactly_the_materials() {
        assert_eq!(DENSITIES.len(), Material::ALL.len());
        assert_eq!(SPOT_PRICES.len(), Material::ALL.len());
        for material in Material::ALL {
            assert!(DENSITIES.contains_key(&material));
            assert!(SPOT_PRICES.contains_key(&material));
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(density(Material::Gold18K).unwrap(), 15.58);
        assert_eq!(density(Material::Platinum).unwrap(), 21.45);
        assert_eq!(spot_price(Material::Gold24K).unwrap(), 7550.0);
        assert_eq!(spot_price(Material::Silver925).unwrap(), 92.0);
    }

    #[test]
    fn test_catalog_order_and_display() {
        let catalog = material_catalog().unwrap();
        let names: Vec<&str> = catalog.iter().map(|m| m.material.name()).collect();
        assert_eq!(
            names,
            ["Gold 18K", "Gold 22K", "Gold 24K", "Platinum", "Silver 925"]
        );
        assert_eq!(catalog[0].spot_price_display, "₹5,680.00/g");
        assert_eq!(catalog[4].spot_price_display, "₹92.00/g");
    }
}
