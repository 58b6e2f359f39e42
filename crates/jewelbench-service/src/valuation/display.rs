//! Human-readable rendering of metrics and valuations.

use serde::Serialize;

use super::model::{MeshMetrics, Valuation};

/// Display strings for a valuation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationDisplay {
    /// e.g. `1000.00 mm³`
    pub volume: String,
    /// e.g. `600.0 mm²`
    pub surface_area: String,
    /// `Valid` or `Repair Needed`
    pub manifold: String,
    /// e.g. `15.580 g`
    pub weight: String,
    /// e.g. `₹88,494.40`
    pub total_value: String,
}

impl ValuationDisplay {
    /// Render metrics and valuation.
    pub fn new(metrics: &MeshMetrics, valuation: &Valuation) -> Self {
        Self {
            volume: format!("{:.2} mm³", metrics.volume_mm3),
            surface_area: format!("{:.1} mm²", metrics.surface_area_mm2),
            manifold: manifold_label(metrics.is_manifold).to_string(),
            weight: format!("{:.3} g", valuation.weight_g),
            total_value: format_currency(valuation.total_value),
        }
    }
}

/// `Valid` for closed meshes, `Repair Needed` otherwise.
pub fn manifold_label(is_manifold: bool) -> &'static str {
    if is_manifold { "Valid" } else { "Repair Needed" }
}

/// Rupee amount with thousands separators and two decimals.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}₹{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(92.0), "₹92.00");
        assert_eq!(format_currency(999.999), "₹1,000.00");
        assert_eq!(format_currency(88_494.4), "₹88,494.40");
        assert_eq!(format_currency(1_234_567.891), "₹1,234,567.89");
        assert_eq!(format_currency(-1500.0), "-₹1,500.00");
    }

    #[test]
    fn test_manifold_label() {
        assert_eq!(manifold_label(true), "Valid");
        assert_eq!(manifold_label(false), "Repair Needed");
    }
}
