//! Precious-metal material selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// The fixed set of metals a design can be valued in.
///
/// Serialized and parsed by display name (`"Gold 18K"`), which is also the
/// value stamped into exported CAD metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Material {
    /// 75% gold alloy.
    #[serde(rename = "Gold 18K")]
    Gold18K,
    /// 91.6% gold alloy.
    #[serde(rename = "Gold 22K")]
    Gold22K,
    /// Fine gold.
    #[serde(rename = "Gold 24K")]
    Gold24K,
    /// Platinum.
    #[serde(rename = "Platinum")]
    Platinum,
    /// Sterling silver.
    #[serde(rename = "Silver 925")]
    Silver925,
}

impl Material {
    /// Every selectable material, in selection order.
    pub const ALL: [Material; 5] = [
        Material::Gold18K,
        Material::Gold22K,
        Material::Gold24K,
        Material::Platinum,
        Material::Silver925,
    ];

    /// Display name shown to users and written into CAD metadata.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gold18K => "Gold 18K",
            Self::Gold22K => "Gold 22K",
            Self::Gold24K => "Gold 24K",
            Self::Platinum => "Platinum",
            Self::Silver925 => "Silver 925",
        }
    }

    /// Display name with spaces replaced by underscores, for file names.
    pub fn file_stem(self) -> String {
        self.name().replace(' ', "_")
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A material name outside the fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown material '{0}'; expected one of: Gold 18K, Gold 22K, Gold 24K, Platinum, Silver 925")]
pub struct UnknownMaterial(pub String);

impl FromStr for Material {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted) || m.file_stem().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}

impl From<UnknownMaterial> for AppError {
    fn from(err: UnknownMaterial) -> Self {
        AppError::validation(err.to_string())
    }
}
