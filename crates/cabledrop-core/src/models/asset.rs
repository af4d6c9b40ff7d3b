use serde::{Deserialize, Serialize};
use std::fmt;

use super::geometry::GeoPoint;

/// Which side of a drop a placemark sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// FAT (fiber access terminal): serves any number of drops
    Distribution,
    /// HP (home pass): gets at most one drop per region
    Access,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Distribution => "distribution",
            AssetCategory::Access => "access",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named point asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    pub name: String,
    pub position: GeoPoint,
    pub category: AssetCategory,
}

impl NamedPoint {
    pub fn new(name: impl Into<String>, position: GeoPoint, category: AssetCategory) -> Self {
        Self { name: name.into(), position, category }
    }

    pub fn distribution(name: impl Into<String>, position: GeoPoint) -> Self {
        Self::new(name, position, AssetCategory::Distribution)
    }

    pub fn access(name: impl Into<String>, position: GeoPoint) -> Self {
        Self::new(name, position, AssetCategory::Access)
    }
}
