use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geometry::GeoPoint;
use crate::error::CabledropError;

/// Shape of a generated drop path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DropStyle {
    /// Two points: FAT then HP
    #[default]
    Straight,
    /// Three points with an offset midpoint
    Curved,
}

impl DropStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropStyle::Straight => "straight",
            DropStyle::Curved => "curved",
        }
    }
}

impl fmt::Display for DropStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DropStyle {
    type Err = CabledropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(DropStyle::Straight),
            "curved" => Ok(DropStyle::Curved),
            _ => Err(CabledropError::InvalidStyle { style: s.to_string() }),
        }
    }
}

/// A computed connection between one access point and its distribution point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableDrop {
    /// `dropfg_<access>_to_<distribution>`
    pub name: String,

    /// Access point (HP) name
    pub source: String,

    /// Distribution point (FAT) name
    pub target: String,

    /// Region the pair was matched in
    pub region: String,

    pub style: DropStyle,

    /// Starts at the distribution point and ends at the access point
    pub path: Vec<GeoPoint>,
}
