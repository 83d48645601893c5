use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Unit of measure for a catalog item.
///
/// The enumeration is fixed; purchases must use the same unit as the item
/// they reference. Wire names match the stored short codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    /// Discrete pieces.
    #[serde(rename = "PCS")]
    Pieces,
    /// Meters (cable, pipe, ...).
    #[serde(rename = "M")]
    Meters,
    /// Liters (paint, fuel, ...).
    #[serde(rename = "L")]
    Liters,
    /// Kilograms (steel, cement, ...).
    #[serde(rename = "KG")]
    Kilograms,
}

impl UnitType {
    /// All units, in display order.
    pub const ALL: [UnitType; 4] = [
        UnitType::Pieces,
        UnitType::Meters,
        UnitType::Liters,
        UnitType::Kilograms,
    ];

    /// The short wire code (`PCS`, `M`, `L`, `KG`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pieces => "PCS",
            Self::Meters => "M",
            Self::Liters => "L",
            Self::Kilograms => "KG",
        }
    }

    /// Whether a purchase in `other` may be booked against an item in `self`.
    /// With a fixed enumeration the compatibility relation is equality.
    pub fn is_compatible_with(&self, other: &UnitType) -> bool {
        self == other
    }
}

impl FromStr for UnitType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PCS" => Ok(Self::Pieces),
            "M" => Ok(Self::Meters),
            "L" => Ok(Self::Liters),
            "KG" => Ok(Self::Kilograms),
            other => Err(TypeError::InvalidUnit(other.to_string())),
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
