use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display-flavor tier derived from price or provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    /// Reserved for provenance signals (e.g. overwhelmingly positive
    /// reviews); never derived from price alone.
    Holographic,
}

impl Rarity {
    /// Price-tier derivation: ≤$5 common, ≤$15 rare, ≤$40 epic, else legendary.
    pub fn from_price(original_price: f64) -> Self {
        if original_price > 40.0 {
            Rarity::Legendary
        } else if original_price > 15.0 {
            Rarity::Epic
        } else if original_price > 5.0 {
            Rarity::Rare
        } else {
            Rarity::Common
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "COMMON"),
            Rarity::Rare => write!(f, "RARE"),
            Rarity::Epic => write!(f, "EPIC"),
            Rarity::Legendary => write!(f, "LEGENDARY"),
            Rarity::Holographic => write!(f, "HOLOGRAPHIC"),
        }
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "COMMON" => Ok(Rarity::Common),
            "RARE" => Ok(Rarity::Rare),
            "EPIC" => Ok(Rarity::Epic),
            "LEGENDARY" => Ok(Rarity::Legendary),
            "HOLOGRAPHIC" => Ok(Rarity::Holographic),
            _ => Err(format!("Unknown rarity: {s}")),
        }
    }
}
