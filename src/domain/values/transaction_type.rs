use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Earn,
    Redeem,
    Adjustment,
    Bonus,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Earn => write!(f, "EARN"),
            TransactionType::Redeem => write!(f, "REDEEM"),
            TransactionType::Adjustment => write!(f, "ADJUSTMENT"),
            TransactionType::Bonus => write!(f, "BONUS"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EARN" => Ok(TransactionType::Earn),
            "REDEEM" => Ok(TransactionType::Redeem),
            "ADJUSTMENT" => Ok(TransactionType::Adjustment),
            "BONUS" => Ok(TransactionType::Bonus),
            _ => Err(format!("Unknown transaction type: {s}")),
        }
    }
}
