pub mod canonical_id;
pub mod end_time;
pub mod platform;
pub mod progression;
pub mod rarity;
pub mod transaction_type;
