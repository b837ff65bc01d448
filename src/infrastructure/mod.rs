pub mod cache;
pub mod miners;
pub mod sqlite;
