use crate::domain::entities::claim_record::ClaimRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::claim_history_repository::ClaimHistoryRepository;
use crate::domain::values::rarity::Rarity;
use chrono::DateTime;
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub struct SqliteHistoryRepo {
    conn: Mutex<Connection>,
}

impl SqliteHistoryRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<ClaimRecord, rusqlite::Error> {
        let rarity_str: String = row.get(6)?;
        let claimed_str: String = row.get(8)?;
        Ok(ClaimRecord {
            user_id: row.get(0)?,
            canonical_id: row.get(1)?,
            title: row.get(2)?,
            source: row.get(3)?,
            store_url: row.get(4)?,
            cover_image_url: row.get(5)?,
            rarity: rarity_str.parse().unwrap_or(Rarity::Common),
            savings: row.get(7)?,
            claimed_at: DateTime::parse_from_rfc3339(&claimed_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
        })
    }
}

impl ClaimHistoryRepository for SqliteHistoryRepo {
    fn record(&self, record: &ClaimRecord) -> Result<bool, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "INSERT OR IGNORE INTO claim_history
                 (user_id, canonical_id, title, source, store_url, cover_image_url, rarity, savings, claimed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.user_id,
                    record.canonical_id,
                    record.title,
                    record.source,
                    record.store_url,
                    record.cover_image_url,
                    record.rarity.to_string(),
                    record.savings,
                    record.claimed_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to record claim: {e}")))?;
        Ok(rows > 0)
    }

    fn list(&self, user_id: &str) -> Result<Vec<ClaimRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT user_id, canonical_id, title, source, store_url, cover_image_url, rarity, savings, claimed_at
                 FROM claim_history WHERE user_id = ?1
                 ORDER BY claimed_at ASC",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let records = stmt
            .query_map(params![user_id], Self::row_to_record)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }
}
