use crate::domain::error::DomainError;
use crate::domain::ports::interaction_repository::{InteractionRepository, MarkOutcome};
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode};
use std::collections::HashSet;
use std::sync::Mutex;

pub struct SqliteInteractionRepo {
    conn: Mutex<Connection>,
}

impl SqliteInteractionRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl InteractionRepository for SqliteInteractionRepo {
    fn mark_opened(&self, user_id: &str, offer_id: &str) -> Result<MarkOutcome, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let result = conn.execute(
            "INSERT INTO opened_offers (user_id, offer_id, opened_at) VALUES (?1, ?2, ?3)",
            params![user_id, offer_id, Utc::now().to_rfc3339()],
        );

        match result {
            Ok(_) => Ok(MarkOutcome::Opened),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Ok(MarkOutcome::AlreadyOpened)
            }
            Err(e) => Err(DomainError::Database(format!(
                "Failed to mark opened: {e}"
            ))),
        }
    }

    fn has_opened(&self, user_id: &str, offer_id: &str) -> Result<bool, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT 1 FROM opened_offers WHERE user_id = ?1 AND offer_id = ?2")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        stmt.exists(params![user_id, offer_id])
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn get_opened_set(&self, user_id: &str) -> Result<HashSet<String>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare("SELECT offer_id FROM opened_offers WHERE user_id = ?1")
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let ids = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(ids)
    }
}
