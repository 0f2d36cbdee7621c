use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a record row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Record {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}
