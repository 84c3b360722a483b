// src/db/sqlite/repository/quote_repository.rs
use crate::db::sqlite::connection::SqliteConnection;
use crate::error::PersistenceFailure;
use crate::services::quotes::models::QuoteRecord;
use crate::utils::deadline::{Deadline, Expired};
use async_trait::async_trait;
use sqlx::{Connection, Error as SqlxError};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DROP_TABLE: &str = "DROP TABLE IF EXISTS CambioUsdbrl";

const CREATE_TABLE: &str = "CREATE TABLE CambioUsdbrl (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Code VARCHAR(3),
    Codein VARCHAR(3),
    Name VARCHAR(255),
    High DECIMAL(10,4),
    Low DECIMAL(10,4),
    VarBid DECIMAL(10,4),
    PctChange DECIMAL(10,2),
    Bid DECIMAL(10,4),
    Ask DECIMAL(10,4),
    Timestamp BIGINT,
    CreateDate DATETIME
)";

const INSERT_QUOTE: &str = "INSERT INTO CambioUsdbrl
    (Code, Codein, Name, High, Low, VarBid, PctChange, Bid, Ask, Timestamp, CreateDate)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Append-only store of quotes
#[async_trait]
pub trait TraitQuoteRepository {
    /// Inserts one row and returns its ID.
    ///
    /// A row is kept only when the insert finished before `deadline`; otherwise the
    /// write is rolled back and `DeadlineExceeded` is returned.
    async fn insert(&self, record: &QuoteRecord, deadline: &Deadline) -> Result<i64, PersistenceFailure>;
}

pub struct StructQuoteRepository {
    connection: Arc<SqliteConnection>,
}

impl StructQuoteRepository {
    pub fn new(connection: Arc<SqliteConnection>) -> Self {
        Self { connection }
    }

    /// Drops and recreates the quote table. Run once at startup.
    pub async fn recreate_table(&self) -> Result<(), SqlxError> {
        let pool = self.connection.get_pool();

        sqlx::query(DROP_TABLE).execute(pool).await?;
        sqlx::query(CREATE_TABLE).execute(pool).await?;

        info!("Table CambioUsdbrl recreated");
        Ok(())
    }
}

#[async_trait]
impl TraitQuoteRepository for StructQuoteRepository {
    async fn insert(&self, record: &QuoteRecord, deadline: &Deadline) -> Result<i64, PersistenceFailure> {
        let pool = self.connection.get_pool();

        // Acquiring is cancel-safe, nothing has reached SQLite yet
        let mut conn = match deadline.run(pool.acquire()).await {
            Ok(conn) => conn?,
            Err(Expired) => return Err(PersistenceFailure::DeadlineExceeded),
        };
        let mut tx = conn.begin().await?;

        // A dropped statement still runs on the SQLite worker, so the outcome is
        // decided below by an explicit rollback or commit, never by cancellation.
        let insert = sqlx::query(INSERT_QUOTE)
            .bind(&record.code)
            .bind(&record.code_in)
            .bind(&record.name)
            .bind(record.high.to_string())
            .bind(record.low.to_string())
            .bind(record.var_bid.to_string())
            .bind(record.pct_change.to_string())
            .bind(record.bid.to_string())
            .bind(record.ask.to_string())
            .bind(record.timestamp)
            .bind(&record.create_date)
            .execute(&mut *tx);

        let result = match deadline.run(insert).await {
            Ok(Ok(result)) if !deadline.is_expired() => result,
            Ok(Err(e)) => {
                tx.rollback().await?;
                return Err(e.into());
            }
            Ok(Ok(_)) | Err(Expired) => {
                tx.rollback().await?;
                warn!("Insert of quote {} rolled back after write deadline", record.code);
                return Err(PersistenceFailure::DeadlineExceeded);
            }
        };

        // Once the commit is sent its outcome is reported as is
        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!("Inserted quote {} bid={} as row {}", record.code, record.bid, id);

        Ok(id)
    }
}
