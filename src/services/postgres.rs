use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Outcome of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOutcome {
    Registered,
    AlreadyRegistered,
    EventFull,
}

/// PostgreSQL client for volunteer-event participation.
///
/// Participation records are the source of truth here: registration happens
/// inside a transaction serialized per event, and counts are always derived
/// with COUNT(*). The `registered_volunteers` counter in Supabase is only a
/// mirrored display value, never read back for decisions.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Register a volunteer for an event, respecting its capacity.
    ///
    /// The whole check-then-insert runs in one transaction holding a
    /// per-event advisory lock, so two concurrent joins cannot both pass
    /// the capacity check. Returns the outcome and the resulting count.
    pub async fn register(
        &self,
        event_id: &str,
        volunteer_id: &str,
        capacity: Option<i64>,
    ) -> Result<(RegistrationOutcome, i64), PostgresError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

        let already: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM event_participants
                WHERE event_id = $1 AND volunteer_id = $2
            )
            "#,
        )
        .bind(event_id)
        .bind(volunteer_id)
        .fetch_one(&mut *tx)
        .await?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM event_participants WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&mut *tx)
                .await?;

        if already {
            tx.commit().await?;
            return Ok((RegistrationOutcome::AlreadyRegistered, count));
        }

        if let Some(max) = capacity {
            if count >= max {
                tx.commit().await?;
                return Ok((RegistrationOutcome::EventFull, count));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO event_participants (event_id, volunteer_id, status)
            VALUES ($1, $2, 'registrado')
            "#,
        )
        .bind(event_id)
        .bind(volunteer_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Registered volunteer {} for event {}", volunteer_id, event_id);

        Ok((RegistrationOutcome::Registered, count + 1))
    }

    /// Remove a volunteer from an event.
    ///
    /// Returns the new count, or None if the volunteer was not registered.
    pub async fn unregister(
        &self,
        event_id: &str,
        volunteer_id: &str,
    ) -> Result<Option<i64>, PostgresError> {
        let result = sqlx::query(
            r#"
            DELETE FROM event_participants
            WHERE event_id = $1 AND volunteer_id = $2
            "#,
        )
        .bind(event_id)
        .bind(volunteer_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let count = self.registered_count(event_id).await?;
        Ok(Some(count))
    }

    /// Current number of registered volunteers, derived from the records
    pub async fn registered_count(&self, event_id: &str) -> Result<i64, PostgresError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM event_participants WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Event ids a volunteer is registered for, for client-side
    /// synchronization (join/leave button state).
    pub async fn registered_events(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<String>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT event_id
            FROM event_participants
            WHERE volunteer_id = $1
            ORDER BY registered_at DESC
            "#,
        )
        .bind(volunteer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| row.get("event_id")).collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
