use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    ConnectOptions, Connection,
    postgres::{PgConnectOptions, PgConnection},
};
use tracing::debug;

use crate::health::error::HealthError;

/// Opens one session per health check.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Session: HealthSession;

    async fn connect(&self, connection_string: &str) -> Result<Self::Session, HealthError>;
}

/// A single database session. Everything issued through one session shares
/// the same server-side state, so temp tables created here stay visible until
/// the session is closed.
#[async_trait]
pub trait HealthSession: Send {
    /// Table names in the `public` schema.
    async fn list_public_tables(&mut self) -> Result<Vec<String>, HealthError>;

    /// Returns how many rows the time probe produced.
    async fn read_probe(&mut self) -> Result<usize, HealthError>;

    /// Create-if-absent, insert, then clear the temp table as one unit of
    /// work. Implementations must not spread these statements over more than
    /// one session.
    async fn write_probe(&mut self) -> Result<(), HealthError>;

    async fn close(&mut self) -> Result<(), HealthError>;
}

#[derive(Debug, Clone)]
pub struct PgConnector {
    connect_timeout: Duration,
}

impl PgConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Session = PgSession;

    async fn connect(&self, connection_string: &str) -> Result<PgSession, HealthError> {
        let options = PgConnectOptions::from_str(connection_string)?;
        Ok(PgSession {
            options,
            connect_timeout: self.connect_timeout,
            connection: None,
        })
    }
}

/// Connects on first use.
pub struct PgSession {
    options: PgConnectOptions,
    connect_timeout: Duration,
    connection: Option<PgConnection>,
}

impl PgSession {
    async fn connection(&mut self) -> Result<&mut PgConnection, HealthError> {
        let connection = match self.connection.take() {
            Some(connection) => connection,
            None => {
                debug!(
                    "Connecting to {}:{}",
                    self.options.get_host(),
                    self.options.get_port()
                );
                tokio::time::timeout(self.connect_timeout, self.options.connect())
                    .await
                    .map_err(|_| HealthError::Timeout(self.connect_timeout))??
            }
        };

        Ok(self.connection.insert(connection))
    }
}

#[async_trait]
impl HealthSession for PgSession {
    async fn list_public_tables(&mut self) -> Result<Vec<String>, HealthError> {
        let conn = self.connection().await?;
        let tables = sqlx::query_scalar::<_, String>(
            r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = 'public'
            ORDER BY table_name
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(tables)
    }

    async fn read_probe(&mut self) -> Result<usize, HealthError> {
        let conn = self.connection().await?;
        let rows = sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW() AS current_time")
            .fetch_all(&mut *conn)
            .await?;

        if let Some(server_time) = rows.first() {
            debug!("Database server time: {}", server_time);
        }

        Ok(rows.len())
    }

    async fn write_probe(&mut self) -> Result<(), HealthError> {
        let conn = self.connection().await?;
        let mut tx = conn.begin().await?;

        sqlx::query("CREATE TEMP TABLE IF NOT EXISTS dashboard_write_test (id integer)")
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO dashboard_write_test (id) VALUES (1)")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM dashboard_write_test")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), HealthError> {
        if let Some(connection) = self.connection.take() {
            connection.close().await?;
        }

        Ok(())
    }
}
