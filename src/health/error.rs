use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Missing configuration: DASHBOARD__DATABASE_URL is not set")]
    MissingConfiguration,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Timed out after {0:?} while connecting to the database")]
    Timeout(Duration),
}
