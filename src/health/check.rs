use tracing::{debug, error, warn};

use crate::health::{
    db::{Connector, HealthSession},
    error::HealthError,
    models::{HealthResult, ProbeReport},
};

/// Runs the read, write and table probes against the database behind
/// `connection_string`. Never fails: errors are folded into the result.
pub async fn run_health_check<C: Connector>(
    connector: &C,
    connection_string: Option<&str>,
) -> HealthResult {
    let outcome = match connection_string.map(str::trim).filter(|s| !s.is_empty()) {
        Some(connection_string) => probe(connector, connection_string).await,
        None => {
            warn!("No database url configured, skipping health check");
            Err(HealthError::MissingConfiguration)
        }
    };

    if let Err(e) = &outcome {
        error!("Database health check failed: {}", e);
    }

    let result = HealthResult::from(outcome);
    if !result.missing_tables.is_empty() && result.error_message.is_none() {
        warn!("Missing expected tables: {}", result.missing_tables.join(", "));
    }

    result
}

async fn probe<C: Connector>(
    connector: &C,
    connection_string: &str,
) -> Result<ProbeReport, HealthError> {
    let mut session = connector.connect(connection_string).await?;
    let report = run_probes(&mut session).await?;

    if let Err(e) = session.close().await {
        warn!("Failed to close health check session: {}", e);
    }

    Ok(report)
}

async fn run_probes<S: HealthSession>(session: &mut S) -> Result<ProbeReport, HealthError> {
    let mut tables: Vec<String> = session
        .list_public_tables()
        .await?
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect();
    tables.sort();
    debug!("Found {} tables in public schema", tables.len());

    let read_ok = session.read_probe().await? == 1;
    debug!("Read probe ok: {}", read_ok);

    session.write_probe().await?;
    debug!("Write probe ok");

    Ok(ProbeReport {
        read_ok,
        write_ok: true,
        tables,
    })
}
