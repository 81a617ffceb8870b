use std::sync::Arc;

use crate::{
    config::config::AppConfig,
    health::db::{Connector, PgConnector},
};

pub struct AppState<C = PgConnector> {
    connector: C,
    database_url: Option<String>,
}

impl AppState<PgConnector> {
    pub fn from_config(config: &AppConfig) -> Arc<Self> {
        let connector = PgConnector::new(config.connect_timeout());
        Self::new(connector, config.database_url().map(String::from))
    }
}

impl<C: Connector> AppState<C> {
    pub fn new(connector: C, database_url: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            connector,
            database_url,
        })
    }

    pub fn get_connector(&self) -> &C {
        &self.connector
    }

    pub fn get_database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}
