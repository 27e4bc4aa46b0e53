//! Process-wide MongoDB handle.
//!
//! The first call to [`database`] reads `MONGODB_URI` (and optionally
//! `MONGODB_DATABASE`) from the environment, builds a client and caches the
//! resulting [`Database`] for the lifetime of the process. Every later caller
//! receives the same handle. Concurrent first callers wait on a single
//! initialization.
//!
//! Connection failures are not retried here: a malformed URI or a driver
//! error is returned to the caller as-is.

use mongodb::{bson::doc, Client, Database};
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::config::Config;

/// Database used when neither `MONGODB_DATABASE` nor the URI names one.
pub const DEFAULT_DATABASE_NAME: &str = "storefront";

static DATABASE: OnceCell<Database> = OnceCell::const_new();

#[derive(Debug, Error)]
pub enum DbError {
    #[error("MONGODB_URI is not set")]
    MissingUri,
    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// Connection settings for the database handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub uri: String,
    pub database: Option<String>,
}

impl DbSettings {
    pub fn from_config(config: &Config) -> Result<Self, DbError> {
        let uri = config.mongodb_uri.clone().ok_or(DbError::MissingUri)?;

        Ok(Self {
            uri,
            database: config.mongodb_database.clone(),
        })
    }
}

/// Returns the shared database handle, creating it on first use.
pub async fn database() -> Result<&'static Database, DbError> {
    get_or_connect(&DATABASE, || DbSettings::from_config(&Config::from_env())).await
}

/// Initializes `cell` at most once from the settings produced by `settings`.
///
/// A failed initialization leaves the cell empty so a later call may try again.
async fn get_or_connect<F>(
    cell: &'static OnceCell<Database>,
    settings: F,
) -> Result<&'static Database, DbError>
where
    F: FnOnce() -> Result<DbSettings, DbError>,
{
    cell.get_or_try_init(|| async move {
        let settings = settings()?;
        connect(&settings).await
    })
    .await
}

/// Builds a database handle from explicit settings.
///
/// The driver connects lazily, so this only fails on an invalid URI or
/// client options.
pub async fn connect(settings: &DbSettings) -> Result<Database, DbError> {
    let client = Client::with_uri_str(&settings.uri).await?;

    let database = match &settings.database {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME)),
    };

    tracing::info!(database = %database.name(), "MongoDB handle created");

    Ok(database)
}

/// Round-trips a `ping` command to the server.
pub async fn ping(database: &Database) -> Result<(), DbError> {
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
