// songbot-core/src/db/mod.rs

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info};

use crate::Error;

/// Handle to the SQLite song database.
///
/// There is no pool: every logical operation opens its own connection via
/// [`Database::connect`] and closes it when done.
#[derive(Clone, Debug)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    /// Open (creating if missing) the database file at `path` and check that a
    /// connection can be established.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let db = Self { options };
        db.connect().await?.close().await?;

        info!("Opened song database at {}", path.display());
        Ok(db)
    }

    /// Create the `songs` table if it is not there yet. Safe to run on every startup.
    pub async fn migrate(&self) -> Result<(), Error> {
        debug!("Applying migrations...");
        let mut conn = self.connect().await?;
        sqlx::migrate!("./migrations").run(&mut conn).await?;
        conn.close().await?;
        info!("Migrations applied successfully.");
        Ok(())
    }

    /// Open a fresh connection for one logical operation.
    pub async fn connect(&self) -> Result<SqliteConnection, Error> {
        Ok(self.options.connect().await?)
    }
}
