// ================================================================
// File: songbot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Voice error: {0}")]
    Voice(String),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

/// Failures of a single playback attempt. Each one is reported back to the
/// user who issued `/play`; none of them are retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("media resolver failed: {0}")]
    Resolver(String),

    #[error("media resolver returned no entries")]
    NoEntries,

    #[error("media resolver returned no playable audio URL")]
    NoPlayableUrl,

    #[error("voice connection rejected the audio source: {0}")]
    Transport(String),
}
