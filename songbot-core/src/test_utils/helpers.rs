// File: songbot-core/src/test_utils/helpers.rs

use std::sync::Arc;

use tempfile::TempDir;

use songbot_common::models::song::{NewSong, Song};

use crate::Error;
use crate::db::Database;
use crate::repositories::{SongRepository, SqliteSongRepository};
use crate::services::song_service::SongService;

/// A migrated database in a fresh temporary directory.
/// The directory is deleted when the returned `TempDir` is dropped, so keep it alive.
pub async fn create_test_database() -> Result<(Database, TempDir), Error> {
    let dir = tempfile::tempdir()?;
    let db = Database::new(dir.path().join("songs_test.db")).await?;
    db.migrate().await?;
    Ok((db, dir))
}

pub async fn create_test_repository() -> Result<(Arc<SqliteSongRepository>, TempDir), Error> {
    let (db, dir) = create_test_database().await?;
    Ok((Arc::new(SqliteSongRepository::new(db)), dir))
}

pub async fn create_test_song_service() -> Result<(Arc<SongService>, TempDir), Error> {
    let (repo, dir) = create_test_repository().await?;
    Ok((Arc::new(SongService::new(repo)), dir))
}

/// Insert `(title, artist, url)` rows in order and return them with their ids.
pub async fn seed_songs(
    repo: &dyn SongRepository,
    rows: &[(&str, Option<&str>, &str)],
) -> Result<Vec<Song>, Error> {
    let mut stored = Vec::with_capacity(rows.len());
    for (title, artist, url) in rows {
        stored.push(repo.insert(&NewSong::new(*title, *artist, *url)).await?);
    }
    Ok(stored)
}
