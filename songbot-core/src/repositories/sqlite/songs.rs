// File: songbot-core/src/repositories/sqlite/songs.rs

use async_trait::async_trait;
use sqlx::Connection;
use tracing::trace;

use songbot_common::error::Error;
use songbot_common::models::song::{NewSong, Song};
use songbot_common::traits::repository_traits::SongRepository;

use crate::db::Database;

pub struct SqliteSongRepository {
    db: Database,
}

impl SqliteSongRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Every row, lowest id first. The catalog is small enough to filter in memory.
    async fn all_songs(&self) -> Result<Vec<Song>, Error> {
        let mut conn = self.db.connect().await?;

        let rows = sqlx::query_as::<_, Song>(
            r#"
            SELECT id, title, artist, url
            FROM songs
            ORDER BY id ASC
            "#,
        )
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;

        Ok(rows)
    }
}

/// Case folding used on both sides of every comparison. SQLite's `LOWER()`
/// only folds ASCII, so matching happens here rather than in SQL.
pub(crate) fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Substring match on title or artist. `needle` must already be folded.
pub(crate) fn song_contains(song: &Song, needle: &str) -> bool {
    fold(&song.title).contains(needle)
        || song.artist.as_deref().is_some_and(|a| fold(a).contains(needle))
}

/// Whole-field match on both title and artist. Both arguments must already be
/// folded. A song without an artist never matches.
pub(crate) fn song_is(song: &Song, title: &str, artist: &str) -> bool {
    fold(&song.title) == title && song.artist.as_deref().is_some_and(|a| fold(a) == artist)
}

#[async_trait]
impl SongRepository for SqliteSongRepository {
    async fn insert(&self, song: &NewSong) -> Result<Song, Error> {
        let mut conn = self.db.connect().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO songs (title, artist, url)
            VALUES (?, ?, ?)
            "#,
        )
            .bind(&song.title)
            .bind(&song.artist)
            .bind(&song.url)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        let stored = Song {
            id: result.last_insert_rowid(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            url: song.url.clone(),
        };
        trace!("Inserted song id={} '{}'", stored.id, stored.display_name());
        Ok(stored)
    }

    async fn find_exact(&self, title: &str, artist: &str) -> Result<Option<Song>, Error> {
        let (title, artist) = (fold(title), fold(artist));
        let found = self
            .all_songs()
            .await?
            .into_iter()
            .find(|song| song_is(song, &title, &artist));
        Ok(found)
    }

    async fn find_fuzzy(&self, query: &str) -> Result<Option<Song>, Error> {
        let needle = fold(query);
        let found = self
            .all_songs()
            .await?
            .into_iter()
            .find(|song| song_contains(song, &needle));
        Ok(found)
    }

    async fn suggest(&self, partial: &str, limit: i64) -> Result<Vec<String>, Error> {
        let needle = fold(partial);
        let limit = usize::try_from(limit).unwrap_or(0);
        let names = self
            .all_songs()
            .await?
            .iter()
            .filter(|song| song_contains(song, &needle))
            .take(limit)
            .map(Song::display_name)
            .collect();
        Ok(names)
    }
}
