// File: songbot-core/src/services/song_service.rs

use std::sync::Arc;

use tracing::debug;

use songbot_common::models::song::{NewSong, Song};

use crate::Error;
use crate::repositories::{SongRepository, SUGGESTION_LIMIT};

/// Separator between title and artist in a `/play` query, e.g. `Blue by Joni Mitchell`.
pub const TITLE_ARTIST_SEPARATOR: &str = " by ";

/// Turns free-text queries into catalog rows.
pub struct SongService {
    songs: Arc<dyn SongRepository>,
}

impl SongService {
    pub fn new(songs: Arc<dyn SongRepository>) -> Self {
        Self { songs }
    }

    /// Resolve a `/play` query to at most one song.
    ///
    /// `"<title> by <artist>"` is an exact lookup and its answer is final: if
    /// nothing matches exactly, the result is `None` even when a substring
    /// search on the whole query would have found something. Queries without
    /// the separator do a substring search on title or artist. A blank query
    /// matches nothing.
    pub async fn resolve(&self, query: &str) -> Result<Option<Song>, Error> {
        if query.trim().is_empty() {
            debug!("Empty query; not searching the catalog");
            return Ok(None);
        }

        if let Some((title, artist)) = split_title_artist(query) {
            debug!("Exact lookup title='{title}' artist='{artist}'");
            return self.songs.find_exact(&title, &artist).await;
        }

        debug!("Fuzzy lookup '{query}'");
        self.songs.find_fuzzy(query).await
    }

    /// Autocomplete choices for a partially typed query.
    pub async fn suggestions(&self, partial: &str) -> Result<Vec<String>, Error> {
        if partial.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.songs.suggest(partial, SUGGESTION_LIMIT).await
    }

    pub async fn add_song(&self, song: NewSong) -> Result<Song, Error> {
        let song = song.validated()?;
        self.songs.insert(&song).await
    }
}

/// Split on the first `" by "`, then trim and lowercase both halves.
pub fn split_title_artist(query: &str) -> Option<(String, String)> {
    query
        .split_once(TITLE_ARTIST_SEPARATOR)
        .map(|(title, artist)| (title.trim().to_lowercase(), artist.trim().to_lowercase()))
}
