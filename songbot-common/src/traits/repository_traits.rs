use async_trait::async_trait;

use crate::error::Error;
use crate::models::song::{NewSong, Song};

/// How many suggestions autocomplete asks for.
pub const SUGGESTION_LIMIT: i64 = 10;

/// The song catalog. Matching is case-insensitive everywhere and ties are
/// broken by lowest id.
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Always appends; duplicates of (title, artist) are allowed.
    async fn insert(&self, song: &NewSong) -> Result<Song, Error>;

    /// Exact match on both title and artist.
    async fn find_exact(&self, title: &str, artist: &str) -> Result<Option<Song>, Error>;

    /// Substring match against title OR artist.
    async fn find_fuzzy(&self, query: &str) -> Result<Option<Song>, Error>;

    /// Display strings (`Song::display_name`) for up to `limit` substring matches.
    async fn suggest(&self, partial: &str, limit: i64) -> Result<Vec<String>, Error>;
}
