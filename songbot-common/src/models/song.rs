use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One row of the `songs` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub url: String,
}

impl Song {
    /// `"<title> by <artist>"`, or just the title when the artist is unknown.
    /// This is also the string `/play` autocomplete hands back as the query.
    pub fn display_name(&self) -> String {
        format_display_name(&self.title, self.artist.as_deref())
    }

    pub fn artist_or_unknown(&self) -> &str {
        self.artist.as_deref().unwrap_or("Unknown")
    }
}

pub fn format_display_name(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.is_empty() => format!("{title} by {a}"),
        _ => title.to_string(),
    }
}

/// Insert payload for a song. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub artist: Option<String>,
    pub url: String,
}

impl NewSong {
    pub fn new(title: impl Into<String>, artist: Option<&str>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.map(str::to_string),
            url: url.into(),
        }
    }

    /// Title and url must be non-blank. A blank artist is normalized to `None`.
    pub fn validated(self) -> Result<Self, Error> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("song title must not be empty".into()));
        }
        if self.url.trim().is_empty() {
            return Err(Error::InvalidInput("song url must not be empty".into()));
        }
        let artist = self.artist.filter(|a| !a.trim().is_empty());
        Ok(Self { artist, ..self })
    }
}
