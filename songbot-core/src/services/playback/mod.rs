// File: songbot-core/src/services/playback/mod.rs
//! Playback orchestration: resolve a catalog URL into a direct audio stream
//! and hand it to a guild's voice session.

pub mod ytdlp;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use songbot_common::error::PlaybackError;

pub use ytdlp::YtDlpResolver;

/// What the media resolver reports about a source. Search and playlist
/// sources come back as a container with `entries`; single videos carry a
/// direct `url` for the selected format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub entries: Option<Vec<MediaInfo>>,
}

/// A direct, time-limited audio stream locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStream {
    pub url: String,
    pub title: Option<String>,
}

/// Turns an opaque locator (page URL or search text) into [`MediaInfo`],
/// asking for the best audio-only format.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaResolver: Send + Sync {
    async fn resolve(&self, source_url: &str) -> Result<MediaInfo, PlaybackError>;
}

/// The live voice connection of one guild.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoiceSession: Send + Sync {
    /// Replace whatever is playing with the stream at `stream_url`.
    async fn play_stream(&self, stream_url: String) -> Result<(), PlaybackError>;
}

/// Pick the playable stream out of a resolver response: the first entry of a
/// container, otherwise the response itself.
pub fn select_stream(info: MediaInfo) -> Result<ResolvedStream, PlaybackError> {
    let chosen = match info.entries {
        Some(entries) => entries.into_iter().next().ok_or(PlaybackError::NoEntries)?,
        None => info,
    };

    match chosen.url {
        Some(url) if !url.trim().is_empty() => Ok(ResolvedStream {
            url,
            title: chosen.title,
        }),
        _ => Err(PlaybackError::NoPlayableUrl),
    }
}

pub struct PlaybackService {
    resolver: Arc<dyn MediaResolver>,
}

impl PlaybackService {
    pub fn new(resolver: Arc<dyn MediaResolver>) -> Self {
        Self { resolver }
    }

    /// One playback attempt: resolve, pick the stream, play it on `session`.
    pub async fn play_on(
        &self,
        session: &dyn VoiceSession,
        source_url: &str,
    ) -> Result<ResolvedStream, PlaybackError> {
        debug!("Resolving audio stream for {source_url}");
        let info = self.resolver.resolve(source_url).await?;
        let stream = select_stream(info)?;

        session.play_stream(stream.url.clone()).await?;
        info!(
            "Started stream for {source_url} ({})",
            stream.title.as_deref().unwrap_or("untitled")
        );
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn single(url: Option<&str>) -> MediaInfo {
        MediaInfo {
            title: Some("Blue".into()),
            url: url.map(str::to_string),
            entries: None,
        }
    }

    #[test]
    fn select_stream_uses_top_level_url() {
        let stream = select_stream(single(Some("https://cdn/audio"))).unwrap();
        assert_eq!(stream.url, "https://cdn/audio");
        assert_eq!(stream.title.as_deref(), Some("Blue"));
    }

    #[test]
    fn select_stream_takes_first_entry_of_container() {
        let info = MediaInfo {
            title: Some("search".into()),
            url: None,
            entries: Some(vec![single(Some("https://cdn/first")), single(Some("https://cdn/second"))]),
        };
        assert_eq!(select_stream(info).unwrap().url, "https://cdn/first");
    }

    #[test]
    fn select_stream_failures_are_distinct() {
        let empty = MediaInfo { entries: Some(vec![]), ..Default::default() };
        assert_eq!(select_stream(empty), Err(PlaybackError::NoEntries));
        assert_eq!(select_stream(single(None)), Err(PlaybackError::NoPlayableUrl));
        assert_eq!(select_stream(single(Some("  "))), Err(PlaybackError::NoPlayableUrl));
    }

    #[tokio::test]
    async fn play_on_hands_resolved_url_to_session() {
        let mut resolver = MockMediaResolver::new();
        resolver
            .expect_resolve()
            .with(eq("https://youtu.be/abc"))
            .times(1)
            .returning(|_| Ok(single(Some("https://cdn/audio"))));

        let mut session = MockVoiceSession::new();
        session
            .expect_play_stream()
            .with(eq("https://cdn/audio".to_string()))
            .times(1)
            .returning(|_| Ok(()));

        let service = PlaybackService::new(Arc::new(resolver));
        let stream = service.play_on(&session, "https://youtu.be/abc").await.unwrap();
        assert_eq!(stream.url, "https://cdn/audio");
    }

    #[tokio::test]
    async fn resolver_failure_never_reaches_session() {
        let mut resolver = MockMediaResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Err(PlaybackError::Resolver("exit status 1".into())));

        let mut session = MockVoiceSession::new();
        session.expect_play_stream().never();

        let service = PlaybackService::new(Arc::new(resolver));
        let err = service.play_on(&session, "x").await.unwrap_err();
        assert_eq!(err, PlaybackError::Resolver("exit status 1".into()));
    }

    #[tokio::test]
    async fn empty_search_result_is_no_entries() {
        let mut resolver = MockMediaResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Ok(MediaInfo { entries: Some(vec![]), ..Default::default() }));

        let mut session = MockVoiceSession::new();
        session.expect_play_stream().never();

        let service = PlaybackService::new(Arc::new(resolver));
        assert_eq!(service.play_on(&session, "x").await, Err(PlaybackError::NoEntries));
    }

    #[tokio::test]
    async fn transport_rejection_is_reported() {
        let mut resolver = MockMediaResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Ok(single(Some("https://cdn/audio"))));

        let mut session = MockVoiceSession::new();
        session
            .expect_play_stream()
            .returning(|_| Err(PlaybackError::Transport("not connected".into())));

        let service = PlaybackService::new(Arc::new(resolver));
        assert_eq!(
            service.play_on(&session, "x").await,
            Err(PlaybackError::Transport("not connected".into()))
        );
    }
}
