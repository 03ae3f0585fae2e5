//! voice.rs
//!
//! Songbird-backed voice sessions. One `Call` per guild is owned by the
//! `Songbird` manager; a `SongbirdSession` borrows it for one `/play`.

use std::sync::Arc;

use async_trait::async_trait;
use songbird::input::HttpRequest;
use songbird::{Call, Songbird};
use tokio::sync::Mutex;
use tracing::debug;
use twilight_cache_inmemory::InMemoryCache;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, UserMarker};

use songbot_common::error::PlaybackError;

use crate::Error;
use crate::services::discord::context::GuildVoice;
use crate::services::playback::VoiceSession;

/// [`GuildVoice`] over the gateway cache's voice states and the songbird manager.
pub struct SongbirdVoice {
    cache: Arc<InMemoryCache>,
    songbird: Arc<Songbird>,
    /// Client used by the voice driver to fetch audio streams.
    stream_client: reqwest::Client,
}

impl SongbirdVoice {
    pub fn new(cache: Arc<InMemoryCache>, songbird: Arc<Songbird>) -> Self {
        Self {
            cache,
            songbird,
            stream_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl GuildVoice for SongbirdVoice {
    fn user_channel(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> Option<Id<ChannelMarker>> {
        self.cache
            .voice_state(user_id, guild_id)
            .map(|state| state.channel_id())
    }

    async fn join(
        &self,
        guild_id: Id<GuildMarker>,
        channel_id: Id<ChannelMarker>,
    ) -> Result<Box<dyn VoiceSession>, Error> {
        let call = self
            .songbird
            .join(guild_id, channel_id)
            .await
            .map_err(|e| Error::Voice(format!("could not join voice channel {channel_id}: {e}")))?;
        Ok(Box::new(SongbirdSession::new(call, self.stream_client.clone())))
    }
}

pub struct SongbirdSession {
    call: Arc<Mutex<Call>>,
    http: reqwest::Client,
}

impl SongbirdSession {
    pub fn new(call: Arc<Mutex<Call>>, http: reqwest::Client) -> Self {
        Self { call, http }
    }
}

#[async_trait]
impl VoiceSession for SongbirdSession {
    async fn play_stream(&self, stream_url: String) -> Result<(), PlaybackError> {
        let input = HttpRequest::new(self.http.clone(), stream_url);

        // Stop and start under one lock so two /play calls on the same guild
        // cannot interleave.
        let handle = {
            let mut call = self.call.lock().await;
            if call.current_connection().is_none() {
                return Err(PlaybackError::Transport("not connected to a voice channel".into()));
            }
            call.stop();
            call.play_only_input(input.into())
        };

        handle
            .make_playable_async()
            .await
            .map_err(|e| PlaybackError::Transport(e.to_string()))?;
        debug!("Track {} is playable", handle.uuid());
        Ok(())
    }
}
