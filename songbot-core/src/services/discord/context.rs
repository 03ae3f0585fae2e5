// File: songbot-core/src/services/discord/context.rs

use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::Client as HttpClient;
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker, GuildMarker, UserMarker};

use crate::Error;
use crate::services::playback::{PlaybackService, VoiceSession};
use crate::services::song_service::SongService;

/// Voice state of the guilds the bot is in: where users are, and joining them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuildVoice: Send + Sync {
    /// The voice channel `user_id` is currently in within `guild_id`.
    fn user_channel(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> Option<Id<ChannelMarker>>;

    /// Join `channel_id`, or move there if already connected elsewhere in the guild.
    async fn join(
        &self,
        guild_id: Id<GuildMarker>,
        channel_id: Id<ChannelMarker>,
    ) -> Result<Box<dyn VoiceSession>, Error>;
}

/// Everything a slash command handler needs, shared by all shards.
#[derive(Clone)]
pub struct CommandContext {
    pub http: Arc<HttpClient>,
    pub application_id: Id<ApplicationMarker>,
    pub voice: Arc<dyn GuildVoice>,
    pub songs: Arc<SongService>,
    pub playback: Arc<PlaybackService>,
}
