use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use songbird::Songbird;
use songbird::shards::TwilightMap;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use twilight_cache_inmemory::{InMemoryCache, ResourceType};
use twilight_gateway::{
    self as gateway,
    CloseFrame,
    Config,
    Event,
    EventTypeFlags,
    Intents,
    MessageSender,
    Shard,
    StreamExt,
};
use twilight_http::client::ClientBuilder;
use twilight_model::gateway::payload::incoming::Ready as ReadyPayload;

use crate::Error;
use crate::platforms::{ConnectionStatus, PlatformAuth, PlatformIntegration};
use crate::platforms::discord::SongbirdVoice;
use crate::services::discord::CommandContext;
use crate::services::discord::slashcommands::{handle_interaction_create, register_global_slash_commands};
use crate::services::{PlaybackService, SongService};

/// Only what slash commands and voice need: no message content, members or presences.
pub const INTENTS: Intents = Intents::GUILDS.union(Intents::GUILD_VOICE_STATES);

/// Runs one shard:
///   - updates the in-memory cache (voice states are read by `/play`)
///   - forwards voice events to songbird
///   - spawns a task per interaction so a slow resolver never stalls the shard.
async fn shard_runner(
    mut shard: Shard,
    cache: Arc<InMemoryCache>,
    songbird: Arc<Songbird>,
    ctx: CommandContext,
) {
    let shard_id = shard.id().number();
    info!("(ShardRunner) Shard {shard_id} started. Listening for events.");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(err) => {
                error!("Shard {shard_id} => error receiving event: {err:?}");
                continue;
            }
        };

        cache.update(&event);
        songbird.process(&event).await;

        match event {
            Event::Ready(ready) => {
                let data: &ReadyPayload = ready.as_ref();
                info!("Logged in as {} (ID={})", data.user.name, data.user.id);
            }
            Event::InteractionCreate(interaction_create) => {
                let interaction = interaction_create.0;
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_interaction_create(&ctx, &interaction).await {
                        error!("Interaction {} failed: {e}", interaction.id);
                    }
                });
            }
            other => {
                trace!("Shard {shard_id} => unhandled event: {:?}", other.kind());
            }
        }
    }

    warn!("(ShardRunner) Shard {shard_id} event loop ended.");
}

pub struct DiscordPlatform {
    pub token: String,
    pub connection_status: ConnectionStatus,

    songs: Arc<SongService>,
    playback: Arc<PlaybackService>,

    pub shard_tasks: Vec<JoinHandle<()>>,
    pub shard_senders: Vec<MessageSender>,
}

impl DiscordPlatform {
    pub fn new(token: String, songs: Arc<SongService>, playback: Arc<PlaybackService>) -> Self {
        Self {
            token,
            connection_status: ConnectionStatus::Disconnected,
            songs,
            playback,
            shard_tasks: Vec::new(),
            shard_senders: Vec::new(),
        }
    }
}

#[async_trait]
impl PlatformAuth for DiscordPlatform {
    async fn authenticate(&mut self) -> Result<(), Error> {
        if self.token.trim().is_empty() {
            return Err(Error::Auth("Discord token is empty".into()));
        }
        Ok(())
    }

    async fn is_authenticated(&self) -> Result<bool, Error> {
        Ok(!self.token.trim().is_empty())
    }
}

/// Connect: build the HTTP client, register slash commands, start the
/// recommended shards and attach songbird to them.
#[async_trait]
impl PlatformIntegration for DiscordPlatform {
    async fn connect(&mut self) -> Result<(), Error> {
        if matches!(self.connection_status, ConnectionStatus::Connected) {
            info!("(DiscordPlatform) Already connected => skipping");
            return Ok(());
        }
        self.authenticate().await?;

        let http_client = Arc::new(
            ClientBuilder::new()
                .token(self.token.clone())
                .timeout(Duration::from_secs(30))
                .build()
        );

        let application_id = http_client
            .current_user_application()
            .await
            .map_err(|e| Error::Platform(format!("Error fetching application: {e}")))?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing application: {e}")))?
            .id;
        let bot_user_id = http_client
            .current_user()
            .await
            .map_err(|e| Error::Platform(format!("Error fetching bot user: {e}")))?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing bot user: {e}")))?
            .id;

        register_global_slash_commands(&http_client, application_id).await?;
        info!("(DiscordPlatform) Registered slash commands for application {application_id}");

        let cache = Arc::new(
            InMemoryCache::builder()
                .resource_types(ResourceType::GUILD | ResourceType::CHANNEL | ResourceType::VOICE_STATE)
                .build()
        );

        let config = Config::new(self.token.clone(), INTENTS);
        let shards: Vec<Shard> = gateway::create_recommended(&http_client, config, |_, b| b.build())
            .await
            .map_err(|e| Error::Platform(format!("create_recommended error: {e}")))?
            .collect();

        let senders: HashMap<u32, MessageSender> = shards
            .iter()
            .map(|shard| (shard.id().number(), shard.sender()))
            .collect();
        let songbird = Arc::new(Songbird::twilight(Arc::new(TwilightMap::new(senders)), bot_user_id));

        let ctx = CommandContext {
            http: http_client.clone(),
            application_id,
            voice: Arc::new(SongbirdVoice::new(cache.clone(), songbird.clone())),
            songs: self.songs.clone(),
            playback: self.playback.clone(),
        };

        for shard in shards {
            self.shard_senders.push(shard.sender());
            debug!("(DiscordPlatform) Spawning shard {}", shard.id().number());

            let handle = tokio::spawn(shard_runner(
                shard,
                cache.clone(),
                songbird.clone(),
                ctx.clone(),
            ));
            self.shard_tasks.push(handle);
        }

        self.connection_status = ConnectionStatus::Connected;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), Error> {
        self.connection_status = ConnectionStatus::Disconnected;

        for sender in &self.shard_senders {
            let _ = sender.close(CloseFrame::NORMAL);
        }
        for task in &mut self.shard_tasks {
            if let Err(e) = task.await {
                warn!("(DiscordPlatform) Shard task ended abnormally: {e}");
            }
        }

        self.shard_senders.clear();
        self.shard_tasks.clear();

        Ok(())
    }

    async fn get_connection_status(&self) -> Result<ConnectionStatus, Error> {
        Ok(self.connection_status.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::playback::MockMediaResolver;
    use crate::test_utils::helpers::create_test_song_service;

    async fn platform(token: &str) -> (DiscordPlatform, tempfile::TempDir) {
        let (songs, dir) = create_test_song_service().await.unwrap();
        let playback = Arc::new(PlaybackService::new(Arc::new(MockMediaResolver::new())));
        (DiscordPlatform::new(token.to_string(), songs, playback), dir)
    }

    #[test]
    fn intents_exclude_privileged_ones() {
        assert!(INTENTS.contains(Intents::GUILDS));
        assert!(INTENTS.contains(Intents::GUILD_VOICE_STATES));
        assert!(!INTENTS.contains(Intents::MESSAGE_CONTENT));
        assert!(!INTENTS.contains(Intents::GUILD_MEMBERS));
        assert!(!INTENTS.contains(Intents::GUILD_PRESENCES));
    }

    #[tokio::test]
    async fn blank_token_fails_before_any_network_io() {
        let (mut discord, _dir) = platform("   ").await;
        assert!(!discord.is_authenticated().await.unwrap());
        assert!(matches!(discord.connect().await, Err(Error::Auth(_))));
        assert_eq!(
            discord.get_connection_status().await.unwrap(),
            ConnectionStatus::Disconnected
        );
    }

    #[tokio::test]
    async fn disconnect_without_connect_is_harmless() {
        let (mut discord, _dir) = platform("token").await;
        assert!(discord.is_authenticated().await.unwrap());
        discord.disconnect().await.unwrap();
        assert_eq!(
            discord.get_connection_status().await.unwrap(),
            ConnectionStatus::Disconnected
        );
    }
}
