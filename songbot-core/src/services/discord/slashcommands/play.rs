// File: songbot-core/src/services/discord/slashcommands/play.rs

use tracing::{error, info, warn};
use twilight_model::{
    application::command::{CommandOptionChoice, CommandOptionChoiceValue, CommandType},
    application::interaction::Interaction,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::marker::{GuildMarker, UserMarker},
    id::Id,
};
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use crate::Error;
use crate::services::discord::context::{CommandContext, GuildVoice};
use crate::services::playback::PlaybackService;
use crate::services::song_service::SongService;
use super::replies;

pub const QUERY_OPTION: &str = "query";

/// Create a CommandBuilder for `/play query:<text>` with autocomplete on `query`.
pub fn create_play_command() -> CommandBuilder {
    CommandBuilder::new(
        "play",
        "Play a song by name or artist",
        CommandType::ChatInput,
    )
        .option(
            StringBuilder::new(QUERY_OPTION, "Song title or artist")
                .required(true)
                .autocomplete(true),
        )
}

/// Handle an incoming `/play`. Acknowledges with a deferred response first,
/// since resolving the stream can take a while, then sends the outcome as a
/// follow-up. Failures become a reply; they never escape to the shard loop.
pub async fn handle_play_interaction(
    ctx: &CommandContext,
    interaction: &Interaction,
    query: &str,
) -> Result<(), Error> {
    ctx.http
        .interaction(ctx.application_id)
        .create_response(
            interaction.id,
            &interaction.token,
            &InteractionResponse {
                kind: InteractionResponseType::DeferredChannelMessageWithSource,
                data: None,
            },
        )
        .await
        .map_err(|e| Error::Platform(format!("Error deferring `/play`: {e}")))?;

    let reply = match play_reply(
        &ctx.songs,
        &ctx.playback,
        ctx.voice.as_ref(),
        interaction.guild_id,
        interaction.author_id(),
        query,
    )
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            error!("`/play {query}` failed: {e}");
            replies::internal_error(&e)
        }
    };

    ctx.http
        .interaction(ctx.application_id)
        .create_followup(&interaction.token)
        .content(&reply)
        .await
        .map_err(|e| Error::Platform(format!("Error sending `/play` follow-up: {e}")))?;

    Ok(())
}

/// The text `/play` answers with. Playback failures are part of the reply;
/// `Err` is left for storage and voice-join failures.
pub(crate) async fn play_reply(
    songs: &SongService,
    playback: &PlaybackService,
    voice: &dyn GuildVoice,
    guild_id: Option<Id<GuildMarker>>,
    user_id: Option<Id<UserMarker>>,
    query: &str,
) -> Result<String, Error> {
    let Some(song) = songs.resolve(query).await? else {
        return Ok(replies::not_found(query));
    };

    let (Some(guild_id), Some(user_id)) = (guild_id, user_id) else {
        return Ok(replies::GUILD_ONLY.to_string());
    };

    let Some(channel_id) = voice.user_channel(guild_id, user_id) else {
        return Ok(replies::NOT_IN_VOICE.to_string());
    };

    let session = voice.join(guild_id, channel_id).await?;
    match playback.play_on(session.as_ref(), &song.url).await {
        Ok(_) => {
            info!("Guild {guild_id}: playing song id={} '{}'", song.id, song.display_name());
            Ok(replies::now_playing(&song))
        }
        Err(e) => {
            warn!("Guild {guild_id}: could not play song id={}: {e}", song.id);
            Ok(replies::play_failed(&song, e))
        }
    }
}

/// Autocomplete choices with name and value both set to the suggestion.
/// Suggestions over Discord's length cap are left out, since a cut value
/// would no longer resolve.
pub fn autocomplete_choices(suggestions: &[String]) -> Vec<CommandOptionChoice> {
    suggestions
        .iter()
        .filter(|s| s.chars().count() <= replies::MAX_CHOICE_LEN)
        .map(|s| CommandOptionChoice {
            name: s.clone(),
            name_localizations: None,
            value: CommandOptionChoiceValue::String(s.clone()),
        })
        .collect()
}

/// Answer an autocomplete request for `query` with up to ten catalog matches.
pub async fn handle_play_autocomplete(
    ctx: &CommandContext,
    interaction: &Interaction,
    partial: &str,
) -> Result<(), Error> {
    let suggestions = ctx.songs.suggestions(partial).await.unwrap_or_else(|e| {
        warn!("Autocomplete lookup for '{partial}' failed: {e}");
        Vec::new()
    });

    let choices = autocomplete_choices(&suggestions);

    ctx.http
        .interaction(ctx.application_id)
        .create_response(
            interaction.id,
            &interaction.token,
            &InteractionResponse {
                kind: InteractionResponseType::ApplicationCommandAutocompleteResult,
                data: Some(InteractionResponseData {
                    choices: Some(choices),
                    ..Default::default()
                }),
            },
        )
        .await
        .map_err(|e| Error::Platform(format!("Error answering `/play` autocomplete: {e}")))?;

    Ok(())
}
