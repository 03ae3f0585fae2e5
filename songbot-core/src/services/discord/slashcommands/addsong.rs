// File: songbot-core/src/services/discord/slashcommands/addsong.rs

use tracing::{error, info};
use twilight_model::{
    application::command::CommandType,
    application::interaction::Interaction,
    channel::message::MessageFlags,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
};
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use songbot_common::models::song::NewSong;

use crate::Error;
use crate::services::discord::context::CommandContext;
use super::replies;

pub fn create_addsong_command() -> CommandBuilder {
    CommandBuilder::new(
        "addsong",
        "Add a new song to the database",
        CommandType::ChatInput,
    )
        .option(StringBuilder::new("title", "Song title").required(true))
        .option(StringBuilder::new("artist", "Artist").required(true))
        .option(StringBuilder::new("url", "YouTube or direct audio URL").required(true))
}

/// Handle `/addsong`. The acknowledgment is ephemeral.
pub async fn handle_addsong_interaction(
    ctx: &CommandContext,
    interaction: &Interaction,
    title: &str,
    artist: &str,
    url: &str,
) -> Result<(), Error> {
    let content = match ctx.songs.add_song(NewSong::new(title, Some(artist), url)).await {
        Ok(song) => {
            info!("Added song id={} '{}'", song.id, song.display_name());
            replies::song_added(&song.title, song.artist_or_unknown())
        }
        Err(Error::InvalidInput(reason)) => format!("Could not add song: {reason}"),
        Err(e) => {
            error!("`/addsong` failed: {e}");
            replies::internal_error(&e)
        }
    };

    ctx.http
        .interaction(ctx.application_id)
        .create_response(
            interaction.id,
            &interaction.token,
            &InteractionResponse {
                kind: InteractionResponseType::ChannelMessageWithSource,
                data: Some(InteractionResponseData {
                    content: Some(content),
                    flags: Some(MessageFlags::EPHEMERAL),
                    ..Default::default()
                }),
            },
        )
        .await
        .map_err(|e| Error::Platform(format!("Error responding to `/addsong`: {e}")))?;

    Ok(())
}
