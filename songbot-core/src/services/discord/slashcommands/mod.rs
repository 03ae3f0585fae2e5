// File: songbot-core/src/services/discord/slashcommands/mod.rs

pub mod addsong;
pub mod play;
pub mod replies;

use std::sync::Arc;

use tracing::{debug, trace};
use twilight_http::Client as HttpClient;
use twilight_model::{
    application::interaction::{
        application_command::{CommandDataOption, CommandOptionValue},
        Interaction, InteractionData, InteractionType,
    },
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::marker::ApplicationMarker,
    id::Id,
};

use crate::Error;
use crate::services::discord::context::CommandContext;
use addsong::{create_addsong_command, handle_addsong_interaction};
use play::{create_play_command, handle_play_autocomplete, handle_play_interaction, QUERY_OPTION};

pub async fn register_global_slash_commands(
    http: &Arc<HttpClient>,
    application_id: Id<ApplicationMarker>,
) -> Result<(), Error> {
    let commands = [
        create_play_command().build(),
        create_addsong_command().build(),
    ];

    http.interaction(application_id)
        .set_global_commands(&commands)
        .await
        .map_err(|e| Error::Platform(format!("Failed to register global slash commands: {e}")))?;

    Ok(())
}

/// The string value of option `name`, if the user supplied one.
pub fn string_option<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a str> {
    options.iter().find(|o| o.name == name).and_then(|o| match &o.value {
        CommandOptionValue::String(s) => Some(s.as_str()),
        _ => None,
    })
}

/// The partial text of option `name` while the user is still typing it.
pub fn focused_option<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a str> {
    options.iter().find(|o| o.name == name).and_then(|o| match &o.value {
        CommandOptionValue::Focused(s, _) => Some(s.as_str()),
        _ => None,
    })
}

/// Dispatch slash commands and autocomplete requests from an `InteractionCreate`.
pub async fn handle_interaction_create(
    ctx: &CommandContext,
    interaction: &Interaction,
) -> Result<(), Error> {
    let Some(InteractionData::ApplicationCommand(cmd_data)) = &interaction.data else {
        trace!("Ignoring interaction {} of kind {:?}", interaction.id, interaction.kind);
        return Ok(());
    };
    let name = cmd_data.name.as_str();
    let options = cmd_data.options.as_slice();

    match (interaction.kind, name) {
        (InteractionType::ApplicationCommandAutocomplete, "play") => {
            let partial = focused_option(options, QUERY_OPTION).unwrap_or_default();
            handle_play_autocomplete(ctx, interaction, partial).await
        }
        (InteractionType::ApplicationCommand, "play") => {
            let query = string_option(options, QUERY_OPTION).unwrap_or_default();
            handle_play_interaction(ctx, interaction, query).await
        }
        (InteractionType::ApplicationCommand, "addsong") => {
            let title = string_option(options, "title").unwrap_or_default();
            let artist = string_option(options, "artist").unwrap_or_default();
            let url = string_option(options, "url").unwrap_or_default();
            handle_addsong_interaction(ctx, interaction, title, artist, url).await
        }
        (InteractionType::ApplicationCommand, other) => {
            debug!("Unrecognized slash command `/{other}`");
            ctx.http
                .interaction(ctx.application_id)
                .create_response(
                    interaction.id,
                    &interaction.token,
                    &InteractionResponse {
                        kind: InteractionResponseType::ChannelMessageWithSource,
                        data: Some(InteractionResponseData {
                            content: Some(replies::unrecognized(other)),
                            ..Default::default()
                        }),
                    },
                )
                .await
                .ok(); // ignore error
            Ok(())
        }
        (kind, other) => {
            trace!("Ignoring {kind:?} for `/{other}`");
            Ok(())
        }
    }
}
