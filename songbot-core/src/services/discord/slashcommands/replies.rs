// File: songbot-core/src/services/discord/slashcommands/replies.rs
//! User-facing reply texts for the slash commands.

use std::fmt::Display;

use songbot_common::models::song::Song;

pub const NOT_IN_VOICE: &str = "You are not in a voice channel.";
pub const GUILD_ONLY: &str = "This command only works in a server.";

/// Discord caps autocomplete choice names and values at 100 characters.
pub const MAX_CHOICE_LEN: usize = 100;

pub fn not_found(query: &str) -> String {
    format!("No song found for '{query}'.")
}

pub fn now_playing(song: &Song) -> String {
    format!(
        "Now playing: **{}** by **{}**",
        song.title,
        song.artist_or_unknown()
    )
}

pub fn play_failed(song: &Song, reason: impl Display) -> String {
    format!("Could not play **{}**: {reason}", song.title)
}

pub fn song_added(title: &str, artist: &str) -> String {
    format!("Added **{title}** by **{artist}** to the song database.")
}

pub fn internal_error(reason: impl Display) -> String {
    format!("Something went wrong: {reason}")
}

pub fn unrecognized(name: &str) -> String {
    format!("Unrecognized command: {name}")
}
