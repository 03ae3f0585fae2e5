// File: songbot-common/src/models/mod.rs
pub mod song;

pub use song::{NewSong, Song};
