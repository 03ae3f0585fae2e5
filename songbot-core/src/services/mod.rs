// File: src/services/mod.rs

pub mod discord;
pub mod playback;
pub mod song_service;

pub use playback::PlaybackService;
pub use song_service::SongService;
