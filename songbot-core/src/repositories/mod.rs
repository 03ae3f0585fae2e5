// src/repositories/mod.rs

pub use songbot_common::traits::repository_traits::{SongRepository, SUGGESTION_LIMIT};

pub use sqlite::SqliteSongRepository;

pub mod sqlite;
