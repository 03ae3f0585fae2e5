// src/repositories/sqlite/mod.rs

pub mod songs;

pub use songs::SqliteSongRepository;
