// src/lib.rs

pub mod db;
pub mod repositories;
pub mod platforms;
pub mod services;
pub mod test_utils;

pub use db::Database;
pub use songbot_common::error::Error;
