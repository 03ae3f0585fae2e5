pub mod context;
pub mod slashcommands;

pub use context::CommandContext;
