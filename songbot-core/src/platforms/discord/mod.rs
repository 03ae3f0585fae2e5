pub mod runtime;
pub mod voice;

pub use runtime::DiscordPlatform;
pub use voice::{SongbirdSession, SongbirdVoice};
