use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use songbot_core::Database;
use songbot_core::Error;
use songbot_core::platforms::PlatformIntegration;
use songbot_core::platforms::discord::DiscordPlatform;
use songbot_core::repositories::SqliteSongRepository;
use songbot_core::services::playback::YtDlpResolver;
use songbot_core::services::{PlaybackService, SongService};

#[derive(Parser, Debug, Clone)]
#[command(name = "songbot")]
#[command(author, version, about = "SongBot - plays songs from a small catalog in Discord voice channels")]
struct Args {
    /// Discord bot token.
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    discord_token: String,

    /// Path to the SQLite song database (created if missing).
    #[arg(long, env = "SONGBOT_DB_PATH", default_value = "songs.db")]
    db_path: PathBuf,

    /// yt-dlp executable used to resolve audio streams.
    #[arg(long, env = "SONGBOT_YT_DLP", default_value = "yt-dlp")]
    yt_dlp_path: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("songbot=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!("SongBot starting. db_path={}, yt_dlp={}", args.db_path.display(), args.yt_dlp_path.display());

    if let Err(e) = run(args).await {
        error!("SongBot error: {e}");
        return Err(e.into());
    }
    info!("Main finished. Goodbye!");
    Ok(())
}

async fn run(args: Args) -> Result<(), Error> {
    let db = Database::new(&args.db_path).await?;
    db.migrate().await?;

    let songs = Arc::new(SongService::new(Arc::new(SqliteSongRepository::new(db))));
    let playback = Arc::new(PlaybackService::new(Arc::new(YtDlpResolver::new(args.yt_dlp_path))));

    let mut discord = DiscordPlatform::new(args.discord_token, songs, playback);
    discord.connect().await?;
    info!("Connected to Discord. Press Ctrl-C to stop.");

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C detected; shutting down...");
    discord.disconnect().await?;
    Ok(())
}
