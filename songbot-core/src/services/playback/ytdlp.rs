// File: songbot-core/src/services/playback/ytdlp.rs

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use songbot_common::error::PlaybackError;

use super::{MediaInfo, MediaResolver};

/// Resolves sources by running the `yt-dlp` program and reading its JSON dump.
/// Plain text that is not a URL is treated as a search.
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    program: PathBuf,
}

impl YtDlpResolver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    pub fn args(source_url: &str) -> Vec<String> {
        [
            "--dump-single-json",
            "--no-warnings",
            "--quiet",
            "--format",
            "bestaudio/best",
            "--default-search",
            "ytsearch",
            "--playlist-items",
            "1",
            "--",
            source_url,
        ]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

pub fn parse_media_info(stdout: &[u8]) -> Result<MediaInfo, PlaybackError> {
    serde_json::from_slice(stdout)
        .map_err(|e| PlaybackError::Resolver(format!("unreadable yt-dlp output: {e}")))
}

#[async_trait]
impl MediaResolver for YtDlpResolver {
    async fn resolve(&self, source_url: &str) -> Result<MediaInfo, PlaybackError> {
        debug!("Running {} for {source_url}", self.program.display());

        let output = Command::new(&self.program)
            .args(Self::args(source_url))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                PlaybackError::Resolver(format!("failed to run {}: {e}", self.program.display()))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr.lines().last().unwrap_or("").trim().to_string();
            warn!("yt-dlp failed for {source_url} ({}): {reason}", output.status);
            return Err(PlaybackError::Resolver(format!("yt-dlp exited with {}: {reason}", output.status)));
        }

        parse_media_info(&output.stdout)
    }
}
