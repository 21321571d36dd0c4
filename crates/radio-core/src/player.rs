//! mpv playback engine.
//!
//! Each station gets a fresh `mpv` child with no stdio.  It stays in the
//! terminal's foreground process group, so Ctrl+C (and a closing terminal)
//! reach it as well as us; the controller still stops it explicitly.
//! Children are spawned with `kill_on_drop`, so a dropped session never leaks
//! a player.

use std::path::PathBuf;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::platform;

/// mpv's exit code for "quit due to a signal".
const MPV_EXIT_SIGNAL: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    /// A single audio stream, handed to mpv as-is.
    Stream,
    /// A `.pls` / `.m3u` playlist, handed to mpv via `--playlist=`.
    Playlist,
}

impl PlaybackMode {
    /// Classify by URL suffix.  Matching is case-sensitive.
    pub fn for_url(url: &str) -> Self {
        match url.rsplit_once('.') {
            Some((_, "pls" | "m3u")) => PlaybackMode::Playlist,
            _ => PlaybackMode::Stream,
        }
    }
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("mpv not found (install mpv, set MPV_PATH, or set player.binary in the settings)")]
    BinaryNotFound,
    #[error("failed to start {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("lost track of the player process: {0}")]
    Wait(#[source] std::io::Error),
}

/// How a player process ended on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerExit {
    Finished,
    Failed(Option<i32>),
    Signalled,
}

impl PlayerExit {
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if status.signal().is_some() {
                return PlayerExit::Signalled;
            }
        }
        match status.code() {
            Some(0) => PlayerExit::Finished,
            Some(MPV_EXIT_SIGNAL) => PlayerExit::Signalled,
            code => PlayerExit::Failed(code),
        }
    }
}

/// Something that can start playback of a URL.
pub trait Engine {
    type Session: Session;

    fn start(&mut self, url: &str, mode: PlaybackMode) -> Result<Self::Session, PlayerError>;
}

/// A running playback.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Resolves when the player exits by itself.
    async fn wait(&mut self) -> Result<PlayerExit, PlayerError>;

    /// Stop playback and reap the player.  Safe to call after it exited.
    async fn stop(&mut self);
}

pub struct MpvEngine {
    binary: Option<PathBuf>,
    volume: u8,
    extra_args: Vec<String>,
}

impl MpvEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.player.binary.clone(),
            volume: config.volume(),
            extra_args: config.player.extra_args.clone(),
        }
    }

    pub fn args(&self, url: &str, mode: PlaybackMode) -> Vec<String> {
        let mut args = vec![
            "--no-video".to_string(),
            "--really-quiet".to_string(),
            format!("--volume={}", self.volume),
        ];
        args.extend(self.extra_args.iter().cloned());
        match mode {
            PlaybackMode::Stream => args.push(url.to_string()),
            PlaybackMode::Playlist => args.push(format!("--playlist={}", url)),
        }
        args
    }
}

impl Engine for MpvEngine {
    type Session = MpvSession;

    fn start(&mut self, url: &str, mode: PlaybackMode) -> Result<MpvSession, PlayerError> {
        let binary = platform::find_mpv_binary(self.binary.as_deref())
            .ok_or(PlayerError::BinaryNotFound)?;
        let args = self.args(url, mode);
        debug!("mpv: {} {:?}", binary.display(), args);

        let mut cmd = Command::new(&binary);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|source| PlayerError::Spawn { binary, source })?;
        info!("mpv: started pid={:?} mode={:?} url={}", child.id(), mode, url);
        Ok(MpvSession { child })
    }
}

pub struct MpvSession {
    child: Child,
}

impl Session for MpvSession {
    async fn wait(&mut self) -> Result<PlayerExit, PlayerError> {
        let status = self.child.wait().await.map_err(PlayerError::Wait)?;
        debug!("mpv: exited with {}", status);
        Ok(PlayerExit::from_status(status))
    }

    async fn stop(&mut self) {
        if let Ok(Some(_)) = self.child.try_wait() {
            return;
        }
        if let Err(e) = self.child.kill().await {
            warn!("mpv: failed to stop player: {}", e);
        } else {
            info!("mpv: stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_by_suffix() {
        assert_eq!(PlaybackMode::for_url("http://x.com/list.pls"), PlaybackMode::Playlist);
        assert_eq!(PlaybackMode::for_url("http://x.com/list.m3u"), PlaybackMode::Playlist);
        assert_eq!(PlaybackMode::for_url("http://x.com/live.mp3"), PlaybackMode::Stream);
        assert_eq!(PlaybackMode::for_url("http://x.com/live"), PlaybackMode::Stream);
        assert_eq!(PlaybackMode::for_url("http://x.com/hls.m3u8"), PlaybackMode::Stream);
    }

    #[test]
    fn test_mode_is_case_sensitive() {
        assert_eq!(PlaybackMode::for_url("http://x.com/LIST.PLS"), PlaybackMode::Stream);
    }

    #[test]
    fn test_stream_args() {
        let engine = MpvEngine::new(&Config::default());
        let args = engine.args("http://x.com/a.mp3", PlaybackMode::Stream);
        assert_eq!(args.first().map(String::as_str), Some("--no-video"));
        assert!(args.contains(&"--volume=100".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("http://x.com/a.mp3"));
    }

    #[test]
    fn test_playlist_args_keep_extra_args_before_url() {
        let mut config = Config::default();
        config.player.extra_args = vec!["--cache=yes".to_string()];
        let engine = MpvEngine::new(&config);
        let args = engine.args("http://x.com/a.pls", PlaybackMode::Playlist);
        let n = args.len();
        assert_eq!(args[n - 2], "--cache=yes");
        assert_eq!(args[n - 1], "--playlist=http://x.com/a.pls");
    }

    #[test]
    fn test_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.player.binary = Some(dir.path().join("no-such-mpv"));
        let mut engine = MpvEngine::new(&config);
        let err = engine
            .start("http://x.com/a.mp3", PlaybackMode::Stream)
            .err()
            .unwrap();
        assert!(matches!(err, PlayerError::BinaryNotFound));
    }

    #[cfg(unix)]
    fn stand_in_mpv(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let script = dir.join(name);
        std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    // one test so the spawns never race each other's script writes
    #[cfg(unix)]
    #[tokio::test]
    async fn test_session_lifecycle_with_stand_in_binary() {
        let dir = tempfile::tempdir().unwrap();
        let long_running = stand_in_mpv(dir.path(), "mpv-sleep", "exec sleep 30");
        let failing = stand_in_mpv(dir.path(), "mpv-fail", "exit 2");

        let mut config = Config::default();
        config.player.binary = Some(long_running);
        let mut engine = MpvEngine::new(&config);
        let mut session = engine.start("http://x.com/a.mp3", PlaybackMode::Stream).unwrap();
        session.stop().await;
        assert_eq!(session.wait().await.unwrap(), PlayerExit::Signalled);
        // stopping twice is harmless
        session.stop().await;

        config.player.binary = Some(failing);
        let mut engine = MpvEngine::new(&config);
        let mut session = engine.start("http://x.com/a.pls", PlaybackMode::Playlist).unwrap();
        assert_eq!(session.wait().await.unwrap(), PlayerExit::Failed(Some(2)));
    }
}
