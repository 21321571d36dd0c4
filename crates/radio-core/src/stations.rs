//! Station file loader.
//!
//! The station file is plain text.  Every line that starts with `http` is a
//! stream URL; if the line right above it starts with `#`, the rest of that
//! comment (after the marker and one delimiter) names the station:
//!
//! ```text
//! # Jazz FM
//! http://example.com/jazz.mp3
//! http://example.com/unlabeled.mp3
//! ```
//!
//! Everything else is ignored, so the file can carry free-form notes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::platform;
use crate::station::Station;

/// File name looked up beside the executable when nothing else is configured.
pub const DEFAULT_STATIONS_FILE: &str = "config.txt";

/// Environment override for the station file path.
pub const STATIONS_ENV: &str = "RADIO_STATIONS";

#[derive(Debug, Error)]
pub enum StationsError {
    #[error("station file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read station file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn parse_stations(path: &Path) -> Result<Vec<Station>, StationsError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            StationsError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StationsError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let stations = parse_stations_from_str(&content);
    debug!("loaded {} stations from {:?}", stations.len(), path);
    Ok(stations)
}

pub fn parse_stations_from_str(content: &str) -> Vec<Station> {
    let mut stations = Vec::new();
    let mut prev: Option<&str> = None;

    for line in content.lines() {
        if line.starts_with("http") {
            let url = line.trim_end().to_string();
            let name = prev.and_then(annotation).unwrap_or_else(|| url.clone());
            stations.push(Station { name, url });
        }
        prev = Some(line);
    }

    stations
}

/// Name carried by a `# Name` line, if any.
fn annotation(line: &str) -> Option<String> {
    if !line.starts_with('#') {
        return None;
    }
    let rest = line
        .char_indices()
        .nth(2)
        .map(|(idx, _)| &line[idx..])
        .unwrap_or("");
    let name = rest.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Station file location: `RADIO_STATIONS`, then the `stations_file`
/// setting, then `config.txt` beside the executable.
pub fn stations_path(config: &Config) -> PathBuf {
    resolve_stations_path(
        std::env::var_os(STATIONS_ENV),
        config.stations_file.as_deref(),
        &platform::program_dir(),
    )
}

pub fn resolve_stations_path(
    env_override: Option<OsString>,
    configured: Option<&Path>,
    program_dir: &Path,
) -> PathBuf {
    if let Some(p) = env_override.filter(|p| !p.is_empty()) {
        return PathBuf::from(p);
    }
    match configured {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => program_dir.join(p),
        None => program_dir.join(DEFAULT_STATIONS_FILE),
    }
}
