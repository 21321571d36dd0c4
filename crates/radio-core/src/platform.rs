use std::path::{Path, PathBuf};

/// Environment override for the mpv binary.
pub const MPV_ENV: &str = "MPV_PATH";

/// Directory holding the running executable.  The default station file lives
/// here.
pub fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn data_dir() -> PathBuf {
    // XDG layout on macOS too, for consistency with Linux
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(".local")
            .join("share")
            .join("radio")
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("radio")
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("radio")
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("radio")
    }
}

#[cfg(unix)]
pub fn mpv_binary_name() -> &'static str {
    "mpv"
}

#[cfg(windows)]
pub fn mpv_binary_name() -> &'static str {
    "mpv.exe"
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|p| p.is_file())
}

/// Find the mpv binary.
///
/// Checks, in order: the configured path, `MPV_PATH`, beside the current
/// exe, then `PATH`.
pub fn find_mpv_binary(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = configured {
        if p.is_file() {
            return Some(p.to_path_buf());
        }
        // bare names like "mpv-nightly" are looked up on PATH
        if p.components().count() == 1 {
            return find_on_path(&p.to_string_lossy());
        }
        return None;
    }

    if let Some(p) = std::env::var_os(MPV_ENV) {
        let path = PathBuf::from(p);
        if path.is_file() {
            return Some(path);
        }
    }

    let beside = program_dir().join(mpv_binary_name());
    if beside.is_file() {
        return Some(beside);
    }

    find_on_path(mpv_binary_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_end_in_radio() {
        assert!(config_dir().ends_with("radio"));
        assert!(data_dir().ends_with("radio"));
    }

    #[test]
    fn test_configured_binary_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("mpv");
        assert_eq!(find_mpv_binary(Some(&missing)), None);

        std::fs::write(&missing, b"").unwrap();
        assert_eq!(find_mpv_binary(Some(&missing)), Some(missing));
    }
}
