//! Profile file discovery.
//!
//! An explicit path always wins. Otherwise the first existing file among
//! [`candidate_paths`] is used: `./runnerconf.toml`, then
//! `<platform config dir>/runnerconf.toml` (e.g. `~/.config/runnerconf/` on
//! Linux). Finding nothing is not an error; the profile then resolves from
//! defaults, env vars and overrides alone.

use std::path::{Path, PathBuf};

use crate::error::RunnerconfError;

pub const PROFILE_FILE_NAME: &str = "runnerconf.toml";

/// Implicit profile locations, highest priority first.
pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(PROFILE_FILE_NAME));
    }
    if let Some(proj) = directories::ProjectDirs::from("", "", "runnerconf") {
        paths.push(proj.config_dir().join(PROFILE_FILE_NAME));
    }
    paths
}

/// Pick the profile file to use, if any.
pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    locate_in(explicit, &candidate_paths())
}

fn locate_in(explicit: Option<&Path>, candidates: &[PathBuf]) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    candidates.iter().find(|p| p.is_file()).cloned()
}

/// Locate and read the profile file. A missing explicit file is an error; a
/// missing implicit one just means "no file layer".
pub fn read_profile(explicit: Option<&Path>) -> Result<Option<(PathBuf, String)>, RunnerconfError> {
    let Some(path) = locate(explicit) else {
        return Ok(None);
    };
    let content = std::fs::read_to_string(&path).map_err(|e| RunnerconfError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(Some((path, content)))
}
