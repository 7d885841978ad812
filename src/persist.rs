//! Output file handling: clear the target, create its directory, write YAML.
//!
//! The old file is removed before the new one is written. There is no atomic
//! replace, so a failure between the two steps leaves no file at the target.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_yaml::Mapping;

use crate::error::RunnerconfError;
use crate::yaml;

/// Directory the target lives in. Empty for a bare file name.
pub fn target_dir(target: &Path) -> PathBuf {
    target.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Remove any existing file at `target` and create its parent directories.
pub fn prepare_target(target: &Path) -> Result<(), RunnerconfError> {
    match fs::remove_file(target) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(RunnerconfError::RemoveError {
                path: target.to_path_buf(),
                source: e,
            });
        }
    }

    let dir = target_dir(target);
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(&dir).map_err(|e| RunnerconfError::CreateDirError {
            path: dir.clone(),
            source: e,
        })?;
    }
    Ok(())
}

/// Serialize `document` and write it to `target`.
pub fn write_document(target: &Path, document: &Mapping) -> Result<(), RunnerconfError> {
    let write_err = |e| RunnerconfError::WriteError {
        path: target.to_path_buf(),
        source: e,
    };

    let text = yaml::to_string(document).map_err(RunnerconfError::SerializeError)?;
    let file = fs::File::create(target).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    out.write_all(text.as_bytes()).map_err(write_err)?;
    out.flush().map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::single_entry;
    use tempfile::TempDir;

    #[test]
    fn target_dir_of_bare_name_is_empty() {
        assert_eq!(target_dir(Path::new("app.yml")), PathBuf::new());
        assert_eq!(target_dir(Path::new("conf/app.yml")), PathBuf::from("conf"));
    }

    #[test]
    fn prepare_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a").join("b").join("application.yml");
        prepare_target(&target).unwrap();
        assert!(target.parent().unwrap().is_dir());
        assert!(!target.exists());
    }

    #[test]
    fn prepare_removes_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("application.yml");
        fs::write(&target, "stale: true\n").unwrap();
        prepare_target(&target).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn prepare_fails_when_target_is_a_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("application.yml");
        fs::create_dir(&target).unwrap();
        let err = prepare_target(&target).unwrap_err();
        assert!(matches!(err, RunnerconfError::RemoveError { .. }));
    }

    #[test]
    fn prepare_fails_when_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let err = prepare_target(&blocker.join("application.yml")).unwrap_err();
        assert!(matches!(
            err,
            RunnerconfError::RemoveError { .. } | RunnerconfError::CreateDirError { .. }
        ));
    }

    #[test]
    fn write_document_writes_yaml() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("application.yml");
        write_document(&target, &single_entry("answer", 42)).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "answer: 42\n");
    }
}
