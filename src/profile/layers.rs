//! Profile resolution: merge the file, env and override layers and let
//! confique fill defaults.
//!
//! Everything here works on pre-loaded data ([`ProfileSources`]); reading
//! the file and the process environment is the caller's job, so the whole
//! pipeline is testable with synthetic inputs.

use std::path::{Path, PathBuf};

use confique::Config;
use toml::{Table, Value};

use super::RunnerProfile;
use crate::error::RunnerconfError;
use crate::merge::merge_tables;

/// Prefix for environment overrides: `RUNNERCONF__SSL_PORT`,
/// `RUNNERCONF__DATABASE__HOST`.
pub const ENV_PREFIX: &str = "RUNNERCONF";

type ProfileLayer = <RunnerProfile as Config>::Layer;

/// All inputs needed to resolve a [`RunnerProfile`]. No I/O happens during
/// resolution.
#[derive(Debug, Clone)]
pub struct ProfileSources {
    /// Profile file path and contents.
    pub file: Option<(PathBuf, String)>,
    /// Raw environment pairs (`std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// `None` disables the env layer.
    pub env_prefix: Option<String>,
    /// `(dotted_key, value)` pairs applied last.
    pub overrides: Vec<(String, Value)>,
    /// Reject keys in the profile file that the schema doesn't know.
    pub strict: bool,
}

impl Default for ProfileSources {
    fn default() -> Self {
        Self {
            file: None,
            env_vars: Vec::new(),
            env_prefix: Some(ENV_PREFIX.to_string()),
            overrides: Vec::new(),
            strict: true,
        }
    }
}

/// Resolve a profile from its layers.
pub fn resolve(sources: ProfileSources) -> Result<RunnerProfile, RunnerconfError> {
    let mut merged = Table::new();

    if let Some((path, content)) = &sources.file {
        if sources.strict {
            check_unknown_keys(content, path)?;
        }
        let table: Table =
            toml::from_str(content).map_err(|e| RunnerconfError::ProfileParseError {
                path: path.clone(),
                source: e,
            })?;
        merged = merge_tables(merged, table);
    }

    if let Some(prefix) = &sources.env_prefix {
        merged = merge_tables(merged, env_layer(prefix, &sources.env_vars));
    }

    if !sources.overrides.is_empty() {
        merged = merge_tables(merged, override_layer(&sources.overrides)?);
    }

    let layer: ProfileLayer =
        Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| RunnerconfError::InvalidValue {
                key: "<profile>".into(),
                reason: e.message().to_string(),
            })?;

    Ok(RunnerProfile::builder().preloaded(layer).load()?)
}

/// Collect `{prefix}__*` variables into a nested table.
///
/// `__` separates nesting levels and segments are lowercased, so
/// `RUNNERCONF__DATABASE__DDL_AUTO` lands on `database.ddl_auto`. `true` and
/// `false` (any case) become booleans; every other value stays text, which
/// keeps numeric-looking passwords and ports intact.
pub(crate) fn env_layer(prefix: &str, vars: &[(String, String)]) -> Table {
    let needle = format!("{prefix}__");
    let mut table = Table::new();

    for (key, raw) in vars {
        let Some(rest) = key.strip_prefix(&needle) else {
            continue;
        };
        let path: Vec<String> = rest.split("__").map(str::to_lowercase).collect();
        if path.iter().any(String::is_empty) {
            continue;
        }
        let value = match raw.to_ascii_lowercase().as_str() {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => Value::String(raw.clone()),
        };
        // Env keys are generated from our own schema; a clash between a
        // leaf and a section is dropped rather than reported.
        let _ = insert_path(&mut table, &path, value);
    }
    table
}

/// Expand dotted-key overrides into a nested table. Later entries win.
pub(crate) fn override_layer(entries: &[(String, Value)]) -> Result<Table, RunnerconfError> {
    let mut table = Table::new();
    for (dotted, value) in entries {
        let path: Vec<String> = dotted.split('.').map(str::to_string).collect();
        insert_path(&mut table, &path, value.clone()).map_err(|()| {
            RunnerconfError::InvalidValue {
                key: dotted.clone(),
                reason: "conflicts with a non-section value".into(),
            }
        })?;
    }
    Ok(table)
}

fn insert_path(table: &mut Table, path: &[String], value: Value) -> Result<(), ()> {
    let Some((leaf, sections)) = path.split_last() else {
        return Err(());
    };
    let mut current = table;
    for section in sections {
        current = current
            .entry(section.as_str())
            .or_insert_with(|| Value::Table(Table::new()))
            .as_table_mut()
            .ok_or(())?;
    }
    current.insert(leaf.clone(), value);
    Ok(())
}

/// Fail with every key in `content` that the profile schema doesn't consume.
fn check_unknown_keys(content: &str, path: &Path) -> Result<(), RunnerconfError> {
    let mut unknown: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: ProfileLayer = serde_ignored::deserialize(deserializer, |ignored| {
        unknown.push(ignored.to_string());
    })
    .map_err(|e| RunnerconfError::ProfileParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    match unknown.len() {
        0 => Ok(()),
        1 => Err(RunnerconfError::UnknownKey {
            key: unknown.remove(0),
            path: path.to_path_buf(),
        }),
        _ => Err(RunnerconfError::UnknownKeys(
            unknown
                .into_iter()
                .map(|key| RunnerconfError::UnknownKey {
                    key,
                    path: path.to_path_buf(),
                })
                .collect(),
        )),
    }
}
