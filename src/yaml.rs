//! YAML codec helper.
//!
//! Thin wrappers around `serde_yaml` with the one output format the generated
//! documents use: block style, 2-space indentation, no tags or anchors.
//! [`single_entry`] is the constructor used throughout the assembler to build
//! one-key nested mappings such as `{port: 0}`.

use std::io::{Read, Write};

use serde_yaml::{Mapping, Value};

/// Parse a YAML document into a mapping.
///
/// A null document yields an empty mapping. A document whose top level is
/// not a mapping is an error.
pub fn load<R: Read>(reader: R) -> Result<Mapping, serde_yaml::Error> {
    into_mapping(serde_yaml::from_reader(reader)?)
}

/// Like [`load`], from a string slice. Blank input yields an empty mapping.
pub fn from_str(content: &str) -> Result<Mapping, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }
    into_mapping(serde_yaml::from_str(content)?)
}

fn into_mapping(value: Value) -> Result<Mapping, serde_yaml::Error> {
    match value {
        Value::Null => Ok(Mapping::new()),
        other => serde_yaml::from_value(other),
    }
}

/// Serialize `document` to `writer`.
pub fn dump<W: Write>(document: &Mapping, writer: W) -> Result<(), serde_yaml::Error> {
    serde_yaml::to_writer(writer, document)
}

/// Serialize `document` to a string.
pub fn to_string(document: &Mapping) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(document)
}

/// Build a mapping holding exactly one entry.
pub fn single_entry<K: Into<Value>, V: Into<Value>>(key: K, value: V) -> Mapping {
    let mut map = Mapping::with_capacity(1);
    map.insert(key.into(), value.into());
    map
}

/// Look up a nested value by dotted path (`"server.http.port"`).
///
/// Each segment is matched as a string key. Keys that themselves contain dots
/// (such as `logback.rollingpolicy`) are reachable only as the final segment
/// of a path whose earlier segments contain no dots; use [`Mapping::get`]
/// directly for anything more exotic.
pub fn lookup<'a>(document: &'a Mapping, dotted_key: &str) -> Option<&'a Value> {
    if let Some(found) = document.get(dotted_key) {
        return Some(found);
    }
    let (head, rest) = dotted_key.split_once('.')?;
    match document.get(head)? {
        Value::Mapping(inner) => lookup(inner, rest),
        _ => None,
    }
}
