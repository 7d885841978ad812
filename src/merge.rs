//! Merging the generated document with an overlay, and merging profile layers.
//!
//! Two strategies apply to YAML documents:
//!
//! - **Shallow** ([`merge_sections`]): sections (top-level keys) present on
//!   both sides are unioned one level deep. Overlay entries are layered after
//!   generated ones, so the overlay wins on a shared sub-key and replaces that
//!   sub-key's value whole.
//! - **Deep** ([`deep_merge`]): mappings are unioned at every depth.
//!
//! In both, a conflict where either side is not a mapping resolves to the
//! overlay value. Keys present on one side only pass through unchanged.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// How an overlay document is layered over the generated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    #[default]
    Shallow,
    Deep,
}

impl MergeMode {
    pub fn apply(self, base: Mapping, overlay: Mapping) -> Mapping {
        match self {
            MergeMode::Shallow => merge_sections(base, overlay),
            MergeMode::Deep => deep_merge(base, overlay),
        }
    }
}

/// Section-level merge of `overlay` onto `base`.
pub fn merge_sections(mut base: Mapping, overlay: Mapping) -> Mapping {
    for (key, overlay_val) in overlay {
        match overlay_val {
            Value::Mapping(entries) => match base.get_mut(&key) {
                Some(Value::Mapping(section)) => section.extend(entries),
                _ => {
                    base.insert(key, Value::Mapping(entries));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
    base
}

/// Recursive merge of `overlay` onto `base`.
///
/// Nested mappings are merged in place, so keys keep their position in
/// `base`; overlay-only keys are appended.
pub fn deep_merge(mut base: Mapping, overlay: Mapping) -> Mapping {
    for (key, overlay_val) in overlay {
        match overlay_val {
            Value::Mapping(overlay_map) => match base.get_mut(&key) {
                Some(Value::Mapping(base_map)) => {
                    let current = std::mem::take(base_map);
                    *base_map = deep_merge(current, overlay_map);
                }
                _ => {
                    base.insert(key, Value::Mapping(overlay_map));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
    base
}

/// Recursive merge for TOML profile layers; `overlay` wins on conflicts.
pub fn merge_tables(mut base: toml::Table, overlay: toml::Table) -> toml::Table {
    for (key, overlay_val) in overlay {
        let merged = match (base.remove(&key), overlay_val) {
            (Some(toml::Value::Table(base_tbl)), toml::Value::Table(overlay_tbl)) => {
                toml::Value::Table(merge_tables(base_tbl, overlay_tbl))
            }
            (_, overlay_val) => overlay_val,
        };
        base.insert(key, merged);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::{from_str, lookup};

    fn doc(text: &str) -> Mapping {
        from_str(text).unwrap()
    }

    fn keys(map: &Mapping) -> Vec<&str> {
        map.keys().filter_map(Value::as_str).collect()
    }

    #[test]
    fn shared_section_is_unioned_and_overlay_wins() {
        let base = doc("server:\n  port: '8080'\n  http:\n    port: 0\n");
        let overlay = doc("server:\n  port: '9000'\n  compression: true\n");
        let merged = merge_sections(base, overlay);

        let server = merged.get("server").and_then(Value::as_mapping).unwrap();
        assert_eq!(keys(server), ["port", "http", "compression"]);
        assert_eq!(lookup(server, "port").and_then(Value::as_str), Some("9000"));
        assert_eq!(lookup(server, "http.port").and_then(Value::as_u64), Some(0));
        assert_eq!(lookup(server, "compression").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn shallow_merge_replaces_nested_values_whole() {
        let base = doc("spring:\n  jpa:\n    show-sql: false\n    open-in-view: false\n");
        let overlay = doc("spring:\n  jpa:\n    show-sql: true\n");
        let merged = merge_sections(base, overlay);

        let jpa = lookup(&merged, "spring.jpa").and_then(Value::as_mapping).unwrap();
        assert_eq!(keys(jpa), ["show-sql"]);
    }

    #[test]
    fn one_sided_sections_pass_through_in_order() {
        let base = doc("server:\n  port: 1\nspring:\n  main: {}\n");
        let overlay = doc("management:\n  port: 2\n");
        let merged = merge_sections(base, overlay);
        assert_eq!(keys(&merged), ["server", "spring", "management"]);
        assert_eq!(lookup(&merged, "management.port").and_then(Value::as_u64), Some(2));
    }

    #[test]
    fn scalar_overlay_replaces_section() {
        let base = doc("logging:\n  level:\n    root: INFO\n");
        let overlay = doc("logging: disabled\n");
        let merged = merge_sections(base, overlay);
        assert_eq!(lookup(&merged, "logging").and_then(Value::as_str), Some("disabled"));
    }

    #[test]
    fn mapping_overlay_replaces_scalar_section() {
        let base = doc("feature: disabled\n");
        let overlay = doc("feature:\n  enabled: true\n");
        let merged = merge_sections(base, overlay);
        assert_eq!(lookup(&merged, "feature.enabled").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn sequence_overlay_replaces_section() {
        let base = doc("hosts:\n  primary: a\n");
        let overlay = doc("hosts:\n  - b\n  - c\n");
        let merged = merge_sections(base, overlay);
        assert_eq!(
            lookup(&merged, "hosts")
                .and_then(Value::as_sequence)
                .map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn empty_overlay_returns_base() {
        let base = doc("server:\n  port: 1\n");
        assert_eq!(merge_sections(base.clone(), Mapping::new()), base);
        assert_eq!(deep_merge(base.clone(), Mapping::new()), base);
    }

    #[test]
    fn deep_merge_recurses() {
        let base = doc("spring:\n  jpa:\n    show-sql: false\n    open-in-view: false\n");
        let overlay = doc("spring:\n  jpa:\n    show-sql: true\n");
        let merged = deep_merge(base, overlay);

        let jpa = lookup(&merged, "spring.jpa").and_then(Value::as_mapping).unwrap();
        assert_eq!(lookup(jpa, "show-sql").and_then(Value::as_bool), Some(true));
        assert_eq!(lookup(jpa, "open-in-view").and_then(Value::as_bool), Some(false));
    }

    #[test]
    fn deep_merge_keeps_key_order() {
        let base = doc("a: 1\nb:\n  x: 1\nc: 3\n");
        let overlay = doc("b:\n  y: 2\nd: 4\n");
        let merged = deep_merge(base, overlay);
        assert_eq!(keys(&merged), ["a", "b", "c", "d"]);
    }

    #[test]
    fn merge_mode_dispatches() {
        let base = doc("a:\n  b:\n    c: 1\n    d: 2\n");
        let overlay = doc("a:\n  b:\n    c: 9\n");

        let shallow = MergeMode::Shallow.apply(base.clone(), overlay.clone());
        assert!(lookup(&shallow, "a.b.d").is_none());

        let deep = MergeMode::Deep.apply(base, overlay);
        assert_eq!(lookup(&deep, "a.b.c").and_then(Value::as_u64), Some(9));
        assert_eq!(lookup(&deep, "a.b.d").and_then(Value::as_u64), Some(2));
    }

    #[test]
    fn tables_merge_recursively() {
        let base: toml::Table = "port = \"1\"\n[database]\nhost = \"a\"\nname = \"x\"\n"
            .parse()
            .unwrap();
        let overlay: toml::Table = "[database]\nhost = \"b\"\n".parse().unwrap();
        let merged = merge_tables(base, overlay);
        assert_eq!(merged["port"].as_str(), Some("1"));
        assert_eq!(merged["database"]["host"].as_str(), Some("b"));
        assert_eq!(merged["database"]["name"].as_str(), Some("x"));
    }
}
