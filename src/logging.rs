//! Logging descriptor and the `logging` section it renders.

use serde_yaml::{Mapping, Value};

use crate::yaml::single_entry;

/// Rolling-file logging settings for the generated server config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingDescriptor {
    /// Root log level (`INFO`, `WARN`, ...).
    pub root: String,
    /// Base log file path. A missing `.log` suffix is appended on render.
    pub path: String,
    /// Rollover pattern, inserted between the root level and `.log`.
    pub pattern: String,
    pub max_file_size: String,
    pub total_size_cap: String,
}

impl Default for LoggingDescriptor {
    fn default() -> Self {
        Self {
            root: "INFO".to_string(),
            path: "logs/app".to_string(),
            pattern: "%d{yyyy-MM-dd}.%i".to_string(),
            max_file_size: "1MB".to_string(),
            total_size_cap: "1MB".to_string(),
        }
    }
}

impl LoggingDescriptor {
    /// Active log file name: `path`, with `.log` appended unless already present.
    pub fn file_name(&self) -> String {
        if self.path.ends_with(".log") {
            self.path.clone()
        } else {
            format!("{}.log", self.path)
        }
    }

    /// Rolled file name pattern, `{root}-{pattern}.log`.
    pub fn file_name_pattern(&self) -> String {
        format!("{}-{}.log", self.root, self.pattern)
    }

    /// The `logging` section.
    pub fn to_mapping(&self) -> Mapping {
        let mut policy = Mapping::new();
        policy.insert("file-name-pattern".into(), self.file_name_pattern().into());
        policy.insert("max-file-size".into(), self.max_file_size.as_str().into());
        policy.insert("total-size-cap".into(), self.total_size_cap.as_str().into());

        let mut map = Mapping::new();
        map.insert(
            "level".into(),
            Value::Mapping(single_entry("root", self.root.as_str())),
        );
        map.insert(
            "file".into(),
            Value::Mapping(single_entry("name", self.file_name())),
        );
        map.insert("logback.rollingpolicy".into(), Value::Mapping(policy));
        map
    }
}

/// Whether and how the generated document configures logging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoggingChoice {
    /// No `logging` section.
    #[default]
    Disabled,
    /// A `logging` section built from [`LoggingDescriptor::default`].
    Default,
    Custom(LoggingDescriptor),
}

impl LoggingChoice {
    /// The descriptor to render, if any.
    pub fn descriptor(&self) -> Option<LoggingDescriptor> {
        match self {
            LoggingChoice::Disabled => None,
            LoggingChoice::Default => Some(LoggingDescriptor::default()),
            LoggingChoice::Custom(descriptor) => Some(descriptor.clone()),
        }
    }
}

impl From<bool> for LoggingChoice {
    fn from(enabled: bool) -> Self {
        if enabled {
            LoggingChoice::Default
        } else {
            LoggingChoice::Disabled
        }
    }
}

impl From<LoggingDescriptor> for LoggingChoice {
    fn from(descriptor: LoggingDescriptor) -> Self {
        LoggingChoice::Custom(descriptor)
    }
}
