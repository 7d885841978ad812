//! Settings profile: a TOML description of one [`Settings`] value.
//!
//! The profile is how the command-line tool (and any other caller that wants
//! file-driven settings) gets a [`Settings`] without writing Rust. It is
//! resolved from layers, later ones winning:
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Profile file          runnerconf.toml
//!        ↑ overridden by
//! Environment vars      RUNNERCONF__KEY, RUNNERCONF__DATABASE__HOST
//!        ↑ overridden by
//! Overrides             dotted keys, e.g. ("ssl_port", "8443")
//! ```
//!
//! The assembler never sees any of this; it only receives the resolved
//! [`Settings`].

mod discover;
mod layers;

use std::path::PathBuf;

use confique::Config;
use serde::Deserialize;

use crate::database::{DatabaseDescriptor, Driver};
use crate::error::RunnerconfError;
use crate::logging::{LoggingChoice, LoggingDescriptor};
use crate::merge::MergeMode;
use crate::port::Port;
use crate::settings::Settings;

pub use discover::{PROFILE_FILE_NAME, candidate_paths, locate, read_profile};
pub use layers::{ENV_PREFIX, ProfileSources, resolve};

/// Settings for one generated server configuration.
#[derive(Config, Debug)]
pub struct RunnerProfile {
    /// Primary server port. With `ssl_port` set it becomes the plaintext
    /// `server.http.port`.
    #[config(default = "8080")]
    pub port: Port,

    /// TLS port, rendered as `server.port`.
    pub ssl_port: Option<Port>,

    /// Servlet context path, e.g. "api" for `/api`.
    pub context_path: Option<String>,

    /// Where the generated YAML is written.
    #[config(default = "config/application.yml")]
    pub target: String,

    /// YAML file layered over the generated document.
    pub overlay: Option<String>,

    /// How the overlay is merged: "shallow" (per section) or "deep".
    #[config(default = "shallow")]
    pub merge: MergeMode,

    /// Database connection and ORM settings.
    #[config(nested)]
    pub database: DatabaseProfile,

    /// Rolling-file logging settings.
    #[config(nested)]
    pub logging: LoggingProfile,
}

#[derive(Config, Debug)]
pub struct DatabaseProfile {
    /// Render `spring.datasource` and `spring.jpa`. When true, host, port,
    /// name, username and password are required.
    #[config(default = false)]
    pub enabled: bool,

    pub host: Option<String>,
    pub port: Option<Port>,
    /// Database (schema) name.
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,

    /// "mysql", "sqlserver" or "postgresql". Anything else means "mysql".
    #[config(default = "mysql")]
    pub driver: Driver,

    #[config(default = false)]
    pub show_sql: bool,

    #[config(default = false)]
    pub open_in_view: bool,

    #[config(default = true)]
    pub format_sql: bool,

    /// Schema update strategy (`hibernate.ddl-auto`).
    #[config(default = "update")]
    pub ddl_auto: String,
}

/// Which logging section, if any, the document gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingMode {
    None,
    Default,
    Custom,
}

#[derive(Config, Debug)]
pub struct LoggingProfile {
    /// "none", "default" (built-in settings) or "custom" (the keys below).
    #[config(default = "none")]
    pub mode: LoggingMode,

    /// Root log level.
    #[config(default = "INFO")]
    pub root: String,

    /// Log file path; ".log" is appended when missing.
    #[config(default = "logs/app")]
    pub path: String,

    /// Rollover pattern.
    #[config(default = "%d{yyyy-MM-dd}.%i")]
    pub pattern: String,

    #[config(default = "1MB")]
    pub max_file_size: String,

    #[config(default = "1MB")]
    pub total_size_cap: String,
}

impl RunnerProfile {
    /// Convert into build settings, checking that an enabled database
    /// section is complete.
    pub fn into_settings(self) -> Result<Settings, RunnerconfError> {
        Ok(Settings {
            port: self.port,
            target: PathBuf::from(self.target),
            ssl_port: self.ssl_port,
            context_path: self.context_path,
            database: self.database.into_descriptor()?,
            logging: self.logging.into_choice(),
            overlay: self.overlay.map(PathBuf::from),
            merge: self.merge,
        })
    }
}

impl DatabaseProfile {
    fn into_descriptor(self) -> Result<Option<DatabaseDescriptor>, RunnerconfError> {
        if !self.enabled {
            return Ok(None);
        }
        let descriptor = DatabaseDescriptor::new(
            required(self.host, "host")?,
            required(self.port, "port")?,
            required(self.name, "name")?,
            required(self.username, "username")?,
            required(self.password, "password")?,
        )
        .with_driver(self.driver)
        .with_show_sql(self.show_sql)
        .with_open_in_view(self.open_in_view)
        .with_format_sql(self.format_sql)
        .with_ddl_auto(self.ddl_auto);
        Ok(Some(descriptor))
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, RunnerconfError> {
    value.ok_or_else(|| RunnerconfError::InvalidValue {
        key: format!("database.{field}"),
        reason: "required when database.enabled is true".into(),
    })
}

impl LoggingProfile {
    fn into_choice(self) -> LoggingChoice {
        match self.mode {
            LoggingMode::None => LoggingChoice::Disabled,
            LoggingMode::Default => LoggingChoice::Default,
            LoggingMode::Custom => LoggingChoice::Custom(LoggingDescriptor {
                root: self.root,
                path: self.path,
                pattern: self.pattern,
                max_file_size: self.max_file_size,
                total_size_cap: self.total_size_cap,
            }),
        }
    }
}

/// Commented TOML template generated from the profile's doc comments and
/// defaults.
pub fn template() -> String {
    confique::toml::template::<RunnerProfile>(confique::toml::FormatOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::FULL_PROFILE;
    use std::path::Path;

    fn from_file(content: &str) -> Result<RunnerProfile, RunnerconfError> {
        resolve(ProfileSources {
            file: Some(("runnerconf.toml".into(), content.into())),
            ..ProfileSources::default()
        })
    }

    #[test]
    fn defaults_only() {
        let settings = resolve(ProfileSources::default())
            .unwrap()
            .into_settings()
            .unwrap();
        assert_eq!(settings, Settings::new("8080", "config/application.yml"));
    }

    #[test]
    fn full_profile_converts() {
        let settings = from_file(FULL_PROFILE).unwrap().into_settings().unwrap();
        assert_eq!(settings.port.as_str(), "8080");
        assert_eq!(settings.ssl_port, Some(Port::from("8443")));
        assert_eq!(settings.context_path.as_deref(), Some("api"));
        assert_eq!(settings.target(), Path::new("out/application.yml"));
        assert_eq!(settings.merge, MergeMode::Deep);

        let db = settings.database.unwrap();
        assert_eq!(db.host, "10.0.0.5");
        assert_eq!(db.port.as_str(), "3306");
        assert_eq!(db.driver, Driver::PostgreSql);
        assert!(db.show_sql);
        assert!(db.format_sql);
        assert_eq!(db.ddl_auto, "update");

        let LoggingChoice::Custom(logging) = settings.logging else {
            panic!("expected custom logging");
        };
        assert_eq!(logging.root, "WARN");
        assert_eq!(logging.file_name(), "var/log/shop.log");
        assert_eq!(logging.max_file_size, "1MB");
    }

    #[test]
    fn disabled_database_ignores_partial_fields() {
        let profile = from_file("[database]\nhost = \"h\"\n").unwrap();
        assert!(profile.into_settings().unwrap().database.is_none());
    }

    #[test]
    fn enabled_database_requires_host() {
        let profile = from_file(
            "[database]\nenabled = true\nport = 5432\nname = \"n\"\nusername = \"u\"\npassword = \"p\"\n",
        )
        .unwrap();
        match profile.into_settings().unwrap_err() {
            RunnerconfError::InvalidValue { key, .. } => assert_eq!(key, "database.host"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_logging_mode_uses_builtin_descriptor() {
        let profile = from_file("[logging]\nmode = \"default\"\nroot = \"TRACE\"\n").unwrap();
        assert_eq!(profile.into_settings().unwrap().logging, LoggingChoice::Default);
    }

    #[test]
    fn numeric_port_is_accepted() {
        let profile = from_file("port = 9090\nssl_port = 9443\n").unwrap();
        assert_eq!(profile.port.as_str(), "9090");
        assert_eq!(profile.ssl_port, Some(Port::from("9443")));
    }

    #[test]
    fn template_documents_every_section() {
        let t = template();
        assert!(t.contains("port"));
        assert!(t.contains("[database]"));
        assert!(t.contains("[logging]"));
        assert!(t.contains("ddl_auto"));
        assert!(t.contains("Servlet context path"));
    }
}
