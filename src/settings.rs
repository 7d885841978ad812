use std::path::{Path, PathBuf};

use crate::database::DatabaseDescriptor;
use crate::logging::LoggingChoice;
use crate::merge::MergeMode;
use crate::port::Port;

/// Everything one build needs.
///
/// Assembled by the caller in one expression, either as a struct literal or
/// through the consuming `with_*` methods, then handed to
/// [`Assembler::build`](crate::Assembler::build) by reference.
///
/// ```ignore
/// let settings = Settings::new("8080", "build/application.yml")
///     .with_ssl_port("8443")
///     .with_logging(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Primary port, used verbatim.
    pub port: Port,
    /// Where the document is written.
    pub target: PathBuf,
    /// TLS port. When set it becomes `server.port` and the primary port moves
    /// to `server.http.port`.
    pub ssl_port: Option<Port>,
    /// Servlet context path, rendered with a leading `/`.
    pub context_path: Option<String>,
    pub database: Option<DatabaseDescriptor>,
    pub logging: LoggingChoice,
    /// YAML file layered over the generated document.
    pub overlay: Option<PathBuf>,
    pub merge: MergeMode,
}

impl Settings {
    pub fn new(port: impl Into<Port>, target: impl Into<PathBuf>) -> Self {
        Self {
            port: port.into(),
            target: target.into(),
            ssl_port: None,
            context_path: None,
            database: None,
            logging: LoggingChoice::Disabled,
            overlay: None,
            merge: MergeMode::default(),
        }
    }

    pub fn with_ssl_port(mut self, port: impl Into<Port>) -> Self {
        self.ssl_port = Some(port.into());
        self
    }

    pub fn with_context_path(mut self, path: impl Into<String>) -> Self {
        self.context_path = Some(path.into());
        self
    }

    pub fn with_database(mut self, database: DatabaseDescriptor) -> Self {
        self.database = Some(database);
        self
    }

    /// Accepts a [`LoggingChoice`], a [`LoggingDescriptor`](crate::LoggingDescriptor)
    /// (custom logging) or a `bool` (default logging on/off).
    pub fn with_logging(mut self, logging: impl Into<LoggingChoice>) -> Self {
        self.logging = logging.into();
        self
    }

    pub fn with_overlay(mut self, path: impl Into<PathBuf>) -> Self {
        self.overlay = Some(path.into());
        self
    }

    pub fn with_merge_mode(mut self, mode: MergeMode) -> Self {
        self.merge = mode;
        self
    }

    /// Same settings, written somewhere else.
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = target.into();
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}
