//! The configuration assembler.
//!
//! [`assemble`] turns [`Settings`] into the generated document and does no
//! I/O. [`Assembler`] wraps it with overlay loading and the output write.
//!
//! Build order:
//!
//! 1. Report the target through the sink
//! 2. Remove any existing target file, create missing parent directories
//! 3. Assemble the generated document
//! 4. Load and merge the overlay, if any. A read or parse failure is
//!    reported through the sink and the generated document is used as is
//! 5. Write the document as YAML
//!
//! Steps 2 and 5 fail the build; step 4 never does.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::RunnerconfError;
use crate::persist;
use crate::settings::Settings;
use crate::sink::{LogSink, TracingSink};
use crate::yaml::{self, single_entry};

/// Build the generated document for `settings`, without any overlay.
///
/// Sections appear in a fixed order (`server`, `spring`, then `logging`), so
/// identical settings always serialize to identical text.
pub fn assemble(settings: &Settings) -> Mapping {
    let mut document = Mapping::new();
    document.insert("server".into(), Value::Mapping(server_section(settings)));
    document.insert("spring".into(), Value::Mapping(spring_section(settings)));
    if let Some(logging) = settings.logging.descriptor() {
        document.insert("logging".into(), Value::Mapping(logging.to_mapping()));
    }
    document
}

fn server_section(settings: &Settings) -> Mapping {
    let mut server = Mapping::new();
    match &settings.ssl_port {
        Some(ssl_port) => {
            server.insert("port".into(), ssl_port.into());
            server.insert(
                "http".into(),
                Value::Mapping(single_entry("port", &settings.port)),
            );
        }
        None => {
            server.insert("port".into(), (&settings.port).into());
            server.insert("http".into(), Value::Mapping(single_entry("port", 0)));
        }
    }

    if let Some(path) = &settings.context_path {
        let anchored = format!("/{}", path.trim_start_matches('/'));
        server.insert(
            "servlet".into(),
            Value::Mapping(single_entry("context-path", anchored)),
        );
    }
    server
}

fn spring_section(settings: &Settings) -> Mapping {
    let mut spring = Mapping::new();
    if let Some(db) = &settings.database {
        spring.insert("datasource".into(), Value::Mapping(db.datasource()));
        spring.insert("jpa".into(), Value::Mapping(db.jpa()));
    }
    spring.insert(
        "main".into(),
        Value::Mapping(single_entry("allow-circular-references", "true")),
    );
    spring
}

/// Read and parse an overlay file.
pub fn load_overlay(path: &Path) -> Result<Mapping, RunnerconfError> {
    let file = File::open(path).map_err(|e| RunnerconfError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    yaml::load(BufReader::new(file)).map_err(|e| RunnerconfError::YamlError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// What happened to the overlay during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayStatus {
    /// No overlay was configured.
    None,
    Merged(PathBuf),
    /// The overlay could not be read or parsed and was left out.
    Skipped { path: PathBuf, reason: String },
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub path: PathBuf,
    pub overlay: OverlayStatus,
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {}", self.path.display())?;
        match &self.overlay {
            OverlayStatus::None => Ok(()),
            OverlayStatus::Merged(path) => write!(f, " (overlay {} merged)", path.display()),
            OverlayStatus::Skipped { path, reason } => {
                write!(f, " (overlay {} skipped: {reason})", path.display())
            }
        }
    }
}

/// Builds documents and reports progress through a [`LogSink`].
pub struct Assembler<S: LogSink = TracingSink> {
    sink: S,
}

impl Default for Assembler<TracingSink> {
    fn default() -> Self {
        Self { sink: TracingSink }
    }
}

impl<S: LogSink> Assembler<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Assemble, overlay and write the document for `settings`.
    pub fn build(&self, settings: &Settings) -> Result<BuildOutcome, RunnerconfError> {
        let target = settings.target();
        self.sink.info(&format!(
            "build runner configuration [{}] [{}]",
            persist::target_dir(target).display(),
            target.display()
        ));

        persist::prepare_target(target)?;
        let (document, overlay) = self.render(settings);
        persist::write_document(target, &document)?;

        self.sink.debug(&format!("wrote {}", target.display()));
        Ok(BuildOutcome {
            path: target.to_path_buf(),
            overlay,
        })
    }

    /// The document `build` would write, without touching the target.
    pub fn render(&self, settings: &Settings) -> (Mapping, OverlayStatus) {
        let generated = assemble(settings);
        let Some(path) = &settings.overlay else {
            return (generated, OverlayStatus::None);
        };

        match load_overlay(path) {
            Ok(overlay) => {
                self.sink
                    .debug(&format!("merging overlay {} ({:?})", path.display(), settings.merge));
                (
                    settings.merge.apply(generated, overlay),
                    OverlayStatus::Merged(path.clone()),
                )
            }
            Err(e) => {
                self.sink
                    .info(&format!("skipping overlay {}: {e}", path.display()));
                (
                    generated,
                    OverlayStatus::Skipped {
                        path: path.clone(),
                        reason: e.to_string(),
                    },
                )
            }
        }
    }
}

/// Build with the default [`TracingSink`].
pub fn build(settings: &Settings) -> Result<BuildOutcome, RunnerconfError> {
    Assembler::<TracingSink>::default().build(settings)
}
