//! Generate a server's `application.yml` from typed settings.
//!
//! runnerconf builds a nested configuration document (server ports, servlet
//! context path, datasource and JPA settings, rolling-file logging), layers an
//! optional hand-written YAML overlay on top, and writes the result to disk,
//! replacing whatever was there.
//!
//! ```ignore
//! use runnerconf::{Assembler, DatabaseDescriptor, Driver, Settings};
//!
//! let settings = Settings::new("8080", "build/config/application.yml")
//!     .with_ssl_port("8443")
//!     .with_context_path("shop")
//!     .with_database(
//!         DatabaseDescriptor::new("10.0.0.5", "5432", "shop", "svc", "secret")
//!             .with_driver(Driver::PostgreSql),
//!     )
//!     .with_logging(true)
//!     .with_overlay("deploy/extra.yml");
//!
//! let outcome = Assembler::default().build(&settings)?;
//! println!("{outcome}");
//! ```
//!
//! # The generated document
//!
//! ```text
//! server:
//!   port: '8443'             # TLS port, or the primary port without one
//!   http:
//!     port: '8080'           # primary port under TLS, 0 otherwise
//!   servlet:
//!     context-path: /shop
//! spring:
//!   datasource: ...          # url, username, password (+ driver class on MySQL)
//!   jpa: ...                 # open-in-view, show-sql, format_sql, ddl-auto
//!   main:
//!     allow-circular-references: 'true'
//! logging:
//!   level: ...
//!   file: ...
//!   logback.rollingpolicy: ...
//! ```
//!
//! Sections are always emitted in the same order, so identical settings
//! produce byte-identical files.
//!
//! # Settings are a value
//!
//! [`Settings`] is a plain struct. The `with_*` methods consume and return
//! it, so a complete value is assembled in one expression and then passed by
//! reference to [`Assembler::build`]. There is no staged builder object.
//!
//! Logging is a tagged choice, [`LoggingChoice`]: `Disabled`, `Default`, or
//! `Custom(descriptor)`. `with_logging(true)` is shorthand for `Default`.
//!
//! # Database drivers
//!
//! [`Driver`] is selected from a loose tag. `sqlserver` and `postgresql`
//! pick their URL formats; anything else, including an unknown tag, gets the
//! MySQL URL and driver class. Credentials are written verbatim.
//!
//! # Overlays
//!
//! An overlay is a YAML mapping merged over the generated document according
//! to [`MergeMode`]:
//!
//! - **`Shallow`** (default): sections present on both sides are unioned one
//!   level deep, overlay entries winning.
//! - **`Deep`**: mappings are unioned at every level.
//!
//! When either side of a shared key is not a mapping, the overlay value
//! replaces the generated one. An overlay that cannot be read or parsed is
//! reported through the sink and left out; the build still writes the
//! generated document. See [`merge`] for details.
//!
//! # Writing
//!
//! The existing target file is removed, missing parent directories are
//! created, then the new document is written. This is not an atomic replace.
//! Failures here are returned as [`RunnerconfError`].
//!
//! # Logging
//!
//! The [`Assembler`] reports through an injected [`LogSink`]. The default,
//! [`TracingSink`], emits `tracing` events with target `runnerconf`;
//! [`NoopSink`] discards them. Bring your own by implementing [`LogSink`].
//!
//! # Settings profiles and the CLI
//!
//! The [`profile`] module describes a [`Settings`] value as a TOML file,
//! layered with `RUNNERCONF__*` environment variables and dotted-key
//! overrides. The `runnerconf` binary (behind the `clap` feature, on by
//! default) reads a profile and runs `build`, `render` or `template`.
//! The assembler itself reads no files other than the overlay, and no
//! environment.

pub mod error;
pub mod merge;
pub mod profile;
pub mod types;
pub mod yaml;

mod assemble;
#[cfg(feature = "clap")]
pub mod cli;
mod database;
mod logging;
mod ops;
mod persist;
mod port;
mod settings;
mod sink;

#[cfg(test)]
mod fixtures;

pub use assemble::{Assembler, BuildOutcome, OverlayStatus, assemble, build, load_overlay};
pub use database::{DatabaseDescriptor, Driver};
pub use error::RunnerconfError;
pub use logging::{LoggingChoice, LoggingDescriptor};
pub use merge::MergeMode;
pub use ops::{ActionResult, handle};
pub use port::Port;
pub use profile::{ProfileSources, RunnerProfile};
pub use settings::Settings;
pub use sink::{LogSink, NoopSink, TracingSink};
pub use types::RunnerAction;
