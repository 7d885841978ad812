//! Clap adapter for the `runnerconf` binary.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The only
//! bridge to the core is [`Cli::action`] and [`Cli::sources`]; everything
//! downstream runs through the clap-free [`ops::handle`](crate::ops::handle).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use toml::Value;

use crate::assemble::Assembler;
use crate::error::RunnerconfError;
use crate::ops::{self, ActionResult};
use crate::profile::{self, ProfileSources};
use crate::sink::TracingSink;
use crate::types::RunnerAction;

/// Generate a server application.yml from a settings profile.
#[derive(Debug, Parser)]
#[command(name = "runnerconf", version)]
pub struct Cli {
    /// Settings profile to read instead of ./runnerconf.toml or the platform
    /// config directory.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Override the primary port.
    #[arg(long, global = true)]
    pub port: Option<String>,

    /// Override the TLS port.
    #[arg(long, global = true)]
    pub ssl_port: Option<String>,

    /// Override the servlet context path.
    #[arg(long, global = true)]
    pub context_path: Option<String>,

    /// Override the overlay file.
    #[arg(long, global = true)]
    pub overlay: Option<PathBuf>,

    /// Override the overlay merge mode.
    #[arg(long, global = true, value_parser = ["shallow", "deep"])]
    pub merge: Option<String>,

    /// Ignore RUNNERCONF__* environment variables.
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Accept unknown keys in the settings profile.
    #[arg(long, global = true)]
    pub lenient: bool,

    #[command(subcommand)]
    pub command: RunnerCommand,
}

#[derive(Debug, Subcommand)]
pub enum RunnerCommand {
    /// Write the generated document.
    Build {
        /// Write here instead of the profile's target.
        #[arg(short, long)]
        target: Option<PathBuf>,
    },
    /// Print the generated document without writing it.
    Render,
    /// Print a commented settings profile template.
    Template,
}

impl Cli {
    /// Convert the subcommand into a framework-agnostic [`RunnerAction`].
    pub fn action(&self) -> RunnerAction {
        match &self.command {
            RunnerCommand::Build { target } => RunnerAction::Build {
                target: target.clone(),
            },
            RunnerCommand::Render => RunnerAction::Render,
            RunnerCommand::Template => RunnerAction::Template,
        }
    }

    /// Flags that were given, as dotted-key profile overrides.
    pub fn overrides(&self) -> Vec<(String, Value)> {
        let overlay = self.overlay.as_ref().map(|p| p.display().to_string());
        [
            ("port", self.port.clone()),
            ("ssl_port", self.ssl_port.clone()),
            ("context_path", self.context_path.clone()),
            ("overlay", overlay),
            ("merge", self.merge.clone()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), Value::String(v))))
        .collect()
    }

    /// Assemble profile sources from the flags, a loaded profile file and the
    /// process environment.
    pub fn sources(
        &self,
        file: Option<(PathBuf, String)>,
        env_vars: Vec<(String, String)>,
    ) -> ProfileSources {
        ProfileSources {
            file,
            env_vars,
            env_prefix: (!self.no_env).then(|| profile::ENV_PREFIX.to_string()),
            overrides: self.overrides(),
            strict: !self.lenient,
        }
    }

    /// Read the profile and the environment, then run the action.
    pub fn run(&self) -> Result<ActionResult, RunnerconfError> {
        let file = match self.action() {
            // A template needs no profile; don't fail on a missing one.
            RunnerAction::Template => None,
            _ => profile::read_profile(self.settings.as_deref())?,
        };
        let sources = self.sources(file, std::env::vars().collect());
        ops::handle(&self.action(), sources, &Assembler::<TracingSink>::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn build_with_target() {
        let cli = parse(&["runnerconf", "build", "--target", "out/app.yml"]);
        assert_eq!(
            cli.action(),
            RunnerAction::Build {
                target: Some("out/app.yml".into())
            }
        );
    }

    #[test]
    fn render_and_template() {
        assert_eq!(parse(&["runnerconf", "render"]).action(), RunnerAction::Render);
        assert_eq!(
            parse(&["runnerconf", "template"]).action(),
            RunnerAction::Template
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["runnerconf"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["runnerconf", "build", "--ssl-port", "8443", "--no-env"]);
        assert_eq!(cli.ssl_port.as_deref(), Some("8443"));
        assert!(cli.no_env);
    }

    #[test]
    fn only_given_flags_become_overrides() {
        let cli = parse(&[
            "runnerconf",
            "--port",
            "9000",
            "--overlay",
            "extra.yml",
            "render",
        ]);
        assert_eq!(
            cli.overrides(),
            vec![
                ("port".to_string(), Value::String("9000".into())),
                ("overlay".to_string(), Value::String("extra.yml".into())),
            ]
        );
    }

    #[test]
    fn merge_mode_is_validated() {
        assert!(Cli::try_parse_from(["runnerconf", "--merge", "sideways", "render"]).is_err());
        let cli = parse(&["runnerconf", "--merge", "deep", "render"]);
        assert_eq!(cli.merge.as_deref(), Some("deep"));
    }

    #[test]
    fn sources_reflect_flags() {
        let cli = parse(&["runnerconf", "--no-env", "--lenient", "render"]);
        let sources = cli.sources(None, vec![("RUNNERCONF__PORT".into(), "1".into())]);
        assert!(sources.env_prefix.is_none());
        assert!(!sources.strict);

        let cli = parse(&["runnerconf", "render"]);
        let sources = cli.sources(None, Vec::new());
        assert_eq!(sources.env_prefix.as_deref(), Some(profile::ENV_PREFIX));
        assert!(sources.strict);
    }

    #[test]
    fn run_template_needs_no_profile() {
        let cli = parse(&[
            "runnerconf",
            "--settings",
            "/definitely/not/here.toml",
            "template",
        ]);
        assert!(matches!(cli.run().unwrap(), ActionResult::Template(_)));
    }
}
