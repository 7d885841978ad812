//! Action dispatch: resolve the profile, then build, render or template.

use std::fmt;

use crate::assemble::{Assembler, BuildOutcome};
use crate::error::RunnerconfError;
use crate::profile::{self, ProfileSources};
use crate::sink::LogSink;
use crate::types::RunnerAction;
use crate::yaml;

/// Result of an action. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    Built(BuildOutcome),
    /// YAML text of the document, not written anywhere.
    Rendered(String),
    /// A commented profile template.
    Template(String),
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionResult::Built(outcome) => write!(f, "{outcome}"),
            ActionResult::Rendered(text) | ActionResult::Template(text) => {
                write!(f, "{}", text.trim_end())
            }
        }
    }
}

/// Run `action`. The profile is only resolved for actions that need it, so
/// `Template` works even when the current profile is broken.
pub fn handle<S: LogSink>(
    action: &RunnerAction,
    sources: ProfileSources,
    assembler: &Assembler<S>,
) -> Result<ActionResult, RunnerconfError> {
    match action {
        RunnerAction::Template => Ok(ActionResult::Template(profile::template())),
        RunnerAction::Build { target } => {
            let mut settings = profile::resolve(sources)?.into_settings()?;
            if let Some(target) = target {
                settings = settings.with_target(target.clone());
            }
            assembler.build(&settings).map(ActionResult::Built)
        }
        RunnerAction::Render => {
            let settings = profile::resolve(sources)?.into_settings()?;
            let (document, _) = assembler.render(&settings);
            yaml::to_string(&document)
                .map(ActionResult::Rendered)
                .map_err(RunnerconfError::SerializeError)
        }
    }
}
