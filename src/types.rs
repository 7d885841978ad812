use std::path::PathBuf;

/// A runnerconf operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerAction {
    /// Build and write the document. `target` overrides the profile's target.
    Build { target: Option<PathBuf> },
    /// Print the document that `Build` would write.
    Render,
    /// Print a commented settings profile template.
    Template,
}
