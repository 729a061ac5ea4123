//! Statement interpretation: a free-text line is normalized, matched to a
//! verb by longest space-delimited keyword prefix, parsed against that verb's
//! grammar into a [`Command`], and executed against the metadata store.
//!
//! Failures never leave this module. They are written to the output stream
//! and the interpreter carries on with the next statement.

use std::error::Error;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::editor::{EditorError, EditorLauncher};
use crate::paths::PathError;
use crate::store::{MetadataStore, StoreError};

mod help;
mod info;
mod markdown;
mod navigation;
mod node;
mod parse;
mod registry;
mod workspace;

pub use info::VERSION;
pub use parse::Command;
pub use registry::{Registry, RegistryError, Verb};

#[derive(Debug)]
pub enum CommandError {
    Usage(Verb),
    PathExists(PathBuf),
    ParentMissing(PathBuf),
    WorkspaceNameTaken(String),
    WorkspaceNotFound(String),
    WorkspaceNotEmpty(String),
    NodeNameTaken(String),
    NodeNotFound(String),
    NodeNotEmpty(String),
    MarkdownNotFound(String),
    FileSystem {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    Store(StoreError),
    Path(PathError),
    Editor(EditorError),
    Output(std::io::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Usage(verb) => write!(
                f,
                "invalid arguments, usage: {} (names use letters, digits and '_'; paths start with '~', '.' or '/')",
                verb.usage()
            ),
            CommandError::PathExists(path) => write!(
                f,
                "the path {} already exists, please choose another one",
                path.display()
            ),
            CommandError::ParentMissing(path) => write!(
                f,
                "the parent directory of {} does not exist",
                path.display()
            ),
            CommandError::WorkspaceNameTaken(name) => {
                write!(f, "a workspace named '{}' already exists", name)
            }
            CommandError::WorkspaceNotFound(name) => {
                write!(f, "workspace '{}' could not be found", name)
            }
            CommandError::WorkspaceNotEmpty(name) => write!(
                f,
                "delete all nodes and markdown files in workspace '{}' before deleting it",
                name
            ),
            CommandError::NodeNameTaken(name) => {
                write!(f, "the active node already has a child named '{}'", name)
            }
            CommandError::NodeNotFound(name) => {
                write!(f, "could not find node '{}' below the active node", name)
            }
            CommandError::NodeNotEmpty(name) => write!(
                f,
                "delete all nodes and markdown files below '{}' before deleting it",
                name
            ),
            CommandError::MarkdownNotFound(name) => {
                write!(f, "there is no markdown note named '{}' on the active node", name)
            }
            CommandError::FileSystem {
                action,
                path,
                source,
            } => write!(
                f,
                "could not {} {}: {} (metadata was already saved, clean up this path yourself)",
                action,
                path.display(),
                source
            ),
            CommandError::Store(err) => write!(f, "{}", err),
            CommandError::Path(err) => write!(f, "{}", err),
            CommandError::Editor(err) => write!(f, "{}", err),
            CommandError::Output(err) => write!(f, "could not write output: {}", err),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CommandError::FileSystem { source, .. } => Some(source),
            CommandError::Store(err) => Some(err),
            CommandError::Path(err) => Some(err),
            CommandError::Editor(err) => Some(err),
            CommandError::Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        CommandError::Store(value)
    }
}

impl From<PathError> for CommandError {
    fn from(value: PathError) -> Self {
        CommandError::Path(value)
    }
}

impl From<EditorError> for CommandError {
    fn from(value: EditorError) -> Self {
        CommandError::Editor(value)
    }
}

impl From<std::io::Error> for CommandError {
    fn from(value: std::io::Error) -> Self {
        CommandError::Output(value)
    }
}

fn fs_error(
    action: &'static str,
    path: impl Into<PathBuf>,
) -> impl FnOnce(std::io::Error) -> CommandError {
    let path = path.into();
    move |source| CommandError::FileSystem {
        action,
        path,
        source,
    }
}

/// What a command may touch while it runs.
pub struct CommandContext<'a> {
    pub store: &'a mut MetadataStore,
    pub out: &'a mut dyn Write,
    pub editor: &'a dyn EditorLauncher,
}

impl CommandContext<'_> {
    /// Applies `change` and persists the store. If either step fails the
    /// in-memory store is restored, so it never runs ahead of the document.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MetadataStore) -> Result<T, StoreError>,
    ) -> Result<T, CommandError> {
        let before = self.store.clone();
        let result = change(&mut *self.store).and_then(|value| {
            self.store.save()?;
            Ok(value)
        });
        if result.is_err() {
            *self.store = before;
        }
        Ok(result?)
    }
}

pub struct Interpreter {
    registry: Registry,
    editor: Box<dyn EditorLauncher>,
}

impl Interpreter {
    pub fn new(registry: Registry, editor: Box<dyn EditorLauncher>) -> Self {
        Self { registry, editor }
    }

    /// Runs one statement. Unmatched statements are ignored; command
    /// failures are printed to `out`.
    pub fn execute(&self, raw: &str, store: &mut MetadataStore, out: &mut dyn Write) {
        let statement = normalize_statement(raw);
        if statement.is_empty() {
            return;
        }
        let Some(entry) = self.registry.resolve(&statement) else {
            debug!(statement = %statement, "no command matched");
            return;
        };

        let verb = entry.verb();
        debug!(statement = %statement, ?verb, "dispatching");
        let result = match Command::parse(entry, &statement) {
            Ok(command) => {
                let mut ctx = CommandContext {
                    store,
                    out: &mut *out,
                    editor: self.editor.as_ref(),
                };
                command.execute(&mut ctx)
            }
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            warn!(?verb, error = %err, "command failed");
            let _ = writeln!(out, "{err}");
        }
    }
}

/// Collapses whitespace runs to one space and trims both ends.
pub fn normalize_statement(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests;
