use std::error::Error;
use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

#[derive(Debug)]
pub enum EditorError {
    Spawn { program: String, source: std::io::Error },
    Status { program: String, status: ExitStatus },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::Spawn { program, source } => {
                write!(f, "could not launch editor '{}': {}", program, source)
            }
            EditorError::Status { program, status } => {
                write!(f, "editor '{}' exited with {}", program, status)
            }
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EditorError::Spawn { source, .. } => Some(source),
            EditorError::Status { .. } => None,
        }
    }
}

/// Opens a file for interactive editing and blocks until the user is done.
pub trait EditorLauncher {
    fn edit(&self, path: &Path) -> Result<(), EditorError>;
}

/// Runs an external program in the foreground with the terminal's stdio.
/// The command line is split on whitespace, so `code --wait` works.
#[derive(Debug, Clone)]
pub struct ProcessEditor {
    program: String,
    args: Vec<String>,
}

impl ProcessEditor {
    pub fn new(command_line: &str) -> Self {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        Self {
            program: parts.next().unwrap_or_default(),
            args: parts.collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl EditorLauncher for ProcessEditor {
    fn edit(&self, path: &Path) -> Result<(), EditorError> {
        debug!(program = %self.program, path = %path.display(), "launching editor");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| EditorError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(EditorError::Status {
                program: self.program.clone(),
                status,
            })
        }
    }
}
