use std::error::Error;
use std::fmt;
use std::path::{Component, Path, PathBuf};

#[derive(Debug)]
pub enum PathError {
    HomeDirUnavailable,
    WorkingDir(std::io::Error),
    ChildMismatch { parent: PathBuf, child: PathBuf },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::HomeDirUnavailable => write!(f, "could not resolve the home directory"),
            PathError::WorkingDir(err) => {
                write!(f, "could not resolve the working directory: {}", err)
            }
            PathError::ChildMismatch { parent, child } => write!(
                f,
                "path '{}' is not a direct child of '{}'",
                child.display(),
                parent.display()
            ),
        }
    }
}

impl Error for PathError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PathError::WorkingDir(err) => Some(err),
            PathError::HomeDirUnavailable => None,
            PathError::ChildMismatch { .. } => None,
        }
    }
}

/// Expands `~` against the home directory and `.`/`..` against the working
/// directory. Anything else passes through, lexically cleaned.
pub fn expand(raw: &str) -> Result<PathBuf, PathError> {
    if let Some(rest) = raw.strip_prefix('~') {
        let home = dirs::home_dir().ok_or(PathError::HomeDirUnavailable)?;
        return Ok(clean(&home.join(rest.trim_start_matches('/'))));
    }
    if raw.starts_with('.') {
        let cwd = std::env::current_dir().map_err(PathError::WorkingDir)?;
        return Ok(clean(&cwd.join(raw)));
    }
    Ok(clean(Path::new(raw)))
}

/// Checks that `child` sits directly under `parent`, comparing the parent
/// portion byte for byte.
pub fn child_matches_parent(parent: &Path, child: &Path) -> Result<(), PathError> {
    let matches = child.file_name().is_some()
        && child
            .parent()
            .is_some_and(|prefix| prefix.as_os_str() == parent.as_os_str());
    if matches {
        Ok(())
    } else {
        Err(PathError::ChildMismatch {
            parent: parent.to_path_buf(),
            child: child.to_path_buf(),
        })
    }
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() && !path.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
