use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::node::{Markdown, Node};
use crate::paths::{self, PathError};

mod listing;

/// The forest of workspaces plus the `(active workspace, active node)`
/// cursor, persisted as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataStore {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default)]
    pub workspaces: Vec<Node>,
    #[serde(rename = "activeworkspace", default)]
    pub active_workspace: String,
    #[serde(rename = "activenode", default)]
    pub active_node: String,
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    NoActiveNode,
    ActiveNodeMissing(String),
    IndexOutOfRange { index: usize, len: usize },
    MarkdownNotFound(String),
    Path(PathError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "metadata I/O error: {}", err),
            StoreError::Json(err) => write!(f, "metadata document is not valid JSON: {}", err),
            StoreError::NoActiveNode => write!(
                f,
                "no active node, seems like you have not created a workspace yet"
            ),
            StoreError::ActiveNodeMissing(name) => write!(
                f,
                "active node '{}' could not be found in the active workspace",
                name
            ),
            StoreError::IndexOutOfRange { index, len } => write!(
                f,
                "child index {} is out of range for a node with {} child(ren)",
                index, len
            ),
            StoreError::MarkdownNotFound(name) => {
                write!(f, "'{}' matches no markdown note on the active node", name)
            }
            StoreError::Path(err) => write!(f, "{}", err),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Json(err) => Some(err),
            StoreError::Path(err) => Some(err),
            StoreError::NoActiveNode => None,
            StoreError::ActiveNodeMissing(_) => None,
            StoreError::IndexOutOfRange { .. } => None,
            StoreError::MarkdownNotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        StoreError::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        StoreError::Json(value)
    }
}

impl From<PathError> for StoreError {
    fn from(value: PathError) -> Self {
        StoreError::Path(value)
    }
}

impl MetadataStore {
    /// Loads the document at `path`, creating an empty one if it is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        let mut raw = String::new();
        file.read_to_string(&mut raw)?;

        let mut store = if raw.trim().is_empty() {
            MetadataStore::default()
        } else {
            serde_json::from_str::<MetadataStore>(&raw)?
        };
        store.path = path;
        info!(
            path = %store.path.display(),
            workspaces = store.workspaces.len(),
            "metadata loaded"
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the backing document wholesale via a temp file and rename.
    pub fn save(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(self)?;
        let tmp = temp_sibling(&self.path);
        if let Err(err) = fs::write(&tmp, &payload).and_then(|()| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Io(err));
        }
        debug!(path = %self.path.display(), bytes = payload.len(), "metadata saved");
        Ok(())
    }

    pub fn workspace(&self, name: &str) -> Option<&Node> {
        self.workspaces.iter().find(|ws| ws.name == name)
    }

    pub fn workspace_index(&self, name: &str) -> Option<usize> {
        self.workspaces.iter().position(|ws| ws.name == name)
    }

    /// Appends a workspace root and moves the cursor onto it.
    pub fn add_workspace(&mut self, workspace: Node) {
        self.active_workspace = workspace.name.clone();
        self.active_node = workspace.name.clone();
        self.workspaces.push(workspace);
    }

    /// Removes the workspace at `index` and re-derives the cursor from the
    /// first remaining workspace.
    pub fn remove_workspace(&mut self, index: usize) -> Result<Node, StoreError> {
        if index >= self.workspaces.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.workspaces.len(),
            });
        }
        let removed = self.workspaces.remove(index);
        match self.workspaces.first() {
            Some(first) => {
                self.active_workspace = first.name.clone();
                self.active_node = first.name.clone();
            }
            None => {
                self.active_workspace.clear();
                self.active_node.clear();
            }
        }
        Ok(removed)
    }

    pub fn set_cursor(&mut self, workspace: &str, node: &str) {
        self.active_workspace = workspace.to_string();
        self.active_node = node.to_string();
    }

    pub fn active_root(&self) -> Option<&Node> {
        self.workspace(&self.active_workspace)
    }

    fn active_root_mut(&mut self) -> Option<&mut Node> {
        let active = &self.active_workspace;
        self.workspaces.iter_mut().find(|ws| &ws.name == active)
    }

    /// Breadth-first search below the active workspace root. Other
    /// workspaces are never searched.
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        let mut queue = VecDeque::from([self.active_root()?]);
        while let Some(node) = queue.pop_front() {
            if node.name == name {
                return Some(node);
            }
            queue.extend(node.children.iter());
        }
        None
    }

    pub fn find_node_mut(&mut self, name: &str) -> Option<&mut Node> {
        let mut queue = VecDeque::from([self.active_root_mut()?]);
        while let Some(node) = queue.pop_front() {
            if node.name == name {
                return Some(node);
            }
            queue.extend(node.children.iter_mut());
        }
        None
    }

    /// Same traversal as [`MetadataStore::find_node`], returning the node
    /// whose children hold the first match.
    pub fn find_parent_node(&self, name: &str) -> Option<&Node> {
        let mut queue = VecDeque::from([self.active_root()?]);
        while let Some(node) = queue.pop_front() {
            if node.children.iter().any(|child| child.name == name) {
                return Some(node);
            }
            queue.extend(node.children.iter());
        }
        None
    }

    pub fn active(&self) -> Result<&Node, StoreError> {
        if self.active_node.is_empty() {
            return Err(StoreError::NoActiveNode);
        }
        self.find_node(&self.active_node)
            .ok_or_else(|| StoreError::ActiveNodeMissing(self.active_node.clone()))
    }

    fn active_mut(&mut self) -> Result<&mut Node, StoreError> {
        if self.active_node.is_empty() {
            return Err(StoreError::NoActiveNode);
        }
        let name = self.active_node.clone();
        self.find_node_mut(&name)
            .ok_or(StoreError::ActiveNodeMissing(name))
    }

    pub fn add_child(&mut self, child: Node) -> Result<(), StoreError> {
        let active = self.active_mut()?;
        paths::child_matches_parent(&active.path, &child.path)?;
        active.children.push(child);
        Ok(())
    }

    pub fn delete_child_by_index(&mut self, index: usize) -> Result<Node, StoreError> {
        let active = self.active_mut()?;
        if index >= active.children.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: active.children.len(),
            });
        }
        Ok(active.children.remove(index))
    }

    pub fn add_markdown(&mut self, markdown: Markdown) -> Result<(), StoreError> {
        self.active_mut()?.markdowns.push(markdown);
        Ok(())
    }

    pub fn delete_markdown(&mut self, name: &str) -> Result<Markdown, StoreError> {
        let active = self.active_mut()?;
        let index = active
            .markdowns
            .iter()
            .position(|markdown| markdown.name() == name)
            .ok_or_else(|| StoreError::MarkdownNotFound(name.to_string()))?;
        Ok(active.markdowns.remove(index))
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "metadata".to_string());
    path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::now_v7()))
}
