use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

pub const MARKDOWN_EXTENSION: &str = ".md";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Markdown {
    pub filename: String,
}

impl Markdown {
    pub fn from_name(name: &str) -> Self {
        Self {
            filename: format!("{name}{MARKDOWN_EXTENSION}"),
        }
    }

    /// Name used in statements: the filename without its `.md` suffix.
    pub fn name(&self) -> &str {
        self.filename
            .strip_suffix(MARKDOWN_EXTENSION)
            .unwrap_or(&self.filename)
    }
}

/// A workspace root or a node below it. Each node maps to one directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub path: PathBuf,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub markdowns: Vec<Markdown>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            markdowns: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.markdowns.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|child| child.name == name)
    }

    pub fn markdown(&self, name: &str) -> Option<&Markdown> {
        self.markdowns.iter().find(|markdown| markdown.name() == name)
    }

    pub fn markdown_path(&self, markdown: &Markdown) -> PathBuf {
        self.path.join(&markdown.filename)
    }
}

// Older documents encode empty lists as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
