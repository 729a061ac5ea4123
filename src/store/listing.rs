use std::fmt::Write as _;

use super::MetadataStore;
use crate::domain::node::Node;

const NAME_HEADER: &str = "Workspace Name";
const PATH_HEADER: &str = "Workspace Path";

impl MetadataStore {
    /// Two-column name/path table. Both columns share one width, the longest
    /// name, path or header literal, and each cell is centered in it.
    pub fn list_workspaces(&self) -> String {
        let width = self
            .workspaces
            .iter()
            .flat_map(|ws| [ws.name.len(), ws.path.to_string_lossy().len()])
            .chain([NAME_HEADER.len(), PATH_HEADER.len()])
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "{}", row(NAME_HEADER, PATH_HEADER, width));
        let _ = writeln!(out, "{}", "-".repeat(2 * width + 1));
        for ws in &self.workspaces {
            let _ = writeln!(out, "{}", row(&ws.name, &ws.path.to_string_lossy(), width));
        }
        out
    }

    pub fn list_resources_on_node(&self, node: &Node) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "You are on node: {}", node.name);
        let _ = writeln!(out, "Child nodes:");
        for child in &node.children {
            let _ = writeln!(out, "  {}", child.name);
        }
        let _ = writeln!(out, "Markdown files:");
        for markdown in &node.markdowns {
            let _ = writeln!(out, "  {}", markdown.filename);
        }
        out
    }
}

fn row(left: &str, right: &str, width: usize) -> String {
    format!("{left:^width$}|{right:^width$}")
}
