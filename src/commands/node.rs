use std::fs;
use std::io::Write;

use tracing::info;

use super::{fs_error, CommandContext, CommandError};
use crate::domain::node::Node;

pub(super) fn create_node(ctx: &mut CommandContext<'_>, name: &str) -> Result<(), CommandError> {
    let active = ctx.store.active()?;
    if active.child(name).is_some() {
        return Err(CommandError::NodeNameTaken(name.to_string()));
    }
    let path = active.path.join(name);
    if path.exists() {
        return Err(CommandError::PathExists(path));
    }

    ctx.commit(|store| store.add_child(Node::new(name, path.clone())))?;
    fs::create_dir(&path).map_err(fs_error("create directory", &path))?;
    info!(node = name, path = %path.display(), "node created");
    Ok(())
}

/// Only direct, empty children of the active node can be deleted. The cursor
/// stays put: it sits on the parent of the removed node.
pub(super) fn delete_node(ctx: &mut CommandContext<'_>, name: &str) -> Result<(), CommandError> {
    let active = ctx.store.active()?;
    let index = active
        .child_index(name)
        .ok_or_else(|| CommandError::NodeNotFound(name.to_string()))?;
    if !active.children[index].is_empty() {
        return Err(CommandError::NodeNotEmpty(name.to_string()));
    }

    let removed = ctx.commit(|store| store.delete_child_by_index(index))?;
    fs::remove_dir(&removed.path).map_err(fs_error("remove directory", &removed.path))?;
    info!(node = name, path = %removed.path.display(), "node deleted");
    writeln!(ctx.out, "Deleted node '{name}' successfully!")?;
    Ok(())
}
