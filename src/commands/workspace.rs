use std::fs;
use std::io::Write;

use tracing::info;

use super::{fs_error, CommandContext, CommandError};
use crate::domain::node::Node;
use crate::paths;

pub(super) fn create_workspace(
    ctx: &mut CommandContext<'_>,
    name: &str,
    raw_path: &str,
) -> Result<(), CommandError> {
    let path = paths::expand(raw_path)?;
    if path.exists() {
        return Err(CommandError::PathExists(path));
    }
    if path.parent().is_some_and(|parent| !parent.is_dir()) {
        return Err(CommandError::ParentMissing(path));
    }
    if ctx.store.workspace(name).is_some() {
        return Err(CommandError::WorkspaceNameTaken(name.to_string()));
    }

    ctx.commit(|store| {
        store.add_workspace(Node::new(name, path.clone()));
        Ok(())
    })?;
    fs::create_dir(&path).map_err(fs_error("create directory", &path))?;
    info!(workspace = name, path = %path.display(), "workspace created");
    Ok(())
}

pub(super) fn delete_workspace(ctx: &mut CommandContext<'_>, name: &str) -> Result<(), CommandError> {
    let index = ctx
        .store
        .workspace_index(name)
        .ok_or_else(|| CommandError::WorkspaceNotFound(name.to_string()))?;
    if !ctx.store.workspaces[index].is_empty() {
        return Err(CommandError::WorkspaceNotEmpty(name.to_string()));
    }

    let removed = ctx.commit(|store| store.remove_workspace(index))?;
    fs::remove_dir(&removed.path).map_err(fs_error("remove workspace directory", &removed.path))?;
    info!(workspace = name, path = %removed.path.display(), "workspace deleted");
    writeln!(ctx.out, "Deleted workspace '{name}' successfully!")?;
    Ok(())
}
