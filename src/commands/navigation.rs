use tracing::debug;

use super::{CommandContext, CommandError};

pub(super) fn goto(ctx: &mut CommandContext<'_>, name: &str) -> Result<(), CommandError> {
    let active = ctx.store.active()?;
    if active.child(name).is_none() {
        return Err(CommandError::NodeNotFound(name.to_string()));
    }
    ctx.commit(|store| {
        store.active_node = name.to_string();
        Ok(())
    })?;
    debug!(node = name, "moved to child");
    Ok(())
}

/// Moves the cursor to the parent of the active node. At the workspace root,
/// or with no cursor at all, nothing happens.
pub(super) fn goback(ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
    let store = &*ctx.store;
    if store.active_node.is_empty() || store.active_node == store.active_workspace {
        return Ok(());
    }
    let Some(parent) = store
        .find_parent_node(&store.active_node)
        .map(|node| node.name.clone())
    else {
        return Ok(());
    };
    debug!(node = %parent, "moving to parent");
    ctx.commit(|store| {
        store.active_node = parent;
        Ok(())
    })?;
    Ok(())
}

pub(super) fn open(ctx: &mut CommandContext<'_>, name: &str) -> Result<(), CommandError> {
    if ctx.store.workspace(name).is_none() {
        return Err(CommandError::WorkspaceNotFound(name.to_string()));
    }
    ctx.commit(|store| {
        store.set_cursor(name, name);
        Ok(())
    })?;
    debug!(workspace = name, "workspace opened");
    Ok(())
}
