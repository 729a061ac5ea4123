use std::io::Write;

use super::{CommandContext, CommandError, Verb};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub(super) fn version(ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
    writeln!(ctx.out, "notewolfy version v{VERSION} at your disposal!")?;
    Ok(())
}

pub(super) fn list_active_node(ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
    if ctx.store.active_node.is_empty() {
        writeln!(
            ctx.out,
            "Seems like you have not created a workspace yet! Create one with '{}'",
            Verb::CreateWorkspace.usage()
        )?;
        return Ok(());
    }
    match ctx.store.active() {
        Ok(node) => {
            let listing = ctx.store.list_resources_on_node(node);
            write!(ctx.out, "{listing}")?;
        }
        Err(_) => writeln!(
            ctx.out,
            "The active node '{}' is not part of the active workspace, use '{}' to pick one",
            ctx.store.active_node,
            Verb::Open.usage()
        )?,
    }
    Ok(())
}

pub(super) fn list_workspaces(ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
    write!(ctx.out, "{}", ctx.store.list_workspaces())?;
    Ok(())
}
