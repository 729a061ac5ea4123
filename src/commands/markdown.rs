use std::fs::{self, OpenOptions};

use tracing::info;

use super::{fs_error, CommandContext, CommandError};
use crate::domain::node::Markdown;

pub(super) fn create_markdown(
    ctx: &mut CommandContext<'_>,
    name: &str,
) -> Result<(), CommandError> {
    let active = ctx.store.active()?;
    let markdown = Markdown::from_name(name);
    let path = active.markdown_path(&markdown);
    if active.markdown(name).is_some() || path.exists() {
        return Err(CommandError::PathExists(path));
    }

    ctx.commit(|store| store.add_markdown(markdown))?;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(fs_error("create file", &path))?;
    info!(markdown = name, path = %path.display(), "markdown created");
    Ok(())
}

pub(super) fn delete_markdown(
    ctx: &mut CommandContext<'_>,
    name: &str,
) -> Result<(), CommandError> {
    let active = ctx.store.active()?;
    let markdown = active
        .markdown(name)
        .ok_or_else(|| CommandError::MarkdownNotFound(name.to_string()))?;
    let path = active.markdown_path(markdown);

    fs::remove_file(&path).map_err(fs_error("remove file", &path))?;
    ctx.commit(|store| store.delete_markdown(name))?;
    info!(markdown = name, path = %path.display(), "markdown deleted");
    Ok(())
}

pub(super) fn edit_markdown(ctx: &mut CommandContext<'_>, name: &str) -> Result<(), CommandError> {
    let active = ctx.store.active()?;
    let markdown = active
        .markdown(name)
        .ok_or_else(|| CommandError::MarkdownNotFound(name.to_string()))?;
    let path = active.markdown_path(markdown);
    ctx.editor.edit(&path)?;
    Ok(())
}
