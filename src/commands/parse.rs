use regex::Captures;

use super::registry::{RegisteredCommand, Verb};
use super::{help, info, markdown, navigation, node, workspace, CommandContext, CommandError};

/// A statement after its grammar matched, with arguments pulled out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Version,
    Help { topic: Option<String> },
    Ls,
    LsWs,
    CreateWorkspace { name: String, path: String },
    DeleteWorkspace { name: String },
    CreateNode { name: String },
    DeleteNode { name: String },
    CreateMarkdown { name: String },
    DeleteMarkdown { name: String },
    Edit { name: String },
    Goto { name: String },
    Goback,
    Open { name: String },
}

impl Command {
    pub fn parse(entry: &RegisteredCommand, statement: &str) -> Result<Self, CommandError> {
        let verb = entry.verb();
        let caps = entry
            .grammar()
            .captures(statement)
            .ok_or(CommandError::Usage(verb))?;
        let name = || capture(&caps, "name");

        Ok(match verb {
            Verb::Version => Command::Version,
            Verb::Help => Command::Help {
                topic: caps.name("topic").map(|m| m.as_str().to_string()),
            },
            Verb::Ls => Command::Ls,
            Verb::LsWs => Command::LsWs,
            Verb::CreateWorkspace => Command::CreateWorkspace {
                name: name(),
                path: capture(&caps, "path"),
            },
            Verb::DeleteWorkspace => Command::DeleteWorkspace { name: name() },
            Verb::CreateNode => Command::CreateNode { name: name() },
            Verb::DeleteNode => Command::DeleteNode { name: name() },
            Verb::CreateMarkdown => Command::CreateMarkdown { name: name() },
            Verb::DeleteMarkdown => Command::DeleteMarkdown { name: name() },
            Verb::Edit => Command::Edit { name: name() },
            Verb::Goto => Command::Goto { name: name() },
            Verb::Goback => Command::Goback,
            Verb::Open => Command::Open { name: name() },
        })
    }

    pub fn execute(self, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
        match self {
            Command::Version => info::version(ctx),
            Command::Help { topic } => help::help(ctx, topic.as_deref()),
            Command::Ls => info::list_active_node(ctx),
            Command::LsWs => info::list_workspaces(ctx),
            Command::CreateWorkspace { name, path } => {
                workspace::create_workspace(ctx, &name, &path)
            }
            Command::DeleteWorkspace { name } => workspace::delete_workspace(ctx, &name),
            Command::CreateNode { name } => node::create_node(ctx, &name),
            Command::DeleteNode { name } => node::delete_node(ctx, &name),
            Command::CreateMarkdown { name } => markdown::create_markdown(ctx, &name),
            Command::DeleteMarkdown { name } => markdown::delete_markdown(ctx, &name),
            Command::Edit { name } => markdown::edit_markdown(ctx, &name),
            Command::Goto { name } => navigation::goto(ctx, &name),
            Command::Goback => navigation::goback(ctx),
            Command::Open { name } => navigation::open(ctx, &name),
        }
    }
}

fn capture(caps: &Captures<'_>, group: &str) -> String {
    caps.name(group)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
