use std::io::Write;

use super::{CommandContext, CommandError, Verb};

struct Topic {
    verb: Verb,
    description: &'static str,
    example: &'static str,
}

static TOPICS: [Topic; 14] = [
    Topic {
        verb: Verb::Ls,
        description: "lists the node you are on, its child nodes and its markdown files.",
        example: "ls",
    },
    Topic {
        verb: Verb::LsWs,
        description: "lists all workspaces and their root paths as a table.",
        example: "ls ws",
    },
    Topic {
        verb: Verb::CreateWorkspace,
        description: "creates a workspace with the given name rooted at a new directory. The path may start with '~', '.' or '/' and must not exist yet.",
        example: "create workspace example ~/notes/example",
    },
    Topic {
        verb: Verb::DeleteWorkspace,
        description: "deletes the workspace and its directory. Fails while nodes or markdown files remain in it.",
        example: "delete workspace example",
    },
    Topic {
        verb: Verb::CreateNode,
        description: "creates a child node of the node you are on. Its directory is <path of active node>/<name>.",
        example: "create node example",
    },
    Topic {
        verb: Verb::DeleteNode,
        description: "deletes a direct child of the node you are on. Fails while the child holds nodes or markdown files.",
        example: "delete node example",
    },
    Topic {
        verb: Verb::CreateMarkdown,
        description: "creates an empty markdown file on the node you are on. Leave off the .md extension.",
        example: "create md example",
    },
    Topic {
        verb: Verb::DeleteMarkdown,
        description: "deletes a markdown file from the node you are on. Leave off the .md extension.",
        example: "delete md example",
    },
    Topic {
        verb: Verb::Edit,
        description: "opens a markdown file of the node you are on in your editor.",
        example: "edit example",
    },
    Topic {
        verb: Verb::Goto,
        description: "moves to a direct child of the node you are on.",
        example: "goto example",
    },
    Topic {
        verb: Verb::Goback,
        description: "moves to the parent of the node you are on.",
        example: "goback",
    },
    Topic {
        verb: Verb::Open,
        description: "switches to another workspace and puts you on its root node.",
        example: "open example",
    },
    Topic {
        verb: Verb::Version,
        description: "prints the notewolfy version.",
        example: "version",
    },
    Topic {
        verb: Verb::Help,
        description: "prints help for one command, or the list of commands.",
        example: "help create node",
    },
];

pub(super) fn help(ctx: &mut CommandContext<'_>, topic: Option<&str>) -> Result<(), CommandError> {
    let text = render(topic);
    write!(ctx.out, "{text}")?;
    Ok(())
}

/// Detail text for a known keyword, otherwise the command index.
pub(super) fn render(topic: Option<&str>) -> String {
    match topic.and_then(|keyword| TOPICS.iter().find(|t| t.verb.keyword() == keyword)) {
        Some(t) => format!(
            "Command: {}\nDescription: {} {}\nExample Usage: {}\n",
            t.verb.usage(),
            t.verb.keyword(),
            t.description,
            t.example
        ),
        None => {
            let width = TOPICS
                .iter()
                .map(|t| t.verb.usage().len())
                .max()
                .unwrap_or(0);
            let mut out = String::from("Commands:\n");
            for t in &TOPICS {
                out.push_str(&format!("  {:<width$}  {}\n", t.verb.usage(), t.description));
            }
            out.push_str("Type 'help <command>' for details, 'exit' or 'quit' to leave.\n");
            out
        }
    }
}
