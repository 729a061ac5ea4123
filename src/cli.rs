use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::BrightCyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::BrightMagenta.on_default())
}

#[derive(Debug, Parser)]
#[command(name = "notewolfy")]
#[command(version)]
#[command(about = "A minimalistic console for organizing markdown notes in workspaces")]
#[command(styles = cli_styles())]
pub struct Cli {
    #[arg(
        short = 'm',
        long,
        env = "NOTEWOLFY_METADATA",
        help = "Path to the metadata document (default: ~/.notewolfy)."
    )]
    pub metadata: Option<String>,

    #[arg(
        short = 'c',
        long,
        env = "NOTEWOLFY_CONFIG",
        help = "Path to a config.toml (default: <config dir>/notewolfy/config.toml)."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'e',
        long,
        env = "NOTEWOLFY_EDITOR",
        help = "Editor command used by 'edit' (default: $EDITOR, then vi)."
    )]
    pub editor: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CliCommand {
    #[command(about = "Print the version of notewolfy.")]
    Version,
}
