mod app;
mod cli;
mod commands;
mod config;
mod console;
mod domain;
mod editor;
mod logging;
mod paths;
mod store;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), app::AppError> {
    use std::io::IsTerminal;

    use clap::Parser;
    use cli::CliCommand;
    use config::{FileConfig, Settings};

    let cli = cli::Cli::parse();
    logging::init();

    if let Some(CliCommand::Version) = cli.command {
        println!("notewolfy v{}", commands::VERSION);
        return Ok(());
    }

    let file = match &cli.config {
        Some(path) => FileConfig::load(path, true)?,
        None => match config::default_config_path() {
            Some(path) => FileConfig::load(&path, false)?,
            None => FileConfig::default(),
        },
    };
    let settings = Settings::resolve(
        cli.metadata.as_deref(),
        cli.editor.as_deref(),
        &file,
        std::env::var("EDITOR").ok(),
    )?;

    let mut app = app::App::open(&settings)?;
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let stdout = std::io::stdout();
    app.run_console(stdin.lock(), &mut stdout.lock(), interactive)
}
