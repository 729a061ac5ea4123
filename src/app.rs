use std::error::Error;
use std::fmt;
use std::io::{BufRead, Write};

use tracing::info;

use crate::commands::{Interpreter, Registry, RegistryError};
use crate::config::{ConfigError, Settings};
use crate::console;
use crate::editor::ProcessEditor;
use crate::store::{MetadataStore, StoreError};

pub struct App {
    store: MetadataStore,
    interpreter: Interpreter,
}

impl App {
    pub fn open(settings: &Settings) -> Result<Self, AppError> {
        let store = MetadataStore::open(&settings.metadata_path)?;
        let editor = ProcessEditor::new(&settings.editor);
        info!(
            metadata = %store.path().display(),
            editor = editor.program(),
            "session ready"
        );
        let interpreter = Interpreter::new(Registry::builtin()?, Box::new(editor));
        Ok(Self { store, interpreter })
    }

    pub fn run_console<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        interactive: bool,
    ) -> Result<(), AppError> {
        console::run(input, out, interactive, &self.interpreter, &mut self.store)?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Config(ConfigError),
    Store(StoreError),
    Registry(RegistryError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Config(err) => write!(f, "config error: {}", err),
            AppError::Store(err) => write!(f, "metadata error: {}", err),
            AppError::Registry(err) => write!(f, "command table error: {}", err),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Registry(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        AppError::Store(value)
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        AppError::Registry(value)
    }
}
