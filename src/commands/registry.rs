use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use regex::Regex;

/// Every verb the interpreter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Version,
    Help,
    Ls,
    LsWs,
    CreateWorkspace,
    DeleteWorkspace,
    CreateNode,
    DeleteNode,
    CreateMarkdown,
    DeleteMarkdown,
    Edit,
    Goto,
    Goback,
    Open,
}

impl Verb {
    pub const ALL: [Verb; 14] = [
        Verb::Version,
        Verb::Help,
        Verb::Ls,
        Verb::LsWs,
        Verb::CreateWorkspace,
        Verb::DeleteWorkspace,
        Verb::CreateNode,
        Verb::DeleteNode,
        Verb::CreateMarkdown,
        Verb::DeleteMarkdown,
        Verb::Edit,
        Verb::Goto,
        Verb::Goback,
        Verb::Open,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Verb::Version => "version",
            Verb::Help => "help",
            Verb::Ls => "ls",
            Verb::LsWs => "ls ws",
            Verb::CreateWorkspace => "create workspace",
            Verb::DeleteWorkspace => "delete workspace",
            Verb::CreateNode => "create node",
            Verb::DeleteNode => "delete node",
            Verb::CreateMarkdown => "create md",
            Verb::DeleteMarkdown => "delete md",
            Verb::Edit => "edit",
            Verb::Goto => "goto",
            Verb::Goback => "goback",
            Verb::Open => "open",
        }
    }

    /// Anchored argument grammar, matched against the normalized statement.
    pub fn pattern(self) -> &'static str {
        match self {
            Verb::Version => r"^version$",
            Verb::Help => r"^help(?: (?P<topic>[[:alpha:]]+(?: [[:alpha:]]+)*))?$",
            Verb::Ls => r"^ls$",
            Verb::LsWs => r"^ls ws$",
            Verb::CreateWorkspace => r"^create workspace (?P<name>\w+) (?P<path>[~./].*)$",
            Verb::DeleteWorkspace => r"^delete workspace (?P<name>\w+)$",
            Verb::CreateNode => r"^create node (?P<name>\w+)$",
            Verb::DeleteNode => r"^delete node (?P<name>\w+)$",
            Verb::CreateMarkdown => r"^create md (?P<name>\w+)$",
            Verb::DeleteMarkdown => r"^delete md (?P<name>\w+)$",
            Verb::Edit => r"^edit (?P<name>\w+)$",
            Verb::Goto => r"^goto (?P<name>\w+)$",
            Verb::Goback => r"^goback$",
            Verb::Open => r"^open (?P<name>\w+)$",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Verb::Version => "version",
            Verb::Help => "help [command]",
            Verb::Ls => "ls",
            Verb::LsWs => "ls ws",
            Verb::CreateWorkspace => "create workspace <name> <path>",
            Verb::DeleteWorkspace => "delete workspace <name>",
            Verb::CreateNode => "create node <name>",
            Verb::DeleteNode => "delete node <name>",
            Verb::CreateMarkdown => "create md <name>",
            Verb::DeleteMarkdown => "delete md <name>",
            Verb::Edit => "edit <name>",
            Verb::Goto => "goto <name>",
            Verb::Goback => "goback",
            Verb::Open => "open <name>",
        }
    }
}

#[derive(Debug)]
pub enum RegistryError {
    DuplicateKeyword(&'static str),
    Grammar {
        keyword: &'static str,
        source: regex::Error,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateKeyword(keyword) => {
                write!(f, "command keyword '{}' is registered twice", keyword)
            }
            RegistryError::Grammar { keyword, source } => {
                write!(f, "invalid grammar for '{}': {}", keyword, source)
            }
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegistryError::DuplicateKeyword(_) => None,
            RegistryError::Grammar { source, .. } => Some(source),
        }
    }
}

#[derive(Debug)]
pub struct RegisteredCommand {
    verb: Verb,
    grammar: Regex,
}

impl RegisteredCommand {
    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn grammar(&self) -> &Regex {
        &self.grammar
    }
}

/// Ordered verb table. Keywords are unique, so at most one keyword of any
/// given length can prefix a statement and longest-match is unambiguous.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<RegisteredCommand>,
}

impl Registry {
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_verbs(&Verb::ALL)
    }

    pub fn from_verbs(verbs: &[Verb]) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(verbs.len());
        for &verb in verbs {
            let keyword = verb.keyword();
            if !seen.insert(keyword) {
                return Err(RegistryError::DuplicateKeyword(keyword));
            }
            let grammar = Regex::new(verb.pattern())
                .map_err(|source| RegistryError::Grammar { keyword, source })?;
            entries.push(RegisteredCommand { verb, grammar });
        }
        Ok(Self { entries })
    }

    /// Longest keyword that equals the statement or prefixes it up to a space.
    pub fn resolve(&self, statement: &str) -> Option<&RegisteredCommand> {
        self.entries
            .iter()
            .filter(|entry| keyword_prefixes(entry.verb.keyword(), statement))
            .max_by_key(|entry| entry.verb.keyword().len())
    }
}

fn keyword_prefixes(keyword: &str, statement: &str) -> bool {
    match statement.strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}
