use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use uuid::Uuid;

use super::{normalize_statement, Interpreter, Registry};
use crate::editor::{EditorError, EditorLauncher};
use crate::store::MetadataStore;

#[derive(Clone, Default)]
struct RecordingEditor {
    opened: Rc<RefCell<Vec<PathBuf>>>,
    fail: bool,
}

impl EditorLauncher for RecordingEditor {
    fn edit(&self, path: &Path) -> Result<(), EditorError> {
        self.opened.borrow_mut().push(path.to_path_buf());
        if self.fail {
            return Err(EditorError::Spawn {
                program: "fake".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no editor"),
            });
        }
        Ok(())
    }
}

struct Harness {
    root: PathBuf,
    store: MetadataStore,
    interpreter: Interpreter,
    editor: RecordingEditor,
}

impl Harness {
    fn new() -> Self {
        Self::with_editor(RecordingEditor::default())
    }

    fn with_editor(editor: RecordingEditor) -> Self {
        let root = std::env::temp_dir().join(format!("notewolfy-cmd-test-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&root).expect("temp dir should be creatable");
        let store = MetadataStore::open(root.join("metadata.json")).expect("store should open");
        let registry = Registry::builtin().expect("builtin registry should build");
        let interpreter = Interpreter::new(registry, Box::new(editor.clone()));
        Self {
            root,
            store,
            interpreter,
            editor,
        }
    }

    fn run(&mut self, statement: &str) -> String {
        let mut out = Vec::new();
        self.interpreter
            .execute(statement, &mut self.store, &mut out);
        String::from_utf8(out).expect("output should be utf8")
    }

    fn ws(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn create_workspace(&mut self, name: &str) -> PathBuf {
        let path = self.ws(name);
        let output = self.run(&format!("create workspace {name} {}", path.display()));
        assert_eq!(output, "", "workspace creation should be silent");
        path
    }

    fn reloaded(&self) -> MetadataStore {
        MetadataStore::open(self.store.path()).expect("store should reopen")
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

#[test]
fn normalize_collapses_whitespace() {
    assert_eq!(normalize_statement("  create \t node   A \n"), "create node A");
    assert_eq!(normalize_statement("   "), "");
}

#[test]
fn create_workspace_lists_single_row() {
    let mut h = Harness::new();
    let path = h.create_workspace("test");

    assert!(path.is_dir());
    assert_eq!(h.store.active_workspace, "test");
    assert_eq!(h.store.active_node, "test");

    let table = h.run("ls ws");
    let rows: Vec<&str> = table.lines().skip(2).collect();
    assert_eq!(rows.len(), 1);
    let cells: Vec<&str> = rows[0].split('|').map(str::trim).collect();
    assert_eq!(cells, vec!["test".to_string(), path.display().to_string()]);
}

#[test]
fn create_workspace_rejects_existing_directory() {
    let mut h = Harness::new();
    let existing = h.ws("taken");
    std::fs::create_dir_all(&existing).expect("fixture dir should be creatable");

    let output = h.run(&format!("create workspace test {}", existing.display()));
    assert!(output.contains("already exists"));
    assert!(h.store.workspaces.is_empty());
    assert!(h.store.active_workspace.is_empty());
    assert!(h.reloaded().workspaces.is_empty());
}

#[test]
fn create_workspace_rejects_duplicate_name() {
    let mut h = Harness::new();
    h.create_workspace("test");
    let other = h.ws("other");
    let output = h.run(&format!("create workspace test {}", other.display()));
    assert!(output.contains("already exists"));
    assert_eq!(h.store.workspaces.len(), 1);
    assert!(!other.exists());
}

#[test]
fn create_node_makes_directory_and_lists_it() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");

    assert_eq!(h.run("create node A"), "");
    assert!(ws.join("A").is_dir());

    let listing = h.run("ls");
    assert!(listing.contains("You are on node: test"));
    assert!(listing.contains("Child nodes:\n  A\n"));
    assert_eq!(h.reloaded(), h.store);
}

#[test]
fn create_node_rejects_duplicates_and_missing_cursor() {
    let mut h = Harness::new();
    let output = h.run("create node A");
    assert!(output.contains("no active node"));

    h.create_workspace("test");
    h.run("create node A");
    let output = h.run("create node A");
    assert!(output.contains("already has a child named 'A'"));
    assert_eq!(h.store.workspaces[0].children.len(), 1);
}

#[test]
fn goto_then_goback_restores_workspace_root() {
    let mut h = Harness::new();
    h.create_workspace("test");
    h.run("create node A");

    assert_eq!(h.run("goto A"), "");
    assert_eq!(h.store.active_node, "A");
    assert_eq!(h.reloaded().active_node, "A");

    h.run("create node B");
    h.run("goto B");
    assert_eq!(h.store.active_node, "B");
    assert!(h.ws("test").join("A/B").is_dir());

    h.run("goback");
    assert_eq!(h.store.active_node, "A");
    h.run("goback");
    assert_eq!(h.store.active_node, "test");
    h.run("goback");
    assert_eq!(h.store.active_node, "test");
}

#[test]
fn goto_only_reaches_direct_children() {
    let mut h = Harness::new();
    h.create_workspace("test");
    h.run("create node A");
    h.run("goto A");
    h.run("create node B");
    h.run("goback");

    let output = h.run("goto B");
    assert!(output.contains("could not find node 'B'"));
    assert_eq!(h.store.active_node, "test");
}

#[test]
fn delete_node_succeeds_but_workspace_with_markdown_is_kept() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");
    h.run("create md example");
    h.run("create node X");
    assert!(ws.join("example.md").is_file());

    let output = h.run("delete node X");
    assert!(output.contains("Deleted node 'X' successfully!"));
    assert!(!ws.join("X").exists());
    assert!(h.store.workspaces[0].children.is_empty());

    let before = h.store.clone();
    let output = h.run("delete workspace test");
    assert!(output.contains("before deleting it"));
    assert_eq!(h.store, before);
    assert!(ws.is_dir());
    assert!(ws.join("example.md").is_file());
}

#[test]
fn delete_node_rejects_non_empty_or_unknown_child() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");
    h.run("create node A");
    h.run("goto A");
    h.run("create node B");
    h.run("goback");

    let before = h.store.clone();
    let output = h.run("delete node A");
    assert!(output.contains("before deleting it"));
    assert_eq!(h.store, before);
    assert!(ws.join("A/B").is_dir());

    let output = h.run("delete node B");
    assert!(output.contains("could not find node 'B'"));
    assert_eq!(h.store, before);
}

#[test]
fn delete_workspace_moves_cursor_to_first_remaining() {
    let mut h = Harness::new();
    let first = h.create_workspace("first");
    let second = h.create_workspace("second");
    assert_eq!(h.store.active_workspace, "second");

    let output = h.run("delete workspace second");
    assert!(output.contains("Deleted workspace 'second' successfully!"));
    assert!(!second.exists());
    assert_eq!(h.store.active_workspace, "first");
    assert_eq!(h.store.active_node, "first");

    h.run("delete workspace first");
    assert!(!first.exists());
    assert!(h.store.workspaces.is_empty());
    assert!(h.store.active_workspace.is_empty());
    assert!(h.store.active_node.is_empty());

    let output = h.run("delete workspace first");
    assert!(output.contains("workspace 'first' could not be found"));
}

#[test]
fn markdown_lifecycle() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");

    assert_eq!(h.run("create md notes"), "");
    assert!(ws.join("notes.md").is_file());
    assert_eq!(h.store.workspaces[0].markdowns[0].filename, "notes.md");

    let output = h.run("create md notes");
    assert!(output.contains("already exists"));
    assert_eq!(h.store.workspaces[0].markdowns.len(), 1);

    assert!(h.run("ls").contains("Markdown files:\n  notes.md\n"));

    assert_eq!(h.run("delete md notes"), "");
    assert!(!ws.join("notes.md").exists());
    assert!(h.store.workspaces[0].markdowns.is_empty());
    assert!(h.reloaded().workspaces[0].markdowns.is_empty());

    let output = h.run("delete md notes");
    assert!(output.contains("no markdown note named 'notes'"));
}

#[test]
fn create_md_refuses_to_clobber_untracked_file() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");
    std::fs::write(ws.join("draft.md"), "keep me").expect("fixture should be writable");

    let output = h.run("create md draft");
    assert!(output.contains("already exists"));
    assert!(h.store.workspaces[0].markdowns.is_empty());
    let content = std::fs::read_to_string(ws.join("draft.md")).expect("file should remain");
    assert_eq!(content, "keep me");
}

#[test]
fn delete_md_reports_missing_file_and_keeps_entry() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");
    h.run("create md gone");
    std::fs::remove_file(ws.join("gone.md")).expect("fixture should be removable");

    let output = h.run("delete md gone");
    assert!(output.contains("could not remove file"));
    assert_eq!(h.store.workspaces[0].markdowns.len(), 1);
}

#[test]
fn edit_launches_editor_for_known_markdown() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");
    h.run("create md journal");

    assert_eq!(h.run("edit journal"), "");
    assert_eq!(
        h.editor.opened.borrow().as_slice(),
        &[ws.join("journal.md")]
    );

    let output = h.run("edit missing");
    assert!(output.contains("no markdown note named 'missing'"));
    assert_eq!(h.editor.opened.borrow().len(), 1);
}

#[test]
fn editor_failure_is_printed() {
    let mut h = Harness::with_editor(RecordingEditor {
        fail: true,
        ..RecordingEditor::default()
    });
    h.create_workspace("test");
    h.run("create md journal");

    let output = h.run("edit journal");
    assert!(output.contains("could not launch editor 'fake'"));
}

#[test]
fn open_switches_workspace_and_scopes_lookups() {
    let mut h = Harness::new();
    h.create_workspace("alpha");
    h.run("create node shared");
    let beta = h.create_workspace("beta");
    h.run("create node shared");
    h.run("create node only_beta");

    assert_eq!(h.run("open alpha"), "");
    assert_eq!(h.store.active_workspace, "alpha");
    assert_eq!(h.store.active_node, "alpha");
    assert!(h.store.find_node("only_beta").is_none());

    h.run("goto shared");
    let listing = h.run("ls");
    assert!(listing.contains("You are on node: shared"));
    assert!(h.run("goto only_beta").contains("could not find node"));

    h.run("open beta");
    let shared = h.store.find_node("shared").expect("beta/shared should resolve");
    assert_eq!(shared.path, beta.join("shared"));

    let output = h.run("open nowhere");
    assert!(output.contains("workspace 'nowhere' could not be found"));
    assert_eq!(h.store.active_workspace, "beta");
}

#[test]
fn unmatched_statements_are_silent() {
    let mut h = Harness::new();
    for statement in [
        "dgkhs create workspace test ./tmp",
        "create workspaces test ./tmp",
        "create",
        "",
        "   ",
    ] {
        assert_eq!(h.run(statement), "", "'{statement}' should be ignored");
    }
    assert!(h.store.workspaces.is_empty());
    assert!(!h.root.join("tmp").exists());
}

#[test]
fn grammar_mismatch_prints_usage_without_mutation() {
    let mut h = Harness::new();
    h.create_workspace("test");
    let before = h.store.clone();

    let output = h.run("create node bad-name");
    assert!(output.contains("usage: create node <name>"));
    let output = h.run("create workspace other relative/path");
    assert!(output.contains("usage: create workspace <name> <path>"));
    assert_eq!(h.store, before);
}

#[test]
fn extra_whitespace_is_normalized_before_matching() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");
    assert_eq!(h.run("   create    node\tA   "), "");
    assert!(ws.join("A").is_dir());
}

#[test]
fn ls_without_workspace_prints_hint() {
    let mut h = Harness::new();
    let output = h.run("ls");
    assert!(output.contains("not created a workspace yet"));
    assert!(output.contains("create workspace <name> <path>"));
}

#[test]
fn ls_with_stale_cursor_prints_hint() {
    let mut h = Harness::new();
    h.store.set_cursor("deleted", "deleted");
    let output = h.run("ls");
    assert!(output.contains("is not part of the active workspace"));
}

#[test]
fn version_and_help_print_static_text() {
    let mut h = Harness::new();
    let version = h.run("version");
    assert!(version.starts_with("notewolfy version v"));
    assert!(version.contains(env!("CARGO_PKG_VERSION")));

    let help = h.run("help goto");
    assert!(help.contains("Command: goto <name>"));
    let index = h.run("help");
    assert!(index.starts_with("Commands:"));
    let unknown = h.run("help unknown topic");
    assert!(unknown.starts_with("Commands:"));
}

#[test]
fn delete_node_holding_only_a_markdown_is_rejected() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");
    h.run("create node A");
    h.run("goto A");
    h.run("create md notes");
    h.run("goback");

    let before = h.store.clone();
    let output = h.run("delete node A");
    assert!(output.contains("before deleting it"));
    assert_eq!(h.store, before);
    assert_eq!(h.reloaded(), before);
    assert!(ws.join("A").is_dir());
    assert!(ws.join("A/notes.md").is_file());
}

#[test]
fn delete_workspace_holding_only_a_node_is_rejected() {
    let mut h = Harness::new();
    let ws = h.create_workspace("test");
    h.run("create node A");

    let before = h.store.clone();
    let output = h.run("delete workspace test");
    assert!(output.contains("before deleting it"));
    assert_eq!(h.store, before);
    assert_eq!(h.reloaded(), before);
    assert!(ws.join("A").is_dir());
}

#[test]
fn failed_save_restores_in_memory_store() {
    let mut h = Harness::new();
    let ws = h.create_workspace("first");
    h.run("create node A");

    // A directory in place of the document makes the rename in save() fail.
    let document = h.store.path().to_path_buf();
    std::fs::remove_file(&document).expect("document should be removable");
    std::fs::create_dir_all(document.join("blocker")).expect("blocker should be creatable");
    let before = h.store.clone();

    let second = h.ws("second");
    let output = h.run(&format!("create workspace second {}", second.display()));
    assert!(output.contains("metadata I/O error"), "output: {output}");
    assert_eq!(h.store, before);
    assert!(!second.exists());

    for statement in [
        "create node B",
        "create md notes",
        "goto A",
        "delete node A",
        "open first",
    ] {
        let output = h.run(statement);
        assert!(output.contains("metadata I/O error"), "'{statement}': {output}");
        assert_eq!(h.store, before, "'{statement}' should leave the store untouched");
    }
    assert!(!ws.join("B").exists());
    assert!(!ws.join("notes.md").exists());
    assert!(ws.join("A").is_dir());

    std::fs::remove_dir_all(&document).expect("blocker should be removable");
    assert_eq!(h.run("goto A"), "");
    let reloaded = h.reloaded();
    assert_eq!(reloaded.workspaces.len(), 1);
    assert_eq!(reloaded.workspaces[0].children.len(), 1);
    assert_eq!(reloaded.active_node, "A");
}

#[test]
fn create_workspace_requires_existing_parent_directory() {
    let mut h = Harness::new();
    let nested = h.ws("missing").join("ws");

    let output = h.run(&format!("create workspace test {}", nested.display()));
    assert!(output.contains("parent directory"), "output: {output}");
    assert!(h.store.workspaces.is_empty());
    assert!(!h.ws("missing").exists());
    assert!(h.reloaded().workspaces.is_empty());
}
