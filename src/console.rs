use std::io::{self, BufRead, Write};

use crate::commands::{Interpreter, VERSION};
use crate::store::MetadataStore;

const PROMPT: &str = ">>> ";

/// Line-oriented stand-in for a raw terminal loop: each line read from
/// `input` is one statement. `exit` and `quit` end the session.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    interactive: bool,
    interpreter: &Interpreter,
    store: &mut MetadataStore,
) -> io::Result<()> {
    if interactive {
        writeln!(out, "notewolfy v{VERSION}")?;
        writeln!(out, "Creating organized notes is just easy with notewolfy")?;
        writeln!(out, "Type 'help' to list the commands.")?;
    }

    let mut line = String::new();
    loop {
        if interactive {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if is_exit(&line) {
            writeln!(out, "Thank you for using notewolfy!")?;
            break;
        }
        interpreter.execute(&line, store, &mut *out);
        out.flush()?;
    }
    Ok(())
}

fn is_exit(line: &str) -> bool {
    matches!(line.trim(), "exit" | "quit")
}
