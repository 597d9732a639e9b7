//! The interactive shell.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use kindred_engine::{Family, SharedFamily};
use kindred_foundation::{Error, ErrorContext, ErrorKind, Result};
use kindred_storage::MemberInput;
use tracing::{debug, info};

use crate::command::{Command, JsonView, quotes_balanced};
use crate::config::ReplConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::render;

const HELP: &str = "\
Commands:
  list                                         List every member
  show <id>                                    Show one member
  add <name> <age> <gender>                    Add a member (quote names with spaces)
  update <id> [name=..] [age=..] [gender=..]   Change a member's details
  delete <id>                                  Remove a member
  marry <id> <spouse-id>                       Marry two members
  add-child <parent-id> <child-id>             Make one member another's child
  divorce <id>                                 End a marriage
  remove-parent <child-id>                     Clear a member's parent
  find <text>                                  Search names
  tree                                         Show every member under the root
  lineage                                      Show members nested by parent
  json [tree|lineage|list]                     Print JSON
  help                                         Show this help
  quit | exit                                  Leave (Ctrl+D also works)";

/// What evaluating one line produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Text to print.
    Text(String),
    /// Nothing to print (blank line or comment).
    Silent,
    /// The user asked to leave.
    Quit,
}

/// The interactive shell.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The family every command operates on.
    family: SharedFamily,

    /// Prompts and banner.
    config: ReplConfig,
}

impl Repl<RustylineEditor> {
    /// Creates a shell over `family` with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(family: SharedFamily) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, family))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a shell with the given editor.
    pub fn with_editor(editor: E, family: SharedFamily) -> Self {
        Self {
            editor,
            family,
            config: ReplConfig::default(),
        }
    }

    /// Replaces the prompt and banner settings.
    #[must_use]
    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.config.show_banner = false;
        self
    }

    /// Returns the shared family handle.
    #[must_use]
    pub fn family(&self) -> &SharedFamily {
        &self.family
    }

    /// Runs the loop until EOF or `quit`.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input fails; command errors are
    /// printed and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        if self.config.show_banner {
            print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if matches!(e.kind, ErrorKind::Internal(_)) => return Err(e),
                Err(e) => eprintln!("\x1b[31m{}\x1b[0m", render::error(&e)),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };
        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        match self.eval(&input)? {
            Reply::Text(text) => println!("{text}"),
            Reply::Silent => {}
            Reply::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Reads one command, continuing onto further lines while a quote is
    /// open.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = match self.editor.read_line(&self.config.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => return Ok(Some(String::new())),
            ReadResult::Eof => return Ok(None),
        };

        while !quotes_balanced(&input) {
            match self.editor.read_continuation(&self.config.continuation_prompt)? {
                ReadResult::Line(line) => {
                    // A line break inside quotes reads as a space.
                    input.push(' ');
                    input.push_str(&line);
                }
                ReadResult::Interrupted => {
                    println!("\nInput cancelled.");
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    return Err(Error::new(ErrorKind::Command(
                        "unexpected end of input inside a quote".to_string(),
                    )));
                }
            }
        }
        Ok(Some(input))
    }

    /// Parses and runs one command line.
    ///
    /// # Errors
    ///
    /// Returns the parse error or the failing operation's error.
    pub fn eval(&mut self, line: &str) -> Result<Reply> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Reply::Silent),
        }
    }

    /// Runs a parsed command.
    ///
    /// # Errors
    ///
    /// Returns the failing operation's error.
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        debug!(?command, "executing command");
        let family = &self.family;

        let text = match command {
            Command::List => render::member_list(&family.list()),
            Command::Show(id) => render::member_line(&family.get(id)?),
            Command::Add { name, age, gender } => {
                let input = MemberInput::new().name(name).age(age).gender(gender);
                render::member_line(&family.create(input)?)
            }
            Command::Update { id, fields } => {
                let mut input = MemberInput::new();
                for (field, value) in fields {
                    input.set(&field, value)?;
                }
                render::member_line(&family.update(id, input)?)
            }
            Command::Delete(id) => family.delete(id)?.message,
            Command::Marry(a, b) => render::member_line(&family.marry(a, b)?),
            Command::AddChild { parent, child } => {
                render::member_line(&family.add_child(parent, child)?)
            }
            Command::Divorce(id) => render::member_line(&family.divorce(id)?),
            Command::RemoveParent(id) => render::member_line(&family.remove_parent(id)?),
            Command::Find(term) => {
                let found = family.read(|f| f.search(&term));
                if found.is_empty() {
                    format!("No members match '{term}'.")
                } else {
                    render::member_list(&found)
                }
            }
            Command::Tree => render::tree(&family.display_tree()),
            Command::Lineage => render::tree(&family.lineage_tree()),
            Command::Json(JsonView::Tree) => render::json_tree(&family.display_tree())?,
            Command::Json(JsonView::Lineage) => render::json_tree(&family.lineage_tree())?,
            Command::Json(JsonView::List) => render::json(&family.list())?,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }

    /// Runs commands from source text, one per line, and collects what they
    /// print.
    ///
    /// Stops at the first failing line or at `quit`.
    ///
    /// # Errors
    ///
    /// Returns the first error, tagged with `origin` and the line number.
    pub fn eval_source(&mut self, source: &str, origin: &str) -> Result<Vec<String>> {
        let mut output = Vec::new();
        for (index, line) in source.lines().enumerate() {
            let reply = self.eval(line).map_err(|e| {
                e.with_context(ErrorContext::new().with_source(origin).with_line(index + 1))
            })?;
            match reply {
                Reply::Text(text) => output.push(text),
                Reply::Silent => {}
                Reply::Quit => break,
            }
        }
        Ok(output)
    }

    /// Runs a command file and prints its output.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be read, or the first
    /// failing command's error.
    pub fn eval_file(&mut self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        })?;

        let output = self.eval_source(&source, &path.display().to_string())?;
        for text in &output {
            println!("{text}");
        }
        info!(file = %path.display(), members = self.family.read(Family::len), "ran command file");
        Ok(())
    }
}

fn print_banner() {
    println!("\x1b[1;36mKindred\x1b[0m family tree shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands. Use Ctrl+D to exit.\n");
    let _ = io::stdout().flush();
}
