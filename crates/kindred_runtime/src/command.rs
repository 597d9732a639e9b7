//! The shell's command language.
//!
//! One command per line. Words are separated by whitespace; double quotes
//! group words into one argument, so `add "Mary Ann" 30 female` names a
//! single member. Blank lines and lines starting with `#` are skipped.

use kindred_foundation::{Error, ErrorKind, MemberId, Result};

/// Command words, in the order `help` lists them.
pub const COMMAND_WORDS: [&str; 16] = [
    "list",
    "show",
    "add",
    "update",
    "delete",
    "marry",
    "add-child",
    "divorce",
    "remove-parent",
    "find",
    "tree",
    "lineage",
    "json",
    "help",
    "quit",
    "exit",
];

/// What a `json` command prints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JsonView {
    /// The flat display tree.
    #[default]
    Tree,
    /// The recursive lineage tree.
    Lineage,
    /// Every member record.
    List,
}

impl JsonView {
    /// Names accepted after `json`.
    pub const NAMES: [&'static str; 3] = ["tree", "lineage", "list"];

    fn parse(word: &str) -> Option<Self> {
        match word {
            "tree" => Some(Self::Tree),
            "lineage" => Some(Self::Lineage),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// List every member.
    List,
    /// Show one member.
    Show(MemberId),
    /// Create a member from raw fields; validation happens in the engine.
    Add {
        /// Raw name.
        name: String,
        /// Raw age text.
        age: String,
        /// Raw gender text.
        gender: String,
    },
    /// Change scalar fields of a member.
    Update {
        /// Member to change.
        id: MemberId,
        /// `field=value` pairs in the order given.
        fields: Vec<(String, String)>,
    },
    /// Remove a member.
    Delete(MemberId),
    /// Marry two members.
    Marry(MemberId, MemberId),
    /// Link a child to a parent.
    AddChild {
        /// The parent.
        parent: MemberId,
        /// The child.
        child: MemberId,
    },
    /// End a member's marriage.
    Divorce(MemberId),
    /// Remove a member's parent link.
    RemoveParent(MemberId),
    /// Search members by name.
    Find(String),
    /// Print the flat display tree.
    Tree,
    /// Print the lineage tree.
    Lineage,
    /// Print JSON.
    Json(JsonView),
    /// Print command help.
    Help,
    /// Leave the shell.
    Quit,
}

impl Command {
    /// Parses one line.
    ///
    /// Returns `Ok(None)` for blank lines and comments.
    ///
    /// # Errors
    ///
    /// Returns a `Command` error for unknown commands, wrong argument
    /// counts, malformed ids, or an unterminated quote.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        if line.trim_start().starts_with('#') {
            return Ok(None);
        }
        let tokens = tokenize(line)?;
        let Some((word, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match word.as_str() {
            "list" => {
                arity(args, 0, "list")?;
                Self::List
            }
            "show" => {
                arity(args, 1, "show <id>")?;
                Self::Show(args[0].parse()?)
            }
            "add" => {
                arity(args, 3, "add <name> <age> <gender>")?;
                Self::Add {
                    name: args[0].clone(),
                    age: args[1].clone(),
                    gender: args[2].clone(),
                }
            }
            "update" => {
                const USAGE: &str = "update <id> [name=..] [age=..] [gender=..]";
                let Some((id, pairs)) = args.split_first() else {
                    return Err(usage(USAGE));
                };
                let fields = pairs
                    .iter()
                    .map(|pair| {
                        pair.split_once('=')
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .ok_or_else(|| usage(USAGE))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Self::Update {
                    id: id.parse()?,
                    fields,
                }
            }
            "delete" => {
                arity(args, 1, "delete <id>")?;
                Self::Delete(args[0].parse()?)
            }
            "marry" => {
                arity(args, 2, "marry <id> <spouse-id>")?;
                Self::Marry(args[0].parse()?, args[1].parse()?)
            }
            "add-child" => {
                arity(args, 2, "add-child <parent-id> <child-id>")?;
                Self::AddChild {
                    parent: args[0].parse()?,
                    child: args[1].parse()?,
                }
            }
            "divorce" => {
                arity(args, 1, "divorce <id>")?;
                Self::Divorce(args[0].parse()?)
            }
            "remove-parent" => {
                arity(args, 1, "remove-parent <child-id>")?;
                Self::RemoveParent(args[0].parse()?)
            }
            "find" => Self::Find(args.join(" ")),
            "tree" => {
                arity(args, 0, "tree")?;
                Self::Tree
            }
            "lineage" => {
                arity(args, 0, "lineage")?;
                Self::Lineage
            }
            "json" => match args {
                [] => Self::Json(JsonView::default()),
                [view] => Self::Json(
                    JsonView::parse(view).ok_or_else(|| usage("json [tree|lineage|list]"))?,
                ),
                _ => return Err(usage("json [tree|lineage|list]")),
            },
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(Error::new(ErrorKind::Command(format!(
                    "unknown command: {other} (try 'help')"
                ))));
            }
        };
        Ok(Some(command))
    }
}

fn arity(args: &[String], expected: usize, usage_line: &str) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(usage(usage_line))
    }
}

fn usage(line: &str) -> Error {
    Error::new(ErrorKind::Command(format!("usage: {line}")))
}

/// Splits a line into words, honouring double quotes.
///
/// Quotes may appear anywhere in a word (`name="Mary Ann"`) and an empty
/// pair (`""`) yields an empty word.
///
/// # Errors
///
/// Returns a `Command` error if a quote is left open.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            // Quoted text may span lines; its breaks and tabs read as spaces.
            '\r' if in_quotes => {}
            c if c.is_control() && in_quotes => current.push(' '),
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                    quoted = false;
                }
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(Error::new(ErrorKind::Command(
            "unterminated quote".to_string(),
        )));
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Returns true if every double quote in `input` is closed.
#[must_use]
pub fn quotes_balanced(input: &str) -> bool {
    input.chars().filter(|&c| c == '"').count() % 2 == 0
}
