//! Integration tests for the shell
//!
//! Drives the shell with a scripted editor and checks the family it leaves
//! behind, and runs command files from disk.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use kindred_engine::{Family, SharedFamily};
use kindred_foundation::{ErrorKind, MemberId, Result};
use kindred_runtime::{LineEditor, ReadResult, Repl, ReplConfig, Reply};

/// Feeds fixed lines, then EOF, and records the prompts it was shown.
struct ScriptedEditor {
    lines: VecDeque<ReadResult>,
    prompts: Rc<RefCell<Vec<String>>>,
}

impl ScriptedEditor {
    fn new(script: Vec<ReadResult>) -> Self {
        Self {
            lines: script.into(),
            prompts: Rc::default(),
        }
    }

    fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| ReadResult::Line((*l).to_string())).collect())
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.lines.pop_front().unwrap_or(ReadResult::Eof))
    }

    fn add_history(&mut self, _line: &str) {}
}

fn shell(editor: ScriptedEditor, family: Family) -> Repl<ScriptedEditor> {
    Repl::with_editor(editor, SharedFamily::new(family)).without_banner()
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("kindred-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// Interactive Loop
// =============================================================================

#[test]
fn session_builds_a_family() {
    let script = [
        r#"add "Ann Lee" 34 female"#,
        "add Ben 36 male",
        "marry 1 2",
        "add Cat 4 female",
        "add-child 1 3",
        "update 3 age=5",
    ];
    let mut repl = shell(ScriptedEditor::lines(&script), Family::new());
    repl.run().unwrap();

    let family = repl.family();
    assert_eq!(family.list().len(), 3);
    assert_eq!(family.get(MemberId::new(2)).unwrap().spouse_id, Some(MemberId::new(1)));
    let cat = family.get(MemberId::new(3)).unwrap();
    assert_eq!(cat.parent_id, Some(MemberId::new(1)));
    assert_eq!(cat.age, 5);
}

#[test]
fn errors_do_not_end_the_session() {
    let script = ["marry 1 2", "show 99", "delete 4", "update 1 age=0"];
    let mut repl = shell(ScriptedEditor::lines(&script), Family::sample().unwrap());
    repl.run().unwrap();

    let family = repl.family();
    assert!(family.get(MemberId::new(4)).is_err());
    assert_eq!(family.get(MemberId::new(1)).unwrap().age, 40);
}

#[test]
fn ctrl_c_discards_the_line_and_keeps_going() {
    let editor = ScriptedEditor::new(vec![
        ReadResult::Interrupted,
        ReadResult::Line("delete 2".into()),
    ]);
    let mut repl = shell(editor, Family::sample().unwrap());
    repl.run().unwrap();
    assert!(repl.family().get(MemberId::new(2)).is_err());
}

#[test]
fn custom_prompts_are_used() {
    let editor = ScriptedEditor::lines(&[r#"find "Doe"#, r#"""#]);
    let prompts = Rc::clone(&editor.prompts);
    let mut repl = shell(editor, Family::sample().unwrap()).with_config(
        ReplConfig::default()
            .with_prompt("fam> ")
            .with_continuation_prompt("...> ")
            .without_banner(),
    );
    repl.run().unwrap();

    // Open quote, its closing line, then EOF at a fresh prompt.
    assert_eq!(*prompts.borrow(), ["fam> ", "...> ", "fam> "]);
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn tree_commands_render_text() {
    let mut repl = shell(ScriptedEditor::lines(&[]), Family::sample().unwrap());

    let Reply::Text(lineage) = repl.eval("lineage").unwrap() else {
        panic!("expected text");
    };
    assert!(lineage.starts_with("Family Tree\n"));
    assert!(lineage.contains("│   └── Bob Doe (8, male, parent: John Doe)"));
}

#[test]
fn json_tree_has_front_end_shape() {
    let mut repl = shell(ScriptedEditor::lines(&[]), Family::sample().unwrap());

    let Reply::Text(json) = repl.eval("json tree").unwrap() else {
        panic!("expected text");
    };
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Family Tree");
    assert_eq!(value["children"][2]["attributes"]["Parent Name"], "John Doe");
    assert_eq!(value["children"][1]["attributes"]["Spouse Name"], "John Doe");
}

#[test]
fn json_list_uses_member_records() {
    let mut repl = shell(ScriptedEditor::lines(&[]), Family::sample().unwrap());

    let Reply::Text(json) = repl.eval("json list").unwrap() else {
        panic!("expected text");
    };
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 4);
    assert_eq!(value[0]["childrenIds"], serde_json::json!([3, 4]));
}

#[test]
fn help_lists_every_command() {
    let mut repl = shell(ScriptedEditor::lines(&[]), Family::new());
    let Reply::Text(help) = repl.eval("help").unwrap() else {
        panic!("expected text");
    };
    for word in kindred_runtime::command::COMMAND_WORDS {
        assert!(help.contains(word), "help is missing {word}");
    }
}

// =============================================================================
// Command Files
// =============================================================================

#[test]
fn command_file_runs_every_line() {
    let path = temp_file(
        "build.kin",
        "# two people\nadd Ann 30 female\nadd Ben 31 male\n\nmarry 1 2\n",
    );
    let mut repl = shell(ScriptedEditor::lines(&[]), Family::new());
    repl.eval_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(repl.family().get(MemberId::new(1)).unwrap().spouse_id, Some(MemberId::new(2)));
}

#[test]
fn command_file_error_names_file_and_line() {
    let path = temp_file("broken.kin", "add Ann 30 female\nadd-child 1 1\nadd Ben 2 male\n");
    let mut repl = shell(ScriptedEditor::lines(&[]), Family::new());
    let err = repl.eval_file(&path).unwrap_err();
    fs::remove_file(&path).ok();

    assert!(matches!(err.kind, ErrorKind::InvalidRelationship(_)));
    let context = err.context.unwrap();
    assert_eq!(context.line, Some(2));
    assert_eq!(context.source, Some(path.display().to_string()));
    // Lines after the failure never ran.
    assert_eq!(repl.family().list().len(), 1);
}
