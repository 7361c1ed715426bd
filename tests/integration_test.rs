//! Integration tests for devhelper.
//!
//! These tests drive the public API the way the binary does:
//! - File tools behind the path guard and the confirmation gate
//! - Tool dispatch by name from model tool calls
//! - The question loop sharing one console with the confirmation gate

use devhelper::console::LineInput;
use devhelper::llm::{ChatResponse, ScriptedBackend, ToolCall};
use devhelper::prelude::*;
use devhelper::tools::security::{AlwaysApprove, ScriptedGate};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io::{self, Write};
use std::rc::Rc;
use tempfile::TempDir;

/// Console input shared between the question loop and the gate.
#[derive(Debug, Clone, Default)]
struct SharedInput(Rc<RefCell<VecDeque<String>>>);

impl SharedInput {
    fn new(lines: &[&str]) -> Self {
        Self(Rc::new(RefCell::new(
            lines.iter().map(|l| (*l).to_string()).collect(),
        )))
    }
}

impl LineInput for SharedInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.0.borrow_mut().pop_front())
    }
}

/// Console output shared between the question loop and the gate.
#[derive(Debug, Clone, Default)]
struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Project with `a.txt`, `b.txt` and `sub/inner.txt`.
fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "first").unwrap();
    fs::write(dir.path().join("b.txt"), "second").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("inner.txt"), "inner").unwrap();
    dir
}

fn root(dir: &TempDir) -> ProjectRoot {
    ProjectRoot::new(dir.path()).unwrap()
}

fn tool_call(id: &str, name: &str, arguments: Value) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

#[test]
fn test_list_root_is_one_level() {
    let dir = sample_project();
    let tools = FileTools::new(root(&dir), AlwaysApprove);

    let mut names = tools.list_files(Some("/")).unwrap();
    names.sort();
    assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);
}

#[test]
fn test_read_file_returns_exact_content() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    let content = "fn main() {\r\n    println!(\"hi\");\n}\n\n";
    fs::write(dir.path().join("src").join("Main.txt"), content).unwrap();
    let tools = FileTools::new(root(&dir), AlwaysApprove);

    assert_eq!(tools.read_file("/src/Main.txt").unwrap(), content);
    assert_eq!(tools.list_files(Some("src")).unwrap(), vec!["src/Main.txt"]);
}

#[test]
fn test_traversal_rejected_before_prompt() {
    let dir = sample_project();
    let gate = ScriptedGate::new(["yes"]);
    let tools = FileTools::new(root(&dir), gate.clone());

    let err = tools.write_file("../secret.txt", "x").unwrap_err();
    assert!(err.is_invalid_path());
    assert_eq!(gate.times_asked(), 0);
    assert!(!dir.path().parent().unwrap().join("secret.txt").exists());

    let err = tools.delete_file("sub/../a.txt").unwrap_err();
    assert!(err.is_invalid_path());
    assert!(dir.path().join("a.txt").exists());
}

#[test]
fn test_refused_mutations_change_nothing() {
    let dir = sample_project();
    let gate = ScriptedGate::new(["No", "", "ye"]);
    let tools = FileTools::new(root(&dir), gate.clone());

    assert!(tools.write_file("a.txt", "overwritten").unwrap_err().is_cancelled());
    assert!(tools.write_file("new.txt", "x").unwrap_err().is_cancelled());
    assert!(tools.delete_file("b.txt").unwrap_err().is_cancelled());

    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "first");
    assert!(!dir.path().join("new.txt").exists());
    assert!(dir.path().join("b.txt").exists());
    assert_eq!(gate.times_asked(), 3);
}

#[test]
fn test_confirmation_texts() {
    let dir = sample_project();
    let gate = ScriptedGate::new(["y", "YES"]);
    let tools = FileTools::new(root(&dir), gate.clone());

    tools.write_file("/notes.md", "hello").unwrap();
    tools.delete_file("b.txt").unwrap();

    let asked = gate.asked();
    assert_eq!(asked[0].0, "Update file 'notes.md' with content:hello");
    assert_eq!(
        asked[0].1,
        "Are you sure you want to update the content of notes.md? (yes/no)"
    );
    assert_eq!(asked[1].0, "Delete file 'b.txt'");
    assert_eq!(asked[1].1, "Are you sure you want to delete b.txt? (yes/no)");
    assert_eq!(fs::read_to_string(dir.path().join("notes.md")).unwrap(), "hello");
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn test_path_guard_properties() {
    for input in [None, Some(""), Some("   "), Some("/")] {
        assert!(PathGuard::resolve(input).unwrap().is_root(), "{input:?}");
    }
    for input in ["..", "../x", "a/../b", "a..b", "/.."] {
        assert!(PathGuard::resolve(Some(input)).is_err(), "{input}");
    }
    for input in ["src/main.rs", "/src/main.rs", "a b.txt", "./x"] {
        let once = PathGuard::resolve(Some(input)).unwrap();
        let twice = PathGuard::resolve(Some(once.as_str())).unwrap();
        assert_eq!(once, twice, "{input}");
    }
}

#[test]
fn test_agent_reads_project_and_answers() {
    let dir = sample_project();
    let backend = ScriptedBackend::new([
        ChatResponse::with_tool_calls(vec![tool_call("c1", "list_files", json!({"directory": "/"}))]),
        ChatResponse::with_tool_calls(vec![tool_call("c2", "read_file", json!({"filename": "sub/inner.txt"}))]),
        ChatResponse::text("sub/inner.txt contains 'inner'."),
    ]);
    let tools = BuiltinTools::all(FileTools::new(root(&dir), AlwaysApprove));
    let mut agent = ToolCallingAgent::new(backend.clone(), tools);

    let answer = agent.ask("What is in the sub directory?").unwrap();
    assert_eq!(answer, "sub/inner.txt contains 'inner'.");

    let last = backend.requests().pop().unwrap();
    let read: Value = serde_json::from_str(&last.last().unwrap().content).unwrap();
    assert_eq!(read["content"], "inner");
}

#[test]
fn test_session_with_confirmed_write_on_shared_console() {
    let dir = sample_project();
    let input = SharedInput::new(&["add a readme", "y", "quit", "never read"]);
    let output = SharedOutput::default();

    let gate = ConsoleGate::new(input.clone(), output.clone());
    let tools = BuiltinTools::all(FileTools::new(root(&dir), gate));
    let backend = ScriptedBackend::new([
        ChatResponse::with_tool_calls(vec![tool_call(
            "c1",
            "write_file",
            json!({"filename": "README.md", "content": "# Demo"}),
        )]),
        ChatResponse::text("Done."),
    ]);
    let mut agent = ToolCallingAgent::new(backend, tools);

    let mut session_input = input.clone();
    let mut session_output = output.clone();
    let stats = run_session(&mut agent, None, &mut session_input, &mut session_output).unwrap();

    assert_eq!(stats.answered, 1);
    assert_eq!(
        output.text(),
        "Please enter your question:\n\
         Thinking...\n\
         Update file 'README.md' with content:# Demo\n\
         Are you sure you want to update the content of README.md? (yes/no)\n\
         Answer: Done.\n\
         Please enter your question:\n"
    );
    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), "# Demo");
    assert_eq!(input.0.borrow().len(), 1);
}

#[test]
fn test_session_exit_first_never_calls_agent() {
    let dir = sample_project();
    let backend = ScriptedBackend::default();
    let tools = BuiltinTools::all(FileTools::new(root(&dir), AlwaysApprove));
    let mut agent = ToolCallingAgent::new(backend.clone(), tools);

    let mut input = SharedInput::new(&["exit"]);
    let mut output = SharedOutput::default();
    run_session(&mut agent, None, &mut input, &mut output).unwrap();

    assert_eq!(backend.request_count(), 0);
    assert_eq!(output.text(), "Please enter your question:\n");
}

#[test]
fn test_session_survives_provider_failure() {
    let dir = sample_project();
    let backend = ScriptedBackend::default();
    backend.push(Err(LLMError::network("connection refused")));
    backend.push(Ok(ChatResponse::text("Back online.")));
    let tools = BuiltinTools::all(FileTools::new(root(&dir), AlwaysApprove)).without_mutating();
    let mut agent = ToolCallingAgent::new(backend, tools);

    let mut input = SharedInput::new(&["second try"]);
    let mut output = SharedOutput::default();
    let stats = run_session(
        &mut agent,
        Some("first try".to_string()),
        &mut input,
        &mut output,
    )
    .unwrap();

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.answered, 1);
    let text = output.text();
    assert!(text.starts_with("Thinking...\nError: model provider error:"));
    assert!(text.contains("connection refused"));
    assert!(text.contains("Answer: Back online.\n"));
}

#[test]
fn test_invocation_ids_are_unique() {
    let a = InvocationId::new();
    let b = InvocationId::new();
    assert_ne!(a, b);
    assert!(a.to_string().starts_with("inv_"));
}

#[test]
fn test_read_only_config_offers_no_mutating_tools() {
    let dir = sample_project();
    let config = DevHelperConfig {
        read_only: true,
        ..Default::default()
    };
    let tools = config
        .tool_registry(FileTools::new(root(&dir), AlwaysApprove))
        .unwrap();
    let backend = ScriptedBackend::new([
        ChatResponse::with_tool_calls(vec![tool_call("c1", "delete_file", json!({"filename": "a.txt"}))]),
        ChatResponse::text("I cannot delete files."),
    ]);
    let mut agent = ToolCallingAgent::new(backend.clone(), tools);

    assert_eq!(agent.ask("Delete a.txt").unwrap(), "I cannot delete files.");
    assert_eq!(backend.offered_tools()[0], vec!["list_files", "read_file"]);
    assert!(dir.path().join("a.txt").exists());

    let reply: Value = serde_json::from_str(&backend.requests()[1][3].content).unwrap();
    assert_eq!(reply["error"], "unknown_tool");
}
