//! Shared helpers for create-cp-core integration tests

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use create_cp_core::fetch::FetchProgress;
use create_cp_core::resolver::{Choice, Prompter, TextPrompt};
use create_cp_core::Result;
use std::cell::RefCell;
use std::collections::VecDeque;
use tempfile::TempDir;

/// A scripted answer
#[derive(Debug)]
pub enum Reply {
    Text(Option<&'static str>),
    Confirm(Option<bool>),
    Select(Option<usize>),
}

/// Prompter that answers from a script and records every message
#[derive(Default)]
pub struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    pub seen: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: replies.into(),
            seen: Vec::new(),
        }
    }

    fn next(&mut self, message: &str) -> Reply {
        self.seen.push(message.to_string());
        self.replies
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {}", message))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, prompt: &TextPrompt) -> Result<Option<String>> {
        match self.next(&prompt.message) {
            Reply::Text(Some(value)) if value.is_empty() => Ok(prompt.initial.clone()),
            Reply::Text(value) => Ok(value.map(str::to_string)),
            other => panic!("expected text reply, got {:?}", other),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<Option<bool>> {
        match self.next(message) {
            Reply::Confirm(value) => Ok(value),
            other => panic!("expected confirm reply, got {:?}", other),
        }
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Option<usize>> {
        match self.next(message) {
            Reply::Select(Some(index)) => {
                assert!(index < choices.len(), "choice {} out of range", index);
                Ok(Some(index))
            }
            Reply::Select(None) => Ok(None),
            other => panic!("expected select reply, got {:?}", other),
        }
    }
}

/// Progress reporter that records events as `kind:message`
#[derive(Default)]
pub struct RecordingProgress {
    pub events: RefCell<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl FetchProgress for RecordingProgress {
    fn start(&self, message: &str) {
        self.events.borrow_mut().push(format!("start:{}", message));
    }

    fn succeed(&self, message: &str) {
        self.events.borrow_mut().push(format!("succeed:{}", message));
    }

    fn fail(&self, message: &str) {
        self.events.borrow_mut().push(format!("fail:{}", message));
    }
}

/// Scratch area holding a working directory and a bin directory for mocks
pub struct Sandbox {
    _temp: TempDir,
    pub cwd: Utf8PathBuf,
    pub bin: Utf8PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 temp dir");
        let cwd = root.join("work");
        let bin = root.join("bin");
        std::fs::create_dir_all(&cwd).unwrap();
        std::fs::create_dir_all(&bin).unwrap();
        Self {
            _temp: temp,
            cwd,
            bin,
        }
    }

    /// Path of the invocation log written by mock executables
    pub fn log_path(&self, name: &str) -> Utf8PathBuf {
        self.bin.join(format!("{}.log", name))
    }

    pub fn log(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.log_path(name)).ok()
    }
}

/// Write a mock VCS client.
///
/// The mock logs its arguments, creates the last argument as a directory
/// holding a `package.json` named "template", runs `extra`, then exits
/// with `exit_code`.
pub fn create_mock_vcs(sandbox: &Sandbox, name: &str, extra: &str, exit_code: i32) -> Utf8PathBuf {
    let script_path = sandbox.bin.join(name);
    let script = format!(
        r#"#!/bin/sh
echo "$*" >> "{log}"
for target; do :; done
mkdir -p "$target"
printf '%s' '{{"name":"template","version":"0.0.0","private":true}}' > "$target/package.json"
{extra}
exit {exit_code}
"#,
        log = sandbox.log_path(name),
        extra = extra,
        exit_code = exit_code,
    );

    std::fs::write(&script_path, script).unwrap();
    set_executable(&script_path);
    script_path
}

fn set_executable(path: &Utf8Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

pub fn read_manifest_name(root: &Utf8Path) -> String {
    let content = std::fs::read_to_string(root.join("package.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    value["name"].as_str().unwrap().to_string()
}
