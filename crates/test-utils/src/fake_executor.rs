use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use logpatch::errors::{LogpatchError, Result};
use logpatch::exec::{ExecutorBackend, LineFuture, LineSource};

/// Canned behaviour for one command.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub lines: Vec<String>,
    pub exit_code: i32,
}

impl Script {
    pub fn ok(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            exit_code: 0,
        }
    }

    pub fn failing(lines: &[&str], exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::ok(lines)
        }
    }
}

/// A fake executor that:
/// - records which commands were started, in order
/// - replays a scripted output / exit code for each command.
///
/// Commands without a script succeed with no output.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    scripts: HashMap<String, Script>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(mut self, command: &str, script: Script) -> Self {
        self.scripts.insert(command.to_string(), script);
        self
    }

    /// Shared handle to the list of started commands.
    pub fn executed(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.executed)
    }

    pub fn count_of(&self, command: &str) -> usize {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == command)
            .count()
    }
}

impl ExecutorBackend for ScriptedExecutor {
    fn spawn(&self, command: &str) -> Result<Box<dyn LineSource>> {
        self.executed.lock().unwrap().push(command.to_string());

        let script = self.scripts.get(command).cloned().unwrap_or_default();
        Ok(Box::new(ScriptedLines {
            command: command.to_string(),
            lines: script.lines.into_iter(),
            exit_code: Some(script.exit_code),
        }))
    }
}

struct ScriptedLines {
    command: String,
    lines: std::vec::IntoIter<String>,
    exit_code: Option<i32>,
}

impl LineSource for ScriptedLines {
    fn next_line(&mut self) -> LineFuture<'_> {
        let result = match self.lines.next() {
            Some(line) => Ok(Some(line)),
            None => match self.exit_code.take() {
                Some(0) | None => Ok(None),
                Some(exit_code) => Err(LogpatchError::CommandFailed {
                    command: self.command.clone(),
                    exit_code,
                }),
            },
        };
        Box::pin(async move { result })
    }

    fn command(&self) -> &str {
        &self.command
    }
}
