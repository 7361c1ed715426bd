//! Operator confirmation for mutating tool calls.

use crate::console::LineInput;
use crate::tools::error::ToolError;
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// Asks the operator to approve a mutating action.
///
/// Called exactly once per write or delete, after the path was accepted and
/// before the filesystem is touched. Implementations must not cache
/// decisions between calls.
pub trait ConfirmationGate: fmt::Debug {
    /// Blocks until the operator answers.
    ///
    /// # Errors
    ///
    /// Returns a `UserCancelled` [`ToolError`] unless the answer is an explicit
    /// yes, or an `Io` error if the console could not be used.
    fn confirm(&self, action: &str, prompt: &str) -> Result<(), ToolError>;
}

/// Returns true iff the answer is `y` or `yes`, ignoring case and
/// surrounding whitespace.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Confirmation over an interactive console.
///
/// Prints the action and the prompt, then reads one line. End of input and
/// console failures count as a refusal. There is no timeout.
pub struct ConsoleGate<I, W> {
    input: Mutex<I>,
    output: Mutex<W>,
}

impl ConsoleGate<io::Stdin, io::Stdout> {
    /// A gate bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<I: LineInput, W: Write> ConsoleGate<I, W> {
    /// Creates a gate over the given input and output.
    pub fn new(input: I, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    /// Consumes the gate and returns its output, for inspection in tests.
    pub fn into_output(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<I, W> fmt::Debug for ConsoleGate<I, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleGate").finish_non_exhaustive()
    }
}

impl<I: LineInput, W: Write> ConsoleGate<I, W> {
    fn ask(&self, action: &str, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut out = self.output.lock().unwrap_or_else(PoisonError::into_inner);
            writeln!(out, "{action}")?;
            writeln!(out, "{prompt}")?;
            out.flush()?;
        }

        self.input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read_line()
    }
}

impl<I: LineInput, W: Write> ConfirmationGate for ConsoleGate<I, W> {
    fn confirm(&self, action: &str, prompt: &str) -> Result<(), ToolError> {
        match self.ask(action, prompt) {
            Ok(Some(answer)) if is_affirmative(&answer) => Ok(()),
            Ok(_) => Err(ToolError::cancelled(action)),
            Err(e) => {
                warn!(error = %e, "console unavailable; treating confirmation as refused");
                Err(ToolError::cancelled(action))
            }
        }
    }
}

/// Approves everything without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysApprove;

impl ConfirmationGate for AlwaysApprove {
    fn confirm(&self, _action: &str, _prompt: &str) -> Result<(), ToolError> {
        Ok(())
    }
}

/// Refuses everything without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRefuse;

impl ConfirmationGate for AlwaysRefuse {
    fn confirm(&self, action: &str, _prompt: &str) -> Result<(), ToolError> {
        Err(ToolError::cancelled(action))
    }
}

/// Replays a fixed list of answers and records every prompt it was shown.
///
/// Clones share state, so a test can hand one clone to `FileTools` and keep
/// another to inspect what was asked. Once the answers run out every further
/// request is refused.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGate {
    state: Arc<Mutex<ScriptedState>>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    answers: VecDeque<String>,
    asked: Vec<(String, String)>,
}

impl ScriptedGate {
    /// Creates a gate that will give `answers` in order.
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptedState {
                answers: answers.into_iter().map(Into::into).collect(),
                asked: Vec::new(),
            })),
        }
    }

    /// The `(action, prompt)` pairs shown so far.
    #[must_use]
    pub fn asked(&self) -> Vec<(String, String)> {
        self.lock().asked.clone()
    }

    /// Number of confirmations requested so far.
    #[must_use]
    pub fn times_asked(&self) -> usize {
        self.lock().asked.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConfirmationGate for ScriptedGate {
    fn confirm(&self, action: &str, prompt: &str) -> Result<(), ToolError> {
        let mut state = self.lock();
        state.asked.push((action.to_string(), prompt.to_string()));

        match state.answers.pop_front() {
            Some(answer) if is_affirmative(&answer) => Ok(()),
            _ => Err(ToolError::cancelled(action)),
        }
    }
}
