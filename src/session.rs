//! The operator question loop.
//!
//! Reads questions from the console, hands each one to the agent and prints
//! the answer. One question is processed to completion before the next is
//! read. The loop ends on `exit`, `quit` or end of input.

use crate::agent::Agent;
use crate::console::LineInput;
use crate::error::DevHelperError;
use std::io::Write;
use tracing::{info, warn};

/// Prompt shown when waiting for a question.
pub const QUESTION_PROMPT: &str = "Please enter your question:";

/// Shown while the agent works on a question.
pub const THINKING: &str = "Thinking...";

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    /// Questions that produced an answer
    pub answered: usize,
    /// Questions the agent failed on
    pub failed: usize,
}

/// Returns true if an operator line ends the session.
///
/// The line is compared as typed (terminator already removed), ignoring case.
#[must_use]
pub fn is_exit_command(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Runs the question loop until the operator exits or input ends.
///
/// `initial_question`, when present and not blank, is answered first without
/// prompting and is never treated as an exit command. Blank lines re-prompt.
/// A failed question prints `Error: ...` and the loop carries on.
///
/// # Errors
///
/// Returns a console error if reading input or writing output fails.
pub fn run_session<I, W>(
    agent: &mut dyn Agent,
    initial_question: Option<String>,
    input: &mut I,
    output: &mut W,
) -> Result<SessionStats, DevHelperError>
where
    I: LineInput + ?Sized,
    W: Write + ?Sized,
{
    let console = |e: std::io::Error| DevHelperError::console(&e);
    let mut stats = SessionStats::default();
    let mut pending = initial_question.filter(|q| !q.trim().is_empty());

    loop {
        let question = match pending.take() {
            Some(question) => question,
            None => {
                writeln!(output, "{QUESTION_PROMPT}").map_err(console)?;
                output.flush().map_err(console)?;

                let Some(line) = input.read_line().map_err(console)? else {
                    info!("end of input");
                    break;
                };
                if is_exit_command(&line) {
                    break;
                }
                if line.trim().is_empty() {
                    continue;
                }
                line
            }
        };

        writeln!(output, "{THINKING}").map_err(console)?;
        output.flush().map_err(console)?;

        match agent.ask(&question) {
            Ok(answer) => {
                stats.answered += 1;
                writeln!(output, "Answer: {answer}").map_err(console)?;
            }
            Err(e) => {
                stats.failed += 1;
                warn!(error = %e, "question failed");
                writeln!(output, "Error: {e}").map_err(console)?;
            }
        }
        output.flush().map_err(console)?;
    }

    info!(answered = stats.answered, failed = stats.failed, "session ended");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufLines;
    use std::io::Cursor;

    /// Echoes questions back, failing on "boom".
    #[derive(Debug, Default)]
    struct EchoAgent {
        asked: Vec<String>,
    }

    impl Agent for EchoAgent {
        fn ask(&mut self, question: &str) -> Result<String, DevHelperError> {
            self.asked.push(question.to_string());
            if question == "boom" {
                return Err(DevHelperError::agent("exploded"));
            }
            Ok(format!("you asked {question}"))
        }
    }

    fn run(initial: Option<&str>, lines: &str) -> (EchoAgent, String, SessionStats) {
        let mut agent = EchoAgent::default();
        let mut input = BufLines::new(Cursor::new(lines.to_string()));
        let mut output = Vec::new();
        let stats = run_session(
            &mut agent,
            initial.map(str::to_string),
            &mut input,
            &mut output,
        )
        .unwrap();
        (agent, String::from_utf8(output).unwrap(), stats)
    }

    #[test]
    fn exit_as_first_question_skips_agent() {
        let (agent, output, stats) = run(None, "exit\n");
        assert!(agent.asked.is_empty());
        assert_eq!(output, "Please enter your question:\n");
        assert_eq!(stats, SessionStats::default());
    }

    #[test]
    fn exit_is_case_insensitive() {
        for word in ["EXIT", "Quit", "quit"] {
            let (agent, _, _) = run(None, &format!("{word}\nnever asked\n"));
            assert!(agent.asked.is_empty(), "{word} did not end the session");
        }
    }

    #[test]
    fn padded_exit_is_a_question() {
        let (agent, _, _) = run(None, " exit\n");
        assert_eq!(agent.asked, vec![" exit"]);
    }

    #[test]
    fn answers_until_exit() {
        let (agent, output, stats) = run(None, "what is this?\nexit\n");
        assert_eq!(agent.asked, vec!["what is this?"]);
        assert_eq!(
            output,
            "Please enter your question:\nThinking...\nAnswer: you asked what is this?\n\
             Please enter your question:\n"
        );
        assert_eq!(stats.answered, 1);
    }

    #[test]
    fn initial_question_is_answered_first_even_if_exit() {
        let (agent, output, _) = run(Some("exit"), "");
        assert_eq!(agent.asked, vec!["exit"]);
        assert!(output.starts_with("Thinking...\nAnswer: you asked exit\n"));
    }

    #[test]
    fn blank_initial_question_prompts() {
        let (agent, output, _) = run(Some("   "), "");
        assert!(agent.asked.is_empty());
        assert_eq!(output, "Please enter your question:\n");
    }

    #[test]
    fn blank_lines_reprompt() {
        let (agent, output, _) = run(None, "\n  \nhello\n");
        assert_eq!(agent.asked, vec!["hello"]);
        assert_eq!(output.matches(QUESTION_PROMPT).count(), 4);
    }

    #[test]
    fn agent_failure_does_not_end_session() {
        let (agent, output, stats) = run(None, "boom\nagain\nquit\n");
        assert_eq!(agent.asked, vec!["boom", "again"]);
        assert!(output.contains("Error: agent failed to answer: exploded\n"));
        assert!(output.contains("Answer: you asked again\n"));
        assert_eq!(stats, SessionStats { answered: 1, failed: 1 });
    }

    #[test]
    fn end_of_input_ends_session() {
        let (agent, _, stats) = run(None, "one\n");
        assert_eq!(agent.asked, vec!["one"]);
        assert_eq!(stats.answered, 1);
    }
}
