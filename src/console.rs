//! Line-oriented operator input.
//!
//! The question loop and the confirmation gate both read from the operator
//! console. [`LineInput`] lets them share `stdin` without double buffering and
//! lets tests feed scripted lines instead.

use std::io::{self, BufRead};

/// A source of operator input lines.
pub trait LineInput {
    /// Reads one line with the line terminator removed.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the read fails.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

impl LineInput for io::Stdin {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let read = io::Stdin::read_line(self, &mut buf)?;
        Ok((read > 0).then(|| strip_terminator(buf)))
    }
}

/// Adapts any `BufRead` into a [`LineInput`].
#[derive(Debug)]
pub struct BufLines<R>(pub R);

impl<R: BufRead> LineInput for BufLines<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let read = self.0.read_line(&mut buf)?;
        Ok((read > 0).then(|| strip_terminator(buf)))
    }
}

impl<R: BufRead> BufLines<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self(reader)
    }
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_lines_without_terminators() {
        let mut input = BufLines::new(Cursor::new("first\r\nsecond\nlast"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn keeps_inner_whitespace() {
        let mut input = BufLines::new(Cursor::new("  yes \n"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("  yes "));
    }

    #[test]
    fn empty_line_is_not_end_of_input() {
        let mut input = BufLines::new(Cursor::new("\n"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(input.read_line().unwrap(), None);
    }
}
