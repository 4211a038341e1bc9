//! Cancellable line prompts
//!
//! Every question either yields an answer or [`Prompted::Cancelled`] when the
//! user types `back`. End of input is [`CityScoutError::InputClosed`].

use std::io::{BufRead, Write};

use crate::{CityScoutError, Result};

/// Word that cancels the current prompt
pub const CANCEL_WORD: &str = "back";

/// Result of one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted<T> {
    Value(T),
    Cancelled,
}

impl<T> Prompted<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Prompted<U> {
        match self {
            Prompted::Value(v) => Prompted::Value(f(v)),
            Prompted::Cancelled => Prompted::Cancelled,
        }
    }
}

/// Line-oriented user interaction
pub trait Prompter {
    /// Show `question` and wait for one line of input
    fn ask(&mut self, question: &str) -> Result<Prompted<String>>;

    /// Show a line of text
    fn say(&mut self, text: &str) -> Result<()>;
}

/// Prompter over any reader and writer (stdin/stdout in the binary)
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect captured output
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<Prompted<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        // undecodable bytes are replaced, the answer is still a value
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(CityScoutError::InputClosed);
        }

        let line = String::from_utf8_lossy(&line);
        let answer = line.trim();
        if answer.eq_ignore_ascii_case(CANCEL_WORD) {
            Ok(Prompted::Cancelled)
        } else {
            Ok(Prompted::Value(answer.to_string()))
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}
