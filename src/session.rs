use std::io::{self, BufRead, Write};

use crate::interpreter::evaluate;
use crate::parser::{Locatable, Severity};

pub const BANNER: &str = "Calculadora simple (Ctrl+D para salir)";
pub const PROMPT: &str = "> ";

/// Read-evaluate-print driver.
///
/// Results and lexical warnings go to `out`; every other diagnostic goes to
/// `err`. Nothing carries over from one line to the next except the line
/// counter.
pub struct Session<O, E> {
    out: O,
    err: E,
    lineno: usize,
}

impl<O: Write, E: Write> Session<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err, lineno: 0 }
    }

    /// Writes the banner, optionally followed by a single prompt.
    pub fn greet(&mut self, with_prompt: bool) -> io::Result<()> {
        writeln!(self.out, "{BANNER}")?;
        if with_prompt {
            write!(self.out, "{PROMPT}")?;
        }
        self.out.flush()
    }

    /// Evaluates one line and writes what it produced. Returns the printed
    /// value, if any.
    pub fn feed(&mut self, line: &str) -> io::Result<Option<i64>> {
        self.lineno += 1;
        let evaluation = evaluate(line, self.lineno);
        for diagnostic in &evaluation.diagnostics {
            tracing::debug!(at = %diagnostic.span(), severity = ?diagnostic.severity(), "{diagnostic}");
            match diagnostic.severity() {
                Severity::Warning => writeln!(self.out, "{diagnostic}")?,
                Severity::Recoverable | Severity::Fatal => writeln!(self.err, "{diagnostic}")?,
            }
        }
        if let Some(value) = evaluation.value {
            writeln!(self.out, "Resultado: {value}")?;
        }
        self.out.flush()?;
        self.err.flush()?;
        Ok(evaluation.value)
    }

    /// Feeds every line of `input` until it is exhausted. Bytes that are not
    /// valid UTF-8 reach the tokenizer as U+FFFD.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            self.feed(&String::from_utf8_lossy(&line))?;
        }
    }

    pub fn lines_read(&self) -> usize {
        self.lineno
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
