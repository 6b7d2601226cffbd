use std::cell::RefCell;

use crate::parser::{parse_line, tokenize_line, Diagnostic, ParserState, Report, Span, Token};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Times => '*',
            Self::Divide => '/',
        }
    }

    /// Integer arithmetic; division truncates toward zero. `None` when the
    /// result does not fit in an `i64` or the divisor is zero.
    pub fn apply(self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            Self::Plus => lhs.checked_add(rhs),
            Self::Minus => lhs.checked_sub(rhs),
            Self::Times => lhs.checked_mul(rhs),
            Self::Divide => lhs.checked_div(rhs),
        }
    }
}

/// Reduces `lhs op rhs` while a line is being parsed.
///
/// Division by zero is reported and evaluates to `0`, so the enclosing
/// reductions carry on. Overflow is reported as fatal for the line; the value
/// returned in that case is never printed.
pub(crate) fn reduce(state: ParserState, op: Operator, span: Span, lhs: i64, rhs: i64) -> i64 {
    if op == Operator::Divide && rhs == 0 {
        state.report(Diagnostic::DivisionByZero { span });
        return 0;
    }
    match op.apply(lhs, rhs) {
        Some(value) => value,
        None => {
            state.report(Diagnostic::Overflow {
                expression: format!("{lhs} {} {rhs}", op.symbol()),
                span,
            });
            0
        }
    }
}

/// Outcome of evaluating a single line of input.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The value to print, if the line produced one.
    pub value: Option<i64>,
    /// Everything reported while scanning and reducing, in the order it happened.
    pub diagnostics: Vec<Diagnostic>,
}

/// Evaluates one line of input. `lineno` only feeds the locations carried by
/// diagnostics.
///
/// All state lives for the duration of the call, so any number of lines can
/// be evaluated independently.
pub fn evaluate(line: &str, lineno: usize) -> Evaluation {
    let report = RefCell::new(Report::default());
    let state = ParserState::new(&report);
    let tokens: Vec<Token> = tokenize_line(line, lineno, state);
    let value = if tokens.iter().all(Token::is_terminator) {
        None
    } else {
        parse_line(&tokens, state)
    };
    let report = report.into_inner();
    let value = value.filter(|_| !report.has_fatal());
    let diagnostics = report.into_diagnostics();
    tracing::debug!(lineno, ?value, diagnostics = diagnostics.len(), "evaluated line");
    Evaluation { value, diagnostics }
}
