use std::cell::RefCell;

use super::error::Diagnostic;
use super::locations::Span;
use super::tokenizer::{Token, TokenType};

/// Deepest parenthesis nesting a line may use. Each level costs a stack of
/// combinator frames, so the grammar refuses to go further instead of
/// overflowing the stack.
pub const MAX_NESTING: usize = 128;

/// Everything the tokenizer and the grammar learn about one line while
/// working through it.
#[derive(Debug, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
    // Remaining token count at the furthest failed match, and the token there.
    furthest: Option<(usize, Token)>,
    depth: usize,
    too_deep: bool,
}

impl Report {
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }
    #[cfg(test)]
    pub(crate) fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[derive(Debug)]
pub enum ParseResult<'a, Output> {
    Ok((Output, ParserInput<'a>)),
    Err,
}

#[derive(Debug, Clone, Copy)]
pub struct ParserState<'a>(&'a RefCell<Report>);

impl<'a> ParserState<'a> {
    pub fn new(report: &'a RefCell<Report>) -> Self {
        Self(report)
    }

    pub(crate) fn report(&self, diagnostic: Diagnostic) {
        self.0.borrow_mut().diagnostics.push(diagnostic);
    }

    fn record_failure(&self, remaining: &[Token]) {
        let Some(token) = remaining.first() else {
            return;
        };
        let mut report = self.0.borrow_mut();
        let further = report
            .furthest
            .as_ref()
            .map_or(true, |(left, _)| remaining.len() < *left);
        if further {
            report.furthest = Some((remaining.len(), token.clone()));
        }
    }

    /// Opens one nesting level at the bracket spanning `opened`. Past
    /// [`MAX_NESTING`] the line is abandoned: the first refusal is reported
    /// and every later attempt fails at once, so unwinding stays shallow.
    fn enter(&self, opened: Span) -> bool {
        let mut report = self.0.borrow_mut();
        if report.too_deep {
            return false;
        }
        if report.depth == MAX_NESTING {
            report.too_deep = true;
            report.diagnostics.push(Diagnostic::NestingTooDeep {
                limit: MAX_NESTING,
                span: opened,
            });
            return false;
        }
        report.depth += 1;
        true
    }

    fn leave(&self) {
        let mut report = self.0.borrow_mut();
        report.depth = report.depth.saturating_sub(1);
    }

    /// Turns the furthest failed match into a syntax error. A line already
    /// abandoned for nesting too deep gets no second error.
    pub(crate) fn report_syntax_error(&self) {
        if self.0.borrow().too_deep {
            return;
        }
        let found = self.0.borrow().furthest.as_ref().map(|(_, token)| token.clone());
        self.report(Diagnostic::Syntax {
            found: found.unwrap_or_default(),
        });
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParserInput<'a>(&'a [Token], ParserState<'a>);

impl<'a> ParserInput<'a> {
    pub fn new(input: &'a [Token], state: ParserState<'a>) -> Self {
        Self(input, state)
    }
    pub fn state(&self) -> ParserState<'a> {
        self.1
    }
}

impl<'a, T> ParseResult<'a, T> {
    pub(super) fn or_else<O>(self, op: O) -> Self
    where
        O: FnOnce() -> Self,
    {
        match self {
            Self::Ok(inner) => Self::Ok(inner),
            Self::Err => op(),
        }
    }
    pub(super) fn map<U, F>(self, op: F) -> ParseResult<'a, U>
    where
        F: FnOnce((T, ParserInput<'a>)) -> (U, ParserInput<'a>),
    {
        match self {
            Self::Ok(inner) => ParseResult::Ok(op(inner)),
            Self::Err => ParseResult::Err,
        }
    }
    pub(super) fn and_then<U, F>(self, op: F) -> ParseResult<'a, U>
    where
        F: FnOnce((T, ParserInput<'a>)) -> ParseResult<'a, U>,
    {
        match self {
            Self::Ok(inner) => op(inner),
            Self::Err => ParseResult::Err,
        }
    }
    pub(super) fn ok(self) -> Option<T> {
        match self {
            Self::Ok((output, _)) => Some(output),
            Self::Err => None,
        }
    }
}

pub(super) trait Parser<'a, Output> {
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output>;
    fn map<F, MappedOutput>(self, map_fn: F) -> BoxedParser<'a, MappedOutput>
    where
        Self: Sized + 'a,
        Output: 'a,
        MappedOutput: 'a,
        F: Fn(Output) -> MappedOutput + 'a,
    {
        BoxedParser::new(map(self, map_fn))
    }
    fn or(self, parser: impl Parser<'a, Output> + 'a) -> BoxedParser<'a, Output>
    where
        Self: Sized + 'a,
        Output: 'a,
    {
        let alternative =
            move |input: ParserInput<'a>| self.parse(input).or_else(|| parser.parse(input));
        BoxedParser::new(alternative)
    }
}

impl<'a, F, Output> Parser<'a, Output> for F
where
    F: Fn(ParserInput<'a>) -> ParseResult<'a, Output>,
{
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output> {
        self(input)
    }
}

pub(super) struct BoxedParser<'a, Output> {
    parser: Box<dyn Parser<'a, Output> + 'a>,
}

impl<'a, Output> BoxedParser<'a, Output> {
    fn new(parser: impl Parser<'a, Output> + 'a) -> Self {
        Self {
            parser: Box::new(parser),
        }
    }
}

impl<'a, Output> Parser<'a, Output> for BoxedParser<'a, Output> {
    fn parse(&self, input: ParserInput<'a>) -> ParseResult<'a, Output> {
        self.parser.parse(input)
    }
}

pub(super) fn pair<'a, R1, R2>(
    parser1: impl Parser<'a, R1>,
    parser2: impl Parser<'a, R2>,
) -> impl Parser<'a, (R1, R2)> {
    move |input: ParserInput<'a>| {
        parser1.parse(input).and_then(|(result1, next_input)| {
            parser2
                .parse(next_input)
                .map(|(result2, rest)| ((result1, result2), rest))
        })
    }
}

pub(super) fn map<'a, F, A, B>(
    parser: impl Parser<'a, A>,
    map_fn: F,
) -> impl Fn(ParserInput<'a>) -> ParseResult<'a, B>
where
    F: Fn(A) -> B,
{
    move |input| {
        parser
            .parse(input)
            .map(|(result, rest)| (map_fn(result), rest))
    }
}

pub(super) fn left<'a, A, B>(
    left_parser: impl Parser<'a, A>,
    right_parser: impl Parser<'a, B>,
) -> impl Parser<'a, A> {
    map(pair(left_parser, right_parser), |(left, _right)| left)
}

pub(super) fn zero_or_more<'a, R>(parser: impl Parser<'a, R>) -> impl Parser<'a, Vec<R>> {
    move |input: ParserInput<'a>| {
        let mut result = Vec::new();
        let mut tmp_input = input;
        while let ParseResult::Ok((next, rest)) = parser.parse(tmp_input) {
            tmp_input = rest;
            result.push(next);
        }
        ParseResult::Ok((result, tmp_input))
    }
}

/// After `open` matches, runs `parser` one nesting level deeper. Once the
/// line has reached [`MAX_NESTING`] it fails without descending.
pub(super) fn nested<'a, R>(
    open: impl Parser<'a, Token>,
    parser: impl Parser<'a, R>,
) -> impl Parser<'a, R> {
    move |input: ParserInput<'a>| {
        open.parse(input).and_then(|(opened, rest)| {
            if !rest.1.enter(opened.span) {
                return ParseResult::Err;
            }
            let result = parser.parse(rest);
            rest.1.leave();
            result
        })
    }
}

/// Matches one token of the expected type. Every mismatch is remembered so a
/// failed parse can point at the furthest token it could not get past.
pub(super) fn tok(expected_type: TokenType) -> impl Fn(ParserInput) -> ParseResult<Token> {
    move |input| match input.0.first() {
        Some(token) if token.typ == expected_type => {
            ParseResult::Ok((token.clone(), ParserInput(&input.0[1..], input.1)))
        }
        _ => {
            input.1.record_failure(input.0);
            ParseResult::Err
        }
    }
}
