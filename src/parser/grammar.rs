// # ========================= START OF THE GRAMMAR =========================
//
// # Every rule yields the integer value of what it matched; reductions are
// # evaluated as soon as a rule succeeds, so there is no tree to walk.
// #
// # Grammar syntax:
// # e1 e2      Match e1, then match e2.
// # e1 | e2    Match e1 or e2.
// # ( e )      Group.
// # e*         Match zero or more occurrences of e.
// #
// # Upper case names denote tokens produced by the tokenizer.

use super::combinators::*;
use super::locations::Span;
use super::tokenizer::{Token, TokenType as TT};
use crate::interpreter::{reduce, Operator};

/// Parses and evaluates one tokenized line. A line that does not match the
/// grammar records a syntax error in `state` and yields `None`.
pub(crate) fn parse_line<'a>(tokens: &'a [Token], state: ParserState<'a>) -> Option<i64> {
    let value = line.parse(ParserInput::new(tokens, state)).ok();
    if value.is_none() {
        state.report_syntax_error();
    }
    value
}

// line: expr (NEWLINE | END)
fn line(input: ParserInput) -> ParseResult<i64> {
    left(expr, tok(TT::NEWLINE).or(tok(TT::END))).parse(input)
}

// expr: term (('+' | '-') term)*
fn expr(input: ParserInput) -> ParseResult<i64> {
    let state = input.state();
    pair(term, zero_or_more(pair(additive_operator, term)))
        .map(move |(first, tail)| fold(state, first, tail))
        .parse(input)
}

// term: factor (('*' | '/') factor)*
fn term(input: ParserInput) -> ParseResult<i64> {
    let state = input.state();
    pair(factor, zero_or_more(pair(multiplicative_operator, factor)))
        .map(move |(first, tail)| fold(state, first, tail))
        .parse(input)
}

// factor:
//     | NUMBER
//     | '(' expr ')'
fn factor(input: ParserInput) -> ParseResult<i64> {
    tok(TT::NUMBER)
        .map(|t: Token| t.value.unwrap_or_default())
        .or(nested(tok(TT::LPAREN), left(expr, tok(TT::RPAREN))))
        .parse(input)
}

fn additive_operator(input: ParserInput) -> ParseResult<(Operator, Span)> {
    tok(TT::PLUS)
        .map(|t: Token| (Operator::Plus, t.span))
        .or(tok(TT::MINUS).map(|t: Token| (Operator::Minus, t.span)))
        .parse(input)
}

fn multiplicative_operator(input: ParserInput) -> ParseResult<(Operator, Span)> {
    tok(TT::TIMES)
        .map(|t: Token| (Operator::Times, t.span))
        .or(tok(TT::DIVIDE).map(|t: Token| (Operator::Divide, t.span)))
        .parse(input)
}

// Operators of one precedence level group to the left.
fn fold(state: ParserState, first: i64, tail: Vec<((Operator, Span), i64)>) -> i64 {
    tail.into_iter()
        .fold(first, |lhs, ((op, span), rhs)| reduce(state, op, span, lhs, rhs))
}
