use super::combinators::ParserState;
use super::error::Diagnostic;
use super::locations::{Location, Span};
use const_format::concatcp;
use derivative::Derivative;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq, Default)]
pub struct Token {
    pub typ: TokenType,
    pub lexeme: String,
    pub value: Option<i64>,
    #[derivative(PartialEq = "ignore")]
    pub span: Span,
}

impl Token {
    pub fn is_terminator(&self) -> bool {
        matches!(self.typ, TokenType::NEWLINE | TokenType::END)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.typ, self.lexeme.escape_default())
    }
}

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TokenType {
    NUMBER,
    PLUS,
    MINUS,
    TIMES,
    DIVIDE,
    LPAREN,
    RPAREN,
    NEWLINE,
    #[default]
    END,
}

const PLUS: (&str, TokenType) = ("+", TokenType::PLUS);
const MINUS: (&str, TokenType) = ("-", TokenType::MINUS);
const TIMES: (&str, TokenType) = ("*", TokenType::TIMES);
const DIVIDE: (&str, TokenType) = ("/", TokenType::DIVIDE);
const LPAREN: (&str, TokenType) = ("(", TokenType::LPAREN);
const RPAREN: (&str, TokenType) = (")", TokenType::RPAREN);

const SIMPLE_TOKENS: [(&str, TokenType); 6] = [PLUS, MINUS, TIMES, DIVIDE, LPAREN, RPAREN];

const S_WHITESPACE: &str = r"[ \t\r\f]+";
const S_DECNUMBER: &str = r"[0-9]+";
const S_LEADING_WHITESPACE: &str = concatcp!("^", S_WHITESPACE);
const S_NUMBER: &str = concatcp!("^", S_DECNUMBER);

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_LEADING_WHITESPACE).expect("Error compiling regex."));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(S_NUMBER).expect("Error compiling regex."));

/// Lazily splits one input line into tokens.
///
/// The sequence always ends with a single terminator: `NEWLINE` when the line
/// carries its line break, `END` otherwise. After the terminator the iterator
/// is exhausted; the next line gets a fresh tokenizer.
pub struct Tokenizer<'a> {
    line: &'a str,
    lineno: usize,
    start: usize,
    // 1-based character column of `start`.
    column: usize,
    finished: bool,
    state: ParserState<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(line: &'a str, lineno: usize, state: ParserState<'a>) -> Self {
        Self {
            line,
            lineno,
            start: 0,
            column: 1,
            finished: false,
            state,
        }
    }

    fn skip(&mut self, len: usize) {
        let end = self.start + len;
        self.column += self.line[self.start..end].chars().count();
        self.start = end;
    }

    fn emit(&mut self, typ: TokenType, len: usize, value: Option<i64>) -> Token {
        let start_col = self.column;
        let lexeme = self.line[self.start..self.start + len].to_string();
        self.skip(len);
        let token = Token {
            typ,
            lexeme,
            value,
            span: Span::new(self.lineno, start_col, self.lineno, self.column),
        };
        tracing::trace!(token = %token, at = %token.span, "scanned token");
        token
    }

    fn number(&mut self, len: usize) -> Token {
        let digits = &self.line[self.start..self.start + len];
        match digits.parse::<i64>() {
            Ok(value) => self.emit(TokenType::NUMBER, len, Some(value)),
            Err(_) => {
                let token = self.emit(TokenType::NUMBER, len, Some(i64::MAX));
                self.state.report(Diagnostic::LiteralTooLarge {
                    literal: token.lexeme.clone(),
                    span: token.span,
                });
                token
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        loop {
            let rest = &self.line[self.start..];
            let Some(chr) = rest.chars().next() else {
                self.finished = true;
                return Some(self.emit(TokenType::END, 0, None));
            };
            if chr == '\n' {
                self.finished = true;
                return Some(self.emit(TokenType::NEWLINE, 1, None));
            }
            if let Some(m) = WHITESPACE.find(rest) {
                self.skip(m.end());
                continue;
            }
            if let Some(m) = NUMBER.find(rest) {
                return Some(self.number(m.end()));
            }
            for (lexeme, tok_type) in SIMPLE_TOKENS {
                if rest.starts_with(lexeme) {
                    return Some(self.emit(tok_type, lexeme.len(), None));
                }
            }
            self.state.report(Diagnostic::UnrecognizedCharacter {
                character: chr,
                location: Location {
                    line: self.lineno,
                    column: self.column,
                },
            });
            self.skip(chr.len_utf8());
        }
    }
}

impl<'a> std::iter::FusedIterator for Tokenizer<'a> {}

/// Tokenizes a whole line eagerly, collecting the tokens up to and including
/// the terminator.
pub fn tokenize_line<'a>(line: &'a str, lineno: usize, state: ParserState<'a>) -> Vec<Token> {
    Tokenizer::new(line, lineno, state).collect()
}
