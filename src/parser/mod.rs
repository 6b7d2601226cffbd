mod combinators;
mod error;
mod grammar;
mod locations;
pub mod tokenizer;

pub use combinators::{ParserState, Report, MAX_NESTING};
pub use error::{Diagnostic, Severity};
pub(crate) use grammar::parse_line;
pub use locations::{Locatable, Location, Span};
pub use tokenizer::{tokenize_line, Token, TokenType, Tokenizer};
