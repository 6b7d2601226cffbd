mod parser;
pub use parser::{
    tokenize_line, Diagnostic, Locatable, Location, ParserState, Report, Severity, Span, Token,
    TokenType, Tokenizer, MAX_NESTING,
};

mod interpreter;
pub use interpreter::{evaluate, Evaluation, Operator};

mod session;
pub use session::{Session, BANNER, PROMPT};
