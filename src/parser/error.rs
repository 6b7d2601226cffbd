use super::locations::{Locatable, Location, Span};
use super::tokenizer::Token;

/// How a diagnostic affects the line it was raised on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Reported on the output stream; the line is still evaluated.
    Warning,
    /// Reported on the error stream; evaluation continues with a substitute value.
    Recoverable,
    /// Reported on the error stream; the line produces no result.
    Fatal,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    UnrecognizedCharacter { character: char, location: Location },
    DivisionByZero { span: Span },
    Syntax { found: Token },
    LiteralTooLarge { literal: String, span: Span },
    Overflow { expression: String, span: Span },
    NestingTooDeep { limit: usize, span: Span },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnrecognizedCharacter { .. } => Severity::Warning,
            Self::DivisionByZero { .. } => Severity::Recoverable,
            Self::Syntax { .. }
            | Self::LiteralTooLarge { .. }
            | Self::Overflow { .. }
            | Self::NestingTooDeep { .. } => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl Locatable for Diagnostic {
    fn span(&self) -> Span {
        match self {
            Self::UnrecognizedCharacter { location, .. } => Span {
                start: *location,
                end: Location {
                    column: location.column + 1,
                    ..*location
                },
            },
            Self::DivisionByZero { span } => *span,
            Self::Syntax { found } => found.span(),
            Self::LiteralTooLarge { span, .. } => *span,
            Self::Overflow { span, .. } => *span,
            Self::NestingTooDeep { span, .. } => *span,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedCharacter { character, .. } => {
                write!(f, "Carácter no reconocido: {character}")
            }
            Self::DivisionByZero { .. } => write!(f, "Error: División por cero"),
            Self::Syntax { found } if found.is_terminator() => {
                write!(f, "Error de sintaxis en fin de línea")
            }
            Self::Syntax { found } => {
                write!(f, "Error de sintaxis en '{}' ({})", found.lexeme, found.span.start)
            }
            Self::LiteralTooLarge { literal, span } => write!(
                f,
                "Error: el número {literal} excede el rango de enteros ({})",
                span.start
            ),
            Self::Overflow { expression, span } => write!(
                f,
                "Error: desbordamiento al evaluar {expression} ({})",
                span.start
            ),
            Self::NestingTooDeep { limit, span } => write!(
                f,
                "Error: expresión demasiado anidada, más de {limit} paréntesis ({})",
                span.start
            ),
        }
    }
}
