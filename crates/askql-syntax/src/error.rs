use std::ops::Range;

use askql_core::store::QueryParseError;

use crate::printer::ErrorPrinter;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("query contains no conditions")]
    EmptyQuery,

    #[error("expected {0}")]
    Expected(&'static str),

    #[error("unexpected `{0}`")]
    Unexpected(String),

    #[error("missing closing `]]`")]
    UnclosedCondition,

    #[error("missing closing `</q>`")]
    UnclosedSubquery,

    #[error("empty value")]
    EmptyValue,

    #[error("`{0}` is not a number")]
    InvalidNumber(String),

    #[error("`{0}` is not a boolean")]
    InvalidBoolean(String),

    #[error("unsupported modifier `{0}`")]
    UnsupportedModifier(String),

    #[error("subqueries nested deeper than {0} levels")]
    TooDeep(u32),
}

/// A parse failure with the byte range it points at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    pub fn printer<'a>(&'a self, source: &'a str) -> ErrorPrinter<'a> {
        ErrorPrinter::new(self, source)
    }
}

impl From<ParseError> for QueryParseError {
    fn from(err: ParseError) -> Self {
        QueryParseError::new(err.kind.to_string()).at(err.span.start)
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
