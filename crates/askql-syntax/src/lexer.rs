//! Lexer for ask query strings.
//!
//! Only the structural markers are tokens. Everything between them is
//! `Text`, and the parser reads runs of text, colons and angle brackets back
//! from the source as one slice, so literals keep their exact spelling.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("[[")]
    ConditionOpen,

    #[token("]]")]
    ConditionClose,

    #[token("<q>")]
    SubqueryOpen,

    #[token("</q>")]
    SubqueryClose,

    /// Property/value separator. Defined before `Colon` for precedence.
    #[token("::")]
    DoubleColon,

    /// Value alternatives.
    #[token("||")]
    DoublePipe,

    /// Condition modifiers (`|+depth=2`).
    #[token("|")]
    Pipe,

    #[token(":")]
    Colon,

    #[token("<")]
    Lt,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[regex(r"[^\[\]<|:]+")]
    Text,
}

impl TokenKind {
    /// Tokens that may appear inside a literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Colon | Self::Lt | Self::BracketOpen | Self::BracketClose
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokenize `source`. Bytes the lexer rejects become `Text`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let kind = result.unwrap_or(TokenKind::Text);
        tokens.push(Token {
            kind,
            span: lexer.span(),
        });
    }

    tokens
}
