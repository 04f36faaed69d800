//! Lexer for follow-links expressions.
//!
//! A well-formed bracket span `[...]` is one `Criteria` token, so `.` and `,`
//! inside criteria values never split paths. Stray `[` and `]` come out as
//! their own tokens for the parser to report.

use std::ops::Range;

use logos::Logos;
use rowan::TextRange;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    /// `[k=v k2=v2]`, brackets included.
    #[regex(r"\[[^\[\]]*\]")]
    Criteria,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[^\[\],. \t\r\n]+")]
    Name,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        self == TokenKind::Whitespace
    }
}

/// Kind plus span; text is sliced from the source via [`token_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes a follow-links expression.
///
/// Every byte of the input is covered by some token class, so the lexer
/// cannot fail; an unexpected logos error is surfaced as a `Name` so the
/// parser still sees every byte.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let kind = result.unwrap_or(TokenKind::Name);
        tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
    }

    tokens
}

#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[Range::<usize>::from(token.span)]
}
