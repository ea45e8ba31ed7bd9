//! Lexer for settings documents using Logos
//!
//! Tokenizes the Python-dict-literal body of a settings file. Horizontal
//! whitespace and backslash line continuations are skipped; line breaks and
//! comments are kept because they carry layout information.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// Token kinds seen by the settings parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Newline,
    Comment,
    String,
    Number,
    Name,
    IfKw,
    ElseKw,
    ForKw,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,
    Operator,
    /// Any character the lexer does not recognize
    Unknown,
}

impl TokenKind {
    pub fn is_opening(self) -> bool {
        matches!(self, TokenKind::LBrace | TokenKind::LBracket | TokenKind::LParen)
    }

    pub fn is_closing(self) -> bool {
        matches!(self, TokenKind::RBrace | TokenKind::RBracket | TokenKind::RParen)
    }

    /// Human-readable name used in parse errors
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Newline => "line break",
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Name => "name",
            TokenKind::IfKw => "`if`",
            TokenKind::ElseKw => "`else`",
            TokenKind::ForKw => "`for`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Operator => "operator",
            TokenKind::Unknown => "unknown character",
        }
    }
}

/// Token with kind, text and byte range in the tokenized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

/// Logos-based token types
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"([ \t\f]|\\\r?\n)+")]
enum LogosToken {
    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"#[^\r\n]*")]
    Comment,

    #[regex(r#"[rRbBuUfF]{0,2}"([^"\\\r\n]|\\.)*""#)]
    #[regex(r#"[rRbBuUfF]{0,2}'([^'\\\r\n]|\\.)*'"#)]
    #[regex(r#"[rRbBuUfF]{0,2}"""([^"\\]|\\.|"[^"]|""[^"])*""""#)]
    String,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?[jJ]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[jJ]?")]
    #[regex(r"0[xXoObB][0-9a-fA-F_]+")]
    Number,

    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("for")]
    ForKw,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    #[regex(r"[-+*/%@&|^~<>=!.;]")]
    Operator,
}

fn to_token_kind(token: LogosToken) -> TokenKind {
    match token {
        LogosToken::Newline => TokenKind::Newline,
        LogosToken::Comment => TokenKind::Comment,
        LogosToken::String => TokenKind::String,
        LogosToken::Number => TokenKind::Number,
        LogosToken::IfKw => TokenKind::IfKw,
        LogosToken::ElseKw => TokenKind::ElseKw,
        LogosToken::ForKw => TokenKind::ForKw,
        LogosToken::Name => TokenKind::Name,
        LogosToken::LBrace => TokenKind::LBrace,
        LogosToken::RBrace => TokenKind::RBrace,
        LogosToken::LBracket => TokenKind::LBracket,
        LogosToken::RBracket => TokenKind::RBracket,
        LogosToken::LParen => TokenKind::LParen,
        LogosToken::RParen => TokenKind::RParen,
        LogosToken::Comma => TokenKind::Comma,
        LogosToken::Colon => TokenKind::Colon,
        LogosToken::Operator => TokenKind::Operator,
    }
}

/// Tokenize `source`, shifting every range by `base` so offsets refer to
/// the enclosing document.
pub fn tokenize(source: &str, base: TextSize) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = LogosToken::lexer(source);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let span = lexer.span();
        let kind = match result {
            Ok(token) => to_token_kind(token),
            Err(()) => TokenKind::Unknown,
        };
        let range = TextRange::new(
            base + TextSize::new(span.start as u32),
            base + TextSize::new(span.end as u32),
        );
        tokens.push(Token { kind, text, range });
    }

    tokens
}
