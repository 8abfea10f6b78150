use crate::error::{ParseError, ParseResult};
use logos::{Lexer, Logos};
use std::fmt;

/// Token types for SCSS source
///
/// Every byte of the input belongs to exactly one token, so the token
/// stream can be stitched back together into the original text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\r\n]|\\.)*'"#)]
    String,

    // url() bodies may hold unquoted ':' ';' and '//'; quoted bodies may
    // also hold ')'
    #[regex(r#"url\([^)"']*\)"#)]
    #[regex(r#"url\([ \t\r\n\f]*"([^"\\]|\\.)*"[ \t\r\n\f]*\)"#)]
    #[regex(r#"url\([ \t\r\n\f]*'([^'\\]|\\.)*'[ \t\r\n\f]*\)"#)]
    Url,

    #[regex(r#"@[^ \t\r\n\f{}();:'"/#]*"#)]
    AtWord,

    #[token("#{")]
    InterpolationStart,

    #[token("#")]
    Hash,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token("/")]
    Slash,

    #[regex(r#"[^ \t\r\n\f{}();:'"/#@][^ \t\r\n\f{}();:'"/#]*"#)]
    Word,
}

fn block_comment(lex: &mut Lexer<Token>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

impl Token {
    /// Whitespace and comments carry no meaning for statement structure
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::BlockComment | Token::LineComment
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, Token::BlockComment | Token::LineComment)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Whitespace => write!(f, "whitespace"),
            Token::BlockComment => write!(f, "comment"),
            Token::LineComment => write!(f, "line comment"),
            Token::String => write!(f, "string"),
            Token::Url => write!(f, "url"),
            Token::AtWord => write!(f, "at-keyword"),
            Token::InterpolationStart => write!(f, "#{{"),
            Token::Hash => write!(f, "#"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::Slash => write!(f, "/"),
            Token::Word => write!(f, "word"),
        }
    }
}

/// Tokenize a source string
///
/// Unlike a skipping lexer this keeps whitespace and comments, and fails on
/// the first byte no token accepts (unterminated comments and strings).
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, std::ops::Range<usize>)>> {
    let lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    for (result, span) in lexer.spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(lex_error(source, span.start)),
        }
    }

    Ok(tokens)
}

fn lex_error(source: &str, pos: usize) -> ParseError {
    let rest = &source[pos..];
    let message = if rest.starts_with("/*") {
        "Unclosed comment"
    } else if rest.starts_with('"') || rest.starts_with('\'') {
        "Unclosed string"
    } else {
        "Unrecognized input"
    };
    ParseError::lexer_error(pos, message)
}
