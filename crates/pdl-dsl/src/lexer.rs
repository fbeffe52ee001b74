use logos::Logos;

use crate::error::{DslError, Span};
use crate::token::Token;

/// A line split into its form's head and the text after it.
#[derive(Debug, Clone)]
pub struct LineHead<'a> {
    pub token: Token,
    pub head: &'a str,
    pub rest: &'a str,
    /// The line's content, leading spaces excluded.
    pub span: Span,
}

/// Lexes the head of one line.
///
/// `offset` is the byte offset of `text` within the whole document, so the
/// returned span points into the document rather than the line.
///
/// # Errors
///
/// Returns `DslError::IllegalToken` when the line starts with none of the
/// line forms.
pub fn lex_line(text: &str, offset: usize, line: usize) -> Result<LineHead<'_>, DslError> {
    let indent = text.len() - text.trim_start_matches(' ').len();
    let span = Span::new(offset + indent, offset + text.len());

    let mut lexer = Token::lexer(text);
    match lexer.next() {
        Some(Ok(token)) => Ok(LineHead {
            token,
            head: lexer.slice(),
            rest: lexer.remainder(),
            span,
        }),
        Some(Err(())) | None => Err(DslError::IllegalToken {
            line,
            text: text.to_string(),
            span,
        }),
    }
}
