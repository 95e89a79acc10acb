//! Tokenizer for the Quartz SQL dialect.
//!
//! Lexemes are delimited only by whitespace and by the three separators
//! `,` `(` `)`; a single quote toggles string mode, inside which every
//! character (separators and whitespace included) accumulates verbatim.
//! Operators therefore have to be whitespace-delimited: `c1 > 1` is three
//! tokens while `c1>1` is one literal.

use crate::error::{Result, SyntaxError};

use super::{classify, Span, Token};

/// A lexer that splits one query string into classified tokens.
pub struct Lexer<'a> {
    /// The query being lexed.
    input: &'a str,
    /// Byte offset where the current lexeme started.
    start: usize,
    /// Tokens produced so far.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given query string.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            tokens: Vec::new(),
        }
    }

    /// Emits the pending lexeme ending at `end`, if there is one.
    fn flush(&mut self, end: usize) {
        if self.start < end {
            let kind = classify(&self.input[self.start..end]);
            self.tokens.push(Token::new(kind, Span::new(self.start, end)));
        }
    }

    /// Tokenizes the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnterminatedString`] when a quote is opened
    /// and never closed.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut in_string = false;
        let mut string_start = 0;

        for (offset, c) in self.input.char_indices() {
            if c == '\'' {
                if !in_string {
                    string_start = offset;
                }
                in_string = !in_string;
            } else if in_string {
                // everything between quotes belongs to the current lexeme
            } else if c.is_whitespace() {
                self.flush(offset);
                self.start = offset + c.len_utf8();
            } else if matches!(c, ',' | '(' | ')') {
                self.flush(offset);
                let span = Span::new(offset, offset + 1);
                self.tokens
                    .push(Token::new(classify(&self.input[offset..=offset]), span));
                self.start = offset + 1;
            }
        }

        if in_string {
            return Err(SyntaxError::UnterminatedString(Span::new(
                string_start,
                self.input.len(),
            )));
        }

        self.flush(self.input.len());
        Ok(self.tokens)
    }
}
