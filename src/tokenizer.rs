//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! The tokenizer only knows about the six single-character punctuators and
//! decimal literals. Everything else is rejected at the first byte that does
//! not fit.

use tracing::{debug, instrument, trace};

use crate::error::{CompileError, CompileResult};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Punctuator,
  Num,
  Eof,
}

/// Thin wrapper for lexical information needed by later stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub value: Option<i64>,
  pub loc: usize,
  pub len: usize,
}

impl Token {
  pub fn new(kind: TokenKind, loc: usize, len: usize, value: Option<i64>) -> Self {
    Self {
      kind,
      value,
      loc,
      len,
    }
  }
}

fn is_punctuator(c: u8) -> bool {
  matches!(c, b'+' | b'-' | b'*' | b'/' | b'(' | b')')
}

/// Lex the input into a flat vector of tokens terminated by an `Eof` marker.
///
/// Literals wrap on overflow rather than failing.
#[instrument(level = "debug", skip_all)]
pub fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
  let mut tokens = Vec::new();
  let bytes = input.as_bytes();
  let mut i = 0;

  while i < bytes.len() {
    let c = bytes[i];
    if c.is_ascii_whitespace() {
      i += 1;
      continue;
    }

    if c.is_ascii_digit() {
      let start = i;
      let mut value: i64 = 0;
      while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value
          .wrapping_mul(10)
          .wrapping_add(i64::from(bytes[i] - b'0'));
        i += 1;
      }
      trace!(loc = start, value, "number");
      tokens.push(Token::new(TokenKind::Num, start, i - start, Some(value)));
      continue;
    }

    if is_punctuator(c) {
      trace!(loc = i, punct = %char::from(c), "punctuator");
      tokens.push(Token::new(TokenKind::Punctuator, i, 1, None));
      i += 1;
      continue;
    }

    let rest = &input[i..];
    return Err(CompileError::tokenize(
      input,
      i,
      format!("invalid token \"{rest}\""),
    ));
  }

  tokens.push(Token::new(TokenKind::Eof, input.len(), 0, None));
  debug!(count = tokens.len(), "tokenized");
  Ok(tokens)
}

/// Return the slice from the source that produced this token.
pub fn token_text<'a>(token: &Token, source: &'a str) -> &'a str {
  &source[token.loc..token.loc + token.len]
}

/// Human-friendly description used in diagnostics.
pub fn describe_token(token: &Token, source: &str) -> String {
  match token.kind {
    TokenKind::Eof => "EOF".to_string(),
    _ => token_text(token, source).to_string(),
  }
}
