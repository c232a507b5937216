//! Error taxonomy shared by every stage of the translator.
//!
//! Diagnostics follow the chibicc layout: the offending input on one line,
//! a caret under the faulting character on the next, then a short message.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
  #[snafu(display("usage: {program} <expr>"))]
  Usage { program: String },

  #[snafu(display("{line}\n{marker} {message}"))]
  Tokenize {
    line: String,
    marker: String,
    message: String,
    loc: usize,
  },

  #[snafu(display("{line}\n{marker} {message}"))]
  Syntax {
    line: String,
    marker: String,
    message: String,
    loc: usize,
  },
}

impl CompileError {
  pub fn usage(program: impl Into<String>) -> Self {
    Self::Usage {
      program: program.into(),
    }
  }

  /// A character the scanner could not classify, at byte offset `loc`.
  pub fn tokenize(expr: &str, loc: usize, message: impl Into<String>) -> Self {
    let (line, marker, loc) = caret(expr, loc);
    Self::Tokenize {
      line,
      marker,
      message: message.into(),
      loc,
    }
  }

  /// A token the grammar did not expect, at byte offset `loc`.
  pub fn syntax(expr: &str, loc: usize, message: impl Into<String>) -> Self {
    let (line, marker, loc) = caret(expr, loc);
    Self::Syntax {
      line,
      marker,
      message: message.into(),
      loc,
    }
  }

  /// Byte offset of the fault in the input, if the error has one.
  pub fn offset(&self) -> Option<usize> {
    match self {
      Self::Usage { .. } => None,
      Self::Tokenize { loc, .. } | Self::Syntax { loc, .. } => Some(*loc),
    }
  }
}

fn caret(expr: &str, loc: usize) -> (String, String, usize) {
  let mut safe_loc = loc.min(expr.len());
  while !expr.is_char_boundary(safe_loc) {
    safe_loc -= 1;
  }
  let column = expr[..safe_loc].chars().count();
  let marker = format!("{}^", " ".repeat(column));
  (expr.to_string(), marker, safe_loc)
}
