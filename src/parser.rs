//! Recursive-descent parser producing the expression AST.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    = mul ("+" mul | "-" mul)*
//! mul     = primary ("*" primary | "/" primary)*
//! primary = "(" expr ")" | num
//! ```
//!
//! Both binary levels fold to the left so `a-b-c` parses as `(a-b)-c`.

use std::fmt;

use tracing::{debug, instrument};

use crate::error::{CompileError, CompileResult};
use crate::tokenizer::{Token, TokenKind, describe_token, token_text};

/// Binary operators recognised by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
}

impl BinaryOp {
  pub fn symbol(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
    }
  }
}

/// Expression tree produced by the parser. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
  Num {
    value: i64,
  },
  Binary {
    op: BinaryOp,
    lhs: Box<AstNode>,
    rhs: Box<AstNode>,
  },
}

impl AstNode {
  pub fn number(value: i64) -> Self {
    Self::Num { value }
  }

  pub fn binary(op: BinaryOp, lhs: AstNode, rhs: AstNode) -> Self {
    Self::Binary {
      op,
      lhs: Box::new(lhs),
      rhs: Box::new(rhs),
    }
  }
}

/// Prefix rendering, e.g. `(- (- 10 2) 3)`. Used for logging and tests.
impl fmt::Display for AstNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AstNode::Num { value } => write!(f, "{value}"),
      AstNode::Binary { op, lhs, rhs } => write!(f, "({} {lhs} {rhs})", op.symbol()),
    }
  }
}

/// Parse a complete expression; the whole token stream must be consumed.
#[instrument(level = "debug", skip_all)]
pub fn parse(tokens: Vec<Token>, source: &str) -> CompileResult<AstNode> {
  let mut stream = TokenStream::new(tokens, source);

  let node = parse_expr(&mut stream)?;

  if !stream.is_eof() {
    let (loc, got) = stream.describe_current();
    return Err(CompileError::syntax(
      source,
      loc,
      format!("unexpected token \"{got}\""),
    ));
  }

  debug!(ast = %node, "parsed");
  Ok(node)
}

fn parse_expr(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_mul(stream)?;

  loop {
    let op = if stream.consume("+") {
      BinaryOp::Add
    } else if stream.consume("-") {
      BinaryOp::Sub
    } else {
      break;
    };

    let rhs = parse_mul(stream)?;
    node = AstNode::binary(op, node, rhs);
  }

  Ok(node)
}

fn parse_mul(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_primary(stream)?;

  loop {
    let op = if stream.consume("*") {
      BinaryOp::Mul
    } else if stream.consume("/") {
      BinaryOp::Div
    } else {
      break;
    };

    let rhs = parse_primary(stream)?;
    node = AstNode::binary(op, node, rhs);
  }

  Ok(node)
}

fn parse_primary(stream: &mut TokenStream) -> CompileResult<AstNode> {
  if stream.consume("(") {
    let node = parse_expr(stream)?;
    stream.expect(")")?;
    return Ok(node);
  }

  let value = stream.expect_number()?;
  Ok(AstNode::number(value))
}

/// Forward-only cursor over the token vector.
struct TokenStream<'a> {
  tokens: Vec<Token>,
  source: &'a str,
  pos: usize,
}

impl<'a> TokenStream<'a> {
  fn new(tokens: Vec<Token>, source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
    }
  }

  fn peek(&self) -> Option<&Token> {
    self.tokens.get(self.pos)
  }

  /// Location and printable text of the token under the cursor.
  fn describe_current(&self) -> (usize, String) {
    match self.peek() {
      Some(token) => (token.loc, describe_token(token, self.source)),
      None => (self.source.len(), "EOF".to_string()),
    }
  }

  /// Consume the current token if it is the punctuator `op`.
  fn consume(&mut self, op: &str) -> bool {
    if let Some(token) = self.peek()
      && token.kind == TokenKind::Punctuator
      && token_text(token, self.source) == op
    {
      self.pos += 1;
      return true;
    }
    false
  }

  fn expect(&mut self, op: &str) -> CompileResult<()> {
    if self.consume(op) {
      return Ok(());
    }
    let (loc, got) = self.describe_current();
    Err(CompileError::syntax(
      self.source,
      loc,
      format!("expected \"{op}\", but got \"{got}\""),
    ))
  }

  fn expect_number(&mut self) -> CompileResult<i64> {
    if let Some(token) = self.peek()
      && token.kind == TokenKind::Num
      && let Some(value) = token.value
    {
      self.pos += 1;
      return Ok(value);
    }
    let (loc, got) = self.describe_current();
    Err(CompileError::syntax(
      self.source,
      loc,
      format!("expected a number, but got \"{got}\""),
    ))
  }

  fn is_eof(&self) -> bool {
    matches!(self.peek().map(|token| token.kind), Some(TokenKind::Eof))
  }
}
