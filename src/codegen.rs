//! Code generation: lower the AST into x86-64 assembly (Intel syntax).
//!
//! The emitter is a plain stack machine. Every subexpression leaves exactly
//! one value on the stack. Literals go through `rax` since `push` only takes
//! a 32-bit immediate; a binary node pops its right operand into `rdi`,
//! its left operand into `rax`, combines them into `rax` and pushes the
//! result. Division and overflow are not checked.

use std::fmt;

use tracing::{debug, instrument};

use crate::parser::{AstNode, BinaryOp};

const PROLOGUE: [&str; 3] = [".intel_syntax noprefix", ".global main", "main:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
  /// Accumulator, left operand and return value.
  Rax,
  /// Right operand.
  Rdi,
}

impl fmt::Display for Reg {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Reg::Rax => f.write_str("rax"),
      Reg::Rdi => f.write_str("rdi"),
    }
  }
}

/// One emitted instruction. Two-operand forms are `dst, src`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insn {
  Mov(Reg, i64),
  PushReg(Reg),
  Pop(Reg),
  Add(Reg, Reg),
  Sub(Reg, Reg),
  Imul(Reg, Reg),
  /// Sign-extend `rax` into `rdx:rax` ahead of `idiv`.
  Cqo,
  Idiv(Reg),
  Ret,
}

impl fmt::Display for Insn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Insn::Mov(dst, value) => write!(f, "mov {dst}, {value}"),
      Insn::PushReg(reg) => write!(f, "push {reg}"),
      Insn::Pop(reg) => write!(f, "pop {reg}"),
      Insn::Add(dst, src) => write!(f, "add {dst}, {src}"),
      Insn::Sub(dst, src) => write!(f, "sub {dst}, {src}"),
      Insn::Imul(dst, src) => write!(f, "imul {dst}, {src}"),
      Insn::Cqo => f.write_str("cqo"),
      Insn::Idiv(reg) => write!(f, "idiv {reg}"),
      Insn::Ret => f.write_str("ret"),
    }
  }
}

/// Lower an expression tree to its instruction stream, without framing.
#[instrument(level = "debug", skip_all)]
pub fn generate(node: &AstNode) -> Vec<Insn> {
  let mut code = Vec::new();
  emit_expr(node, &mut code);
  debug!(count = code.len(), "generated");
  code
}

/// Post-order walk: both operands are on the stack before the operator runs.
fn emit_expr(node: &AstNode, code: &mut Vec<Insn>) {
  match node {
    AstNode::Num { value } => {
      code.push(Insn::Mov(Reg::Rax, *value));
      code.push(Insn::PushReg(Reg::Rax));
    }
    AstNode::Binary { op, lhs, rhs } => {
      emit_expr(lhs, code);
      emit_expr(rhs, code);
      code.push(Insn::Pop(Reg::Rdi));
      code.push(Insn::Pop(Reg::Rax));
      match op {
        BinaryOp::Add => code.push(Insn::Add(Reg::Rax, Reg::Rdi)),
        BinaryOp::Sub => code.push(Insn::Sub(Reg::Rax, Reg::Rdi)),
        BinaryOp::Mul => code.push(Insn::Imul(Reg::Rax, Reg::Rdi)),
        BinaryOp::Div => {
          code.push(Insn::Cqo);
          code.push(Insn::Idiv(Reg::Rdi));
        }
      }
      code.push(Insn::PushReg(Reg::Rax));
    }
  }
}

/// Frame an instruction stream as a complete assembly file defining `main`.
pub fn emit(code: &[Insn]) -> String {
  let mut asm = String::new();
  for line in PROLOGUE {
    asm.push_str(line);
    asm.push('\n');
  }
  let epilogue = [Insn::Pop(Reg::Rax), Insn::Ret];
  for insn in code.iter().chain(epilogue.iter()) {
    asm.push_str(&format!("  {insn}\n"));
  }
  asm
}
