//! Crate root: wires together the translation pipeline.
//!
//! - `tokenizer` turns the input line into a flat token stream.
//! - `parser` builds the expression AST under the precedence grammar.
//! - `codegen` lowers the AST into stack-machine instructions and frames
//!   them as an assembly file.
//! - `error` holds the diagnostics shared by all of the above.

pub mod codegen;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use codegen::{Insn, Reg};
pub use error::{CompileError, CompileResult};

/// Translate an expression into its instruction stream, without framing.
pub fn compile(expr: &str) -> CompileResult<Vec<Insn>> {
  let tokens = tokenizer::tokenize(expr)?;
  let ast = parser::parse(tokens, expr)?;
  Ok(codegen::generate(&ast))
}

/// Translate an expression into a complete Intel-syntax assembly listing.
pub fn generate_assembly(expr: &str) -> CompileResult<String> {
  let code = compile(expr)?;
  Ok(codegen::emit(&code))
}
