use std::env;
use std::process::ExitCode;

use exprcc::{CompileError, CompileResult, generate_assembly};
use tracing::Level;

const LOG_LEVEL: Level = Level::WARN;

fn run() -> CompileResult<String> {
  let args: Vec<String> = env::args().collect();
  if args.len() != 2 {
    let program = args.first().map(String::as_str).unwrap_or("exprcc");
    return Err(CompileError::usage(program));
  }

  generate_assembly(&args[1])
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .compact()
    .without_time()
    .with_writer(std::io::stderr)
    .with_max_level(LOG_LEVEL)
    .init();

  match run() {
    Ok(asm) => {
      print!("{asm}");
      ExitCode::SUCCESS
    }
    Err(err) => {
      tracing::debug!(?err, "translation failed");
      eprintln!("{err}");
      ExitCode::FAILURE
    }
  }
}
