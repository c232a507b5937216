use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn run(args: &[&str]) -> Output {
  Command::new(env!("CARGO_BIN_EXE_exprcc"))
    .args(args)
    .output()
    .expect("failed to spawn exprcc")
}

#[test]
fn prints_listing_on_success() {
  let out = run(&["(3+5)*2-4/2"]);
  assert_eq!(out.status.code(), Some(0));
  assert!(out.stderr.is_empty());
  let stdout = String::from_utf8(out.stdout).unwrap();
  assert!(stdout.starts_with(".intel_syntax noprefix\n.global main\nmain:\n"));
  assert!(stdout.ends_with("  pop rax\n  ret\n"));
}

#[test]
fn single_literal_listing() {
  let out = run(&["42"]);
  assert_eq!(
    String::from_utf8(out.stdout).unwrap(),
    ".intel_syntax noprefix\n.global main\nmain:\n  mov rax, 42\n  push rax\n  pop rax\n  ret\n"
  );
}

#[test]
fn usage_error_without_arguments() {
  let out = run(&[]);
  assert_eq!(out.status.code(), Some(1));
  assert!(out.stdout.is_empty());
  let stderr = String::from_utf8(out.stderr).unwrap();
  assert!(stderr.starts_with("usage: "), "{stderr}");
  assert!(stderr.trim_end().ends_with("<expr>"), "{stderr}");
}

#[test]
fn usage_error_with_extra_arguments() {
  let out = run(&["1", "2"]);
  assert_eq!(out.status.code(), Some(1));
  assert!(out.stdout.is_empty());
  assert!(String::from_utf8(out.stderr).unwrap().starts_with("usage: "));
}

#[test]
fn syntax_error_prints_caret() {
  let out = run(&["1+"]);
  assert_eq!(out.status.code(), Some(1));
  assert!(out.stdout.is_empty());
  assert_eq!(
    String::from_utf8(out.stderr).unwrap(),
    "1+\n  ^ expected a number, but got \"EOF\"\n"
  );
}

#[test]
fn tokenize_error_prints_caret() {
  let out = run(&["1+#2"]);
  assert_eq!(out.status.code(), Some(1));
  assert!(out.stdout.is_empty());
  assert_eq!(
    String::from_utf8(out.stderr).unwrap(),
    "1+#2\n  ^ invalid token \"#2\"\n"
  );
}
