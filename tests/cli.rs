//! Test the `olc` binary, including its CLI interface.

use std::process::{Command, ExitStatus};

use insta::assert_display_snapshot;
use serial_test::serial;

fn get_double_program_path() -> String {
  env!("CARGO_MANIFEST_DIR").to_owned() + "/tests/programs/double.olc"
}

/// Runs the `olc` binary to completion, returning its exit status along with
/// everything it printed, stdout first and stderr after.
fn execute_olc(args: &[&str]) -> (ExitStatus, String) {
  let out = Command::new(env!("CARGO_BIN_EXE_olc")).args(args).output().expect("failed to run olc");
  let mut printed = String::from_utf8(out.stdout).expect("olc printed invalid utf-8");
  printed.push_str(&String::from_utf8(out.stderr).expect("olc printed invalid utf-8"));
  (out.status, printed)
}

#[test]
#[serial]
fn test_cli_reduce() {
  // Test normal-form expressions
  assert_display_snapshot!(
    execute_olc(&["reduce", "--", "λx: x"]).1,
    @"λa: a"
  );
  // Test non-normal form expressions
  assert_display_snapshot!(
    execute_olc(&["reduce", "--", "(λx: x λa: λb: a)"]).1,
    @"λa: λb: a"
  );
  // Test multiple expressions
  assert_display_snapshot!(
    execute_olc(&["reduce", "--", "(λx: (x x) λy: y)", "!0<a b> = λx: x; (a b)"]).1,
    @"λa: a\nλa: a"
  );
}

#[test]
#[serial]
fn test_cli_gas_limit() {
  // A zero limit returns the (linearized) input unreduced
  assert_display_snapshot!(
    execute_olc(&["reduce", "-g", "0", "--", "(λx: x λa: λb: a)"]).1,
    @"(λa: a λb: λc: b)"
  );
}

#[test]
#[serial]
fn test_cli_run() {
  assert_display_snapshot!(
    execute_olc(&["run", &get_double_program_path()]).1,
    @"!0<c d> = a; λa: λb: (c (d b))"
  );
}

#[test]
#[serial]
fn test_cli_errors() {
  assert_display_snapshot!(
    execute_olc(&["run", "this-file-does-not-exist.olc"]).1,
    @r###"
  Input file "this-file-does-not-exist.olc" not found
  "###
  );
  let (status, output) = execute_olc(&["reduce", "--", "(λx: x"]);
  assert!(!status.success());
  assert!(output.starts_with("Parsing error"), "unexpected output: {output}");
}
