#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn fzs(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_fzs"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn filter_plain_lines() {
    let output = fzs(&["helo"], "hello world\ngoodbye\nhelp wanted\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "\"hello world\"\n\"help wanted\"\n");
}

#[test]
fn filter_json_with_keys() {
    let input = r#"[{"title": "Old Man's War", "link": "/a"}, {"title": "Fury", "link": "/b"}]"#;
    let output = fzs(&["old man", "-k", "title", "--id", "link", "--include-score"], input);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "{\"item\":\"/a\",\"score\":0.001}\n");
}

#[test]
fn no_match_exit_code() {
    let output = fzs(&["zzzz"], "alpha\nbeta\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_weight_exit_code() {
    let output = fzs(&["alpha", "-k", "title:1.5"], "[]");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Key weight"));
}
