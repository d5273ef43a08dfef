use std::process::Command;

fn run(fixture: &str) -> (String, String, bool) {
    let path = format!("tests/fixtures/{fixture}");
    let output = Command::new(env!("CARGO_BIN_EXE_bank-accounts"))
        .arg(&path)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

const HEADER: &str = "user,account,type,status,balance,overdraft,payees";

#[test]
fn valid_operations() {
    let (stdout, stderr, success) = run("valid.csv");

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            HEADER,
            "dave.green,0,current,open,100.0000,0.0000,1",
            "dave.green,1,savings,open,1001.5000,0.0000,0",
            "steve.green,0,current,closed,-101.0000,-101.0000,0",
        ]
    );
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run("with_errors.csv");

    assert!(success);
    assert!(stderr.contains("unrecognized operation type"));
    assert!(stderr.contains("missing amount"));
    assert!(stderr.contains("login rejected"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines[1], "dave.green,0,current,open,75.0000,0.0000,0");
}

#[test]
fn overdraft_is_repaid_and_limited() {
    let (stdout, _, success) = run("overdraft.csv");

    assert!(success);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[1], "dave.green,0,current,closed,-51.0000,-51.0000,0");
}

#[test]
fn missing_file_fails() {
    let (stdout, _, success) = run("does_not_exist.csv");

    assert!(!success);
    assert!(stdout.is_empty());
}
