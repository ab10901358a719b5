use std::process::Command;

#[test]
fn help_lists_smtp_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_voyager-mailer"))
        .arg("--help")
        .output()
        .expect("run voyager-mailer --help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for flag in ["--bind", "--port", "--smtp-host", "--smtp-user", "--dry-run"] {
        assert!(text.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn missing_credentials_fail_fast() {
    let output = Command::new(env!("CARGO_BIN_EXE_voyager-mailer"))
        .env_remove("SMTP_HOST")
        .env_remove("SMTP_USER")
        .env_remove("SMTP_PASS")
        .output()
        .expect("run voyager-mailer");
    assert!(!output.status.success());
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("--smtp-host is required"));
}
