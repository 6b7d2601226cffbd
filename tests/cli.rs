use std::io::Write;
use std::process::{Command, Output, Stdio};

fn intcalc(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_intcalc"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start intcalc");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for intcalc")
}

#[test]
fn piped_input_prints_banner_and_results() {
    let output = intcalc(&[], "2 + 3 * 4\n10 / 0\n");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Calculadora simple (Ctrl+D para salir)\n> Resultado: 14\nResultado: 0\n"
    );
    assert_eq!(String::from_utf8_lossy(&output.stderr), "Error: División por cero\n");
}

#[test]
fn empty_input_exits_cleanly() {
    let output = intcalc(&[], "");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Calculadora simple (Ctrl+D para salir)\n> "
    );
}

#[test]
fn script_file_is_evaluated_without_banner() {
    let path = std::env::temp_dir().join(format!("intcalc-script-{}.txt", std::process::id()));
    std::fs::write(&path, "(2 + 3) * 4\n7 / 2\n").expect("Failed to write script");
    let output = intcalc(&[path.to_str().expect("temp path is UTF-8")], "");
    std::fs::remove_file(&path).ok();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Resultado: 20\nResultado: 3\n");
}

#[test]
fn unreadable_script_fails() {
    let missing = std::env::temp_dir().join("intcalc-no-such-dir").join("script.txt");
    let output = intcalc(&[missing.to_str().expect("temp path is UTF-8")], "");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not open"), "{stderr}");

    let directory = std::env::temp_dir();
    let output = intcalc(&[directory.to_str().expect("temp path is UTF-8")], "");
    assert!(!output.status.success());
}
