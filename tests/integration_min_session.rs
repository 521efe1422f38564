// Integration tests for the compiled binary.
//
// The PTY tests require a TTY; they use expectrl which allocates a pseudo terminal.
// They are Unix-only and ignored by default to avoid CI/platform issues.
// Run manually via: `cargo test --test integration_min_session -- --ignored`.

use std::time::Duration;

#[test]
fn refuses_to_start_without_tty() -> Result<(), Box<dyn std::error::Error>> {
    // `output()` gives the child a closed, non-terminal stdin
    let output = assert_cmd::Command::cargo_bin("skillfolio")?
        .arg("jokes")
        .output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("stdin must be a tty"));
    Ok(())
}

#[cfg(unix)]
#[test]
#[ignore]
fn jokes_session_exits_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    use expectrl::{spawn, Eof};

    let bin = assert_cmd::cargo::cargo_bin("skillfolio");
    let mut p = spawn(format!("{} jokes", bin.display()))?;

    std::thread::sleep(Duration::from_millis(200));

    // New joke, punchline, quit
    p.send("j")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("p")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("q")?;

    p.expect(Eof)?;
    Ok(())
}

#[cfg(unix)]
#[test]
#[ignore]
fn quiz_session_can_be_abandoned() -> Result<(), Box<dyn std::error::Error>> {
    use expectrl::{spawn, Eof};

    let bin = assert_cmd::cargo::cargo_bin("skillfolio");
    let mut p = spawn(format!("{} quiz --difficulty easy", bin.display()))?;

    std::thread::sleep(Duration::from_millis(200));

    // A wrong answer, then esc back to the start page and esc again to exit
    p.send("x\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?;

    p.expect(Eof)?;
    Ok(())
}
