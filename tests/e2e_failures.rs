
use support_servers::{run_htdiff, spawn_silent_server, unused_port};

#[test]
fn e2e_timeout_is_a_comparable_failure_not_an_abort() -> Result<(), String> {
    let (port, _server) = spawn_silent_server()?;
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let diff_path = dir.path().join("diff.html");

    let args = vec![
        "--subject-port".to_owned(),
        port.to_string(),
        "--diff-output".to_owned(),
        diff_path.to_string_lossy().into_owned(),
        "--scenario".to_owned(),
        "not_found".to_owned(),
        "--timeout".to_owned(),
        "300ms".to_owned(),
        "--no-color".to_owned(),
    ];
    let output = run_htdiff(args)?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    // The run completes: KO lines, full summary, artifact, exit 1.
    assert_eq!(output.status.code(), Some(1), "stdout: {}", stdout);
    assert!(stdout.contains("[ KO ]"));
    assert!(stdout.contains("ALL_TEST_STAT"));
    assert!(diff_path.exists());
    Ok(())
}

#[test]
fn e2e_connection_refused_aborts_the_run() -> Result<(), String> {
    let port = unused_port()?;
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let diff_path = dir.path().join("diff.html");

    let args = vec![
        "--subject-port".to_owned(),
        port.to_string(),
        "--diff-output".to_owned(),
        diff_path.to_string_lossy().into_owned(),
        "--scenario".to_owned(),
        "not_found".to_owned(),
        "--timeout".to_owned(),
        "2s".to_owned(),
        "--no-color".to_owned(),
    ];
    let output = run_htdiff(args)?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1), "stdout: {}", stdout);
    // Aborted before the summary; no per-test tally is printed.
    assert!(!stdout.contains("ALL_TEST_STAT"));
    Ok(())
}
