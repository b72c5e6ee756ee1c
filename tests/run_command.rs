mod common;

use common::{TestWorkspace, dry_run_opts, global_opts, test_logger};
use seqops::cli::RunOpts;
use seqops::commands::run_file;

/// Execution continues past any failing command, and the failure log gains
/// exactly one entry per failure.
#[test]
fn continues_past_failures_with_one_log_entry_each() {
    let ws = TestWorkspace::new();
    let marker_a = ws.path().join("a.txt");
    let marker_b = ws.path().join("b.txt");
    let command_file = ws.write_file(
        "commands.txt",
        format!(
            "touch {}\nexit 7\ndefinitely-not-a-real-command-12345\ntouch {}\n",
            marker_a.display(),
            marker_b.display()
        )
        .as_bytes(),
    );
    let log_file = ws.path().join("errors.log");

    let opts = RunOpts {
        command_file,
        log_file: log_file.clone(),
    };
    run_file::run(&global_opts(), &opts, &test_logger()).unwrap();

    assert!(marker_a.exists());
    assert!(
        marker_b.exists(),
        "commands after failures should still run"
    );
    let logged = std::fs::read_to_string(&log_file).unwrap();
    assert_eq!(
        logged.lines().count(),
        2,
        "exactly one entry per failed command"
    );
    assert!(logged.contains("exit status 7"));
    assert!(logged.contains("definitely-not-a-real-command-12345"));
}

#[test]
fn log_file_accumulates_across_invocations() {
    let ws = TestWorkspace::new();
    let command_file = ws.write_file("commands.txt", b"exit 1\n");
    let log_file = ws.path().join("errors.log");

    let opts = RunOpts {
        command_file,
        log_file: log_file.clone(),
    };
    run_file::run(&global_opts(), &opts, &test_logger()).unwrap();
    run_file::run(&global_opts(), &opts, &test_logger()).unwrap();

    let logged = std::fs::read_to_string(&log_file).unwrap();
    assert_eq!(logged.lines().count(), 2, "log entries should append");
}

#[test]
fn all_successful_commands_log_nothing() {
    let ws = TestWorkspace::new();
    let marker = ws.path().join("done.txt");
    let command_file =
        ws.write_file("commands.txt", format!("touch {}\n", marker.display()).as_bytes());
    let log_file = ws.path().join("errors.log");

    let opts = RunOpts {
        command_file,
        log_file: log_file.clone(),
    };
    run_file::run(&global_opts(), &opts, &test_logger()).unwrap();

    assert!(marker.exists());
    let logged = std::fs::read_to_string(&log_file).unwrap_or_default();
    assert!(logged.is_empty());
}

#[test]
fn dry_run_lists_without_executing() {
    let ws = TestWorkspace::new();
    let marker = ws.path().join("nope.txt");
    let command_file =
        ws.write_file("commands.txt", format!("touch {}\n", marker.display()).as_bytes());
    let log_file = ws.path().join("errors.log");

    let opts = RunOpts {
        command_file,
        log_file,
    };
    run_file::run(&dry_run_opts(), &opts, &test_logger()).unwrap();

    assert!(!marker.exists());
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let ws = TestWorkspace::new();
    let marker = ws.path().join("ran.txt");
    let command_file = ws.write_file(
        "commands.txt",
        format!("# setup\n\ntouch {}\n   \n", marker.display()).as_bytes(),
    );
    let log_file = ws.path().join("errors.log");

    let opts = RunOpts {
        command_file,
        log_file: log_file.clone(),
    };
    run_file::run(&global_opts(), &opts, &test_logger()).unwrap();

    assert!(marker.exists());
    let logged = std::fs::read_to_string(&log_file).unwrap_or_default();
    assert!(logged.is_empty(), "comments must not be executed or logged");
}
