// tests/executor_streaming.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::time::{Duration, Instant};

use logpatch::errors::LogpatchError;
use logpatch::exec::{ExecutorBackend, ShellExecutor};
use logpatch::sink::{drain, LogFile};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn yields_every_line_in_order_on_success() -> TestResult {
    with_timeout(async {
        init_tracing();

        let executor = ShellExecutor::default();
        let mut lines = executor.spawn("for i in 1 2 3 4 5; do echo line$i; done")?;

        let mut seen = Vec::new();
        while let Some(line) = lines.next_line().await? {
            seen.push(line);
        }

        assert_eq!(seen, vec!["line1\n", "line2\n", "line3\n", "line4\n", "line5\n"]);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn yields_all_lines_before_command_failed() -> TestResult {
    with_timeout(async {
        init_tracing();

        let cmd = "echo one; echo two >&2; echo three; exit 7";
        let executor = ShellExecutor::default();
        let mut lines = executor.spawn(cmd)?;

        let mut seen = Vec::new();
        let failure = loop {
            match lines.next_line().await {
                Ok(Some(line)) => seen.push(line),
                Ok(None) => panic!("expected a failure after the output"),
                Err(e) => break e,
            }
        };

        assert_eq!(seen, vec!["one\n", "two\n", "three\n"]);
        match failure {
            LogpatchError::CommandFailed { command, exit_code } => {
                assert_eq!(command, cmd);
                assert_eq!(exit_code, 7);
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
        Ok(())
    })
    .await
}

#[tokio::test]
async fn lines_arrive_before_the_process_exits() -> TestResult {
    with_timeout(async {
        init_tracing();

        let executor = ShellExecutor::default();
        let mut lines = executor.spawn("echo early; sleep 2; echo late")?;

        let started = Instant::now();
        let first = lines.next_line().await?;
        assert_eq!(first.as_deref(), Some("early\n"));
        assert!(
            started.elapsed() < Duration::from_millis(1500),
            "first line should not wait for the sleep"
        );

        assert_eq!(lines.next_line().await?.as_deref(), Some("late\n"));
        assert_eq!(lines.next_line().await?, None);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn shell_features_work_inside_commands() -> TestResult {
    with_timeout(async {
        init_tracing();

        let executor = ShellExecutor::new("sh");
        let mut lines = executor.spawn("printf 'b\\na\\n' | sort && cd / && pwd")?;
        let mut console = Vec::<u8>::new();
        let n = drain(lines.as_mut(), None, &mut console).await?;

        assert_eq!(n, 3);
        assert_eq!(String::from_utf8(console)?, "a\nb\n/\n");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn file_sink_matches_console_byte_for_byte() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let log = dir.path().join("out.log");

        let executor = ShellExecutor::default();
        let mut lines =
            executor.spawn("echo 'stdout a'; echo 'stderr b' >&2; printf 'no newline'")?;
        let mut console = Vec::<u8>::new();
        let mut log_file = LogFile::open_append(&log).await?;
        drain(lines.as_mut(), Some(&mut log_file), &mut console).await?;
        drop(log_file);

        assert_eq!(std::fs::read(&log)?, console);
        assert_eq!(String::from_utf8(console)?, "stdout a\nstderr b\nno newline");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn failing_drain_still_leaves_output_in_file() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let log = dir.path().join("fail.log");

        let executor = ShellExecutor::default();
        let mut lines = executor.spawn("echo partial; exit 3")?;
        let mut console = Vec::<u8>::new();
        let mut log_file = LogFile::open_append(&log).await?;
        let err = drain(lines.as_mut(), Some(&mut log_file), &mut console)
            .await
            .unwrap_err();
        drop(log_file);

        assert!(matches!(err, LogpatchError::CommandFailed { exit_code: 3, .. }));
        assert_eq!(std::fs::read_to_string(&log)?, "partial\n");
        assert_eq!(console, b"partial\n");
        Ok(())
    })
    .await
}
