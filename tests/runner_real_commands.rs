// tests/runner_real_commands.rs

mod common;
use crate::common::builders::RecipeBuilder;
use crate::common::{file_names, init_tracing, with_timeout};

use std::error::Error;

use logpatch::engine::{RecipeRunner, StepKind};
use logpatch::exec::ShellExecutor;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn demo_recipe_writes_three_single_line_logs() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let recipe = RecipeBuilder::new("demo")
            .log_directory(dir.path())
            .log_package_versions(true)
            .log_patch(true)
            .patch_cmd("echo patched")
            .package_version_cmd("echo v1")
            .build();

        let mut runner = RecipeRunner::new(ShellExecutor::default(), Vec::<u8>::new());
        let summary = runner.run_recipe(&recipe).await?;

        let contents: Vec<(StepKind, String)> = summary
            .steps
            .iter()
            .map(|s| {
                let path = s.log_file.as_ref().expect("every step is logged");
                (s.kind, std::fs::read_to_string(path).unwrap())
            })
            .collect();

        assert_eq!(
            contents,
            vec![
                (StepKind::PrePatchInventory, "v1\n".to_string()),
                (StepKind::Patch, "patched\n".to_string()),
                (StepKind::PostPatchInventory, "v1\n".to_string()),
            ]
        );

        // Timestamps are captured per step, so names sort in step order.
        let names = file_names(dir.path());
        assert_eq!(names.len(), 3);
        assert!(names[0].ends_with("_package_versions_pre-patch.log"));
        assert!(names[1].ends_with("_demo.log"));
        assert!(names[2].ends_with("_package_versions_post-patch.log"));

        assert_eq!(
            String::from_utf8(runner.into_console())?,
            "v1\npatched\nv1\n"
        );
        Ok(())
    })
    .await
}

#[tokio::test]
async fn rerunning_never_overwrites_earlier_logs() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let recipe = RecipeBuilder::new("demo")
            .log_directory(dir.path())
            .log_patch(true)
            .patch_cmd("echo patched")
            .build();

        let mut runner = RecipeRunner::new(ShellExecutor::default(), Vec::<u8>::new());
        runner.run_recipe(&recipe).await?;
        runner.run_recipe(&recipe).await?;

        let names = file_names(dir.path());
        let total: String = names
            .iter()
            .map(|n| std::fs::read_to_string(dir.path().join(n)).unwrap())
            .collect();
        assert_eq!(total, "patched\npatched\n");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn failing_real_pre_patch_command_leaves_no_patch_marker() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let marker = dir.path().join("patched.marker");
        let recipe = RecipeBuilder::new("demo")
            .log_directory(dir.path().join("logs"))
            .log_package_versions(true)
            .patch_cmd(&format!("touch '{}'", marker.display()))
            .package_version_cmd("echo listing; exit 1")
            .build();

        let mut runner = RecipeRunner::new(ShellExecutor::default(), Vec::<u8>::new());
        let err = runner.run_recipe(&recipe).await.unwrap_err();

        assert!(err.is_command_failure());
        assert!(!marker.exists(), "patch command must not run");
        assert_eq!(runner.into_console(), b"listing\n");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn unopenable_log_directory_leaves_no_patch_marker() -> TestResult {
    with_timeout(async {
        init_tracing();

        let dir = tempfile::tempdir()?;
        let not_a_dir = dir.path().join("file");
        std::fs::write(&not_a_dir, "")?;
        let marker = dir.path().join("patched.marker");

        let recipe = RecipeBuilder::new("demo")
            .log_directory(&not_a_dir)
            .log_patch(true)
            .patch_cmd(&format!("touch '{}'", marker.display()))
            .build();

        let mut runner = RecipeRunner::new(ShellExecutor::default(), Vec::<u8>::new());
        let err = runner.run_recipe(&recipe).await.unwrap_err();

        assert!(!err.is_command_failure());
        assert!(!marker.exists(), "patch command must not run without its log file");
        Ok(())
    })
    .await
}
