//! Tests for the `install_agent` application service.
//!
//! Every collaborator is a `FakeHost`, so each test checks the exact
//! sequence of registry, filesystem, transfer, and launch calls.

#![allow(clippy::expect_used)]

use std::path::{MAIN_SEPARATOR, PathBuf};

use agent_provision::application::services::install_agent::{fetch_installer, install_agent};
use agent_provision::domain::{FailureKind, InstallOutcome, ProvisionError};

use crate::mocks::{Call, FakeHost, Level, PASSWORD, RecordingReporter, TOKEN, request};

async fn run(host: &FakeHost, reporter: &RecordingReporter) -> InstallOutcome {
    install_agent(host, host, host, host, reporter, &request()).await
}

fn local_dir() -> String {
    format!("localDir{MAIN_SEPARATOR}")
}

fn failure_kind(outcome: &InstallOutcome) -> FailureKind {
    match outcome {
        InstallOutcome::Failed { kind, .. } => *kind,
        other => panic!("expected failure, got {other:?}"),
    }
}

// ── Scenario A: clean machine, everything succeeds ────────────────────────────

#[tokio::test]
async fn test_fresh_install_runs_every_step_in_order() {
    let host = FakeHost::new();
    let reporter = RecordingReporter::default();

    let outcome = run(&host, &reporter).await;

    assert_eq!(outcome, InstallOutcome::Success);
    assert_eq!(
        host.calls(),
        vec![
            Call::IsInstalled("RiverbirdAgent".into()),
            Call::Exists(PathBuf::from(local_dir())),
            Call::CreateDir(PathBuf::from(local_dir())),
            Call::Open {
                host: "files.example.net".into(),
                port: 22,
                username: "deploy".into(),
            },
            Call::Fetch {
                session: 1,
                remote_path: "remoteDir/installer.exe".into(),
                local_dir: local_dir(),
            },
            Call::Close { session: 1 },
            Call::Launch {
                program: PathBuf::from(format!("{}installer.exe", local_dir())),
                args: vec![
                    "install".into(),
                    format!("-token {TOKEN}"),
                    "-url https://svc.example.net".into(),
                    "-version 7.2.1".into(),
                ],
            },
        ]
    );
}

#[tokio::test]
async fn test_existing_destination_is_not_recreated() {
    let host = FakeHost {
        dir_exists: true,
        ..FakeHost::new()
    };
    let reporter = RecordingReporter::default();

    let outcome = run(&host, &reporter).await;

    assert_eq!(outcome, InstallOutcome::Success);
    assert_eq!(host.count(|c| matches!(c, Call::CreateDir(_))), 0);
    assert_eq!(host.count(|c| matches!(c, Call::Fetch { .. })), 1);
}

#[tokio::test]
async fn test_fetch_step_names_local_installer_path() {
    let host = FakeHost::new();
    let reporter = RecordingReporter::default();

    run(&host, &reporter).await;

    let expected = format!("fetching remoteDir/installer.exe to {}installer.exe", local_dir());
    assert!(
        reporter.at(Level::Step).contains(&expected),
        "steps: {:?}",
        reporter.at(Level::Step)
    );
}

// ── Scenario B: already installed ─────────────────────────────────────────────

#[tokio::test]
async fn test_already_installed_touches_nothing() {
    let host = FakeHost {
        installed: true,
        ..FakeHost::new()
    };
    let reporter = RecordingReporter::default();

    let outcome = run(&host, &reporter).await;

    assert_eq!(outcome, InstallOutcome::AlreadyInstalled);
    assert_eq!(host.calls(), vec![Call::IsInstalled("RiverbirdAgent".into())]);
    assert!(reporter.at(Level::Error).is_empty());
}

// ── Scenario C: fetch fails after the session opened ──────────────────────────

#[tokio::test]
async fn test_fetch_failure_still_closes_session() {
    let host = FakeHost {
        fetch_fails: true,
        ..FakeHost::new()
    };
    let reporter = RecordingReporter::default();

    let outcome = run(&host, &reporter).await;

    assert_eq!(failure_kind(&outcome), FailureKind::Transfer);
    assert_eq!(host.count(|c| matches!(c, Call::Close { .. })), 1);
    assert_eq!(host.count(|c| matches!(c, Call::Launch { .. })), 0);
    let calls = host.calls();
    assert!(matches!(calls.last(), Some(Call::Close { session: 1 })));

    let errors = reporter.at(Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("cannot fetch remoteDir/installer.exe"), "{}", errors[0]);
    assert!(errors[0].contains("no such file"), "{}", errors[0]);
}

// ── Scenario D: destination cannot be created ─────────────────────────────────

#[tokio::test]
async fn test_filesystem_failure_never_contacts_server() {
    let host = FakeHost {
        mkdir_fails: true,
        ..FakeHost::new()
    };
    let reporter = RecordingReporter::default();

    let outcome = run(&host, &reporter).await;

    assert_eq!(failure_kind(&outcome), FailureKind::Filesystem);
    assert_eq!(host.count(Call::is_transfer), 0);
    assert_eq!(host.count(|c| matches!(c, Call::Launch { .. })), 0);
    assert!(reporter.at(Level::Error)[0].contains("permission denied"));
}

// ── Connection and close behaviour ────────────────────────────────────────────

#[tokio::test]
async fn test_open_failure_skips_fetch_and_close() {
    let host = FakeHost {
        open_fails: true,
        ..FakeHost::new()
    };
    let reporter = RecordingReporter::default();

    let outcome = run(&host, &reporter).await;

    assert_eq!(failure_kind(&outcome), FailureKind::Connection);
    assert_eq!(host.count(|c| matches!(c, Call::Open { .. })), 1);
    assert_eq!(host.count(|c| matches!(c, Call::Fetch { .. })), 0);
    assert_eq!(host.count(|c| matches!(c, Call::Close { .. })), 0);
    let errors = reporter.at(Level::Error);
    assert!(errors[0].contains("files.example.net:22"), "{}", errors[0]);
    assert!(errors[0].contains("connection refused"), "{}", errors[0]);
}

#[tokio::test]
async fn test_close_failure_does_not_override_success() {
    let host = FakeHost {
        close_fails: true,
        ..FakeHost::new()
    };
    let reporter = RecordingReporter::default();

    let outcome = run(&host, &reporter).await;

    assert_eq!(outcome, InstallOutcome::Success);
    assert_eq!(host.count(|c| matches!(c, Call::Close { .. })), 1);
    assert_eq!(host.count(|c| matches!(c, Call::Launch { .. })), 1);
    let warnings = reporter.at(Level::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("channel already closed"));
}

#[tokio::test]
async fn test_fetch_installer_reports_transfer_error_after_close() {
    let host = FakeHost {
        fetch_fails: true,
        close_fails: true,
        ..FakeHost::new()
    };
    let reporter = RecordingReporter::default();

    let err = fetch_installer(&host, &reporter, &request())
        .await
        .expect_err("fetch must fail");

    assert!(matches!(err, ProvisionError::Transfer { .. }));
    assert_eq!(host.count(|c| matches!(c, Call::Close { .. })), 1);
}

// ── Launch and registry failures ──────────────────────────────────────────────

#[tokio::test]
async fn test_launch_failure_is_reported() {
    let host = FakeHost {
        launch_fails: true,
        ..FakeHost::new()
    };
    let reporter = RecordingReporter::default();

    let outcome = run(&host, &reporter).await;

    assert_eq!(failure_kind(&outcome), FailureKind::Launch);
    assert_eq!(host.count(|c| matches!(c, Call::Close { .. })), 1);
    assert!(reporter.at(Level::Error)[0].contains("file not found"));
}

#[tokio::test]
async fn test_registry_failure_stops_before_any_mutation() {
    let host = FakeHost {
        registry_fails: true,
        ..FakeHost::new()
    };
    let reporter = RecordingReporter::default();

    let outcome = run(&host, &reporter).await;

    assert_eq!(failure_kind(&outcome), FailureKind::Registry);
    assert_eq!(host.calls().len(), 1);
    assert_eq!(host.count(Call::is_filesystem), 0);
}

// ── Secrets ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_secrets_never_reach_the_log_stream() {
    for host in [
        FakeHost::new(),
        FakeHost {
            fetch_fails: true,
            ..FakeHost::new()
        },
        FakeHost {
            launch_fails: true,
            ..FakeHost::new()
        },
    ] {
        let reporter = RecordingReporter::default();
        run(&host, &reporter).await;
        for (_, line) in reporter.lines() {
            assert!(!line.contains(PASSWORD), "password leaked: {line}");
            assert!(!line.contains(TOKEN), "token leaked: {line}");
        }
    }
}
