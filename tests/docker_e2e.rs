//! End-to-end tests against a real container runtime.
//!
//! These require a running Docker daemon and are marked `#[ignore]`.
//! Run with: `cargo test -- --ignored`

use std::time::Duration;

use dockhand::{Engine, Error, Mounts, RunConfig, RunOptions, RunStatus, run_async, run_sync};

fn engine() -> Engine {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let engine = Engine::default();
    engine
        .verify_connection()
        .expect("docker daemon should be reachable");
    engine
}

#[test]
#[ignore]
fn sync_run_captures_output() {
    let engine = engine();
    let config = RunConfig::new().options(RunOptions::new().set("rm", true));
    let out = run_sync(&engine, "alpine:3", "echo hello", &config).expect("run should succeed");
    assert!(out.success());
    assert_eq!(out.stdout.trim(), "hello");
}

#[test]
#[ignore]
fn async_run_invokes_callback_and_removes_container() {
    let engine = engine();
    let config = RunConfig::new()
        .options(RunOptions::new().set("name", "dockhand-e2e-async"))
        .timeout(Duration::from_secs(120));

    let status = run_async(
        &engine,
        "alpine:3",
        "sh -c 'echo from-container'",
        Some(|id: Option<String>, status: &RunStatus| {
            assert!(id.is_some(), "id should resolve while the container exists");
            assert_eq!(status.exit_code, Some(0));
        }),
        &config,
    )
    .expect("async run should succeed");
    assert!(status.success());

    let id = engine
        .container_id("dockhand-e2e-async")
        .expect("lookup should succeed");
    assert_eq!(id, None, "container should have been removed");
}

#[test]
#[ignore]
fn timeout_kills_and_removes_the_container() {
    let engine = engine();
    let config = RunConfig::new()
        .options(RunOptions::new().set("name", "dockhand-e2e-slow"))
        .timeout(Duration::from_secs(1));

    let err = run_async(
        &engine,
        "alpine:3",
        "sleep 100",
        None::<fn(Option<String>, &RunStatus)>,
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }));

    let id = engine
        .container_id("dockhand-e2e-slow")
        .expect("lookup should succeed");
    assert_eq!(id, None, "container should have been removed");
}

#[test]
#[ignore]
fn pull_then_image_queries_resolve() {
    let engine = engine();
    engine.pull("alpine:3").expect("pull should succeed");
    assert!(engine.image_exists("alpine:3").expect("inspect should run"));
    assert!(
        engine
            .image_id("alpine:3")
            .expect("images should run")
            .is_some()
    );
    let inspected = engine.inspect("alpine:3").expect("inspect should parse");
    assert!(inspected.is_array());
}

#[test]
#[ignore]
fn bind_mounted_files_are_visible_in_the_container() {
    let engine = engine();
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("marker.txt"), "present\n").expect("write marker");

    let config = RunConfig::new()
        .mounts(Mounts::new().bind(dir.path().display().to_string(), "/data"))
        .options(RunOptions::new().set("rm", true));
    let out = run_sync(&engine, "alpine:3", "cat /data/marker.txt", &config).expect("run");
    assert_eq!(out.stdout, "present\n");
}
