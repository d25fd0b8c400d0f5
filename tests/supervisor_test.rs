//! End-to-end tests for preview server supervision with real child processes.
//!
//! These tests verify that:
//! 1. ensure_running() spawns exactly once in the requested directory
//! 2. A child killed from outside is replaced on the next ensure_running()
//! 3. stop() only returns once the child is gone
//! 4. poll() reports a crash to observers
#![cfg(unix)]

mod common;

use std::sync::mpsc;
use std::time::Duration;

use common::{create_site_dir, kill_externally, sleeping_supervisor, wait_until_dead};
use sitedeck::process::{is_alive, is_pid_alive, ProcessError, ServerState, SupervisorPhase};

#[test]
fn test_is_alive_rejects_non_positive_pids() {
    for pid in [0, -1, i32::MIN] {
        assert!(matches!(is_alive(pid), Err(ProcessError::InvalidArgument(_))));
    }
}

#[test]
fn test_ensure_running_spawns_in_site_dir() {
    let site = create_site_dir();
    let mut sup = sleeping_supervisor();

    sup.ensure_running(site.path()).expect("ensure_running");

    assert_eq!(sup.phase(), SupervisorPhase::Running);
    assert_eq!(sup.state(), ServerState::Running);
    let pid = sup.pid().expect("pid");
    assert!(is_pid_alive(pid).unwrap());
    assert_eq!(sup.working_dir(), Some(site.path()));

    #[cfg(target_os = "linux")]
    assert_eq!(
        common::process_cwd(pid),
        common::canonical(site.path()),
        "child should run inside the site directory"
    );

    sup.stop().unwrap();
}

#[test]
fn test_ensure_running_is_idempotent_while_alive() {
    let site = create_site_dir();
    let mut sup = sleeping_supervisor();

    sup.ensure_running(site.path()).unwrap();
    let first = sup.pid().unwrap();
    sup.ensure_running(site.path()).unwrap();
    sup.ensure_running(site.path()).unwrap();

    assert_eq!(sup.pid(), Some(first), "no new process should be spawned");
    sup.stop().unwrap();
}

#[test]
fn test_restart_after_external_kill() {
    let site = create_site_dir();
    let mut sup = sleeping_supervisor();

    sup.start(site.path()).unwrap();
    let p = sup.pid().unwrap();

    kill_externally(p);

    sup.ensure_running(site.path()).expect("restart");
    let q = sup.pid().unwrap();

    assert_ne!(p, q, "a dead server must be replaced by a new process");
    assert_eq!(sup.state(), ServerState::Running);
    assert!(is_pid_alive(q).unwrap());
    assert!(!is_pid_alive(p).unwrap(), "old pid must be reaped");

    sup.stop().unwrap();
}

#[test]
fn test_stop_waits_for_exit() {
    let site = create_site_dir();
    let mut sup = sleeping_supervisor();

    sup.start(site.path()).unwrap();
    let p = sup.pid().unwrap();

    sup.stop().expect("stop");

    assert!(!is_alive(p as i32).unwrap());
    assert_eq!(sup.phase(), SupervisorPhase::NoProcess);
    assert_eq!(sup.state(), ServerState::Stopped);
}

#[test]
fn test_stop_after_external_kill_is_tolerated() {
    let site = create_site_dir();
    let mut sup = sleeping_supervisor();

    sup.start(site.path()).unwrap();
    let p = sup.pid().unwrap();
    kill_externally(p);

    sup.stop().expect("stopping an already dead server should succeed");
    assert_eq!(sup.phase(), SupervisorPhase::NoProcess);
    assert!(!is_pid_alive(p).unwrap());
}

#[test]
fn test_stop_without_process_is_noop() {
    let mut sup = sleeping_supervisor();
    sup.stop().unwrap();
    sup.stop().unwrap();
    assert_eq!(sup.phase(), SupervisorPhase::NoProcess);
}

#[test]
fn test_toggle_cycle() {
    let site = create_site_dir();
    let mut sup = sleeping_supervisor();

    assert_eq!(sup.toggle(site.path()).unwrap(), ServerState::Running);
    let p = sup.pid().unwrap();
    assert_eq!(sup.toggle(site.path()).unwrap(), ServerState::Stopped);
    assert!(wait_until_dead(p, Duration::from_secs(1)));
    assert_eq!(sup.toggle(site.path()).unwrap(), ServerState::Running);
    assert_ne!(sup.pid(), Some(p));

    sup.stop().unwrap();
}

#[test]
fn test_poll_reports_external_kill_to_observers() {
    let site = create_site_dir();
    let mut sup = sleeping_supervisor();
    let (tx, rx) = mpsc::channel();
    sup.subscribe(tx);

    sup.ensure_running(site.path()).unwrap();
    let p = sup.pid().unwrap();

    kill_externally(p);
    assert_eq!(sup.poll(), ServerState::Stopped);
    assert_eq!(sup.poll(), ServerState::Stopped);

    sup.ensure_running(site.path()).expect("restart");
    let q = sup.pid().unwrap();
    assert_ne!(p, q);

    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![ServerState::Running, ServerState::Stopped, ServerState::Running]
    );
    sup.stop().unwrap();
}
