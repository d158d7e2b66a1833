//! Contract tests for the worker update cycle
//!
//! Constraints verified:
//! - Updaters receive only the per-family delta, not unchanged values
//! - Force mode hands updaters the full state every cycle
//! - One updater's failure does not prevent the next updater's invocation
//! - Construction fails fast on bad configuration

mod common;

use std::time::Duration;

use common::*;
use dyndns_core::config::{ResolverConfig, WorkerConfig};
use dyndns_core::error::Error;
use dyndns_core::registry::Registry;
use dyndns_core::traits::{Resolver, Updater};
use dyndns_core::worker::Worker;

fn worker_with(
    resolvers: Vec<Box<dyn Resolver>>,
    updaters: Vec<Box<dyn Updater>>,
    force: bool,
) -> Worker {
    Worker::from_parts(Duration::from_secs(300), force, resolvers, updaters)
}

#[tokio::test]
async fn first_cycle_emits_delta_second_emits_nothing() {
    let (resolver, _) = ScriptedResolver::returning(v4_pair("1.2.3.4"));
    let (updater, applies) = RecordingUpdater::new();
    let mut worker = worker_with(vec![Box::new(resolver)], vec![Box::new(updater)], false);

    worker.update().await;
    worker.update().await;

    let applies = applies.lock().unwrap();
    assert_eq!(applies.len(), 2);
    assert_eq!(applies[0], (Some("1.2.3.4".to_string()), None));
    // Same address on the second cycle: no delta for either family.
    assert_eq!(applies[1], (None, None));
}

#[tokio::test]
async fn force_mode_hands_full_state_every_cycle() {
    let (resolver, _) = ScriptedResolver::returning(full_pair("1.2.3.4", "::1"));
    let (updater, applies) = RecordingUpdater::new();
    let mut worker = worker_with(vec![Box::new(resolver)], vec![Box::new(updater)], true);

    worker.update().await;
    worker.update().await;

    let applies = applies.lock().unwrap();
    assert_eq!(applies.len(), 2);
    // Nothing changed on the second cycle, but force mode still emits (A, B).
    assert_eq!(
        applies[1],
        (Some("1.2.3.4".to_string()), Some("::1".to_string()))
    );
}

#[tokio::test]
async fn failed_resolution_emits_no_delta() {
    let (resolver, _) = ScriptedResolver::failing();
    let (updater, applies) = RecordingUpdater::new();
    let mut worker = worker_with(vec![Box::new(resolver)], vec![Box::new(updater)], false);

    worker.update().await;

    // A chain that resolved nothing emits nothing; absence is not removal.
    assert_eq!(applies.lock().unwrap()[0], (None, None));
}

#[tokio::test]
async fn failing_updater_does_not_stop_the_next_one() {
    let (resolver, _) = ScriptedResolver::returning(v4_pair("1.2.3.4"));
    let (bad, bad_applies) = RecordingUpdater::failing();
    let (good, good_applies) = RecordingUpdater::new();
    let mut worker = worker_with(
        vec![Box::new(resolver)],
        vec![Box::new(bad), Box::new(good)],
        false,
    );

    worker.update().await;

    assert_eq!(bad_applies.lock().unwrap().len(), 1);
    assert_eq!(
        good_applies.lock().unwrap().len(),
        1,
        "second updater must still run after the first fails"
    );
}

#[tokio::test]
async fn run_until_performs_immediate_cycle() {
    let (resolver, calls) = ScriptedResolver::returning(v4_pair("1.2.3.4"));
    let (updater, applies) = RecordingUpdater::new();
    let mut worker = Worker::from_parts(
        Duration::from_secs(3600),
        false,
        vec![Box::new(resolver)],
        vec![Box::new(updater)],
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let handle = tokio::spawn(async move {
        worker.run_until(shutdown_rx).await.unwrap();
        worker
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();

    // One synchronous cycle on start; the hour-long interval never fired.
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(applies.lock().unwrap().len(), 1);
}

#[test]
fn zero_interval_fails_construction() {
    let registry = Registry::new();
    let config = WorkerConfig {
        interval_secs: 0,
        force: false,
        resolvers: vec![ResolverConfig {
            kind: "web".to_string(),
            config: serde_json::Value::Null,
        }],
        updaters: vec![],
    };
    assert!(matches!(
        Worker::new(config, &registry),
        Err(Error::Config(_))
    ));
}

#[test]
fn unknown_resolver_type_fails_construction() {
    let registry = Registry::new();
    let config = WorkerConfig {
        interval_secs: 60,
        force: false,
        resolvers: vec![ResolverConfig {
            kind: "carrier-pigeon".to_string(),
            config: serde_json::Value::Null,
        }],
        updaters: vec![],
    };
    assert!(matches!(
        Worker::new(config, &registry),
        Err(Error::Config(_))
    ));
}
