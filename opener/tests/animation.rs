use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use opener::prelude::*;

fn request(name: &str) -> OpenRequest {
    OpenRequest::new("sidebar", name, Loader::ready(()), Loader::ready(()))
}

fn close_counter() -> (Arc<AtomicUsize>, Handlers) {
    let closed = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&closed);
    let handlers = Handlers::new().on_close(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (closed, handlers)
}

// =============================================================================
// Closing -> removed
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_animated_close_sequencing() {
    let registry = Registry::new();
    registry.mount();
    let (closed, handlers) = close_counter();
    let id = registry.open(request("A").handlers(handlers)).unwrap().id();

    registry.animate_close(id, Duration::from_millis(500)).unwrap();

    let session = registry.get(id).unwrap().expect("still present while closing");
    assert_eq!(session.status, Status::Closing);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(registry.get(id).unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(registry.get(id).unwrap().is_none());
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_direct_close_before_timer() {
    let registry = Registry::new();
    registry.mount();
    let (closed, handlers) = close_counter();
    let id = registry.open(request("A").handlers(handlers)).unwrap().id();
    let other = registry.open(request("B")).unwrap().id();

    registry.animate_close(id, Duration::from_millis(500)).unwrap();
    registry.close(id).unwrap();
    assert!(registry.get(id).unwrap().is_none());

    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(closed.load(Ordering::SeqCst), 1);
    let remaining: Vec<SessionId> = registry.snapshot().unwrap().iter().map(|s| s.id).collect();
    assert_eq!(remaining, vec![other]);
}

#[tokio::test(start_paused = true)]
async fn test_stale_timer_never_hits_newer_session() {
    let registry = Registry::new();
    registry.mount();
    let first = registry.open(request("A")).unwrap().id();

    registry.animate_close(first, Duration::from_millis(500)).unwrap();
    registry.close(first).unwrap();
    let second = registry.open(request("B")).unwrap().id();
    assert_ne!(first, second);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(registry.get(second).unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_update_keeps_closing_session_closing() {
    let registry = Registry::new();
    registry.mount();
    let id = registry
        .open(request("A").props(serde_json::json!({"step": 1})))
        .unwrap()
        .id();

    registry.animate_close(id, Duration::from_millis(300)).unwrap();
    let outcome = registry
        .open(request("A").props(serde_json::json!({"step": 2})))
        .unwrap();
    assert_eq!(outcome, OpenOutcome::Updated(id));
    assert_eq!(registry.get(id).unwrap().map(|s| s.status), Some(Status::Closing));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(registry.get(id).unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_animate_unknown_id_is_noop() {
    let registry = Registry::new();
    registry.mount();
    registry.open(request("A")).unwrap();

    registry
        .animate_close(SessionId::new(42), Duration::from_millis(10))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(registry.snapshot().unwrap().len(), 1);
}

// =============================================================================
// Teardown
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_timer_after_unbind_is_harmless() {
    let registry = Registry::new();
    let old = registry.mount();
    let (closed, handlers) = close_counter();
    let id = registry.open(request("A").handlers(handlers)).unwrap().id();
    registry.animate_close(id, Duration::from_millis(500)).unwrap();

    assert!(registry.unbind());
    let fresh = registry.mount();
    let new_id = registry.open(request("A")).unwrap().id();
    assert_eq!(new_id, id);

    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(fresh.len(), 1);
    assert_eq!(old.get(id).map(|s| s.status), Some(Status::Closing));
    assert_eq!(closed.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_timer_after_store_dropped_is_harmless() {
    let registry = Registry::new();
    registry.mount();
    let id = registry.open(request("A")).unwrap().id();
    registry.animate_close(id, Duration::from_millis(100)).unwrap();

    registry.unbind();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(!registry.is_bound());
}

#[tokio::test(start_paused = true)]
async fn test_animate_on_torn_down_handle_leaves_session_closing() {
    let handle = StoreHandle::default();
    let id = handle.open(request("A"));
    handle.teardown();

    handle.animate_close(id.id(), Duration::from_millis(50)).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(handle.get(id.id()).map(|s| s.status), Some(Status::Closing));
}

#[test]
fn test_animate_without_runtime_reports_error() {
    let handle = StoreHandle::default();
    let id = handle.open(request("A")).id();

    assert_eq!(
        handle.animate_close(id, Duration::from_millis(50)),
        Err(OverlayError::NoRuntime)
    );
    assert_eq!(handle.get(id).map(|s| s.status), Some(Status::Closing));
}
