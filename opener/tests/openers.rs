use std::time::Duration;

use opener::openers::{DIALOG_KIND, SIDEBAR_KIND};
use opener::prelude::*;
use serde_json::json;

fn setup() -> (Registry, DialogOpener, SidebarOpener) {
    let registry = Registry::new();
    registry.mount();
    let dialogs = DialogOpener::new(registry.clone(), Loader::ready("dialog chrome"));
    let sidebars = SidebarOpener::new(registry.clone(), Loader::ready("sidebar chrome"));
    (registry, dialogs, sidebars)
}

fn options(name: &str) -> OpenOptions {
    OpenOptions::new(name, Loader::ready("content"))
}

// =============================================================================
// Dialogs
// =============================================================================

#[test]
fn test_dialog_shapes_request() {
    let (registry, dialogs, _) = setup();
    let id = dialogs
        .open(
            options("Main").props(json!({"title": "Hello"})),
            DialogOptions {
                wrapper_class: "MyClass".into(),
                modal: true,
            },
        )
        .unwrap()
        .id();

    let session = registry.get(id).unwrap().expect("dialog");
    assert_eq!(session.kind, DIALOG_KIND);
    assert_eq!(session.name, "Main");
    assert_eq!(session.styles, dialogs.default_styles);
    assert_eq!(
        session.extra.as_dialog().map(|d| d.wrapper_class.as_str()),
        Some("MyClass")
    );
    assert!(session.surface.ptr_eq(dialogs.surface()));
}

#[test]
fn test_caller_styles_replace_defaults() {
    let (registry, dialogs, _) = setup();
    let mut styles = Styles::new();
    styles.insert("backgroundColor".into(), json!("black"));

    let id = dialogs
        .open(options("Main").styles(styles.clone()), DialogOptions::default())
        .unwrap()
        .id();

    assert_eq!(registry.get(id).unwrap().map(|s| s.styles.clone()), Some(styles));
}

#[test]
fn test_dialog_close_is_immediate() {
    let (registry, dialogs, _) = setup();
    let id = dialogs.open(options("Main"), DialogOptions::default()).unwrap().id();

    dialogs.close(id).unwrap();

    assert!(registry.snapshot().unwrap().is_empty());
}

#[test]
fn test_dialog_and_sidebar_share_names() {
    let (registry, dialogs, sidebars) = setup();
    dialogs.open(options("Shared"), DialogOptions::default()).unwrap();
    sidebars.open(options("Shared"), SidebarOpenOptions::new()).unwrap();
    assert_eq!(registry.snapshot().unwrap().len(), 2);

    assert_eq!(sidebars.close_by_kind().unwrap(), 1);
    let kinds: Vec<String> = registry.snapshot().unwrap().iter().map(|s| s.kind.clone()).collect();
    assert_eq!(kinds, vec![DIALOG_KIND]);
}

#[test]
fn test_close_by_name_spans_kinds() {
    let (registry, dialogs, sidebars) = setup();
    dialogs.open(options("Shared"), DialogOptions::default()).unwrap();
    sidebars.open(options("Shared"), SidebarOpenOptions::new()).unwrap();
    dialogs.open(options("Other"), DialogOptions::default()).unwrap();

    assert_eq!(dialogs.close_by_name("Shared").unwrap(), 2);
    assert_eq!(registry.snapshot().unwrap().len(), 1);
    assert_eq!(sidebars.close_all().unwrap(), 1);
}

#[test]
fn test_opener_without_store_reports_unbound() {
    let registry = Registry::new();
    let dialogs = DialogOpener::new(registry, Loader::ready(()));
    assert_eq!(
        dialogs.open(options("Main"), DialogOptions::default()),
        Err(OverlayError::Unbound)
    );
}

// =============================================================================
// Sidebars
// =============================================================================

#[test]
fn test_sidebar_defaults() {
    let (registry, _, sidebars) = setup();
    let id = sidebars.open(options("Side"), SidebarOpenOptions::new()).unwrap().id();

    let session = registry.get(id).unwrap().expect("sidebar");
    let extra = session.extra.as_sidebar().expect("sidebar options");
    assert_eq!(session.kind, SIDEBAR_KIND);
    assert_eq!(extra.position, SidebarPosition::Right);
    assert_eq!(extra.animation_duration, Duration::from_millis(400));
    assert!(!extra.modal);
}

#[test]
fn test_sidebar_request_overrides() {
    let (registry, _, sidebars) = setup();
    let sidebars = sidebars.with_default_animation_duration(Duration::from_millis(250));
    let id = sidebars
        .open(
            options("Side"),
            SidebarOpenOptions::new()
                .position(SidebarPosition::Left)
                .wrapper_class("Panel")
                .modal(),
        )
        .unwrap()
        .id();

    let session = registry.get(id).unwrap().expect("sidebar");
    let extra = session.extra.as_sidebar().expect("sidebar options");
    assert_eq!(extra.position, SidebarPosition::Left);
    assert_eq!(extra.animation_duration, Duration::from_millis(250));
    assert_eq!(extra.wrapper_class.as_deref(), Some("Panel"));
    assert!(extra.modal);
}

#[tokio::test(start_paused = true)]
async fn test_sidebar_close_animates() {
    let (registry, _, sidebars) = setup();
    let id = sidebars
        .open(
            options("Side"),
            SidebarOpenOptions::new().animation_duration(Duration::from_millis(600)),
        )
        .unwrap()
        .id();

    sidebars.close(id).unwrap();
    assert_eq!(registry.get(id).unwrap().map(|s| s.status), Some(Status::Closing));

    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(registry.get(id).unwrap().is_none());
}

#[test]
fn test_sidebar_zero_duration_closes_immediately() {
    let (registry, _, sidebars) = setup();
    let id = sidebars
        .open(
            options("Side"),
            SidebarOpenOptions::new().animation_duration(Duration::ZERO),
        )
        .unwrap()
        .id();

    sidebars.close(id).unwrap();
    assert!(registry.get(id).unwrap().is_none());
}

#[test]
fn test_sidebar_close_unknown_is_noop() {
    let (_, _, sidebars) = setup();
    assert_eq!(sidebars.close(SessionId::new(3)), Ok(()));
}

#[test]
fn test_backdrop_click_only_closes_modal_sidebars() {
    let (registry, _, sidebars) = setup();
    let plain = sidebars
        .open(
            options("Plain"),
            SidebarOpenOptions::new().animation_duration(Duration::ZERO),
        )
        .unwrap()
        .id();
    let modal = sidebars
        .open(
            options("Modal"),
            SidebarOpenOptions::new()
                .animation_duration(Duration::ZERO)
                .modal(),
        )
        .unwrap()
        .id();

    sidebars.backdrop_clicked(plain).unwrap();
    sidebars.backdrop_clicked(modal).unwrap();

    let remaining: Vec<SessionId> = registry.snapshot().unwrap().iter().map(|s| s.id).collect();
    assert_eq!(remaining, vec![plain]);
}

#[test]
fn test_sidebar_options_from_settings() {
    let options: SidebarOptions = serde_json::from_value(json!({
        "position": "bottom",
        "modal": true,
    }))
    .unwrap();
    assert_eq!(options.position, SidebarPosition::Bottom);
    assert!(options.modal);
    assert_eq!(options.animation_duration, Duration::from_millis(400));
}
