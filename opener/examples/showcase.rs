use std::fs::File;
use std::time::Duration;

use opener::prelude::*;
use opener::wakeup;
use serde_json::json;
use simplelog::{Config, LevelFilter, WriteLogger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("showcase.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let registry = Registry::new();
    let store = registry.mount();
    let (tx, mut rx) = wakeup::channel();
    store.install_wakeup(tx);

    let dialogs = DialogOpener::new(registry.clone(), Loader::ready("dialog chrome"));
    let sidebars = SidebarOpener::new(registry.clone(), Loader::ready("sidebar chrome"));

    let dialog = dialogs.open(
        OpenOptions::new("MainDialog", Loader::ready("greeting"))
            .props(json!({"title": "Hello Dialog"}))
            .handlers(
                Handlers::new()
                    .on_open(|id| println!("dialog opened as {id}"))
                    .on_close(|| println!("dialog closed")),
            ),
        DialogOptions::default(),
    )?;

    // Same name, new props: the open dialog is updated, not duplicated.
    dialogs.open(
        OpenOptions::new("MainDialog", Loader::ready("greeting"))
            .props(json!({"title": "Hello again"})),
        DialogOptions::default(),
    )?;

    let sidebar = sidebars.open(
        OpenOptions::new("Settings", Loader::ready("settings panel")),
        SidebarOpenOptions::new()
            .position(SidebarPosition::Left)
            .animation_duration(Duration::from_millis(300))
            .modal(),
    )?;

    render(&registry, &mut rx).await?;

    sidebars.close(sidebar.id())?;
    render(&registry, &mut rx).await?;

    tokio::time::sleep(Duration::from_millis(350)).await;
    dialogs.close(dialog.id())?;
    render(&registry, &mut rx).await?;

    registry.unbind();
    Ok(())
}

/// Prints one frame if the session list changed since the last one.
async fn render(
    registry: &Registry,
    rx: &mut wakeup::WakeupReceiver,
) -> Result<(), Box<dyn std::error::Error>> {
    if !rx.take_pending() {
        return Ok(());
    }
    let store = registry.current()?;
    println!("--- frame ---");
    for layer in registry.layers()? {
        let resolved = layer.resolve(&store.cancellation()).await?;
        let session = &layer.session;
        println!(
            "z={:<4} #{} {}:{} {:?} content={:?} props={}",
            layer.z_index,
            session.id,
            session.kind,
            session.name,
            session.status,
            resolved.content.downcast_ref::<&str>(),
            session.props.clone().unwrap_or_default(),
        );
    }
    Ok(())
}
