//! Redraw signals for the rendering surface.
//!
//! A render loop can sit idle until the session list changes. Each store
//! mutation sends a wakeup; buffered wakeups collapse into one redraw.

use tokio::sync::mpsc;

/// Sender half, installed into a mounted store.
#[derive(Clone, Debug)]
pub struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Signals that the session list changed.
    ///
    /// Never blocks. A full buffer already guarantees a redraw, and a dropped
    /// receiver means the surface is gone, so both errors are ignored.
    pub fn send(&self) {
        let _ = self.tx.try_send(());
    }

    /// Whether the rendering surface has dropped its receiver.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiver half, owned by the rendering surface.
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    /// Waits for the next change. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Discards pending signals so several changes cost a single redraw.
    pub fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }

    /// Returns `true` if a change is pending, consuming all pending signals.
    pub fn take_pending(&mut self) -> bool {
        let pending = self.rx.try_recv().is_ok();
        self.drain();
        pending
    }
}

/// Creates a new wakeup channel pair.
pub fn channel() -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::channel(16);
    (WakeupSender { tx }, WakeupReceiver { rx })
}
