//! Session lifecycle events
//!
//! The client never navigates. On irrecoverable refresh failure it
//! publishes [`SessionEvent::SessionExpired`] and the hosting application
//! decides what to do with the route.

use tokio::sync::watch;

/// Observable session state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedOut,
    LoggedIn,
    SessionExpired,
}

/// Publisher side of the session event channel
#[derive(Debug)]
pub(crate) struct SessionEvents {
    tx: watch::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionEvent::LoggedOut);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: SessionEvent) {
        self.tx.send_replace(event);
    }
}
