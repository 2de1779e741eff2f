//! Lifecycle signals emitted around file-based imports
//!
//! The controller publishes through [`ImportEventSink`] so the surrounding
//! UI can show progress without the pipeline knowing who listens.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use tracing::info;

/// A lifecycle signal of a file import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImportEvent {
    /// The file is about to be parsed
    ParseStarted,
    /// The run finished; zero transactions when it failed
    ParseEnded { transactions: usize },
}

/// Receiver of import lifecycle signals
pub trait ImportEventSink {
    fn emit(&self, event: ImportEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ImportEventSink for NullSink {
    fn emit(&self, _event: ImportEvent) {}
}

/// Logs events through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ImportEventSink for TracingSink {
    fn emit(&self, event: ImportEvent) {
        match event {
            ImportEvent::ParseStarted => info!("import started"),
            ImportEvent::ParseEnded { transactions } => info!(transactions, "import ended"),
        }
    }
}

/// Forward events to another thread; a hung-up receiver is ignored
impl ImportEventSink for Sender<ImportEvent> {
    fn emit(&self, event: ImportEvent) {
        let _ = self.send(event);
    }
}

impl<S: ImportEventSink + ?Sized> ImportEventSink for &S {
    fn emit(&self, event: ImportEvent) {
        (**self).emit(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_channel_sink() {
        let (tx, rx) = mpsc::channel::<ImportEvent>();
        tx.emit(ImportEvent::ParseStarted);
        tx.emit(ImportEvent::ParseEnded { transactions: 3 });

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                ImportEvent::ParseStarted,
                ImportEvent::ParseEnded { transactions: 3 }
            ]
        );
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (tx, rx) = mpsc::channel::<ImportEvent>();
        drop(rx);
        tx.emit(ImportEvent::ParseStarted);
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(ImportEvent::ParseEnded { transactions: 0 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "parseEnded", "transactions": 0}));
    }
}
