//! Streaming sink boundary. The orchestrator emits `BatchProgressEvent`s
//! into an `EventSink`; the HTTP layer adapts one onto an SSE response.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::models::events::BatchProgressEvent;

#[async_trait]
pub trait EventSink: Send + Sync {
    /// Delivers one event. Delivery is best-effort: a disconnected consumer
    /// must not fail the batch, so implementations swallow send errors.
    async fn send(&self, event: BatchProgressEvent);
}

/// Sink backed by an unbounded channel. The receiving half is typically
/// drained by an SSE response stream or a test collector.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<BatchProgressEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<BatchProgressEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn send(&self, event: BatchProgressEvent) {
        // Receiver gone means the caller hung up; keep draining workers.
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_sink_forwards_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);
        sink.send(BatchProgressEvent::Done {
            total: 0,
            results: vec![],
        })
        .await;
        assert!(matches!(
            rx.recv().await,
            Some(BatchProgressEvent::Done { total: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped_is_silent() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sink = ChannelSink::new(tx);
        // Must not panic or error.
        sink.send(BatchProgressEvent::Done {
            total: 0,
            results: vec![],
        })
        .await;
    }
}
