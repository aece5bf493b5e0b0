use crate::bus::Event;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

/// `recv` over bus receivers that rides over lag instead of reporting it.
pub trait EventReceiverExt<T> {
    /// Next event, or `None` once the bus side is gone.
    fn recv(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;
}

impl<T: Event> EventReceiverExt<T> for broadcast::Receiver<Arc<T>> {
    async fn recv(&mut self) -> Option<Arc<T>> {
        loop {
            match Self::recv(self).await {
                Ok(event) => return Some(event),
                // Notifications are idempotent snapshots; skipping to the newest is safe.
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(event = std::any::type_name::<T>(), skipped, "Receiver lagged; skipping ahead");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
