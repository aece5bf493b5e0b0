use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::trace;

/// Buffer per event type. Notifications are small and bursty at most.
pub const CHANNEL_CAPACITY: usize = 64;

/// Anything `Send + Sync + 'static` can travel over the bus.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

/// Type-keyed registry of broadcast channels.
///
/// Cloning is cheap; clones share the registry.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to every `T` published from now on.
    ///
    /// # Errors
    /// [`EventBusError::TypeMismatch`] if the registry is corrupted.
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        Ok(self.sender::<T>()?.subscribe())
    }

    /// Publishes `event` to every subscriber of `T`.
    ///
    /// Returns how many subscribers received it; `0` means the event was dropped.
    ///
    /// # Errors
    /// [`EventBusError::TypeMismatch`] if the registry is corrupted.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        let delivered = self.sender::<T>()?.send(Arc::new(event)).unwrap_or_else(|_| {
            trace!(event = type_name::<T>(), "Event dropped: no active subscribers");
            0
        });
        if delivered > 0 {
            trace!(event = type_name::<T>(), delivered, "Event dispatched");
        }
        Ok(delivered)
    }

    /// Number of live subscribers for `T`.
    #[must_use]
    pub fn subscriber_count<T: Event>(&self) -> usize {
        let channels = self.channels.read();
        channels
            .get(&TypeId::of::<T>())
            .and_then(|sender| sender.downcast_ref::<broadcast::Sender<Arc<T>>>())
            .map_or(0, broadcast::Sender::receiver_count)
    }

    /// Drops every channel; receivers observe closure. Returns the number of channels closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    /// Fetches (or creates) the sender registered for `T`.
    fn sender<T: Event>(&self) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();
        if let Some(existing) = self.channels.read().get(&id) {
            return Self::downcast::<T>(&**existing);
        }

        let mut channels = self.channels.write();
        let sender = channels.entry(id).or_insert_with(|| {
            trace!(event = type_name::<T>(), "Initializing new event channel");
            let sender: Box<dyn Any + Send + Sync> = Box::new(broadcast::channel::<Arc<T>>(CHANNEL_CAPACITY).0);
            sender
        });
        Self::downcast::<T>(&**sender)
    }

    fn downcast<T: Event>(sender: &(dyn Any + Send + Sync)) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        sender.downcast_ref::<broadcast::Sender<Arc<T>>>().cloned().ok_or_else(|| EventBusError::TypeMismatch {
            message: type_name::<T>().into(),
            context: Some("unexpected sender type".into()),
        })
    }
}
