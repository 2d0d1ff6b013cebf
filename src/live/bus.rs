use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::DashboardResult;

use super::NotificationEvent;

/// Future returned by a handler for one delivered event.
pub type HandlerFuture = LocalBoxFuture<'static, DashboardResult<()>>;

/// Callback bound to a channel.
///
/// Handlers run their synchronous part at delivery time and return a future
/// for any asynchronous follow-up work.
pub type EventHandler = Rc<dyn Fn(&NotificationEvent) -> HandlerFuture>;

/// Exclusive token for one registered handler.
///
/// Not `Clone`: `unsubscribe` consumes it, so a subscription is released at
/// most once.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: u64,
    channel: String,
}

impl SubscriptionHandle {
    /// Constructor for bus implementations.
    #[must_use]
    pub fn new(id: u64, channel: impl Into<String>) -> Self {
        Self {
            id,
            channel: channel.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

/// Process-wide publish/subscribe registry keyed by channel name.
pub trait NotificationBus {
    fn subscribe(&self, channel: &str, handler: EventHandler) -> SubscriptionHandle;

    /// Returns `true` when the handle was still registered.
    fn unsubscribe(&self, handle: SubscriptionHandle) -> bool;
}

#[derive(Default)]
struct BusRegistry {
    next_id: u64,
    channels: IndexMap<String, Vec<(u64, EventHandler)>>,
}

/// Single-threaded in-process bus.
///
/// A channel is listened to while it has at least one handler.
#[derive(Default)]
pub struct LocalNotificationBus {
    registry: RefCell<BusRegistry>,
}

impl fmt::Debug for LocalNotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let channels: Vec<(&str, usize)> = registry
            .channels
            .iter()
            .map(|(channel, handlers)| (channel.as_str(), handlers.len()))
            .collect();
        f.debug_struct("LocalNotificationBus")
            .field("channels", &channels)
            .finish()
    }
}

impl LocalNotificationBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.registry
            .borrow()
            .channels
            .get(channel)
            .map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_listening(&self, channel: &str) -> bool {
        self.subscriber_count(channel) > 0
    }

    /// Delivers `event` to every handler on `channel`, in subscription order.
    ///
    /// The returned futures are not polled; the host decides how to drive
    /// them. No registry borrow is held while handlers run, so a handler may
    /// unsubscribe itself.
    pub fn publish(&self, channel: &str, event: &NotificationEvent) -> Vec<HandlerFuture> {
        let handlers: Vec<EventHandler> = self
            .registry
            .borrow()
            .channels
            .get(channel)
            .map(|entries| entries.iter().map(|(_, handler)| Rc::clone(handler)).collect())
            .unwrap_or_default();
        trace!(channel, handlers = handlers.len(), "publishing notification");
        handlers.iter().map(|handler| handler(event)).collect()
    }

    /// Publishes and drives every handler future to completion in order.
    ///
    /// All handlers run even if one fails; the first error is returned.
    pub async fn dispatch(
        &self,
        channel: &str,
        event: &NotificationEvent,
    ) -> DashboardResult<usize> {
        let pending = self.publish(channel, event);
        let delivered = pending.len();
        let mut first_error = None;
        for future in pending {
            if let Err(err) = future.await {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(delivered), Err)
    }
}

impl NotificationBus for LocalNotificationBus {
    fn subscribe(&self, channel: &str, handler: EventHandler) -> SubscriptionHandle {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry
            .channels
            .entry(channel.to_owned())
            .or_default()
            .push((id, handler));
        debug!(channel, subscription = id, "subscribed");
        SubscriptionHandle::new(id, channel)
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut registry = self.registry.borrow_mut();
        let Some(handlers) = registry.channels.get_mut(handle.channel()) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != handle.id());
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            registry.channels.shift_remove(handle.channel());
        }
        debug!(
            channel = handle.channel(),
            subscription = handle.id(),
            removed,
            "unsubscribed"
        );
        removed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use futures::FutureExt;
    use futures::executor::block_on;

    use super::{
        EventHandler, HandlerFuture, LocalNotificationBus, NotificationBus, SubscriptionHandle,
    };
    use crate::error::DashboardError;
    use crate::live::NotificationEvent;

    fn counting_handler(counter: Rc<Cell<usize>>) -> EventHandler {
        Rc::new(move |_event: &NotificationEvent| -> HandlerFuture {
            counter.set(counter.get() + 1);
            async { Ok(()) }.boxed_local()
        })
    }

    #[test]
    fn publish_reaches_only_the_named_channel() {
        let bus = LocalNotificationBus::new();
        let hits = Rc::new(Cell::new(0));
        let _handle = bus.subscribe("refresh", counting_handler(Rc::clone(&hits)));

        assert_eq!(bus.publish("other", &NotificationEvent::untargeted()).len(), 0);
        assert_eq!(bus.publish("refresh", &NotificationEvent::untargeted()).len(), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unsubscribe_releases_channel_once() {
        let bus = LocalNotificationBus::new();
        let handle = bus.subscribe("refresh", counting_handler(Rc::new(Cell::new(0))));
        assert!(bus.is_listening("refresh"));

        let id = handle.id();
        assert!(bus.unsubscribe(handle));
        assert!(!bus.is_listening("refresh"));
        assert!(!bus.unsubscribe(SubscriptionHandle::new(id, "refresh")));
    }

    #[test]
    fn handler_may_unsubscribe_during_delivery() {
        let bus = Rc::new(LocalNotificationBus::new());
        let slot: Rc<RefCell<Option<SubscriptionHandle>>> = Rc::new(RefCell::new(None));

        let handler: EventHandler = {
            let bus = Rc::clone(&bus);
            let slot = Rc::clone(&slot);
            Rc::new(move |_event: &NotificationEvent| -> HandlerFuture {
                if let Some(handle) = slot.borrow_mut().take() {
                    bus.unsubscribe(handle);
                }
                async { Ok(()) }.boxed_local()
            })
        };
        let handle = bus.subscribe("refresh", handler);
        *slot.borrow_mut() = Some(handle);

        let delivered = block_on(bus.dispatch("refresh", &NotificationEvent::untargeted()))
            .expect("dispatch");
        assert_eq!(delivered, 1);
        assert_eq!(bus.subscriber_count("refresh"), 0);
    }

    #[test]
    fn dispatch_runs_all_handlers_and_reports_first_error() {
        let bus = LocalNotificationBus::new();
        let hits = Rc::new(Cell::new(0));
        let failing: EventHandler = Rc::new(|_event: &NotificationEvent| -> HandlerFuture {
            async { Err(DashboardError::Reload("boom".to_owned())) }.boxed_local()
        });
        let _first = bus.subscribe("refresh", failing);
        let _second = bus.subscribe("refresh", counting_handler(Rc::clone(&hits)));

        let err = block_on(bus.dispatch("refresh", &NotificationEvent::untargeted()))
            .expect_err("first handler fails");
        assert!(matches!(err, DashboardError::Reload(_)));
        assert_eq!(hits.get(), 1);
    }
}
