//! Live invalidation of list views driven by bus notifications.
//!
//! A [`LiveInvalidationCoordinator`] subscribes one view to a refresh channel,
//! filters change events by collection and runs at most one reload at a time.

mod bus;
mod config;
mod coordinator;
mod event;
mod target;

pub use bus::{
    EventHandler, HandlerFuture, LocalNotificationBus, NotificationBus, SubscriptionHandle,
};
pub use config::{DEFAULT_REFRESH_CHANNEL, LiveRefreshConfig};
pub use coordinator::{
    CoordinatorState, DiscardReason, LiveInvalidationCoordinator, ReloadOutcome, ReloadStrategy,
};
pub use event::NotificationEvent;
pub use target::{
    ActionService, CollectionLoader, ListViewReloadTarget, ReloadFuture, ReloadTarget,
};
