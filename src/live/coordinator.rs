use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::DashboardResult;

use super::{
    EventHandler, HandlerFuture, LiveRefreshConfig, NotificationBus, NotificationEvent,
    ReloadTarget, SubscriptionHandle,
};

/// Observable lifecycle state of a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorState {
    Idle,
    Reloading,
    /// Terminal: unsubscribed, every event is ignored.
    Destroyed,
}

/// Why an inbound event did not trigger a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardReason {
    Destroyed,
    ReloadInFlight,
    UninterestingModel,
    OtherModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadStrategy {
    InPlace,
    RestoreController { controller_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadOutcome {
    Discarded(DiscardReason),
    Reloaded(ReloadStrategy),
    /// Admitted, but the view offered neither reload capability.
    NoReloadTarget,
}

struct CoordinatorCore {
    config: LiveRefreshConfig,
    target: Rc<dyn ReloadTarget>,
    destroyed: Cell<bool>,
    reloading: Cell<bool>,
}

impl CoordinatorCore {
    fn state(&self) -> CoordinatorState {
        if self.destroyed.get() {
            CoordinatorState::Destroyed
        } else if self.reloading.get() {
            CoordinatorState::Reloading
        } else {
            CoordinatorState::Idle
        }
    }

    /// Applies the admissibility filter in order and claims the in-flight slot.
    fn admit(self: &Rc<Self>, event: &NotificationEvent) -> Result<ReloadRequest, DiscardReason> {
        if self.destroyed.get() {
            return Err(DiscardReason::Destroyed);
        }
        if self.reloading.get() {
            return Err(DiscardReason::ReloadInFlight);
        }
        if let Some(model) = event.model_identifier() {
            if !self.config.is_interesting(model) {
                return Err(DiscardReason::UninterestingModel);
            }
            if self.target.displayed_model() != Some(model) {
                return Err(DiscardReason::OtherModel);
            }
        }
        Ok(ReloadRequest::claim(Rc::clone(self)))
    }

    fn handle(
        self: &Rc<Self>,
        event: &NotificationEvent,
    ) -> LocalBoxFuture<'static, DashboardResult<ReloadOutcome>> {
        match self.admit(event) {
            Ok(request) => request.run().boxed_local(),
            Err(reason) => {
                debug!(
                    channel = %self.config.channel,
                    model = event.model_identifier(),
                    ?reason,
                    "live refresh event discarded"
                );
                future::ready(Ok(ReloadOutcome::Discarded(reason))).boxed_local()
            }
        }
    }
}

/// One in-flight reload attempt.
///
/// Holding it keeps the coordinator in `Reloading`; dropping it, whether the
/// reload succeeded, failed or was abandoned, returns the coordinator to idle.
struct ReloadRequest {
    core: Rc<CoordinatorCore>,
}

impl ReloadRequest {
    fn claim(core: Rc<CoordinatorCore>) -> Self {
        core.reloading.set(true);
        Self { core }
    }

    async fn run(self) -> DashboardResult<ReloadOutcome> {
        if self.core.destroyed.get() {
            return Ok(ReloadOutcome::Discarded(DiscardReason::Destroyed));
        }

        let target = Rc::clone(&self.core.target);
        if let Some(reload) = target.reload_in_place() {
            trace!(channel = %self.core.config.channel, "reloading collection in place");
            reload.await?;
            return Ok(ReloadOutcome::Reloaded(ReloadStrategy::InPlace));
        }

        let Some(controller_id) = target.current_controller_id() else {
            return Ok(ReloadOutcome::NoReloadTarget);
        };
        trace!(
            channel = %self.core.config.channel,
            controller = %controller_id,
            "restoring hosting controller"
        );
        target.restore_controller(&controller_id).await?;
        Ok(ReloadOutcome::Reloaded(ReloadStrategy::RestoreController {
            controller_id,
        }))
    }
}

impl Drop for ReloadRequest {
    fn drop(&mut self) {
        self.core.reloading.set(false);
    }
}

/// Keeps one list view in sync with change notifications.
///
/// Owns exactly one bus subscription from [`attach`](Self::attach) until
/// [`dispose`](Self::dispose) (or drop). At most one reload runs at a time;
/// events arriving meanwhile are dropped, not queued. A reload that never
/// settles keeps the coordinator in `Reloading`.
pub struct LiveInvalidationCoordinator {
    core: Rc<CoordinatorCore>,
    bus: Rc<dyn NotificationBus>,
    subscription: RefCell<Option<SubscriptionHandle>>,
}

impl fmt::Debug for LiveInvalidationCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveInvalidationCoordinator")
            .field("channel", &self.core.config.channel)
            .field("state", &self.core.state())
            .field("subscribed", &self.is_subscribed())
            .finish_non_exhaustive()
    }
}

impl LiveInvalidationCoordinator {
    /// Subscribes to `config.channel` on `bus` on behalf of `target`.
    pub fn attach(
        bus: Rc<dyn NotificationBus>,
        target: Rc<dyn ReloadTarget>,
        config: LiveRefreshConfig,
    ) -> DashboardResult<Self> {
        config.validate()?;
        let core = Rc::new(CoordinatorCore {
            config,
            target,
            destroyed: Cell::new(false),
            reloading: Cell::new(false),
        });

        let weak_core = Rc::downgrade(&core);
        let handler: EventHandler = Rc::new(move |event: &NotificationEvent| -> HandlerFuture {
            match weak_core.upgrade() {
                Some(core) => core
                    .handle(event)
                    .map(|outcome| outcome.map(|_| ()))
                    .boxed_local(),
                None => future::ready(Ok(())).boxed_local(),
            }
        });
        let subscription = bus.subscribe(&core.config.channel, handler);
        debug!(
            channel = %core.config.channel,
            model = core.target.displayed_model(),
            "live refresh attached"
        );

        Ok(Self {
            core,
            bus,
            subscription: RefCell::new(Some(subscription)),
        })
    }

    #[must_use]
    pub fn state(&self) -> CoordinatorState {
        self.core.state()
    }

    #[must_use]
    pub fn config(&self) -> &LiveRefreshConfig {
        &self.core.config
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    /// Filters `event` and, when admissible, starts a reload.
    ///
    /// Filtering and claiming the in-flight slot happen before this returns;
    /// the returned future performs the reload. Reload errors are returned
    /// unchanged after the coordinator has gone back to idle.
    pub fn handle_event(
        &self,
        event: &NotificationEvent,
    ) -> LocalBoxFuture<'static, DashboardResult<ReloadOutcome>> {
        self.core.handle(event)
    }

    /// Tears the coordinator down. Idempotent.
    pub fn dispose(&self) {
        self.core.destroyed.set(true);
        let subscription = self.subscription.borrow_mut().take();
        if let Some(handle) = subscription {
            let released = self.bus.unsubscribe(handle);
            debug!(channel = %self.core.config.channel, released, "live refresh disposed");
        }
    }
}

impl Drop for LiveInvalidationCoordinator {
    fn drop(&mut self) {
        self.dispose();
    }
}
