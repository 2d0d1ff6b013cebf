use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::error::DashboardResult;

/// Future settling one reload or restore attempt.
pub type ReloadFuture<'a> = LocalBoxFuture<'a, DashboardResult<()>>;

/// Capability set of a view that can be refreshed after remote changes.
pub trait ReloadTarget {
    /// Collection the view displays, if any.
    fn displayed_model(&self) -> Option<&str>;

    /// Reloads the currently loaded records in place.
    ///
    /// Returns `None` when the view cannot reload in place.
    fn reload_in_place(&self) -> Option<ReloadFuture<'_>>;

    /// Identifier of the controller hosting the view, if one is active.
    fn current_controller_id(&self) -> Option<String>;

    /// Restores the hosting controller, rebuilding the view from scratch.
    fn restore_controller(&self, controller_id: &str) -> ReloadFuture<'_>;
}

/// Loads the record collection backing a list view.
pub trait CollectionLoader {
    fn load(&self) -> ReloadFuture<'_>;
}

/// Navigation service able to restore a controller by identifier.
pub trait ActionService {
    fn current_controller_id(&self) -> Option<String>;
    fn restore(&self, controller_id: &str) -> ReloadFuture<'_>;
}

/// Wraps a list view's loader and the action service into a [`ReloadTarget`].
///
/// The loader is optional: views without a loaded collection fall back to
/// controller restore.
#[derive(Clone)]
pub struct ListViewReloadTarget {
    res_model: Option<String>,
    loader: Option<Rc<dyn CollectionLoader>>,
    actions: Rc<dyn ActionService>,
}

impl fmt::Debug for ListViewReloadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListViewReloadTarget")
            .field("res_model", &self.res_model)
            .field("has_loader", &self.loader.is_some())
            .finish_non_exhaustive()
    }
}

impl ListViewReloadTarget {
    #[must_use]
    pub fn new(actions: Rc<dyn ActionService>) -> Self {
        Self {
            res_model: None,
            loader: None,
            actions,
        }
    }

    #[must_use]
    pub fn with_model(mut self, res_model: impl Into<String>) -> Self {
        self.res_model = Some(res_model.into());
        self
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Rc<dyn CollectionLoader>) -> Self {
        self.loader = Some(loader);
        self
    }
}

impl ReloadTarget for ListViewReloadTarget {
    fn displayed_model(&self) -> Option<&str> {
        self.res_model.as_deref()
    }

    fn reload_in_place(&self) -> Option<ReloadFuture<'_>> {
        self.loader.as_ref().map(|loader| loader.load())
    }

    fn current_controller_id(&self) -> Option<String> {
        self.actions.current_controller_id()
    }

    fn restore_controller(&self, controller_id: &str) -> ReloadFuture<'_> {
        self.actions.restore(controller_id)
    }
}
