//! Router state: the active view and the navigation history.

use crate::lifecycle::ViewState;
use crate::params::{QueryParams, RouteParams};
use crate::route::ViewId;
use std::fmt;

/// How a navigation moves through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// New entry on top of history, forward entries dropped.
    Forward,
    /// Current entry overwritten.
    Replace,
    /// One entry back.
    Back,
    /// One entry forward, after going back.
    Redo,
}

/// The view currently shown, with the state it owns.
pub struct ActiveView {
    pub(crate) route_index: usize,
    pub(crate) path: String,
    pub(crate) location: String,
    pub(crate) view: ViewId,
    pub(crate) params: RouteParams,
    pub(crate) query: QueryParams,
    pub(crate) state: Box<dyn ViewState>,
}

impl ActiveView {
    /// Index of the active route in the table.
    pub fn route_index(&self) -> usize {
        self.route_index
    }

    /// Normalized path of the active route, without query.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path plus query string, as recorded in history.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The active view.
    pub fn view(&self) -> &ViewId {
        &self.view
    }

    /// Parameters the view was activated with.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Query parameters the view was activated with.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// The view's state.
    pub fn state(&self) -> &dyn ViewState {
        self.state.as_ref()
    }

    /// The view's state, mutably.
    pub fn state_mut(&mut self) -> &mut dyn ViewState {
        self.state.as_mut()
    }
}

impl fmt::Debug for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveView")
            .field("route_index", &self.route_index)
            .field("location", &self.location)
            .field("view", &self.view)
            .field("params", &self.params)
            .field("unsaved_changes", &self.state.has_unsaved_changes())
            .finish_non_exhaustive()
    }
}

/// Active view plus the history of activated locations.
///
/// History only records locations that were actually activated. Cancelled
/// and unmatched navigations never touch it.
#[derive(Debug, Default)]
pub struct RouterState {
    active: Option<ActiveView>,
    history: Vec<String>,
    current: Option<usize>,
    history_limit: Option<usize>,
}

impl RouterState {
    /// Create an empty state: no active view, no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty state keeping at most `limit` history entries.
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Self {
            history_limit: limit.map(|l| l.max(1)),
            ..Self::default()
        }
    }

    /// The active view, if any.
    pub fn active(&self) -> Option<&ActiveView> {
        self.active.as_ref()
    }

    /// The active view, mutably.
    pub fn active_mut(&mut self) -> Option<&mut ActiveView> {
        self.active.as_mut()
    }

    /// Location of the current history entry.
    pub fn current_location(&self) -> Option<&str> {
        self.current.map(|index| self.history[index].as_str())
    }

    /// Index of the current entry in [`history`](Self::history).
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// All history entries, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Swap in a new active view, returning the previous one.
    ///
    /// `direction` decides how history records the new location.
    pub fn activate(
        &mut self,
        view: ActiveView,
        direction: NavigationDirection,
    ) -> Option<ActiveView> {
        let location = view.location.clone();
        match direction {
            NavigationDirection::Forward => self.push(location),
            NavigationDirection::Replace => self.replace(location),
            NavigationDirection::Back => self.step(-1, location),
            NavigationDirection::Redo => self.step(1, location),
        }
        self.active.replace(view)
    }

    fn push(&mut self, location: String) {
        if let Some(current) = self.current {
            self.history.truncate(current + 1);
        }
        self.history.push(location);

        if let Some(limit) = self.history_limit {
            let overflow = self.history.len().saturating_sub(limit);
            self.history.drain(..overflow);
        }
        self.current = Some(self.history.len() - 1);
    }

    fn replace(&mut self, location: String) {
        match self.current {
            Some(current) => self.history[current] = location,
            None => self.push(location),
        }
    }

    /// Move the cursor one step, recording the location actually reached.
    ///
    /// A step with nowhere to go degrades to a push.
    fn step(&mut self, delta: isize, location: String) {
        let target = self
            .current
            .and_then(|current| current.checked_add_signed(delta))
            .filter(|target| *target < self.history.len());
        match target {
            Some(target) => {
                self.history[target] = location;
                self.current = Some(target);
            }
            None => self.push(location),
        }
    }

    /// Check if there is an entry behind the current one.
    pub fn can_go_back(&self) -> bool {
        self.peek_back().is_some()
    }

    /// Check if there is an entry ahead of the current one.
    pub fn can_go_forward(&self) -> bool {
        self.peek_forward().is_some()
    }

    /// Location `back()` would navigate to.
    pub fn peek_back(&self) -> Option<&str> {
        let current = self.current?;
        current
            .checked_sub(1)
            .map(|index| self.history[index].as_str())
    }

    /// Location `forward()` would navigate to.
    pub fn peek_forward(&self) -> Option<&str> {
        let current = self.current?;
        self.history.get(current + 1).map(String::as_str)
    }
}
