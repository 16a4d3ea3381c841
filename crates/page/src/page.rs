//! The page: document, listeners, timers, and window log.
//!
//! `Page` plays the role of the browser for storefront behaviors. It
//! dispatches events with bubbling, performs default actions (link
//! navigation, form submission) unless a listener prevents them, and runs
//! timers on a virtual clock that only advances when asked.

use std::rc::Rc;

use shopfront_core::{ListenerId, NodeId};
use tracing::instrument;

use crate::dom::{Document, PageFixture, Selector};
use crate::error::{PageError, Result};
use crate::events::{Event, EventKind, ListenerRegistry};
use crate::scheduler::{PendingTimer, Scheduler, TaskHandle};
use crate::window::Window;

#[derive(Debug)]
pub struct Page {
    document: Document,
    listeners: ListenerRegistry,
    scheduler: Scheduler,
    window: Window,
    loaded: bool,
}

impl Page {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            listeners: ListenerRegistry::default(),
            scheduler: Scheduler::default(),
            window: Window::default(),
            loaded: false,
        }
    }

    /// Build a page from a fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture URL is invalid.
    pub fn from_fixture(fixture: &PageFixture) -> Result<Self> {
        Ok(Self::new(fixture.build()?))
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub const fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    pub const fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Serialized `body` element.
    #[must_use]
    pub fn html(&self) -> String {
        self.document.outer_html(self.document.body())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// First element in the document matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidSelector` or `PageError::SelectorNotFound`.
    pub fn select_one(&self, selector: &str) -> Result<NodeId> {
        let parsed = Selector::parse(selector)?;
        self.document
            .query_selector(self.document.root(), &parsed)
            .ok_or_else(|| PageError::SelectorNotFound(selector.to_owned()))
    }

    /// Every element in the document matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidSelector` if the selector does not parse.
    pub fn select_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let parsed = Selector::parse(selector)?;
        Ok(self
            .document
            .query_selector_all(self.document.root(), &parsed))
    }

    /// Current value of the first control matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing matches.
    pub fn value_of(&self, selector: &str) -> Result<String> {
        let node = self.select_one(selector)?;
        Ok(self.document.value(node).unwrap_or_default().to_owned())
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn add_event_listener<F>(&mut self, node: NodeId, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&mut Self, &mut Event) -> Result<()> + 'static,
    {
        self.listeners.add(node, kind, Rc::new(callback))
    }

    /// Returns `false` if the listener was already removed.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatch an event at `target`.
    ///
    /// Bubbling events visit the target and then each ancestor. Listeners
    /// removed during dispatch do not run. `stop_propagation` lets the
    /// remaining listeners on the current node finish.
    ///
    /// # Errors
    ///
    /// Returns `PageError::UnknownNode` for a foreign target, or the first
    /// error a listener returns.
    pub fn dispatch(&mut self, target: NodeId, event: Event) -> Result<Event> {
        let mut path = self.document.ancestors_inclusive(target);
        if path.is_empty() {
            return Err(PageError::UnknownNode(target));
        }
        if !event.kind().bubbles() {
            path.truncate(1);
        }

        let mut event = event;
        for node in path {
            event.set_current_target(node);
            for (id, callback) in self.listeners.matching(node, event.kind()) {
                if !self.listeners.is_registered(id) {
                    continue;
                }
                callback(self, &mut event)?;
            }
            if event.propagation_stopped() {
                break;
            }
        }
        tracing::debug!(
            event = %event.kind(),
            node = %target,
            default_prevented = event.default_prevented(),
            "Dispatched event"
        );
        Ok(event)
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// Fire `DOMContentLoaded` once. Returns `false` if the page was already
    /// loaded.
    ///
    /// # Errors
    ///
    /// Propagates listener errors.
    pub fn load(&mut self) -> Result<bool> {
        if self.loaded {
            return Ok(false);
        }
        self.loaded = true;
        let root = self.document.root();
        self.dispatch(root, Event::new(EventKind::DomContentLoaded, root))?;
        Ok(true)
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Click `target`, then follow a link or submit a form unless a listener
    /// prevented the default action.
    ///
    /// # Errors
    ///
    /// Propagates listener errors.
    #[instrument(skip(self))]
    pub fn click(&mut self, target: NodeId) -> Result<Event> {
        let event = self.dispatch(target, Event::new(EventKind::Click, target))?;
        if event.default_prevented() {
            return Ok(event);
        }

        if let Some(link) = self.closest(target, |doc, node| {
            doc.tag_name(node) == Some("a") && doc.has_attribute(node, "href")
        }) {
            let href = self.document.get_attribute(link, "href").unwrap_or_default();
            let resolved = self.document.url().join(&href)?;
            self.window.navigate(resolved.as_str());
        } else if self.is_submit_control(target)
            && let Some(form) = self.closest(target, |doc, node| doc.tag_name(node) == Some("form"))
        {
            self.submit(form)?;
        }
        Ok(event)
    }

    /// # Errors
    ///
    /// Returns an error if nothing matches `selector`.
    pub fn click_selector(&mut self, selector: &str) -> Result<Event> {
        let node = self.select_one(selector)?;
        self.click(node)
    }

    /// Submit `form`, recording the submission unless a listener prevented it.
    ///
    /// # Errors
    ///
    /// Propagates listener errors.
    #[instrument(skip(self))]
    pub fn submit(&mut self, form: NodeId) -> Result<Event> {
        let event = self.dispatch(form, Event::new(EventKind::Submit, form))?;
        if !event.default_prevented() {
            self.window.record_submission(form);
        }
        Ok(event)
    }

    /// # Errors
    ///
    /// Returns an error if nothing matches `selector`.
    pub fn submit_selector(&mut self, selector: &str) -> Result<Event> {
        let form = self.select_one(selector)?;
        self.submit(form)
    }

    /// Release `key` on `target`.
    ///
    /// # Errors
    ///
    /// Propagates listener errors.
    pub fn key_up(&mut self, target: NodeId, key: &str) -> Result<Event> {
        self.dispatch(target, Event::new(EventKind::KeyUp, target).with_key(key))
    }

    /// Type `text` into a control one character at a time, firing `keyup`
    /// after each.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is not an element.
    pub fn type_text(&mut self, target: NodeId, text: &str) -> Result<()> {
        let mut value = self.document.value(target).unwrap_or_default().to_owned();
        for c in text.chars() {
            value.push(c);
            self.document.set_value(target, &value)?;
            let mut key = [0; 4];
            self.key_up(target, c.encode_utf8(&mut key))?;
        }
        Ok(())
    }

    /// Empty a control and fire a single `keyup`.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is not an element.
    pub fn clear(&mut self, target: NodeId) -> Result<()> {
        self.document.set_value(target, "")?;
        self.key_up(target, "Backspace")?;
        Ok(())
    }

    /// Set a control's value without firing events.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is not an element.
    pub fn set_value(&mut self, target: NodeId, value: &str) -> Result<()> {
        self.document.set_value(target, value)
    }

    fn closest<F>(&self, node: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        self.document
            .ancestors_inclusive(node)
            .into_iter()
            .find(|id| predicate(&self.document, *id))
    }

    fn is_submit_control(&self, node: NodeId) -> bool {
        let kind = self.document.get_attribute(node, "type");
        match self.document.tag_name(node) {
            Some("button") => kind.is_none_or(|t| t.eq_ignore_ascii_case("submit")),
            Some("input") => kind.is_some_and(|t| t.eq_ignore_ascii_case("submit")),
            _ => false,
        }
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Run `callback` once `delay_ms` of virtual time has passed.
    pub fn set_timeout<F>(&mut self, delay_ms: u64, callback: F) -> TaskHandle
    where
        F: FnOnce(&mut Self) -> Result<()> + 'static,
    {
        self.scheduler.schedule(delay_ms, Box::new(callback))
    }

    /// Cancel a timer. Returns `false` if it already ran or was cancelled.
    pub fn clear_timer(&mut self, handle: TaskHandle) -> bool {
        self.scheduler.cancel(handle.id())
    }

    #[must_use]
    pub fn is_timer_pending(&self, handle: TaskHandle) -> bool {
        self.scheduler.is_pending(handle.id())
    }

    /// Pending timers in the order they will run.
    #[must_use]
    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Bound the number of tasks `flush` and the clock advances may run.
    pub const fn set_timer_step_limit(&mut self, limit: usize) {
        self.scheduler.set_step_limit(limit);
    }

    /// Advance the clock by `delta_ms`. Returns the number of tasks run.
    ///
    /// # Errors
    ///
    /// Propagates task errors and `PageError::TimerStepLimit`.
    pub fn advance_time(&mut self, delta_ms: u64) -> Result<usize> {
        let target = self.now_ms().saturating_add(delta_ms);
        self.advance_time_to(target)
    }

    /// Advance the clock to `target_ms`, running due tasks in order.
    ///
    /// While a task runs the clock reads its due time, so timers it
    /// schedules are relative to when it fired.
    ///
    /// # Errors
    ///
    /// Returns `PageError::TimeReversal` if `target_ms` is in the past.
    pub fn advance_time_to(&mut self, target_ms: u64) -> Result<usize> {
        let now_ms = self.now_ms();
        if target_ms < now_ms {
            return Err(PageError::TimeReversal { now_ms, target_ms });
        }

        let limit = self.scheduler.step_limit();
        let mut ran = 0;
        while let Some((due_at, task)) = self.scheduler.pop_due(target_ms) {
            ran += 1;
            if ran > limit {
                return Err(PageError::TimerStepLimit(limit));
            }
            self.scheduler.set_now(due_at.max(now_ms));
            task(self)?;
        }
        self.scheduler.set_now(target_ms);
        Ok(ran)
    }

    /// Run tasks that are already due without moving the clock.
    ///
    /// # Errors
    ///
    /// Propagates task errors.
    pub fn run_due_timers(&mut self) -> Result<usize> {
        self.advance_time_to(self.now_ms())
    }

    /// Run every pending task, advancing the clock as far as needed.
    ///
    /// # Errors
    ///
    /// Returns `PageError::TimerStepLimit` if tasks keep rescheduling.
    pub fn flush(&mut self) -> Result<usize> {
        let limit = self.scheduler.step_limit();
        let mut ran = 0;
        while let Some(due_at) = self.scheduler.next_due() {
            if ran >= limit {
                return Err(PageError::TimerStepLimit(limit));
            }
            let target = due_at.max(self.now_ms());
            ran += self.advance_time_to(target)?;
        }
        Ok(ran)
    }
}
