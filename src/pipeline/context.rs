//! Component contract and the context handed to every callback.
//!
//! Components do not own the document or the clock. Each callback gets a
//! [`PageContext`] borrowing the page's store, scheduler and visibility
//! service; tasks and watches created through it are tagged with the
//! calling component so they route back to it.

use crate::config::PageConfig;
use crate::engine::Document;
use crate::host::Host;
use crate::types::{ElementId, Rect};

use super::scheduler::{Owner, Scheduler, Task, TaskHandle};
use super::viewport::{ScrollBehavior, ScrollRequest, Viewport};
use super::visibility::{VisibilityEntry, VisibilityService, WatchId, WatchOptions};

// =============================================================================
// EVENTS
// =============================================================================

/// Browser-style events a host feeds into the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// The element tree is ready.
    DomContentLoaded,
    /// Everything (images, fonts) finished loading.
    Load,
    /// The window scrolled. Components receive the clamped offset.
    Scroll { offset: f32 },
    /// Pointer activation at client coordinates.
    Click { target: ElementId, client_x: f32, client_y: f32 },
    /// An image finished loading.
    ImageLoad { target: ElementId, natural_width: f32, natural_height: f32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}

/// What the page did with a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// A handler cancelled the browser's default action.
    pub default_prevented: bool,
}

// =============================================================================
// COMPONENT
// =============================================================================

/// A page enhancement.
///
/// Every callback is optional. Callbacks for the same event run in
/// registration order.
pub trait Component {
    fn name(&self) -> &'static str;

    /// One-time setup after the first layout.
    fn mount(&mut self, _ctx: &mut PageContext<'_>) {}

    fn on_event(&mut self, _event: &PageEvent, _ctx: &mut PageContext<'_>) {}

    /// A watch this component registered reported.
    fn on_visible(&mut self, _entry: &VisibilityEntry, _ctx: &mut PageContext<'_>) {}

    /// A task this component scheduled came due.
    fn on_task(&mut self, _task: Task, _ctx: &mut PageContext<'_>) {}

    /// Release elements and handles. Pending tasks and watches of the
    /// component are dropped by the page afterwards regardless.
    fn teardown(&mut self, _ctx: &mut PageContext<'_>) {}
}

// =============================================================================
// CONTEXT
// =============================================================================

pub struct PageContext<'a> {
    pub document: &'a mut Document,
    pub viewport: &'a mut Viewport,
    pub host: &'a mut dyn Host,
    pub config: &'a PageConfig,
    pub(crate) scheduler: &'a mut Scheduler,
    pub(crate) visibility: &'a mut VisibilityService,
    pub(crate) owner: Owner,
    pub(crate) default_prevented: bool,
    pub(crate) scroll_changed: bool,
}

impl<'a> PageContext<'a> {
    pub(crate) fn new(
        document: &'a mut Document,
        viewport: &'a mut Viewport,
        host: &'a mut dyn Host,
        config: &'a PageConfig,
        scheduler: &'a mut Scheduler,
        visibility: &'a mut VisibilityService,
    ) -> Self {
        Self {
            document,
            viewport,
            host,
            config,
            scheduler,
            visibility,
            owner: Owner::Page,
            default_prevented: false,
            scroll_changed: false,
        }
    }

    /// The component this context currently acts for.
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    // -------------------------------------------------------------------------
    // Tasks
    // -------------------------------------------------------------------------

    pub fn set_timeout(&mut self, delay_ms: u64, task: Task) -> TaskHandle {
        self.scheduler.set_timeout(self.owner, delay_ms, task)
    }

    pub fn request_frame(&mut self, task: Task) -> TaskHandle {
        self.scheduler.request_frame(self.owner, task)
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.scheduler.cancel(handle)
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.scheduler.is_pending(handle)
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn observe(&mut self, element: ElementId, options: WatchOptions) -> WatchId {
        self.visibility.observe(self.owner, element, options)
    }

    pub fn unobserve(&mut self, watch: WatchId) -> bool {
        self.visibility.unobserve(watch)
    }

    pub fn unobserve_element(&mut self, element: ElementId) {
        self.visibility.unobserve_element(self.owner, element);
    }

    // -------------------------------------------------------------------------
    // Events & scrolling
    // -------------------------------------------------------------------------

    /// Cancel the default action of the event being dispatched.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// `getBoundingClientRect()` for `id`.
    pub fn client_rect(&self, id: ElementId) -> Option<Rect> {
        self.viewport.client_rect(self.document, id)
    }

    /// The `window.scrollTo` equivalent.
    pub fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior) {
        let before = self.viewport.scroll_y();
        let speed = self.config.smooth_scroll.speed;

        let smooth = self.viewport.request_scroll(ScrollRequest { top, behavior }, speed);
        if smooth {
            let running = self.viewport.step_task.is_some_and(|h| self.scheduler.is_pending(h));
            if !running {
                let handle = self.scheduler.request_frame(Owner::Page, Task::ScrollStep);
                self.viewport.step_task = Some(handle);
            }
        } else if self.viewport.scroll_y() != before {
            self.scroll_changed = true;
        }
    }
}
