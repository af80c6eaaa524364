//! Page - owns the store and runs the enhancements.
//!
//! # Lifecycle
//!
//! ```text
//! Page::new → register components → mount → dispatch / advance … → teardown
//! ```
//!
//! After every dispatched event and every fired task the page *settles*:
//! it re-runs layout if the tree changed, tells components about scroll
//! movement, and checks the visibility service, repeating until nothing
//! changes. Hosts only ever see a settled page.
//!
//! # Example
//!
//! ```ignore
//! use spark_page::{Page, PageConfig, PageEvent};
//!
//! let mut page = Page::new(document, PageConfig::default()).with_viewport(1280.0, 800.0);
//! let handles = page.install_standard_components();
//! page.mount()?;
//!
//! page.dispatch(PageEvent::Scroll { offset: 450.0 });
//! page.advance(600);
//! assert!(handles.scroll_top_visible.get());
//! ```

use tracing::{debug, warn};

use crate::config::PageConfig;
use crate::engine::Document;
use crate::error::Result;
use crate::host::{Host, SystemHost};
use crate::state::{
    CounterAnimator, FontGate, ImageDimensions, LazyMedia, NavState, Navigation, Reveal,
    RippleEmitter, ScrollTop, ServiceWorkerRegistration, TypingHeader, YearStamp,
};
use crate::types::ElementId;

use spark_signals::Signal;

use super::context::{Component, DispatchOutcome, PageContext, PageEvent};
use super::scheduler::{DueTask, Owner, Scheduler, Task};
use super::viewport::Viewport;
use super::visibility::{VisibilityEntry, VisibilityService};

/// Upper bound on settle rounds per event, so a component that keeps
/// scrolling from its own scroll handler cannot spin the page.
const MAX_SETTLE_ROUNDS: usize = 16;

/// Default viewport for pages created without an explicit size.
const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 800.0);

/// Shared state handles of the standard components.
#[derive(Clone)]
pub struct PageHandles {
    pub nav: NavState,
    pub scroll_top_visible: Signal<bool>,
}

pub struct Page {
    document: Document,
    viewport: Viewport,
    scheduler: Scheduler,
    visibility: VisibilityService,
    host: Box<dyn Host>,
    config: PageConfig,
    components: Vec<Box<dyn Component>>,
    mounted: bool,
}

impl Page {
    pub fn new(document: Document, config: PageConfig) -> Self {
        Self {
            document,
            viewport: Viewport::new(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1),
            scheduler: Scheduler::new(),
            visibility: VisibilityService::new(),
            host: Box::new(SystemHost),
            config,
            components: Vec::new(),
            mounted: false,
        }
    }

    pub fn with_host(mut self, host: impl Host + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport.set_size(width, height);
        self.document.mark_layout_dirty();
        self
    }

    /// Add a component. Components registered after `mount` are mounted
    /// immediately.
    pub fn register(&mut self, component: impl Component + 'static) -> Owner {
        let slot = self.components.len();
        self.components.push(Box::new(component));

        if self.mounted {
            let flags = self.with_component(slot, |c, ctx| c.mount(ctx));
            self.settle(flags.scroll_changed);
        }
        Owner::Component(slot)
    }

    /// Register the full set of enhancements in their canonical order.
    pub fn install_standard_components(&mut self) -> PageHandles {
        let navigation = Navigation::new(&self.config.navigation);
        let scroll_top = ScrollTop::new(&self.config.scroll_top);
        let handles = PageHandles {
            nav: navigation.state(),
            scroll_top_visible: scroll_top.visible_signal(),
        };

        self.register(navigation);
        self.register(Reveal::new(&self.config.reveal));
        self.register(RippleEmitter::new(&self.config.ripple));
        self.register(TypingHeader::new(&self.config.typing));
        self.register(scroll_top);
        self.register(CounterAnimator::new(&self.config.counter));
        self.register(YearStamp);
        self.register(LazyMedia::new(&self.config.lazy));
        self.register(FontGate::new(&self.config.fonts));
        self.register(ImageDimensions::default());
        self.register(ServiceWorkerRegistration::new(&self.config.service_worker));

        handles
    }

    /// Lay out the page and mount every registered component.
    pub fn mount(&mut self) -> Result<()> {
        if self.mounted {
            return Ok(());
        }

        self.viewport.relayout(&mut self.document)?;
        self.mounted = true;

        let flags = self.with_components(|c, ctx| {
            debug!(component = c.name(), "mount");
            c.mount(ctx);
        });
        self.settle(flags.scroll_changed);
        Ok(())
    }

    /// Deliver an event to every component in registration order.
    pub fn dispatch(&mut self, event: PageEvent) -> DispatchOutcome {
        let mut scroll_changed = false;

        let event = match event {
            PageEvent::Scroll { offset } => {
                let before = self.viewport.scroll_y();
                let applied = self.viewport.set_scroll_y(offset);
                scroll_changed = applied != before;
                PageEvent::Scroll { offset: applied }
            }
            PageEvent::Resize { width, height } => {
                self.viewport.set_size(width, height);
                self.document.mark_layout_dirty();
                event
            }
            other => other,
        };

        let flags = self.with_components(|c, ctx| c.on_event(&event, ctx));

        // Scroll listeners already saw this offset
        if matches!(event, PageEvent::Scroll { .. }) {
            scroll_changed = false;
        }
        self.settle(scroll_changed || flags.scroll_changed);

        DispatchOutcome { default_prevented: flags.default_prevented }
    }

    /// User scroll to `offset`.
    pub fn scroll_to(&mut self, offset: f32) -> DispatchOutcome {
        self.dispatch(PageEvent::Scroll { offset })
    }

    /// Click the centre of `target`.
    pub fn click(&mut self, target: ElementId) -> DispatchOutcome {
        let rect = self.viewport.client_rect(&self.document, target).unwrap_or_default();
        self.dispatch(PageEvent::Click {
            target,
            client_x: rect.x + rect.width / 2.0,
            client_y: rect.y + rect.height / 2.0,
        })
    }

    /// Move the clock forward by `ms`, running every task that comes due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now() + ms;

        while let Some(due) = self.scheduler.pop_due(until) {
            let scroll_changed = self.run_task(due);
            self.settle(scroll_changed);
        }

        self.scheduler.advance_clock(until);
    }

    /// Tear every component down and drop their pending tasks and watches.
    pub fn teardown(&mut self) {
        let slots = self.components.len();
        for slot in 0..slots {
            self.with_component(slot, |c, ctx| c.teardown(ctx));
            self.scheduler.cancel_owner(Owner::Component(slot));
            self.visibility.unobserve_owner(Owner::Component(slot));
        }
        self.scheduler.cancel_owner(Owner::Page);
        self.mounted = false;
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct access to the tree. The page re-lays out on the next event or
    /// task if in-flow elements were added or removed.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn visibility(&self) -> &VisibilityService {
        &self.visibility
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn with_components(
        &mut self,
        mut f: impl FnMut(&mut dyn Component, &mut PageContext<'_>),
    ) -> ContextFlags {
        let mut ctx = PageContext::new(
            &mut self.document,
            &mut self.viewport,
            self.host.as_mut(),
            &self.config,
            &mut self.scheduler,
            &mut self.visibility,
        );

        for (slot, component) in self.components.iter_mut().enumerate() {
            ctx.owner = Owner::Component(slot);
            f(component.as_mut(), &mut ctx);
        }

        ContextFlags {
            default_prevented: ctx.default_prevented,
            scroll_changed: ctx.scroll_changed,
        }
    }

    fn with_component(
        &mut self,
        slot: usize,
        f: impl FnOnce(&mut dyn Component, &mut PageContext<'_>),
    ) -> ContextFlags {
        let Some(component) = self.components.get_mut(slot) else {
            return ContextFlags::default();
        };

        let mut ctx = PageContext::new(
            &mut self.document,
            &mut self.viewport,
            self.host.as_mut(),
            &self.config,
            &mut self.scheduler,
            &mut self.visibility,
        );
        ctx.owner = Owner::Component(slot);
        f(component.as_mut(), &mut ctx);

        ContextFlags {
            default_prevented: ctx.default_prevented,
            scroll_changed: ctx.scroll_changed,
        }
    }

    /// Returns whether the scroll offset moved.
    fn run_task(&mut self, due: DueTask) -> bool {
        match (due.owner, due.task) {
            (Owner::Page, Task::ScrollStep) => {
                self.viewport.step_task = None;
                let before = self.viewport.scroll_y();
                let Some((offset, more)) = self.viewport.step_smooth() else {
                    return false;
                };
                if more {
                    let handle = self.scheduler.request_frame(Owner::Page, Task::ScrollStep);
                    self.viewport.step_task = Some(handle);
                }
                offset != before
            }
            (Owner::Page, task) => {
                warn!(?task, "page received a task it does not own");
                false
            }
            (Owner::Component(slot), task) => {
                self.with_component(slot, |c, ctx| c.on_task(task, ctx)).scroll_changed
            }
        }
    }

    fn route_visibility(&mut self, entry: VisibilityEntry) -> bool {
        match entry.owner {
            Owner::Component(slot) => {
                self.with_component(slot, |c, ctx| c.on_visible(&entry, ctx)).scroll_changed
            }
            Owner::Page => false,
        }
    }

    fn settle(&mut self, mut scroll_changed: bool) {
        if !self.mounted {
            return;
        }

        for _ in 0..MAX_SETTLE_ROUNDS {
            let mut changed = false;

            if self.document.is_layout_dirty() {
                let before = self.viewport.scroll_y();
                if let Err(err) = self.viewport.relayout(&mut self.document) {
                    warn!(%err, "layout failed; keeping previous geometry");
                    self.document.mark_layout_clean();
                }
                scroll_changed |= self.viewport.scroll_y() != before;
                changed = true;
            }

            if scroll_changed {
                let event = PageEvent::Scroll { offset: self.viewport.scroll_y() };
                let flags = self.with_components(|c, ctx| c.on_event(&event, ctx));
                scroll_changed = flags.scroll_changed;
                changed = true;
            }

            let entries = self.visibility.check(&self.document, &self.viewport);
            for entry in entries {
                scroll_changed |= self.route_visibility(entry);
                changed = true;
            }

            if !changed && !scroll_changed {
                return;
            }
        }

        warn!(rounds = MAX_SETTLE_ROUNDS, "page did not settle");
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ContextFlags {
    default_prevented: bool,
    scroll_changed: bool,
}
