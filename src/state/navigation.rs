//! Navigation Controller - mobile menu, anchor scrolling, active link.
//!
//! - Hamburger activation flips `is_menu_open` and mirrors it onto the
//!   hamburger and menu `active` classes
//! - Any nav link activation closes the menu
//! - In-page anchors (`href="#…"`) cancel the default jump and smooth-scroll
//!   to the target, leaving room for the fixed header
//! - Every scroll re-selects the active section and re-marks nav links
//!
//! # Example
//!
//! ```ignore
//! let nav = Navigation::new(&config.navigation);
//! let state = nav.state();
//! page.register(nav);
//!
//! page.click(hamburger);
//! assert!(state.is_menu_open.get());
//! ```

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::config::NavigationConfig;
use crate::pipeline::{Component, PageContext, PageEvent, ScrollBehavior};
use crate::types::{ClassList, ElementId, Tag};

/// Reactive navigation state. Cloning shares the underlying signals.
#[derive(Clone)]
pub struct NavState {
    pub is_menu_open: Signal<bool>,
    /// Id of the section under the active line, empty if none.
    pub active_section_id: Signal<String>,
}

impl NavState {
    pub fn new() -> Self {
        Self {
            is_menu_open: signal(false),
            active_section_id: signal(String::new()),
        }
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute scroll destination for an anchor target.
///
/// `target_top` is the target's client-rect top.
pub fn anchor_destination(target_top: f32, scroll_y: f32, header_offset: f32) -> f32 {
    target_top + scroll_y - header_offset
}

/// Pick the active section from `(id, client_top, height)` triples in
/// document order.
///
/// A section qualifies when it straddles `line`: `top <= line` and
/// `top + height > line`. The last qualifying section wins.
pub fn select_active_section<'a>(
    sections: impl IntoIterator<Item = (&'a str, f32, f32)>,
    line: f32,
) -> Option<&'a str> {
    sections
        .into_iter()
        .filter(|&(_, top, height)| top <= line && top + height > line)
        .map(|(id, _, _)| id)
        .last()
}

pub struct Navigation {
    state: NavState,
    header_offset: f32,
    active_line: f32,
    hamburger: Option<ElementId>,
    menu: Option<ElementId>,
}

impl Navigation {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            state: NavState::new(),
            header_offset: config.header_offset,
            active_line: config.active_line,
            hamburger: None,
            menu: None,
        }
    }

    pub fn state(&self) -> NavState {
        self.state.clone()
    }

    /// Flip the mobile menu.
    pub fn toggle_menu(&mut self, ctx: &mut PageContext<'_>) {
        let open = !self.state.is_menu_open.get();
        self.set_menu_open(open, ctx);
    }

    /// Force the mobile menu closed.
    pub fn close_menu(&mut self, ctx: &mut PageContext<'_>) {
        self.set_menu_open(false, ctx);
    }

    fn set_menu_open(&mut self, open: bool, ctx: &mut PageContext<'_>) {
        self.state.is_menu_open.set(open);
        for id in [self.hamburger, self.menu].into_iter().flatten() {
            ctx.document.set_class(id, ClassList::ACTIVE, open);
        }
        debug!(open, "menu");
    }

    /// Smooth-scroll to the element named by `href` (`"#id"`).
    ///
    /// A missing target is not an error; nothing happens.
    pub fn scroll_to_anchor(&self, href: &str, ctx: &mut PageContext<'_>) {
        let Some(fragment) = href.strip_prefix('#').filter(|f| !f.is_empty()) else {
            return;
        };
        let Some(target) = ctx.document.find_by_id(fragment) else {
            debug!(href, "anchor target missing");
            return;
        };
        let Some(rect) = ctx.client_rect(target) else {
            return;
        };

        let destination = anchor_destination(rect.top(), ctx.viewport.scroll_y(), self.header_offset);
        ctx.scroll_to(destination, ScrollBehavior::Smooth);
    }

    /// Re-select the active section and re-mark every nav link.
    pub fn update_active_link(&mut self, ctx: &mut PageContext<'_>) {
        let sections: Vec<(String, f32, f32)> = ctx
            .document
            .query_tag(Tag::Section)
            .into_iter()
            .filter_map(|id| {
                let rect = ctx.client_rect(id)?;
                let name = ctx.document.get(id)?.id.clone().unwrap_or_default();
                Some((name, rect.top(), rect.height))
            })
            .collect();

        let current = select_active_section(
            sections.iter().map(|(id, top, height)| (id.as_str(), *top, *height)),
            self.active_line,
        )
        .unwrap_or_default()
        .to_string();

        let wanted = format!("#{current}");
        for link in ctx.document.query_class(ClassList::NAV_LINK) {
            let active = ctx.document.get(link).and_then(|e| e.href.as_deref()) == Some(wanted.as_str());
            ctx.document.set_class(link, ClassList::ACTIVE, active);
        }

        if self.state.active_section_id.get() != current {
            self.state.active_section_id.set(current);
        }
    }
}

impl Component for Navigation {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn mount(&mut self, ctx: &mut PageContext<'_>) {
        self.hamburger = ctx.document.query_class(ClassList::HAMBURGER).into_iter().next();
        self.menu = ctx.document.query_class(ClassList::NAV_MENU).into_iter().next();
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageContext<'_>) {
        match *event {
            PageEvent::Click { target, .. } => {
                let path = ctx.document.ancestors_inclusive(target);

                if self.hamburger.is_some_and(|h| path.contains(&h)) {
                    self.toggle_menu(ctx);
                }

                for id in path {
                    let Some(element) = ctx.document.get(id) else { continue };
                    let is_nav_link = element.has_class(ClassList::NAV_LINK);
                    let anchor = element.is_anchor().then(|| element.href.clone()).flatten();

                    if is_nav_link {
                        self.close_menu(ctx);
                    }
                    if let Some(href) = anchor {
                        ctx.prevent_default();
                        self.scroll_to_anchor(&href, ctx);
                    }
                }
            }
            PageEvent::Scroll { .. } => self.update_active_link(ctx),
            _ => {}
        }
    }
}
