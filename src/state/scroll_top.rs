//! Scroll-to-top control.
//!
//! A fixed round button created once at mount in the bottom-right corner.
//! Visible iff the scroll offset is strictly above the threshold; clicking
//! it smooth-scrolls to the top.

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::config::ScrollTopConfig;
use crate::engine::{Element, PointerEvents, Transition, Visibility};
use crate::pipeline::{Component, PageContext, PageEvent, ScrollBehavior};
use crate::types::{ClassList, ElementId, Position, Tag};

const BUTTON_SIZE: f32 = 50.0;
const BUTTON_INSET: f32 = 20.0;
const BUTTON_Z_INDEX: i32 = 1000;

/// Whether the control shows at `offset`. No hysteresis.
pub fn is_visible_at(offset: f32, threshold: f32) -> bool {
    offset > threshold
}

pub struct ScrollTop {
    threshold: f32,
    visible: Signal<bool>,
    button: Option<ElementId>,
}

impl ScrollTop {
    pub fn new(config: &ScrollTopConfig) -> Self {
        Self {
            threshold: config.threshold,
            visible: signal(false),
            button: None,
        }
    }

    pub fn visible_signal(&self) -> Signal<bool> {
        self.visible.clone()
    }

    pub fn button(&self) -> Option<ElementId> {
        self.button
    }

    fn apply(&mut self, offset: f32, ctx: &mut PageContext<'_>) {
        let visible = is_visible_at(offset, self.threshold);
        if self.visible.get() != visible {
            self.visible.set(visible);
            debug!(visible, offset, "scroll-to-top");
        }

        let Some(button) = self.button else { return };
        ctx.document.with_style(button, |style| {
            if visible {
                style.opacity = Some(1.0);
                style.visibility = Some(Visibility::Visible);
                style.pointer_events = Some(PointerEvents::Auto);
            } else {
                style.opacity = Some(0.0);
                style.visibility = Some(Visibility::Hidden);
                style.pointer_events = Some(PointerEvents::None);
            }
        });
    }
}

impl Component for ScrollTop {
    fn name(&self) -> &'static str {
        "scroll-to-top"
    }

    fn mount(&mut self, ctx: &mut PageContext<'_>) {
        if self.button.is_some() {
            return;
        }

        let mut element = Element::new(Tag::Button)
            .with_class(ClassList::SCROLL_TO_TOP)
            .with_text("↑");
        element.layout.position = Position::Fixed;
        element.style.width = Some(BUTTON_SIZE);
        element.style.height = Some(BUTTON_SIZE);
        element.style.right = Some(BUTTON_INSET);
        element.style.bottom = Some(BUTTON_INSET);
        element.style.z_index = Some(BUTTON_Z_INDEX);
        element.style.opacity = Some(0.0);
        element.style.visibility = Some(Visibility::Hidden);
        element.style.pointer_events = Some(PointerEvents::None);
        element.style.transition = vec![Transition::new("all", 0.3)];

        let body = ctx.document.body();
        match ctx.document.append(body, element) {
            Ok(id) => {
                self.button = Some(id);
                ctx.document.mark_layout_dirty();
            }
            Err(err) => debug!(%err, "scroll-to-top not created"),
        }
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageContext<'_>) {
        match *event {
            PageEvent::Scroll { offset } => self.apply(offset, ctx),
            PageEvent::Click { target, .. } => {
                let Some(button) = self.button else { return };
                // Hidden control is non-interactive
                if !self.visible.get() {
                    return;
                }
                if ctx.document.ancestors_inclusive(target).contains(&button) {
                    ctx.scroll_to(0.0, ScrollBehavior::Smooth);
                }
            }
            _ => {}
        }
    }

    fn teardown(&mut self, ctx: &mut PageContext<'_>) {
        if let Some(button) = self.button.take() {
            ctx.document.remove(button);
        }
    }
}
