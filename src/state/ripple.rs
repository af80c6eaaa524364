//! Ripple Effect Emitter - a short-lived circle under the pointer on `.btn`.
//!
//! Every activation appends a fresh `span.ripple` to each `.btn` on the
//! click path, sized to the button's larger side and centred on the click
//! point. Each ripple is removed 600ms later whatever else happens; many
//! ripples may be alive at once.

use std::collections::HashMap;

use tracing::debug;

use crate::config::RippleConfig;
use crate::engine::Element;
use crate::pipeline::{Component, PageContext, PageEvent, Task, TaskHandle};
use crate::types::{ClassList, ElementId, Position, Rect, Tag};

/// Rules the ripple relies on, injected once at mount.
pub const RIPPLE_CSS: &str = "\
.btn { position: relative; overflow: hidden; }
.ripple {
  position: absolute;
  border-radius: 50%;
  background: rgba(255, 255, 255, 0.6);
  transform: scale(0);
  animation: ripple 0.6s linear;
  pointer-events: none;
}
@keyframes ripple {
  to { transform: scale(4); opacity: 0; }
}
";

/// Size and offset of a ripple inside its button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

/// `button` is the button's client rect; the click is in client coordinates.
pub fn ripple_geometry(button: Rect, client_x: f32, client_y: f32) -> RippleGeometry {
    let size = button.width.max(button.height);
    RippleGeometry {
        size,
        x: client_x - button.left() - size / 2.0,
        y: client_y - button.top() - size / 2.0,
    }
}

pub struct RippleEmitter {
    lifetime_ms: u64,
    live: HashMap<ElementId, TaskHandle>,
    styled: bool,
}

impl RippleEmitter {
    pub fn new(config: &RippleConfig) -> Self {
        Self {
            lifetime_ms: config.lifetime_ms,
            live: HashMap::new(),
            styled: false,
        }
    }

    /// Ripples currently attached.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn emit(&mut self, button: ElementId, client_x: f32, client_y: f32, ctx: &mut PageContext<'_>) {
        let rect = ctx.client_rect(button).unwrap_or_default();
        let geometry = ripple_geometry(rect, client_x, client_y);

        let mut ripple = Element::new(Tag::Span).with_class(ClassList::RIPPLE);
        ripple.layout.position = Position::Absolute;
        ripple.style.width = Some(geometry.size);
        ripple.style.height = Some(geometry.size);
        ripple.style.left = Some(geometry.x);
        ripple.style.top = Some(geometry.y);

        match ctx.document.append(button, ripple) {
            Ok(id) => {
                let handle = ctx.set_timeout(self.lifetime_ms, Task::RemoveRipple(id));
                self.live.insert(id, handle);
                debug!(%button, ripple = %id, size = geometry.size, "ripple");
            }
            Err(err) => debug!(%err, "ripple not attached"),
        }
    }
}

impl Component for RippleEmitter {
    fn name(&self) -> &'static str {
        "ripple"
    }

    fn mount(&mut self, ctx: &mut PageContext<'_>) {
        if !self.styled {
            ctx.document.inject_stylesheet(RIPPLE_CSS);
            self.styled = true;
        }
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageContext<'_>) {
        let PageEvent::Click { target, client_x, client_y } = *event else { return };

        let buttons: Vec<ElementId> = ctx
            .document
            .ancestors_inclusive(target)
            .into_iter()
            .filter(|&id| ctx.document.has_class(id, ClassList::BTN))
            .collect();

        for button in buttons {
            self.emit(button, client_x, client_y, ctx);
        }
    }

    fn on_task(&mut self, task: Task, ctx: &mut PageContext<'_>) {
        if let Task::RemoveRipple(id) = task {
            self.live.remove(&id);
            ctx.document.remove(id);
        }
    }

    fn teardown(&mut self, ctx: &mut PageContext<'_>) {
        for (id, handle) in self.live.drain() {
            ctx.cancel(handle);
            ctx.document.remove(id);
        }
    }
}
