//! Viewport - window size, scroll offset and smooth scrolling.
//!
//! `scroll_y` is a signal so anything reactive (effects, deriveds in a host)
//! tracks it without polling. Scroll offsets are clamped to
//! `[0, content_height - height]` like a real window.

use spark_signals::{signal, Signal};

use crate::engine::Document;
use crate::error::Result;
use crate::layout::{compute_layout, ComputedLayout};
use crate::types::{ElementId, Position, Rect};

use super::scheduler::TaskHandle;

/// How a programmatic scroll should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// A programmatic scroll request, as asked (before clamping).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f32,
    pub behavior: ScrollBehavior,
}

// =============================================================================
// SMOOTH SCROLL
// =============================================================================

/// Exponential ease-out toward a target offset.
///
/// Each frame covers `speed` of the remaining distance; within half a pixel
/// it snaps to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    target: f32,
    speed: f32,
}

impl SmoothScroll {
    pub fn new(target: f32, speed: f32) -> Self {
        Self { target, speed: speed.clamp(0.05, 1.0) }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Next offset from `current`.
    pub fn step(&self, current: f32) -> f32 {
        let next = current + (self.target - current) * self.speed;
        if (self.target - next).abs() < 0.5 {
            self.target
        } else {
            next
        }
    }
}

// =============================================================================
// VIEWPORT
// =============================================================================

pub struct Viewport {
    width: f32,
    height: f32,
    scroll_y: Signal<f32>,
    layout: ComputedLayout,
    smooth: Option<SmoothScroll>,
    requests: Vec<ScrollRequest>,
    /// Pending frame driving the smooth scroll.
    pub(crate) step_task: Option<TaskHandle>,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: signal(0.0),
            layout: ComputedLayout {
                content_height: 0.0,
                viewport_width: width,
                viewport_height: height,
            },
            smooth: None,
            requests: Vec::new(),
            step_task: None,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Re-run layout for the current size and re-clamp the scroll offset.
    pub fn relayout(&mut self, doc: &mut Document) -> Result<ComputedLayout> {
        self.layout = compute_layout(doc, self.width, self.height)?;
        let current = self.scroll_y();
        self.set_scroll_y(current);
        Ok(self.layout)
    }

    pub fn layout(&self) -> ComputedLayout {
        self.layout
    }

    /// The `window.pageYOffset` equivalent.
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y.get()
    }

    /// Shared handle to the scroll offset signal.
    pub fn scroll_signal(&self) -> Signal<f32> {
        self.scroll_y.clone()
    }

    pub fn max_scroll_y(&self) -> f32 {
        self.layout.max_scroll_y()
    }

    /// Jump to `y` (clamped). Returns the applied offset.
    pub fn set_scroll_y(&mut self, y: f32) -> f32 {
        let clamped = y.clamp(0.0, self.max_scroll_y());
        if self.scroll_y.get() != clamped {
            self.scroll_y.set(clamped);
        }
        clamped
    }

    /// Viewport rectangle in client coordinates.
    pub fn root_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The `getBoundingClientRect()` equivalent.
    ///
    /// Fixed elements (and anything inside them) are already in client
    /// coordinates; everything else is shifted by the scroll offset.
    pub fn client_rect(&self, doc: &Document, id: ElementId) -> Option<Rect> {
        let rect = doc.rect(id)?;
        let fixed = doc
            .ancestors_inclusive(id)
            .into_iter()
            .filter_map(|a| doc.get(a))
            .any(|e| e.layout.position == Position::Fixed);

        if fixed {
            Some(rect)
        } else {
            Some(rect.translate(0.0, -self.scroll_y()))
        }
    }

    // -------------------------------------------------------------------------
    // Programmatic scrolling
    // -------------------------------------------------------------------------

    /// Record a request and start (or retarget) a smooth scroll. Instant
    /// requests are applied right away. Returns true if a smooth scroll is
    /// now in flight.
    pub fn request_scroll(&mut self, request: ScrollRequest, speed: f32) -> bool {
        self.requests.push(request);
        let target = request.top.clamp(0.0, self.max_scroll_y());

        match request.behavior {
            ScrollBehavior::Instant => {
                self.smooth = None;
                self.set_scroll_y(target);
                false
            }
            ScrollBehavior::Smooth => {
                self.smooth = Some(SmoothScroll::new(target, speed));
                true
            }
        }
    }

    /// Advance a running smooth scroll by one frame. Returns the new offset
    /// and whether more frames are needed, or `None` if nothing is running.
    pub fn step_smooth(&mut self) -> Option<(f32, bool)> {
        let smooth = self.smooth?;
        let next = smooth.step(self.scroll_y());
        let applied = self.set_scroll_y(next);

        let done = applied == smooth.target() || applied != next;
        if done {
            self.smooth = None;
        }
        Some((applied, !done))
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth.is_some()
    }

    /// Every programmatic scroll request so far, oldest first.
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    pub fn last_scroll_request(&self) -> Option<ScrollRequest> {
        self.requests.last().copied()
    }
}
