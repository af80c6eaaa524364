//! Counter Animator - count a number up from zero when it scrolls into view.
//!
//! # Animation
//!
//! `increment = target / (duration / 16)`, one increment per frame. The
//! first step runs immediately; while the accumulator is below the target
//! the display shows its floor and another frame is requested. Once it
//! reaches the target the display is set to exactly the target and the
//! animation ends for good.
//!
//! # Trigger
//!
//! Each counter container is watched at 50% visibility, once. On the first
//! match its value element (first `<span>`) is parsed, reset to `"0"`,
//! marked `animated`, and animated after a short delay. The marker makes a
//! second trigger a no-op. A value that does not start with a number is
//! rejected and the display is left alone.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::CounterConfig;
use crate::error::{PageError, Result};
use crate::pipeline::{Component, PageContext, Task, TaskHandle, VisibilityEntry, WatchOptions};
use crate::pipeline::{RootMargin, FRAME_INTERVAL_MS};
use crate::types::{ClassList, ElementId, Tag};

/// Parse a counter label the way a leading-integer parse does: optional
/// whitespace, optional sign, then digits; anything after is ignored
/// (`"1500+"` → 1500). Digit runs beyond `i64` saturate.
pub fn parse_counter_target(text: &str) -> Result<i64> {
    let invalid = || PageError::InvalidCounterTarget { text: text.to_string() };

    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if digits_end == 0 {
        return Err(invalid());
    }

    // A digit run is only rejected by `parse` on overflow
    let value: i64 = rest[..digits_end].parse().unwrap_or(i64::MAX);
    Ok(value.saturating_mul(sign))
}

/// Outcome of one animation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterStep {
    /// Show this value and request another frame.
    Continue(i64),
    /// Show the exact target; the animation is over.
    Done(i64),
}

/// Per-element counter state.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u64) -> Self {
        let frames = duration_ms as f64 / FRAME_INTERVAL_MS as f64;
        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance by one increment. Once done, keeps returning the target.
    pub fn step(&mut self) -> CounterStep {
        if self.done {
            return CounterStep::Done(self.target);
        }

        self.current += self.increment;
        // NaN (0 / 0) falls through to the terminal branch
        if self.current < self.target as f64 {
            CounterStep::Continue(self.current.floor() as i64)
        } else {
            self.current = self.target as f64;
            self.done = true;
            CounterStep::Done(self.target)
        }
    }
}

pub struct CounterAnimator {
    threshold: f32,
    start_delay_ms: u64,
    duration_ms: u64,
    /// Value element → target parsed at trigger time, waiting for the delay.
    pending: HashMap<ElementId, i64>,
    running: HashMap<ElementId, CounterAnimation>,
    handles: HashMap<ElementId, TaskHandle>,
}

impl CounterAnimator {
    pub fn new(config: &CounterConfig) -> Self {
        Self {
            threshold: config.threshold,
            start_delay_ms: config.start_delay_ms,
            duration_ms: config.duration_ms,
            pending: HashMap::new(),
            running: HashMap::new(),
            handles: HashMap::new(),
        }
    }

    /// Animate `element`'s text from 0 to `target` over `duration_ms`.
    ///
    /// The first step is applied before returning.
    pub fn animate(
        &mut self,
        element: ElementId,
        target: i64,
        duration_ms: u64,
        ctx: &mut PageContext<'_>,
    ) {
        self.running.insert(element, CounterAnimation::new(target, duration_ms));
        self.step(element, ctx);
    }

    /// Whether `element` has a running animation.
    pub fn is_running(&self, element: ElementId) -> bool {
        self.running.get(&element).is_some_and(|a| !a.is_done())
    }

    fn step(&mut self, element: ElementId, ctx: &mut PageContext<'_>) {
        let Some(animation) = self.running.get_mut(&element) else { return };

        match animation.step() {
            CounterStep::Continue(value) => {
                ctx.document.set_text(element, value.to_string());
                let handle = ctx.request_frame(Task::CounterFrame(element));
                self.handles.insert(element, handle);
            }
            CounterStep::Done(target) => {
                ctx.document.set_text(element, target.to_string());
                self.handles.remove(&element);
                self.running.remove(&element);
                debug!(%element, target, "counter finished");
            }
        }
    }

    /// Handle the first sighting of a counter container.
    fn trigger(&mut self, container: ElementId, ctx: &mut PageContext<'_>) {
        let Some(value) = ctx.document.find_descendant(container, |e| e.tag == Tag::Span) else {
            return;
        };
        if ctx.document.has_class(value, ClassList::ANIMATED) {
            return;
        }

        let text = ctx.document.text(value).unwrap_or_default().to_string();
        let target = match parse_counter_target(&text) {
            Ok(target) => target,
            Err(err) => {
                warn!(%err, %value, "counter skipped");
                return;
            }
        };

        ctx.document.set_text(value, "0");
        ctx.document.add_class(value, ClassList::ANIMATED);
        self.pending.insert(value, target);

        let handle = ctx.set_timeout(self.start_delay_ms, Task::StartCounter(value));
        self.handles.insert(value, handle);
        debug!(%value, target, "counter armed");
    }
}

impl Component for CounterAnimator {
    fn name(&self) -> &'static str {
        "counter"
    }

    fn mount(&mut self, ctx: &mut PageContext<'_>) {
        let options = WatchOptions::once(self.threshold, RootMargin::ZERO);
        for container in ctx.document.query_class(ClassList::COUNTER) {
            ctx.observe(container, options);
        }
    }

    fn on_visible(&mut self, entry: &VisibilityEntry, ctx: &mut PageContext<'_>) {
        if entry.is_visible {
            self.trigger(entry.element, ctx);
        }
    }

    fn on_task(&mut self, task: Task, ctx: &mut PageContext<'_>) {
        match task {
            Task::StartCounter(element) => {
                self.handles.remove(&element);
                if let Some(target) = self.pending.remove(&element) {
                    self.animate(element, target, self.duration_ms, ctx);
                }
            }
            Task::CounterFrame(element) => self.step(element, ctx),
            _ => {}
        }
    }

    fn teardown(&mut self, ctx: &mut PageContext<'_>) {
        for (_, handle) in self.handles.drain() {
            ctx.cancel(handle);
        }
        self.pending.clear();
        self.running.clear();
    }
}
