//! Reveal - fade sections and benefit cards in as they scroll into view.
//!
//! Every section and card starts transparent and shifted down. The first
//! time an element is 10% inside the (bottom-trimmed) viewport it snaps to
//! opaque / unshifted and its `revealed` marker is set. Cards get a
//! per-index transition delay so a row of them cascades.
//!
//! Reveal is one-shot: the watch stops after the first match and the
//! marker is never cleared, so scrolling back up does not hide anything.

use tracing::debug;

use crate::config::RevealConfig;
use crate::engine::{Transform, Transition};
use crate::pipeline::{Component, PageContext, VisibilityEntry, WatchOptions};
use crate::types::{ClassList, ElementId, Tag};

pub struct Reveal {
    options: WatchOptions,
    offset: f32,
    duration_s: f32,
    stagger_s: f32,
    watched: Vec<ElementId>,
}

impl Reveal {
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            options: WatchOptions::once(config.threshold, config.root_margin),
            offset: config.offset,
            duration_s: config.duration_s,
            stagger_s: config.stagger_s,
            watched: Vec::new(),
        }
    }

    /// Put `element` in its hidden starting state and start watching it.
    fn prepare(&mut self, element: ElementId, delay_s: f32, ctx: &mut PageContext<'_>) {
        if ctx.document.has_class(element, ClassList::REVEALED) {
            return;
        }

        let offset = self.offset;
        let duration = self.duration_s;
        ctx.document.with_style(element, |style| {
            style.opacity = Some(0.0);
            style.transform = Some(Transform::TranslateY(offset));
            style.transition = vec![
                Transition::new("opacity", duration).delayed(delay_s),
                Transition::new("transform", duration).delayed(delay_s),
            ];
        });

        ctx.observe(element, self.options);
        self.watched.push(element);
    }

    /// Snap `element` to its visible state. Idempotent.
    pub fn reveal(&mut self, element: ElementId, ctx: &mut PageContext<'_>) {
        if ctx.document.has_class(element, ClassList::REVEALED) {
            return;
        }

        ctx.document.with_style(element, |style| {
            style.opacity = Some(1.0);
            style.transform = Some(Transform::TranslateY(0.0));
        });
        ctx.document.add_class(element, ClassList::REVEALED);
        self.watched.retain(|&id| id != element);
        debug!(%element, "revealed");
    }

    /// Elements still waiting to be revealed.
    pub fn pending(&self) -> &[ElementId] {
        &self.watched
    }
}

/// Transition delay of the `index`-th benefit card.
pub fn stagger_delay(index: usize, stagger_s: f32) -> f32 {
    index as f32 * stagger_s
}

impl Component for Reveal {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn mount(&mut self, ctx: &mut PageContext<'_>) {
        for section in ctx.document.query_tag(Tag::Section) {
            self.prepare(section, 0.0, ctx);
        }

        for (index, card) in ctx.document.query_class(ClassList::BENEFIT_CARD).into_iter().enumerate() {
            let delay = stagger_delay(index, self.stagger_s);
            self.prepare(card, delay, ctx);
        }
    }

    fn on_visible(&mut self, entry: &VisibilityEntry, ctx: &mut PageContext<'_>) {
        if entry.is_visible {
            self.reveal(entry.element, ctx);
        }
    }

    fn teardown(&mut self, _ctx: &mut PageContext<'_>) {
        self.watched.clear();
    }
}
