//! Typing Header - re-type the hero heading once the page has loaded.

use tracing::debug;

use crate::config::TypingConfig;
use crate::pipeline::{Component, PageContext, PageEvent, Task, TaskHandle};
use crate::types::{ClassList, ElementId, Tag};

pub struct TypingHeader {
    speed_ms: u64,
    heading: Option<ElementId>,
    chars: Vec<char>,
    typed: usize,
    handle: Option<TaskHandle>,
}

impl TypingHeader {
    pub fn new(config: &TypingConfig) -> Self {
        Self {
            speed_ms: config.speed_ms,
            heading: None,
            chars: Vec::new(),
            typed: 0,
            handle: None,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.handle.is_some()
    }

    /// Capture `heading`'s text, clear it, and start typing it back.
    pub fn start(&mut self, heading: ElementId, ctx: &mut PageContext<'_>) {
        if let Some(handle) = self.handle.take() {
            ctx.cancel(handle);
        }

        self.chars = ctx.document.text(heading).unwrap_or_default().chars().collect();
        self.typed = 0;
        self.heading = Some(heading);
        ctx.document.set_text(heading, "");

        debug!(%heading, chars = self.chars.len(), "typing");
        self.type_next(heading, ctx);
    }

    fn type_next(&mut self, heading: ElementId, ctx: &mut PageContext<'_>) {
        self.handle = None;
        if self.heading != Some(heading) || self.typed >= self.chars.len() {
            return;
        }

        self.typed += 1;
        let text: String = self.chars[..self.typed].iter().collect();
        ctx.document.set_text(heading, text);

        if self.typed < self.chars.len() {
            self.handle = Some(ctx.set_timeout(self.speed_ms, Task::TypeNext(heading)));
        }
    }
}

impl Component for TypingHeader {
    fn name(&self) -> &'static str {
        "typing-header"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageContext<'_>) {
        if !matches!(event, PageEvent::Load) {
            return;
        }

        let heading = ctx
            .document
            .query_class(ClassList::HERO_TEXT)
            .into_iter()
            .find_map(|hero| ctx.document.find_descendant(hero, |e| e.tag == Tag::H1));

        if let Some(heading) = heading {
            self.start(heading, ctx);
        }
    }

    fn on_task(&mut self, task: Task, ctx: &mut PageContext<'_>) {
        if let Task::TypeNext(heading) = task {
            self.type_next(heading, ctx);
        }
    }

    fn teardown(&mut self, ctx: &mut PageContext<'_>) {
        if let Some(handle) = self.handle.take() {
            ctx.cancel(handle);
        }
    }
}
