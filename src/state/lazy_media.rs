//! Lazy Media Loader.
//!
//! After `DomContentLoaded`, every `img[loading="lazy"]` is watched with a
//! 50px vertical margin. The first time one touches that band its
//! `data-src` becomes its `src` and the watch ends.

use tracing::debug;

use crate::config::LazyConfig;
use crate::pipeline::{Component, PageContext, PageEvent, VisibilityEntry, WatchOptions};
use crate::types::{ElementId, Tag};

pub const DATA_SRC: &str = "data-src";

pub struct LazyMedia {
    options: WatchOptions,
    started: bool,
}

impl LazyMedia {
    pub fn new(config: &LazyConfig) -> Self {
        Self {
            options: WatchOptions::once(0.0, config.root_margin),
            started: false,
        }
    }

    /// Swap in the real source. Images without `data-src` are left as is.
    pub fn load(&self, image: ElementId, ctx: &mut PageContext<'_>) {
        let Some(source) = ctx.document.remove_attr(image, DATA_SRC) else {
            return;
        };
        debug!(%image, src = %source, "lazy image loaded");
        ctx.document.set_attr(image, "src", source);
    }
}

impl Component for LazyMedia {
    fn name(&self) -> &'static str {
        "lazy-media"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageContext<'_>) {
        if !matches!(event, PageEvent::DomContentLoaded) || self.started {
            return;
        }
        self.started = true;

        let images = ctx
            .document
            .query(|e| e.tag == Tag::Img && e.attr("loading") == Some("lazy"));
        for image in images {
            ctx.observe(image, self.options);
        }
    }

    fn on_visible(&mut self, entry: &VisibilityEntry, ctx: &mut PageContext<'_>) {
        if entry.is_visible {
            self.load(entry.element, ctx);
        }
    }
}
