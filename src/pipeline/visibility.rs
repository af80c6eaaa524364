//! Visibility Service - one watcher for every "is it on screen yet" feature.
//!
//! Elements are watched with a threshold (fraction of the element's area
//! that must be inside the root) and a root margin that grows or shrinks the
//! viewport before testing. Two modes:
//!
//! - [`WatchMode::Once`] - report the first match, then stop watching
//! - [`WatchMode::Continuous`] - report every change of the matched state,
//!   starting with the first check
//!
//! The service is passive: the page calls [`VisibilityService::check`]
//! after anything that can move elements (scroll, resize, layout, DOM
//! mutation) and routes the returned entries to the watch owners.

use std::str::FromStr;

use serde::Deserialize;

use crate::engine::Document;
use crate::error::PageError;
use crate::types::{ElementId, Rect};

use super::scheduler::Owner;
use super::viewport::Viewport;

// =============================================================================
// ROOT MARGIN
// =============================================================================

/// Per-edge expansion of the viewport, in px. Negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct RootMargin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Apply to a root rectangle.
    pub fn expand(&self, root: Rect) -> Rect {
        Rect::new(
            root.x - self.left,
            root.y - self.top,
            root.width + self.left + self.right,
            root.height + self.top + self.bottom,
        )
    }
}

impl FromStr for RootMargin {
    type Err = PageError;

    /// Parse CSS margin shorthand with 1-4 px values (`"0px 0px -50px 0px"`,
    /// `"50px 0px"`). A bare `0` is accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| PageError::InvalidRootMargin {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let parts = value
            .split_whitespace()
            .map(|part| {
                let number = part.strip_suffix("px").unwrap_or(part);
                if number != part || number == "0" {
                    number.parse::<f32>().map_err(|_| invalid("not a number"))
                } else {
                    Err(invalid("only px lengths are supported"))
                }
            })
            .collect::<Result<Vec<f32>, PageError>>()?;

        match parts.as_slice() {
            [all] => Ok(Self::new(*all, *all, *all, *all)),
            [vertical, horizontal] => Ok(Self::new(*vertical, *horizontal, *vertical, *horizontal)),
            [top, horizontal, bottom] => Ok(Self::new(*top, *horizontal, *bottom, *horizontal)),
            [top, right, bottom, left] => Ok(Self::new(*top, *right, *bottom, *left)),
            _ => Err(invalid("expected 1 to 4 values")),
        }
    }
}

impl TryFrom<String> for RootMargin {
    type Error = PageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// WATCHES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    Once,
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    /// Fraction of the element that must be inside the root, 0.0-1.0.
    /// Zero means "touching or overlapping at all".
    pub threshold: f32,
    pub root_margin: RootMargin,
    pub mode: WatchMode,
}

impl WatchOptions {
    pub fn once(threshold: f32, root_margin: RootMargin) -> Self {
        Self { threshold, root_margin, mode: WatchMode::Once }
    }

    pub fn continuous(threshold: f32, root_margin: RootMargin) -> Self {
        Self { threshold, root_margin, mode: WatchMode::Continuous }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

/// A change reported to a watch owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub watch: WatchId,
    pub owner: Owner,
    pub element: ElementId,
    /// Visible fraction of the element.
    pub ratio: f32,
    /// Whether the element meets the watch threshold.
    pub is_visible: bool,
}

#[derive(Debug, Clone)]
struct Watch {
    id: WatchId,
    owner: Owner,
    element: ElementId,
    options: WatchOptions,
    last: Option<bool>,
}

#[derive(Debug, Default)]
pub struct VisibilityService {
    watches: Vec<Watch>,
    next_id: u64,
}

impl VisibilityService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, owner: Owner, element: ElementId, options: WatchOptions) -> WatchId {
        let id = WatchId(self.next_id);
        self.next_id += 1;
        self.watches.push(Watch { id, owner, element, options, last: None });
        id
    }

    pub fn unobserve(&mut self, watch: WatchId) -> bool {
        let before = self.watches.len();
        self.watches.retain(|w| w.id != watch);
        self.watches.len() != before
    }

    /// Stop every watch `owner` holds on `element`.
    pub fn unobserve_element(&mut self, owner: Owner, element: ElementId) {
        self.watches.retain(|w| !(w.owner == owner && w.element == element));
    }

    pub fn unobserve_owner(&mut self, owner: Owner) {
        self.watches.retain(|w| w.owner != owner);
    }

    pub fn is_watching(&self, element: ElementId) -> bool {
        self.watches.iter().any(|w| w.element == element)
    }

    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }

    /// Evaluate every watch against the current geometry.
    ///
    /// Entries come back in watch registration order. Watches on removed
    /// elements are dropped without an entry.
    pub fn check(&mut self, doc: &Document, viewport: &Viewport) -> Vec<VisibilityEntry> {
        let mut entries = Vec::new();
        let root = viewport.root_rect();

        self.watches.retain_mut(|watch| {
            let Some(rect) = viewport.client_rect(doc, watch.element) else {
                return false;
            };

            let (ratio, is_visible) = measure(rect, watch.options.root_margin.expand(root), watch.options.threshold);

            match watch.options.mode {
                WatchMode::Once => {
                    if is_visible {
                        entries.push(entry(watch, ratio, true));
                        return false;
                    }
                }
                WatchMode::Continuous => {
                    if watch.last != Some(is_visible) {
                        watch.last = Some(is_visible);
                        entries.push(entry(watch, ratio, is_visible));
                    }
                }
            }
            true
        });

        entries
    }
}

fn entry(watch: &Watch, ratio: f32, is_visible: bool) -> VisibilityEntry {
    VisibilityEntry {
        watch: watch.id,
        owner: watch.owner,
        element: watch.element,
        ratio,
        is_visible,
    }
}

/// Visible ratio of `target` inside `root` and whether it meets `threshold`.
pub fn measure(target: Rect, root: Rect, threshold: f32) -> (f32, bool) {
    let Some(overlap) = target.intersection(&root) else {
        return (0.0, false);
    };

    let ratio = if target.area() > 0.0 {
        overlap.area() / target.area()
    } else {
        1.0
    };

    let visible = if threshold <= 0.0 { true } else { ratio >= threshold };
    (ratio, visible)
}
