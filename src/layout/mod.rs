//! Page Layout Module
//!
//! Flexbox layout of the page using [Taffy](https://github.com/DioxusLabs/taffy).
//!
//! The bridge:
//!
//! 1. Converts element `LayoutSpec`s → Taffy styles
//! 2. Builds the Taffy tree from the document's in-flow elements
//! 3. Computes layout at the viewport width with unbounded height
//! 4. Writes document-coordinate rects back into the `Document`
//!
//! Hosts that already know their geometry can skip this and call
//! `Document::set_rect` directly.

mod taffy_bridge;

pub use taffy_bridge::{compute_layout, ComputedLayout};
