//! Page Engine - the explicit UI-state store.
//!
//! - Document: element arena, class/attribute/text mutation, queries
//! - Style: typed inline styles rendered to CSS
//!
//! Components never reach for a global document. They receive the store by
//! reference through [`PageContext`](crate::pipeline::PageContext) and mutate
//! it in place.

mod document;
mod style;

pub use document::*;
pub use style::*;
