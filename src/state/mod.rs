//! State Module - the page enhancements
//!
//! Each enhancement is a [`Component`](crate::pipeline::Component) holding
//! its own state and reacting to page events, visibility entries and its
//! own scheduled tasks:
//!
//! - **Navigation** - Mobile menu toggle, smooth anchor scroll, active link
//! - **Reveal** - One-shot fade-in of sections and benefit cards
//! - **ScrollTop** - Fixed scroll-to-top control
//! - **Counter** - Count-up animation of statistics
//! - **Ripple** - Click ripples on buttons
//! - **LazyMedia** - Deferred image sources
//! - **Typing** - Re-typed hero heading
//! - **Bootstrap** - Year stamp, font gate, service worker, image sizes, vitals
//! - **Forms** - Validation and loading-state helpers

mod bootstrap;
mod counter;
mod forms;
mod lazy_media;
mod navigation;
mod reveal;
mod ripple;
mod scroll_top;
mod typing;

pub use bootstrap::*;
pub use counter::*;
pub use forms::*;
pub use lazy_media::*;
pub use navigation::*;
pub use reveal::*;
pub use ripple::*;
pub use scroll_top::*;
pub use typing::*;
