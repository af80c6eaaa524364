//! Page Pipeline
//!
//! This module implements the runtime that connects host events to the
//! page enhancements.
//!
//! # Pipeline Architecture
//!
//! ```text
//! host event → Page::dispatch → components → DOM writes
//!                    ↓
//!                 settle: relayout → scroll notify → visibility check
//! ```
//!
//! ## Data Flow
//!
//! 1. **Scheduler** - Virtual clock; typed timers and frame callbacks
//! 2. **Viewport** - Scroll offset signal, smooth scrolling, client rects
//! 3. **VisibilityService** - Threshold / root-margin watches
//! 4. **Page** - Owns all of the above and routes everything to components
//!
//! ## Key Design Principles
//!
//! - **Explicit store**: components get the document through [`PageContext`]
//! - **Owned handles**: every task and watch belongs to the component that
//!   created it and dies with it

pub mod context;
pub mod page;
pub mod scheduler;
pub mod viewport;
pub mod visibility;

// Re-exports
pub use context::{Component, DispatchOutcome, PageContext, PageEvent};
pub use page::{Page, PageHandles};
pub use scheduler::{DueTask, Owner, Scheduler, Task, TaskHandle, FRAME_INTERVAL_MS};
pub use viewport::{ScrollBehavior, ScrollRequest, SmoothScroll, Viewport};
pub use visibility::{
    measure, RootMargin, VisibilityEntry, VisibilityService, WatchId, WatchMode, WatchOptions,
};
