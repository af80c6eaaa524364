//! # spark-page
//!
//! Reactive enhancement layer for a static marketing page.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive state and [taffy](https://github.com/DioxusLabs/taffy) for
//! element geometry.
//!
//! ## Architecture
//!
//! The page is an explicit store: a [`Document`] element tree plus a
//! [`Viewport`](pipeline::Viewport) whose scroll offset is a signal. Each
//! enhancement is a [`Component`] that receives browser-style events,
//! visibility entries and its own timer tasks through a [`PageContext`].
//!
//! ```text
//! host → PageEvent → Page → components → Document mutations → host
//! ```
//!
//! Time is virtual: the host drives it with [`Page::advance`].
//!
//! ## Modules
//!
//! - [`types`] - Element ids, tags, class flags, geometry
//! - [`engine`] - Document tree and inline styles
//! - [`layout`] - Taffy bridge computing element rects
//! - [`pipeline`] - Scheduler, viewport, visibility service, page runtime
//! - [`state`] - The enhancements themselves
//! - [`config`] - TOML configuration
//! - [`host`] - Optional platform capabilities

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod layout;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::PageConfig;
pub use engine::{Document, Element, InlineStyle, PointerEvents, Transform, Transition, Visibility};
pub use error::{PageError, Result};
pub use host::{Host, SystemHost, VitalMetric};
pub use layout::{compute_layout, ComputedLayout};

pub use pipeline::{
    Component, DispatchOutcome, Owner, Page, PageContext, PageEvent, PageHandles, RootMargin,
    ScrollBehavior, ScrollRequest, Task, TaskHandle, VisibilityEntry, WatchOptions,
};

pub use state::{
    // Navigation
    anchor_destination, select_active_section, NavState, Navigation,
    // Scroll-linked
    is_visible_at, stagger_delay, Reveal, ScrollTop,
    // Counter
    parse_counter_target, CounterAnimation, CounterAnimator, CounterStep,
    // Ripple
    ripple_geometry, RippleEmitter, RippleGeometry,
    // Media & header
    LazyMedia, TypingHeader,
    // Bootstrap
    report_web_vitals, FontGate, ImageDimensions, ServiceWorkerRegistration, YearStamp,
    // Forms
    add_loading_state, validate_form, LoadingState,
};
