//! Bootstrap glue - small one-shot page decorations.
//!
//! - [`YearStamp`] writes the current year into `#year`
//! - [`FontGate`] loads the brand faces and flags `body.fonts-loaded`
//! - [`ServiceWorkerRegistration`] registers the caching worker on `Load`
//! - [`ImageDimensions`] pins natural sizes onto unsized images
//! - [`report_web_vitals`] logs the core vitals when the host has them
//!
//! Missing elements and missing host capabilities are silent no-ops.
//! Failures are logged and never propagate.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::{FontsConfig, ServiceWorkerConfig};
use crate::host::{Host, VitalMetric};
use crate::pipeline::{Component, PageContext, PageEvent};
use crate::types::{ClassList, Dimension, ElementId, Tag};

// =============================================================================
// YEAR
// =============================================================================

pub const YEAR_ELEMENT_ID: &str = "year";

/// Footer copyright year.
pub struct YearStamp;

impl Component for YearStamp {
    fn name(&self) -> &'static str {
        "year-stamp"
    }

    fn mount(&mut self, ctx: &mut PageContext<'_>) {
        let Some(year_el) = ctx.document.find_by_id(YEAR_ELEMENT_ID) else {
            return;
        };
        let year = ctx.host.current_year();
        ctx.document.set_text(year_el, year.to_string());
    }
}

// =============================================================================
// FONTS
// =============================================================================

pub struct FontGate {
    faces: Vec<String>,
    loaded: bool,
}

impl FontGate {
    pub fn new(config: &FontsConfig) -> Self {
        Self { faces: config.faces.clone(), loaded: false }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl Component for FontGate {
    fn name(&self) -> &'static str {
        "font-gate"
    }

    fn mount(&mut self, ctx: &mut PageContext<'_>) {
        if !ctx.host.supports_fonts() {
            return;
        }

        let result = self
            .faces
            .iter()
            .try_for_each(|face| ctx.host.load_font(face));

        match result {
            Ok(()) => {
                let body = ctx.document.body();
                ctx.document.add_class(body, ClassList::FONTS_LOADED);
                self.loaded = true;
                debug!(faces = self.faces.len(), "fonts loaded");
            }
            Err(err) => warn!(%err, "font loading failed"),
        }
    }
}

// =============================================================================
// SERVICE WORKER
// =============================================================================

pub struct ServiceWorkerRegistration {
    script: String,
    scope: Option<String>,
}

impl ServiceWorkerRegistration {
    pub fn new(config: &ServiceWorkerConfig) -> Self {
        Self { script: config.script.clone(), scope: None }
    }

    /// Scope of a successful registration.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

impl Component for ServiceWorkerRegistration {
    fn name(&self) -> &'static str {
        "service-worker"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageContext<'_>) {
        if !matches!(event, PageEvent::Load) || self.scope.is_some() {
            return;
        }
        if !ctx.host.supports_service_worker() {
            return;
        }

        match ctx.host.register_service_worker(&self.script) {
            Ok(scope) => {
                info!(script = %self.script, %scope, "service worker registered");
                self.scope = Some(scope);
            }
            Err(err) => warn!(%err, script = %self.script, "service worker registration failed"),
        }
    }
}

// =============================================================================
// IMAGE DIMENSIONS
// =============================================================================

/// Images that had neither a `width` nor a `height` attribute at mount.
#[derive(Default)]
pub struct ImageDimensions {
    unsized_images: HashSet<ElementId>,
}

impl ImageDimensions {
    pub fn is_tracking(&self, image: ElementId) -> bool {
        self.unsized_images.contains(&image)
    }
}

impl Component for ImageDimensions {
    fn name(&self) -> &'static str {
        "image-dimensions"
    }

    fn mount(&mut self, ctx: &mut PageContext<'_>) {
        self.unsized_images = ctx
            .document
            .query(|e| e.tag == Tag::Img && e.attr("width").is_none() && e.attr("height").is_none())
            .into_iter()
            .collect();
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageContext<'_>) {
        let PageEvent::ImageLoad { target, natural_width, natural_height } = *event else {
            return;
        };
        if !self.unsized_images.contains(&target) {
            return;
        }

        let rendered = ctx.document.rect(target).unwrap_or_default();
        if rendered.width > 0.0 && rendered.height > 0.0 {
            return;
        }

        ctx.document.set_attr(target, "width", natural_width.to_string());
        ctx.document.set_attr(target, "height", natural_height.to_string());
        if let Some(image) = ctx.document.get_mut(target) {
            image.layout.width = Dimension::Px(natural_width);
            image.layout.height = Dimension::Px(natural_height);
        }
        ctx.document.mark_layout_dirty();
        debug!(%target, natural_width, natural_height, "image sized");
    }
}

// =============================================================================
// WEB VITALS
// =============================================================================

/// Log every available core web vital. Returns how many were reported.
pub fn report_web_vitals(host: &dyn Host) -> usize {
    if !host.supports_web_vitals() {
        return 0;
    }

    let mut reported = 0;
    for metric in VitalMetric::ALL {
        if let Some(value) = host.web_vital(metric) {
            info!(metric = metric.name(), value, "web vital");
            reported += 1;
        }
    }
    reported
}
