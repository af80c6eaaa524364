//! Inline style model.
//!
//! Only the properties the enhancements write are modelled. Each renders to
//! CSS through `Display` so a host can mirror them onto a real DOM verbatim.

use std::fmt;

/// CSS `transform` values used by the enhancements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    TranslateY(f32),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::TranslateY(px) => write!(f, "translateY({}px)", trim(*px)),
        }
    }
}

/// One entry of a CSS `transition` list.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub property: &'static str,
    pub duration_s: f32,
    pub delay_s: f32,
}

impl Transition {
    pub fn new(property: &'static str, duration_s: f32) -> Self {
        Self { property, duration_s, delay_s: 0.0 }
    }

    pub fn delayed(mut self, delay_s: f32) -> Self {
        self.delay_s = delay_s;
        self
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}s ease", self.property, trim(self.duration_s))?;
        if self.delay_s > 0.0 {
            write!(f, " {}s", trim(self.delay_s))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvents {
    Auto,
    None,
}

/// Inline style of an element. `None` means "not set inline".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineStyle {
    pub opacity: Option<f32>,
    pub transform: Option<Transform>,
    pub transition: Vec<Transition>,
    pub visibility: Option<Visibility>,
    pub pointer_events: Option<PointerEvents>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub border_color: Option<String>,
    pub z_index: Option<i32>,
}

impl InlineStyle {
    /// Render as a `style` attribute value.
    pub fn css_text(&self) -> String {
        let mut out = Vec::new();

        if let Some(opacity) = self.opacity {
            out.push(format!("opacity: {}", trim(opacity)));
        }
        if let Some(transform) = self.transform {
            out.push(format!("transform: {transform}"));
        }
        if !self.transition.is_empty() {
            let list: Vec<String> = self.transition.iter().map(ToString::to_string).collect();
            out.push(format!("transition: {}", list.join(", ")));
        }
        if let Some(visibility) = self.visibility {
            let value = match visibility {
                Visibility::Visible => "visible",
                Visibility::Hidden => "hidden",
            };
            out.push(format!("visibility: {value}"));
        }
        if let Some(pointer_events) = self.pointer_events {
            let value = match pointer_events {
                PointerEvents::Auto => "auto",
                PointerEvents::None => "none",
            };
            out.push(format!("pointer-events: {value}"));
        }
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if let Some(px) = value {
                out.push(format!("{name}: {}px", trim(px)));
            }
        }
        if let Some(color) = &self.border_color {
            out.push(format!("border-color: {color}"));
        }
        if let Some(z) = self.z_index {
            out.push(format!("z-index: {z}"));
        }

        out.join("; ")
    }
}

/// Format with at most three decimals and no trailing zeros.
fn trim(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}
