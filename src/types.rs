//! Core types for the page model.
//!
//! - [`ElementId`] - index of an element in the document arena
//! - [`Tag`] - element tag (section, a, img, ...)
//! - [`ClassList`] - class markers as a bitfield
//! - [`Rect`] - geometry in CSS pixels
//! - [`Dimension`], [`FlexDirection`], [`LayoutSpec`] - flow layout description

use std::fmt;

// =============================================================================
// Element identity
// =============================================================================

/// Index of an element in the [`Document`](crate::engine::Document) arena.
///
/// Ids are never reused within a page life, so a removed element's id stays
/// dangling rather than aliasing a newer element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Body,
    Header,
    Nav,
    Div,
    Section,
    A,
    Button,
    Img,
    Span,
    H1,
    Form,
    Input,
}

// =============================================================================
// Class markers (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Class markers as a bitfield.
    ///
    /// Structural classes (`BTN`, `NAV_LINK`, ...) are set by whoever builds
    /// the document; state classes (`ACTIVE`, `ANIMATED`, ...) are toggled by
    /// the components.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassList: u32 {
        const HAMBURGER = 1 << 0;
        const NAV_MENU = 1 << 1;
        const NAV_LINK = 1 << 2;
        const BTN = 1 << 3;
        const BENEFIT_CARD = 1 << 4;
        const COUNTER = 1 << 5;
        const HERO_TEXT = 1 << 6;
        const SCROLL_TO_TOP = 1 << 7;
        const RIPPLE = 1 << 8;

        const ACTIVE = 1 << 16;
        const ANIMATED = 1 << 17;
        const REVEALED = 1 << 18;
        const FONTS_LOADED = 1 << 19;
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Same rectangle moved by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Edge-inclusive intersection.
    ///
    /// Touching rectangles intersect with a zero-area result, which is what
    /// lets zero-sized targets (an image without dimensions) still be seen.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

// =============================================================================
// Flow layout description
// =============================================================================

/// Size value for [`LayoutSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Px(f32),
    /// Percentage of the parent, 0-100.
    Percent(f32),
}

/// Main axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

/// How an element takes part in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// In normal flow.
    #[default]
    Flow,
    /// Out of flow, placed relative to its parent (ripples).
    Absolute,
    /// Out of flow, placed relative to the viewport (scroll-to-top).
    Fixed,
}

/// Layout properties of one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutSpec {
    pub width: Dimension,
    pub height: Dimension,
    pub direction: FlexDirection,
    pub gap: f32,
    pub padding: f32,
    pub position: Position,
}

impl LayoutSpec {
    /// Fixed-height block that fills its parent's width.
    pub fn block(height: f32) -> Self {
        Self { height: Dimension::Px(height), ..Self::default() }
    }

    /// Fixed-size box.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            width: Dimension::Px(width),
            height: Dimension::Px(height),
            ..Self::default()
        }
    }

    /// Auto-sized row container.
    pub fn row(gap: f32) -> Self {
        Self { direction: FlexDirection::Row, gap, ..Self::default() }
    }

    pub fn is_in_flow(&self) -> bool {
        self.position == Position::Flow
    }
}
