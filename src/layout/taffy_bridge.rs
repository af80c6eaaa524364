//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts element [`LayoutSpec`]s to Taffy styles, runs flexbox layout for
//! the body at the viewport width, and writes document-coordinate rects back
//! into the [`Document`].
//!
//! Out-of-flow elements are not given Taffy nodes:
//! - `Fixed` elements are placed against the viewport from their inline
//!   `right`/`bottom`/`left`/`top` and `width`/`height`
//! - `Absolute` elements are placed against their parent's box

use std::collections::HashMap;

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    LengthPercentage, NodeId, Rect as TaffyRect, Size, Style, TaffyTree,
};

use crate::engine::Document;
use crate::error::Result;
use crate::types::{Dimension, ElementId, FlexDirection, LayoutSpec, Position, Rect};

// =============================================================================
// CONVERSION
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Px(n) => TaffyDimension::Length(n),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
    }
}

fn build_style(spec: &LayoutSpec) -> Style {
    let padding = LengthPercentage::Length(spec.padding);
    Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(spec.direction),
        // Page blocks keep their declared size; the body grows instead.
        flex_shrink: 0.0,
        size: Size {
            width: to_taffy_dimension(spec.width),
            height: to_taffy_dimension(spec.height),
        },
        gap: Size {
            width: LengthPercentage::Length(spec.gap),
            height: LengthPercentage::Length(spec.gap),
        },
        padding: TaffyRect {
            left: padding,
            right: padding,
            top: padding,
            bottom: padding,
        },
        ..Style::default()
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Result summary of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComputedLayout {
    /// Total document height (the body's border box).
    pub content_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl ComputedLayout {
    /// Largest valid vertical scroll offset.
    pub fn max_scroll_y(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

/// Lay out `doc` for a viewport of the given size.
///
/// Rects of in-flow and absolute elements are in document coordinates;
/// rects of fixed elements are in viewport coordinates.
pub fn compute_layout(
    doc: &mut Document,
    viewport_width: f32,
    viewport_height: f32,
) -> Result<ComputedLayout> {
    let body = doc.body();
    let order = doc.descendants(body);

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let mut nodes: HashMap<ElementId, NodeId> = HashMap::new();

    // First pass: nodes for in-flow elements whose ancestors are all in flow
    for &id in &order {
        let Some(element) = doc.get(id) else { continue };

        let in_flow_chain = id == body
            || (element.layout.is_in_flow()
                && element.parent().is_some_and(|p| nodes.contains_key(&p)));
        if !in_flow_chain {
            continue;
        }

        let mut style = build_style(&element.layout);
        if id == body {
            style.size.width = TaffyDimension::Length(viewport_width);
        }

        let node = tree.new_leaf(style)?;
        if let Some(parent_node) = element.parent().and_then(|p| nodes.get(&p)) {
            tree.add_child(*parent_node, node)?;
        }
        nodes.insert(id, node);
    }

    let root = nodes[&body];
    let available = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout(root, available)?;

    // Second pass: write back in document order so parents resolve first
    for &id in &order {
        let Some(element) = doc.get(id) else { continue };
        let parent_rect = element.parent().and_then(|p| doc.rect(p)).unwrap_or(Rect::ZERO);

        let rect = if let Some(&node) = nodes.get(&id) {
            let layout = tree.layout(node)?;
            Rect::new(
                parent_rect.x + layout.location.x,
                parent_rect.y + layout.location.y,
                layout.size.width,
                layout.size.height,
            )
        } else {
            out_of_flow_rect(element.layout.position, &element.style, parent_rect, viewport_width, viewport_height)
        };

        doc.set_rect(id, rect);
    }

    doc.mark_layout_clean();

    let content_height = doc.rect(body).map(|r| r.height).unwrap_or(0.0);
    Ok(ComputedLayout { content_height, viewport_width, viewport_height })
}

fn out_of_flow_rect(
    position: Position,
    style: &crate::engine::InlineStyle,
    parent: Rect,
    viewport_width: f32,
    viewport_height: f32,
) -> Rect {
    let width = style.width.unwrap_or(0.0);
    let height = style.height.unwrap_or(0.0);

    match position {
        Position::Fixed => {
            let x = match (style.left, style.right) {
                (Some(left), _) => left,
                (None, Some(right)) => viewport_width - right - width,
                (None, None) => 0.0,
            };
            let y = match (style.top, style.bottom) {
                (Some(top), _) => top,
                (None, Some(bottom)) => viewport_height - bottom - height,
                (None, None) => 0.0,
            };
            Rect::new(x, y, width, height)
        }
        // Descendants of out-of-flow elements also land here
        Position::Absolute | Position::Flow => Rect::new(
            parent.x + style.left.unwrap_or(0.0),
            parent.y + style.top.unwrap_or(0.0),
            width,
            height,
        ),
    }
}
