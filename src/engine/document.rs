//! Document - the page's element tree.
//!
//! An arena of [`Element`]s addressed by [`ElementId`]. The body is always
//! element 0. Removal detaches a subtree and marks it dead; ids are never
//! reused, so stale ids held by timers resolve to nothing.
//!
//! All queries return elements in document (pre-)order, which is the order
//! the enhancements rely on for tie-breaks such as "last matching section
//! wins".

use std::collections::BTreeMap;

use crate::error::{PageError, Result};
use crate::types::{ClassList, ElementId, LayoutSpec, Rect, Tag};

use super::style::InlineStyle;

// =============================================================================
// Element
// =============================================================================

/// One node of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub classes: ClassList,
    /// The `id` attribute.
    pub id: Option<String>,
    pub href: Option<String>,
    pub text: String,
    /// Other attributes (`data-src`, `src`, `loading`, `width`, ...).
    pub attrs: BTreeMap<String, String>,
    pub style: InlineStyle,
    pub layout: LayoutSpec,
    /// Form control state.
    pub value: String,
    pub required: bool,
    pub disabled: bool,

    parent: Option<ElementId>,
    children: Vec<ElementId>,
    removed: bool,
    /// Border box in document coordinates, written by the layout pass.
    rect: Rect,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            classes: ClassList::empty(),
            id: None,
            href: None,
            text: String::new(),
            attrs: BTreeMap::new(),
            style: InlineStyle::default(),
            layout: LayoutSpec::default(),
            value: String::new(),
            required: false,
            disabled: false,
            parent: None,
            children: Vec::new(),
            removed: false,
            rect: Rect::ZERO,
        }
    }

    pub fn with_class(mut self, class: ClassList) -> Self {
        self.classes |= class;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_layout(mut self, layout: LayoutSpec) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn has_class(&self, class: ClassList) -> bool {
        self.classes.contains(class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Border box in document coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether the element links to an in-page fragment.
    pub fn is_anchor(&self) -> bool {
        self.tag == Tag::A && self.href.as_deref().is_some_and(|h| h.starts_with('#'))
    }
}

// =============================================================================
// Document
// =============================================================================

/// The element tree plus the injected stylesheets.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    stylesheets: Vec<String>,
    layout_dirty: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only `<body>`.
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new(Tag::Body)],
            stylesheets: Vec::new(),
            layout_dirty: true,
        }
    }

    pub fn body(&self) -> ElementId {
        ElementId(0)
    }

    // -------------------------------------------------------------------------
    // Tree mutation
    // -------------------------------------------------------------------------

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> Result<ElementId> {
        if !self.contains(parent) {
            return Err(PageError::MissingElement(parent));
        }

        let id = ElementId(self.elements.len());
        element.parent = Some(parent);
        element.children.clear();
        element.removed = false;

        if element.layout.is_in_flow() {
            self.layout_dirty = true;
        }

        self.elements.push(element);
        self.elements[parent.0].children.push(id);
        Ok(id)
    }

    /// Detach `id` and its subtree. Returns false if it was already gone.
    ///
    /// The body cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.body() || !self.contains(id) {
            return false;
        }

        if let Some(parent) = self.elements[id.0].parent {
            self.elements[parent.0].children.retain(|&c| c != id);
        }

        let in_flow = self.elements[id.0].layout.is_in_flow();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let element = &mut self.elements[current.0];
            element.removed = true;
            stack.extend(element.children.iter().copied());
        }

        if in_flow {
            self.layout_dirty = true;
        }
        true
    }

    /// Whether `id` refers to a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.get(id.0).is_some_and(|e| !e.removed)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0).filter(|e| !e.removed)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0).filter(|e| !e.removed)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Live elements under `root` (inclusive) in document order.
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.elements[id.0].children.iter().rev().copied());
        }
        out
    }

    /// All live elements matching `pred`, in document order.
    pub fn query(&self, pred: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        self.descendants(self.body())
            .into_iter()
            .filter(|id| pred(&self.elements[id.0]))
            .collect()
    }

    pub fn query_class(&self, class: ClassList) -> Vec<ElementId> {
        self.query(|e| e.has_class(class))
    }

    pub fn query_tag(&self, tag: Tag) -> Vec<ElementId> {
        self.query(|e| e.tag == tag)
    }

    /// First element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<ElementId> {
        self.query(|e| e.id.as_deref() == Some(id)).into_iter().next()
    }

    /// First strict descendant of `root` matching `pred`.
    pub fn find_descendant(
        &self,
        root: ElementId,
        pred: impl Fn(&Element) -> bool,
    ) -> Option<ElementId> {
        self.descendants(root)
            .into_iter()
            .skip(1)
            .find(|id| pred(&self.elements[id.0]))
    }

    /// `id` followed by its ancestors up to the body (event bubbling path).
    pub fn ancestors_inclusive(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut current = self.get(id).map(|_| id);
        while let Some(cur) = current {
            out.push(cur);
            current = self.elements[cur.0].parent;
        }
        out
    }

    // -------------------------------------------------------------------------
    // Classes, text, attributes
    // -------------------------------------------------------------------------

    pub fn has_class(&self, id: ElementId, class: ClassList) -> bool {
        self.get(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: ElementId, class: ClassList) {
        if let Some(e) = self.get_mut(id) {
            e.classes.insert(class);
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: ClassList) {
        if let Some(e) = self.get_mut(id) {
            e.classes.remove(class);
        }
    }

    pub fn toggle_class(&mut self, id: ElementId, class: ClassList) {
        if let Some(e) = self.get_mut(id) {
            e.classes.toggle(class);
        }
    }

    /// Add or remove `class` depending on `on`.
    pub fn set_class(&mut self, id: ElementId, class: ClassList, on: bool) {
        if let Some(e) = self.get_mut(id) {
            e.classes.set(class, on);
        }
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|e| e.text.as_str())
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(e) = self.get_mut(id) {
            e.text = text.into();
        }
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.attr(name))
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(e) = self.get_mut(id) {
            e.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) -> Option<String> {
        self.get_mut(id).and_then(|e| e.attrs.remove(name))
    }

    pub fn style(&self, id: ElementId) -> Option<&InlineStyle> {
        self.get(id).map(|e| &e.style)
    }

    /// Mutate the inline style of `id`, if it exists.
    pub fn with_style(&mut self, id: ElementId, f: impl FnOnce(&mut InlineStyle)) {
        if let Some(e) = self.get_mut(id) {
            f(&mut e.style);
        }
    }

    // -------------------------------------------------------------------------
    // Stylesheets
    // -------------------------------------------------------------------------

    /// Append a stylesheet to the document head.
    pub fn inject_stylesheet(&mut self, css: impl Into<String>) {
        self.stylesheets.push(css.into());
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Border box of `id` in document coordinates.
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(|e| e.rect)
    }

    /// Written by the layout pass; hosts with their own layout may call it
    /// directly.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(e) = self.get_mut(id) {
            e.rect = rect;
        }
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }

    pub(crate) fn mark_layout_clean(&mut self) {
        self.layout_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new();
        let body = doc.body();
        let section = doc
            .append(body, Element::new(Tag::Section).with_id("about"))
            .unwrap();
        let card = doc
            .append(section, Element::new(Tag::Div).with_class(ClassList::BENEFIT_CARD))
            .unwrap();
        let link = doc
            .append(body, Element::new(Tag::A).with_href("#about").with_class(ClassList::NAV_LINK))
            .unwrap();
        (doc, section, card, link)
    }

    #[test]
    fn test_document_order() {
        let (doc, section, card, link) = sample();
        assert_eq!(doc.descendants(doc.body()), vec![doc.body(), section, card, link]);
    }

    #[test]
    fn test_find_by_id() {
        let (doc, section, _, _) = sample();
        assert_eq!(doc.find_by_id("about"), Some(section));
        assert_eq!(doc.find_by_id("missing"), None);
    }

    #[test]
    fn test_remove_subtree() {
        let (mut doc, section, card, link) = sample();

        assert!(doc.remove(section));
        assert!(!doc.contains(section));
        assert!(!doc.contains(card));
        assert!(doc.contains(link));
        assert!(doc.query_class(ClassList::BENEFIT_CARD).is_empty());

        // Second removal is a no-op
        assert!(!doc.remove(section));
    }

    #[test]
    fn test_body_cannot_be_removed() {
        let mut doc = Document::new();
        assert!(!doc.remove(doc.body()));
        assert!(doc.contains(doc.body()));
    }

    #[test]
    fn test_append_to_missing_parent() {
        let mut doc = Document::new();
        let err = doc.append(ElementId(42), Element::new(Tag::Div)).unwrap_err();
        assert!(matches!(err, PageError::MissingElement(ElementId(42))));
    }

    #[test]
    fn test_class_ops() {
        let (mut doc, _, _, link) = sample();

        doc.toggle_class(link, ClassList::ACTIVE);
        assert!(doc.has_class(link, ClassList::ACTIVE));
        doc.toggle_class(link, ClassList::ACTIVE);
        assert!(!doc.has_class(link, ClassList::ACTIVE));

        doc.set_class(link, ClassList::ACTIVE, true);
        assert!(doc.has_class(link, ClassList::ACTIVE | ClassList::NAV_LINK));
        doc.remove_class(link, ClassList::ACTIVE);
        assert!(!doc.has_class(link, ClassList::ACTIVE));
    }

    #[test]
    fn test_ancestors_inclusive() {
        let (doc, section, card, _) = sample();
        assert_eq!(doc.ancestors_inclusive(card), vec![card, section, doc.body()]);
    }

    #[test]
    fn test_is_anchor() {
        assert!(Element::new(Tag::A).with_href("#x").is_anchor());
        assert!(!Element::new(Tag::A).with_href("/x").is_anchor());
        assert!(!Element::new(Tag::Div).with_href("#x").is_anchor());
    }

    #[test]
    fn test_attrs() {
        let mut doc = Document::new();
        let img = doc
            .append(doc.body(), Element::new(Tag::Img).with_attr("data-src", "a.png"))
            .unwrap();

        assert_eq!(doc.attr(img, "data-src"), Some("a.png"));
        assert_eq!(doc.remove_attr(img, "data-src").as_deref(), Some("a.png"));
        assert_eq!(doc.attr(img, "data-src"), None);
    }
}
