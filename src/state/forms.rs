//! Form helpers - required-field validation and submit-button busy state.

use crate::engine::Document;
use crate::error::{PageError, Result};
use crate::types::{ElementId, Tag};

pub const INVALID_BORDER: &str = "#e74c3c";
pub const VALID_BORDER: &str = "#ddd";
pub const DEFAULT_LOADING_TEXT: &str = "Memproses...";
const LOADING_OPACITY: f32 = 0.7;

/// Check every required input inside `form`.
///
/// Blank (after trimming) fields get the error border and fail the form;
/// the rest get the neutral border. Every field is visited, so all errors
/// show at once.
pub fn validate_form(doc: &mut Document, form: ElementId) -> bool {
    let fields: Vec<ElementId> = doc
        .descendants(form)
        .into_iter()
        .filter(|&id| doc.get(id).is_some_and(|e| e.tag == Tag::Input && e.required))
        .collect();

    let mut valid = true;
    for field in fields {
        let blank = doc.get(field).is_some_and(|e| e.value.trim().is_empty());
        let color = if blank { INVALID_BORDER } else { VALID_BORDER };
        doc.with_style(field, |style| style.border_color = Some(color.to_string()));
        valid &= !blank;
    }
    valid
}

/// What [`add_loading_state`] replaced on a button.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "call restore() to re-enable the button"]
pub struct LoadingState {
    button: ElementId,
    text: String,
    disabled: bool,
    opacity: Option<f32>,
}

impl LoadingState {
    pub fn button(&self) -> ElementId {
        self.button
    }

    /// Put the button back the way it was.
    pub fn restore(self, doc: &mut Document) {
        let Some(button) = doc.get_mut(self.button) else { return };
        button.text = self.text;
        button.disabled = self.disabled;
        button.style.opacity = self.opacity;
    }
}

/// Show `text` (or the default label) on `button`, disable and dim it.
pub fn add_loading_state(
    doc: &mut Document,
    button: ElementId,
    text: Option<&str>,
) -> Result<LoadingState> {
    let element = doc.get_mut(button).ok_or(PageError::MissingElement(button))?;

    let saved = LoadingState {
        button,
        text: std::mem::replace(&mut element.text, text.unwrap_or(DEFAULT_LOADING_TEXT).to_string()),
        disabled: element.disabled,
        opacity: element.style.opacity,
    };
    element.disabled = true;
    element.style.opacity = Some(LOADING_OPACITY);

    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Element;

    fn setup() -> (Document, ElementId, ElementId, ElementId, ElementId) {
        let mut doc = Document::new();
        let form = doc.append(doc.body(), Element::new(Tag::Form)).unwrap();
        let name = doc
            .append(form, Element::new(Tag::Input).required().with_value("Budi"))
            .unwrap();
        let phone = doc
            .append(form, Element::new(Tag::Input).required().with_value("   "))
            .unwrap();
        let note = doc.append(form, Element::new(Tag::Input)).unwrap();
        (doc, form, name, phone, note)
    }

    fn border(doc: &Document, id: ElementId) -> Option<&str> {
        doc.style(id).and_then(|s| s.border_color.as_deref())
    }

    #[test]
    fn test_blank_required_field_fails() {
        let (mut doc, form, name, phone, note) = setup();

        assert!(!validate_form(&mut doc, form));
        assert_eq!(border(&doc, name), Some(VALID_BORDER));
        assert_eq!(border(&doc, phone), Some(INVALID_BORDER));
        assert_eq!(border(&doc, note), None);
    }

    #[test]
    fn test_filled_form_passes() {
        let (mut doc, form, _, phone, _) = setup();
        doc.get_mut(phone).unwrap().value = "0812".to_string();

        assert!(validate_form(&mut doc, form));
        assert_eq!(border(&doc, phone), Some(VALID_BORDER));
    }

    #[test]
    fn test_loading_state_round_trip() {
        let mut doc = Document::new();
        let button = doc
            .append(doc.body(), Element::new(Tag::Button).with_text("Daftar"))
            .unwrap();

        let state = add_loading_state(&mut doc, button, None).unwrap();
        let el = doc.get(button).unwrap();
        assert_eq!(el.text, DEFAULT_LOADING_TEXT);
        assert!(el.disabled);
        assert_eq!(el.style.opacity, Some(0.7));

        state.restore(&mut doc);
        let el = doc.get(button).unwrap();
        assert_eq!(el.text, "Daftar");
        assert!(!el.disabled);
        assert_eq!(el.style.opacity, None);
    }

    #[test]
    fn test_loading_state_custom_text_and_missing_button() {
        let mut doc = Document::new();
        let button = doc.append(doc.body(), Element::new(Tag::Button)).unwrap();

        let state = add_loading_state(&mut doc, button, Some("Mengirim...")).unwrap();
        assert_eq!(doc.text(button), Some("Mengirim..."));
        state.restore(&mut doc);

        doc.remove(button);
        assert!(matches!(
            add_loading_state(&mut doc, button, None),
            Err(PageError::MissingElement(_))
        ));
    }
}
