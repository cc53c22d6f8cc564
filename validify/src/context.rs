//! What a validator sees while it runs.

use formdom::Document;
use regex::Regex;

use crate::config::ClassNames;
use crate::field::FieldController;
use crate::registry::{FieldKind, Registry};
use crate::validity::Validity;

/// Read access to the field under validation and the rest of the form, plus
/// write access to the host document for validators with side effects.
pub struct FieldContext<'a> {
    pub(crate) kind: FieldKind,
    pub(crate) elements: &'a [String],
    pub(crate) document: &'a mut Document,
    pub(crate) fields: &'a [FieldController],
    pub(crate) registry: &'a Registry,
    pub(crate) classes: &'a ClassNames,
}

impl<'a> FieldContext<'a> {
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// IDs of the elements making up the field, in document order.
    pub fn elements(&self) -> &[String] {
        self.elements
    }

    /// Value of the field's first element (the only one for text fields and
    /// dropdowns).
    pub fn value(&self) -> &str {
        self.elements
            .first()
            .and_then(|id| self.document.value(id))
            .unwrap_or_default()
    }

    /// IDs of the checked elements in the group.
    pub fn checked(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|id| self.document.is_checked(id))
            .map(String::as_str)
            .collect()
    }

    pub fn checked_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|id| self.document.is_checked(id))
            .count()
    }

    pub fn any_checked(&self) -> bool {
        self.elements.iter().any(|id| self.document.is_checked(id))
    }

    pub fn group_len(&self) -> usize {
        self.elements.len()
    }

    pub fn document(&self) -> &Document {
        &*self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut *self.document
    }

    /// Resolve a reference to other elements: a selector, or failing that a
    /// bare element ID.
    pub fn resolve(&self, reference: &str) -> Vec<String> {
        let reference = reference.trim();
        let found = self.document.select(reference);
        if found.is_empty() && self.document.contains(reference) {
            return vec![reference.to_string()];
        }
        found
    }

    /// Validity of the field owning `element_id`, if a field of this form
    /// manages it.
    pub fn validity_of(&self, element_id: &str) -> Option<Validity> {
        self.fields
            .iter()
            .find(|f| f.owns(element_id))
            .map(FieldController::validity)
    }

    /// Named pattern from the registry.
    pub fn pattern(&self, key: &str) -> Option<&Regex> {
        self.registry.pattern(key)
    }

    pub fn classes(&self) -> &ClassNames {
        self.classes
    }

    /// Enable or disable a control, mirroring the state onto its labels with
    /// the disabled-state class.
    pub fn set_disabled(&mut self, id: &str, disabled: bool) {
        self.document.set_disabled(id, disabled);
        for label in self.document.labels_for(id) {
            self.document
                .toggle_class(&label, &self.classes.disabled, disabled);
        }
    }
}
