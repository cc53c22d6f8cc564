//! Response aggregators.
//!
//! A response target is an element that reflects the combined validity of
//! one or more fields, e.g. a wrapper that shows an error message. It receives
//! `is-valid` when every bound field is valid, `is-invalid` when any is
//! invalid, and `is-invalid-<key>` for the failing criteria.

use std::fmt;

use formdom::Document;
use log::debug;

use crate::config::ClassNames;
use crate::field::{FieldController, FieldId};

/// Identifier of an aggregator within its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseId(pub(crate) usize);

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__response_{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct ResponseAggregator {
    id: ResponseId,
    target: String,
    inputs: Vec<FieldId>,
    multiple_errors: bool,
    all_valid: bool,
    any_invalid: bool,
    failure_classes: Vec<String>,
}

impl ResponseAggregator {
    pub(crate) fn new(id: ResponseId, target: impl Into<String>, multiple_errors: bool) -> Self {
        Self {
            id,
            target: target.into(),
            inputs: Vec::new(),
            multiple_errors,
            all_valid: false,
            any_invalid: false,
            failure_classes: Vec::new(),
        }
    }

    pub fn id(&self) -> ResponseId {
        self.id
    }

    /// ID of the feedback element.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Fields bound to this aggregator, in binding order.
    pub fn inputs(&self) -> &[FieldId] {
        &self.inputs
    }

    /// True iff every bound field was valid at the last recompute.
    pub fn all_valid(&self) -> bool {
        self.all_valid
    }

    /// Failure classes painted at the last recompute.
    pub fn failure_classes(&self) -> &[String] {
        &self.failure_classes
    }

    pub fn multiple_errors(&self) -> bool {
        self.multiple_errors
    }

    /// Bind a field. Returns false if it was already bound.
    pub(crate) fn add_input(&mut self, field: FieldId) -> bool {
        if self.inputs.contains(&field) {
            return false;
        }
        self.inputs.push(field);
        true
    }

    pub(crate) fn remove_input(&mut self, field: FieldId) {
        self.inputs.retain(|f| *f != field);
    }

    /// Recompute from the bound fields and repaint the target.
    ///
    /// The triggering field's failed keys are pooled first, then the other
    /// fields' in binding order. Fields are only read.
    pub(crate) fn refresh(
        &mut self,
        trigger: Option<FieldId>,
        fields: &[FieldController],
        document: &mut Document,
        classes: &ClassNames,
    ) {
        let mut ordered: Vec<&FieldController> = Vec::with_capacity(self.inputs.len());
        if let Some(trigger) = trigger
            && self.inputs.contains(&trigger)
            && let Some(field) = fields.iter().find(|f| f.id() == trigger)
        {
            ordered.push(field);
        }
        for input in &self.inputs {
            if Some(*input) == trigger {
                continue;
            }
            if let Some(field) = fields.iter().find(|f| f.id() == *input) {
                ordered.push(field);
            }
        }

        let mut all_valid = true;
        let mut any_invalid = false;
        let mut errors: Vec<&str> = Vec::new();
        for field in &ordered {
            if field.is_valid() {
                continue;
            }
            all_valid = false;
            any_invalid |= field.validity().is_invalid();
            errors.extend(field.failed_keys().iter().map(String::as_str));
        }

        let mut failure_classes: Vec<String> = Vec::new();
        if self.multiple_errors {
            for key in errors {
                let class = classes.failure(key);
                if !failure_classes.contains(&class) {
                    failure_classes.push(class);
                }
            }
        } else if let Some(first) = errors.first() {
            failure_classes.push(classes.failure(first));
        }

        debug!(
            "Response {} -> all_valid={}, failures={:?}",
            self.target, all_valid, failure_classes
        );

        self.all_valid = all_valid;
        self.any_invalid = any_invalid;
        self.failure_classes = failure_classes;
        self.paint(document, classes);
    }

    fn paint(&self, document: &mut Document, classes: &ClassNames) {
        document.remove_classes_where(&self.target, |c| classes.is_failure_class(c));
        document.toggle_class(&self.target, &classes.valid, self.all_valid);
        document.toggle_class(&self.target, &classes.invalid, self.any_invalid);
        for class in &self.failure_classes {
            document.add_class(&self.target, class);
        }
    }

    /// Remove every state class from the target.
    pub(crate) fn clear(&self, document: &mut Document, classes: &ClassNames) {
        document.remove_classes_where(&self.target, |c| classes.is_failure_class(c));
        document.remove_class(&self.target, &classes.valid);
    }
}
