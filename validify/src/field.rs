//! Field controllers: one logical validatable unit each.

use std::fmt;

use log::trace;

use crate::context::FieldContext;
use crate::criteria::Criteria;
use crate::registry::{FieldKind, Validator};
use crate::response::ResponseId;
use crate::signal::Subscriber;
use crate::validity::Validity;

/// Identifier of a field within its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub(crate) usize);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__field_{}", self.0)
    }
}

/// Result of one pass over a field's validator chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub validity: Validity,
    pub failed_keys: Vec<String>,
}

/// Run every applicable validator once, in order.
///
/// All validators run even after one has failed so that every failing key is
/// collected; the overall validity is folded with [`Validity::then`].
pub(crate) fn run_chain(
    validators: &[Validator],
    criteria: &Criteria,
    cx: &mut FieldContext<'_>,
) -> Outcome {
    let mut validity = Validity::Valid;
    let mut failed_keys = Vec::new();

    for validator in validators {
        let result = match validator.key() {
            Some(key) => match criteria.get(key) {
                Some(value) if !value.is_empty() => validator.call(value, cx),
                _ => continue,
            },
            None => validator.call("", cx),
        };

        trace!("{:?} -> {}", validator.key(), result);

        if result.is_invalid()
            && let Some(key) = validator.key()
        {
            failed_keys.push(key.to_string());
        }
        validity = validity.then(result);
    }

    Outcome {
        validity,
        failed_keys,
    }
}

/// One logical field: a single control, or a group of same-named
/// checkboxes/radios.
#[derive(Debug, Clone)]
pub struct FieldController {
    id: FieldId,
    kind: FieldKind,
    elements: Vec<String>,
    criteria: Criteria,
    validity: Validity,
    failed_keys: Vec<String>,
    enabled: bool,
    /// Aggregators this field feeds.
    pub(crate) responses: Vec<ResponseId>,
    /// Who hears this field's validity-changed signal, in order.
    pub(crate) subscribers: Vec<Subscriber>,
    /// Fields whose signal this field listens to (`equal-to`).
    pub(crate) watching: Vec<FieldId>,
}

impl FieldController {
    pub(crate) fn new(
        id: FieldId,
        kind: FieldKind,
        elements: Vec<String>,
        criteria: Criteria,
    ) -> Self {
        Self {
            id,
            kind,
            elements,
            criteria,
            validity: Validity::Neutral,
            failed_keys: Vec::new(),
            enabled: false,
            responses: Vec::new(),
            subscribers: Vec::new(),
            watching: Vec::new(),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Whether the element belongs to this field.
    pub fn owns(&self, element_id: &str) -> bool {
        self.elements.iter().any(|e| e == element_id)
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    /// Keys of the criteria that failed on the last run.
    pub fn failed_keys(&self) -> &[String] {
        &self.failed_keys
    }

    /// Whether host events re-trigger validation.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn responses(&self) -> &[ResponseId] {
        &self.responses
    }

    pub(crate) fn criteria_mut(&mut self) -> &mut Criteria {
        &mut self.criteria
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub(crate) fn apply(&mut self, outcome: Outcome) {
        self.validity = outcome.validity;
        self.failed_keys = outcome.failed_keys;
    }

    /// Force a validity. Failed keys only survive for `Invalid`.
    pub(crate) fn force(&mut self, validity: Validity, failed_keys: Vec<String>) {
        self.validity = validity;
        self.failed_keys = if validity.is_invalid() {
            failed_keys
        } else {
            Vec::new()
        };
    }

    pub(crate) fn subscribe(&mut self, subscriber: Subscriber) {
        if !self.subscribers.contains(&subscriber) {
            self.subscribers.push(subscriber);
        }
    }

    pub(crate) fn unsubscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.retain(|s| *s != subscriber);
    }
}
