//! Validator registry.
//!
//! Holds the ordered validator list of every field kind plus the named
//! pattern table consulted by `pattern`. Build one at startup, register custom
//! validators and patterns on it, then share it (`Arc<Registry>`) with every
//! form.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use formdom::{Element, InputType, Tag};
use log::{debug, error};
use regex::Regex;

use crate::context::FieldContext;
use crate::error::RegistryError;
use crate::validators;
use crate::validity::Validity;

/// Structural category of a validatable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Text-like inputs and textareas.
    TextField,
    /// A group of checkboxes sharing a name.
    Checkboxes,
    /// A group of radios sharing a name.
    Radios,
    /// A `<select>`.
    Dropdown,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::TextField,
        FieldKind::Checkboxes,
        FieldKind::Radios,
        FieldKind::Dropdown,
    ];

    /// Registry name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::TextField => "textFields",
            FieldKind::Checkboxes => "checkboxes",
            FieldKind::Radios => "radios",
            FieldKind::Dropdown => "dropdowns",
        }
    }

    /// Pick the kind for a host element, if it is validatable at all.
    pub fn classify(element: &Element) -> Option<FieldKind> {
        match &element.tag {
            Tag::Textarea => Some(FieldKind::TextField),
            Tag::Select => Some(FieldKind::Dropdown),
            Tag::Input(input_type) => match input_type {
                InputType::Text
                | InputType::Email
                | InputType::Password
                | InputType::Date
                | InputType::Number
                | InputType::Tel => Some(FieldKind::TextField),
                InputType::Checkbox => Some(FieldKind::Checkboxes),
                InputType::Radio => Some(FieldKind::Radios),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether host events re-trigger validation after a quiet period
    /// (`input`/`blur`) rather than immediately (`change`).
    pub fn is_debounced(self) -> bool {
        self == FieldKind::TextField
    }

    /// Whether the kind groups several same-named elements.
    pub fn is_grouped(self) -> bool {
        matches!(self, FieldKind::Checkboxes | FieldKind::Radios)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "textfields" | "textfield" | "text" => FieldKind::TextField,
            "checkboxes" | "checkbox" => FieldKind::Checkboxes,
            "radios" | "radio" => FieldKind::Radios,
            "dropdowns" | "dropdown" | "select" => FieldKind::Dropdown,
            _ => {
                return Err(RegistryError::UnknownKind {
                    name: s.to_string(),
                    known: FieldKind::ALL.map(FieldKind::name).join(", "),
                });
            }
        };
        Ok(kind)
    }
}

/// Signature of a validator predicate: criterion value and field context in,
/// tri-state result out.
pub type ValidatorFn = dyn Fn(&str, &mut FieldContext<'_>) -> Validity + Send + Sync;

/// A validator entry.
///
/// Keyed validators run only when the field's criteria carry their key (with
/// a non-empty value) and report the key when they fail. Unkeyed validators
/// run on every pass and only affect the overall validity.
#[derive(Clone)]
pub struct Validator {
    key: Option<String>,
    check: Arc<ValidatorFn>,
}

impl Validator {
    pub fn new<F>(key: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str, &mut FieldContext<'_>) -> Validity + Send + Sync + 'static,
    {
        Self {
            key: Some(key.into()),
            check: Arc::new(check),
        }
    }

    /// A validator that runs regardless of criteria.
    pub fn always<F>(check: F) -> Self
    where
        F: Fn(&mut FieldContext<'_>) -> Validity + Send + Sync + 'static,
    {
        Self {
            key: None,
            check: Arc::new(move |_, cx| check(cx)),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub(crate) fn call(&self, value: &str, cx: &mut FieldContext<'_>) -> Validity {
        (self.check)(value, cx)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").field("key", &self.key).finish()
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    text_fields: Vec<Validator>,
    checkboxes: Vec<Validator>,
    radios: Vec<Validator>,
    dropdowns: Vec<Validator>,
    patterns: Vec<(String, Regex)>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry seeded with the built-in validators and patterns.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.text_fields = validators::text_field();
        registry.checkboxes = validators::checkboxes();
        registry.radios = validators::radios();
        registry.dropdowns = validators::dropdown();
        for (key, pattern) in validators::PATTERNS {
            if let Err(e) = registry.add_regex(key, pattern) {
                error!("Built-in pattern failed to compile: {}", e);
            }
        }
        registry
    }

    /// A registry without any validators or patterns.
    pub fn empty() -> Self {
        Self {
            text_fields: Vec::new(),
            checkboxes: Vec::new(),
            radios: Vec::new(),
            dropdowns: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Validators of a kind, in execution order.
    pub fn validators(&self, kind: FieldKind) -> &[Validator] {
        match kind {
            FieldKind::TextField => &self.text_fields,
            FieldKind::Checkboxes => &self.checkboxes,
            FieldKind::Radios => &self.radios,
            FieldKind::Dropdown => &self.dropdowns,
        }
    }

    fn validators_mut(&mut self, kind: FieldKind) -> &mut Vec<Validator> {
        match kind {
            FieldKind::TextField => &mut self.text_fields,
            FieldKind::Checkboxes => &mut self.checkboxes,
            FieldKind::Radios => &mut self.radios,
            FieldKind::Dropdown => &mut self.dropdowns,
        }
    }

    /// Register a validator.
    ///
    /// A keyed validator replaces an existing entry with the same key in
    /// place, keeping its position; anything else is appended.
    pub fn add_validator(&mut self, kind: FieldKind, validator: Validator) -> &mut Self {
        let list = self.validators_mut(kind);
        let existing = validator
            .key()
            .and_then(|key| list.iter().position(|v| v.key() == Some(key)));

        match existing {
            Some(idx) => {
                debug!("Replacing {} validator '{:?}'", kind, validator.key());
                list[idx] = validator;
            }
            None => {
                debug!("Adding {} validator '{:?}'", kind, validator.key());
                list.push(validator);
            }
        }
        self
    }

    /// Register several validators in order.
    pub fn add_validators(
        &mut self,
        kind: FieldKind,
        validators: impl IntoIterator<Item = Validator>,
    ) -> Result<&mut Self, RegistryError> {
        let validators: Vec<Validator> = validators.into_iter().collect();
        if validators.is_empty() {
            let err = RegistryError::MissingValidator(kind.name());
            error!("add_validators(): {}", err);
            return Err(err);
        }
        for validator in validators {
            self.add_validator(kind, validator);
        }
        Ok(self)
    }

    /// Register validators against a kind given by name (`textFields`,
    /// `checkboxes`, `radios`, `dropdowns`).
    pub fn add_validators_named(
        &mut self,
        kind: &str,
        validators: impl IntoIterator<Item = Validator>,
    ) -> Result<&mut Self, RegistryError> {
        let kind = kind.parse::<FieldKind>().inspect_err(|e| {
            error!("add_validators_named(): {}", e);
        })?;
        self.add_validators(kind, validators)
    }

    /// Add or replace a named pattern for the `pattern` criterion.
    ///
    /// Patterns compile in multi-line mode, so `^`/`$` anchor at line
    /// boundaries. A pattern that fails to compile is reported and skipped.
    pub fn add_regex(&mut self, key: &str, pattern: &str) -> Result<&mut Self, RegistryError> {
        if key.trim().is_empty() {
            error!("add_regex(): {}", RegistryError::EmptyPatternKey);
            return Err(RegistryError::EmptyPatternKey);
        }
        let regex = Regex::new(&format!("(?m){pattern}")).map_err(|source| {
            let err = RegistryError::InvalidPattern {
                key: key.to_string(),
                source,
            };
            error!("add_regex(): {}", err);
            err
        })?;
        self.add_compiled_regex(key, regex)
    }

    /// Add or replace a named pattern from an already compiled regex.
    pub fn add_compiled_regex(
        &mut self,
        key: &str,
        regex: Regex,
    ) -> Result<&mut Self, RegistryError> {
        let key = key.trim();
        if key.is_empty() {
            error!("add_compiled_regex(): {}", RegistryError::EmptyPatternKey);
            return Err(RegistryError::EmptyPatternKey);
        }
        match self.patterns.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = regex,
            None => self.patterns.push((key.to_string(), regex)),
        }
        Ok(self)
    }

    pub fn pattern(&self, key: &str) -> Option<&Regex> {
        self.patterns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, regex)| regex)
    }

    /// Names of every registered pattern.
    pub fn pattern_keys(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(k, _)| k.as_str())
    }
}
