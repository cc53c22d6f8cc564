//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::criteria::CriteriaParser;

/// CSS class names painted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    /// Applied to fields and response targets that are valid.
    pub valid: String,
    /// Applied to fields and response targets that are invalid. Also the
    /// prefix of per-criterion failure classes (`is-invalid-required`).
    pub invalid: String,
    /// Applied to labels of checkboxes disabled by `maxchecked`.
    pub disabled: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            valid: "is-valid".into(),
            invalid: "is-invalid".into(),
            disabled: "is-disabled".into(),
        }
    }
}

impl ClassNames {
    /// Failure class for a criterion key.
    pub fn failure(&self, key: &str) -> String {
        format!("{}-{}", self.invalid, key)
    }

    /// Whether a class was painted by the aggregator as a failure state.
    pub fn is_failure_class(&self, class: &str) -> bool {
        class.starts_with(&self.invalid)
    }
}

/// Markup attributes read by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub criteria: String,
    pub response: String,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            criteria: "data-validify".into(),
            response: "data-validify-response".into(),
        }
    }
}

/// Per-form configuration.
///
/// Deserializable so hosts can ship it as a file; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidifyConfig {
    /// Quiet period after the last keystroke/blur before a text field
    /// validates, in milliseconds.
    pub debounce_ms: u64,

    /// Delay between a native form reset and the engine reset, in
    /// milliseconds, so the host can restore default values first.
    pub reset_delay_ms: u64,

    /// Render every failing criterion on response targets instead of only
    /// the first.
    pub multiple_errors: bool,

    pub pair_separator: char,
    pub key_value_separator: char,

    pub classes: ClassNames,
    pub attributes: Attributes,
}

impl Default for ValidifyConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            reset_delay_ms: 25,
            multiple_errors: false,
            pair_separator: ';',
            key_value_separator: ':',
            classes: ClassNames::default(),
            attributes: Attributes::default(),
        }
    }
}

impl ValidifyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = delay.as_millis() as u64;
        self
    }

    pub fn reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn multiple_errors(mut self, enabled: bool) -> Self {
        self.multiple_errors = enabled;
        self
    }

    pub fn separators(mut self, pair: char, key_value: char) -> Self {
        self.pair_separator = pair;
        self.key_value_separator = key_value;
        self
    }

    pub fn classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn debounce_duration(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn reset_duration(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn parser(&self) -> CriteriaParser {
        CriteriaParser::new(self.pair_separator, self.key_value_separator)
    }
}
