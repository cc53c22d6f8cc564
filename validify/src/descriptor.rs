//! Explicit field descriptions handed to a form.

use crate::criteria::Criteria;
use crate::registry::FieldKind;

/// Where a field reports its validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseTarget {
    /// Every element matching the selector.
    Selector(String),
    /// One element by ID.
    Element(String),
}

/// Everything a form needs to build one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub elements: Vec<String>,
    pub criteria: Criteria,
    pub response: Option<ResponseTarget>,
}

impl FieldDescriptor {
    /// A field over a single element.
    pub fn new(kind: FieldKind, element: impl Into<String>) -> Self {
        Self {
            kind,
            elements: vec![element.into()],
            criteria: Criteria::new(),
            response: None,
        }
    }

    /// A field over a group of elements.
    pub fn group(kind: FieldKind, elements: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind,
            elements: elements.into_iter().map(Into::into).collect(),
            criteria: Criteria::new(),
            response: None,
        }
    }

    pub fn criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Parse criteria from a `key: value;` string.
    pub fn rules(mut self, rules: &str) -> Self {
        self.criteria = Criteria::parse(rules);
        self
    }

    pub fn response(mut self, selector: impl Into<String>) -> Self {
        self.response = Some(ResponseTarget::Selector(selector.into()));
        self
    }

    pub fn response_element(mut self, id: impl Into<String>) -> Self {
        self.response = Some(ResponseTarget::Element(id.into()));
        self
    }
}
