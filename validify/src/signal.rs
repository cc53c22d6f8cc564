//! The validity-changed signal.
//!
//! Every time a field finishes a validation pass (or is reset) it notifies
//! its subscribers, in subscription order: response aggregators, dependent
//! fields (`equal-to`), and consumer listeners.

use std::fmt;

use crate::field::{FieldController, FieldId};
use crate::response::ResponseId;

/// Identifier of a consumer listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) usize);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__listener_{}", self.0)
    }
}

/// Consumer callback receiving the field that fired.
pub type Listener = Box<dyn FnMut(&FieldController)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscriber {
    /// Recompute an aggregator.
    Response(ResponseId),
    /// Re-validate a dependent field.
    Field(FieldId),
    /// Call a consumer listener.
    Listener(ListenerId),
}
