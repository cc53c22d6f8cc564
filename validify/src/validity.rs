//! Tri-state validity.

use std::fmt;

/// Outcome of a validator, and the resulting state of a field.
///
/// `Neutral` means "not evaluated yet" (or explicitly reset), and is also what
/// a validator returns when it cannot decide yet, e.g. while the field it
/// compares against is itself unresolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Validity {
    Valid,
    Invalid,
    #[default]
    Neutral,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }

    pub fn is_invalid(self) -> bool {
        self == Validity::Invalid
    }

    pub fn is_neutral(self) -> bool {
        self == Validity::Neutral
    }

    /// Fold the next validator result into the running validity of a pass.
    ///
    /// `Invalid` is sticky. `Neutral` holds unless a later `Invalid` replaces
    /// it. A later `Valid` never overturns an earlier non-valid result.
    pub fn then(self, next: Validity) -> Validity {
        match (self, next) {
            (Validity::Invalid, _) | (_, Validity::Invalid) => Validity::Invalid,
            (Validity::Neutral, _) => Validity::Neutral,
            (Validity::Valid, next) => next,
        }
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        if valid {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validity::Valid => write!(f, "valid"),
            Validity::Invalid => write!(f, "invalid"),
            Validity::Neutral => write!(f, "neutral"),
        }
    }
}
