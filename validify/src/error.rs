//! Error types.

use thiserror::Error;

/// Registry configuration errors.
///
/// These are reported through the log as well as returned; the registry is
/// left untouched by the failing call.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The field kind name is not one of the known kinds.
    #[error("cannot find field kind '{name}' (known kinds: {known})")]
    UnknownKind { name: String, known: String },

    /// `add_validator` was called with nothing to add.
    #[error("missing validator for field kind '{0}'")]
    MissingValidator(&'static str),

    /// `add_regex` was called with an empty key.
    #[error("pattern key must not be empty")]
    EmptyPatternKey,

    /// The pattern did not compile.
    #[error("invalid pattern '{key}': {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors building or driving a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The container element does not exist in the document.
    #[error("container '{0}' not found")]
    ContainerNotFound(String),

    /// A descriptor references an element the document does not have.
    #[error("element '{0}' not found")]
    ElementNotFound(String),

    /// A descriptor lists no elements.
    #[error("field descriptor has no elements")]
    EmptyDescriptor,

    /// An element is claimed by more than one field.
    #[error("element '{0}' already belongs to another field")]
    DuplicateElement(String),
}
