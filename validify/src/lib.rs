pub mod config;
pub mod context;
pub mod criteria;
pub mod descriptor;
pub mod error;
pub mod field;
pub mod form;
pub mod group;
pub mod handle;
pub mod registry;
pub mod response;
pub mod scan;
pub mod signal;
pub mod timer;
pub mod validators;
pub mod validity;

pub use config::{Attributes, ClassNames, ValidifyConfig};
pub use context::FieldContext;
pub use criteria::{Criteria, CriteriaParser, CriteriaRemoval, CriteriaUpdate};
pub use descriptor::{FieldDescriptor, ResponseTarget};
pub use error::{FormError, RegistryError};
pub use field::{FieldController, FieldId};
pub use form::FormController;
pub use handle::FieldHandle;
pub use registry::{FieldKind, Registry, Validator};
pub use response::{ResponseAggregator, ResponseId};
pub use signal::{Listener, ListenerId};
pub use validity::Validity;

pub mod prelude {
    pub use crate::config::{ClassNames, ValidifyConfig};
    pub use crate::context::FieldContext;
    pub use crate::criteria::{Criteria, CriteriaRemoval, CriteriaUpdate};
    pub use crate::descriptor::FieldDescriptor;
    pub use crate::error::{FormError, RegistryError};
    pub use crate::field::{FieldController, FieldId};
    pub use crate::form::FormController;
    pub use crate::registry::{FieldKind, Registry, Validator};
    pub use crate::validity::Validity;

    pub use formdom::{Document, Element, Event, InputType};
}
