//! Per-field operations on a live form.

use crate::criteria::{CriteriaRemoval, CriteriaUpdate};
use crate::field::{FieldController, FieldId};
use crate::form::FormController;
use crate::validity::Validity;

/// A mutable view onto one field of a [`FormController`].
///
/// Obtained from [`FormController::field_mut`] or
/// [`FormController::field_mut_for`].
pub struct FieldHandle<'a> {
    form: &'a mut FormController,
    id: FieldId,
}

impl<'a> FieldHandle<'a> {
    pub(crate) fn new(form: &'a mut FormController, id: FieldId) -> Self {
        Self { form, id }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Current state of the field.
    pub fn controller(&self) -> Option<&FieldController> {
        self.form.field(self.id)
    }

    /// Run the field's validators now. Returns the resulting validity.
    pub fn validate(&mut self) -> Validity {
        self.form.validate_field(self.id).unwrap_or_default()
    }

    /// Back to neutral, with failed keys cleared and pending debounce dropped.
    pub fn reset(&mut self) {
        self.form.reset_field(self.id);
    }

    /// Change criteria. Accepts a [`Criteria`](crate::Criteria) (merged), a
    /// `(key, value)` pair, or an explicit [`CriteriaUpdate`].
    pub fn set_criteria(&mut self, update: impl Into<CriteriaUpdate>) -> &mut Self {
        self.form.set_criteria(self.id, update.into());
        self
    }

    /// Remove one key, several keys, or everything.
    pub fn remove_criteria(&mut self, removal: impl Into<CriteriaRemoval>) -> &mut Self {
        self.form.remove_criteria(self.id, removal.into());
        self
    }

    pub fn clear_criteria(&mut self) -> &mut Self {
        self.remove_criteria(CriteriaRemoval::All)
    }

    /// React to host events again.
    pub fn enable(&mut self) -> &mut Self {
        self.form.enable_field(self.id);
        self
    }

    /// Stop reacting to host events. Explicit validation still works.
    pub fn disable(&mut self) -> &mut Self {
        self.form.disable_field(self.id);
        self
    }

    /// Force a validity and emit it. Failed keys only stick for `Invalid`.
    pub fn set_validity(
        &mut self,
        validity: Validity,
        failed_keys: impl IntoIterator<Item = impl Into<String>>,
    ) {
        let keys = failed_keys.into_iter().map(Into::into).collect();
        self.form.set_validity(self.id, validity, keys);
    }

    /// Detach the field from its aggregators and listeners and drop it.
    pub fn destroy(self) {
        self.form.destroy_field(self.id);
    }
}
