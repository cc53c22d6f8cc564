//! The form controller: entry point bound to a container.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use formdom::{Document, Event, InputType};
use log::{debug, info, warn};

use crate::config::ValidifyConfig;
use crate::context::FieldContext;
use crate::criteria::{CriteriaRemoval, CriteriaUpdate};
use crate::descriptor::{FieldDescriptor, ResponseTarget};
use crate::error::FormError;
use crate::field::{FieldController, FieldId, run_chain};
use crate::handle::FieldHandle;
use crate::registry::{FieldKind, Registry};
use crate::response::{ResponseAggregator, ResponseId};
use crate::scan;
use crate::signal::{Listener, ListenerId, Subscriber};
use crate::timer::{TimerKey, Timers};
use crate::validity::Validity;

/// Owns the host document and every field of one container.
///
/// # Example
///
/// ```ignore
/// let registry = Arc::new(Registry::new());
/// let mut form = FormController::scan(document, "signup", registry, ValidifyConfig::default())?;
///
/// form.type_text("email", "ada@example.com", now);
/// form.tick(now + form.config().debounce_duration());
///
/// if form.validate() {
///     // submit
/// }
/// ```
pub struct FormController {
    container: String,
    binds_reset: bool,
    document: Document,
    registry: Arc<Registry>,
    config: ValidifyConfig,
    fields: Vec<FieldController>,
    responses: Vec<ResponseAggregator>,
    listeners: Vec<(ListenerId, Listener)>,
    timers: Timers,
    /// Fields currently running their chain; guards `equal-to` cycles.
    in_flight: Vec<FieldId>,
    /// Set while `reset` walks every field; dependents are not re-run.
    bulk_reset: bool,
    next_field: usize,
    next_response: usize,
    next_listener: usize,
}

impl FormController {
    /// Build a form from explicit descriptors.
    pub fn new(
        document: Document,
        container: impl Into<String>,
        descriptors: impl IntoIterator<Item = FieldDescriptor>,
        registry: Arc<Registry>,
        config: ValidifyConfig,
    ) -> Result<Self, FormError> {
        let container = container.into();
        let binds_reset = match document.get(&container) {
            Some(el) => el.is_form(),
            None => return Err(FormError::ContainerNotFound(container)),
        };

        let mut form = Self {
            container,
            binds_reset,
            document,
            registry,
            config,
            fields: Vec::new(),
            responses: Vec::new(),
            listeners: Vec::new(),
            timers: Timers::new(),
            in_flight: Vec::new(),
            bulk_reset: false,
            next_field: 0,
            next_response: 0,
            next_listener: 0,
        };

        let mut created = Vec::new();
        for descriptor in descriptors {
            created.push(form.insert_field(descriptor)?);
        }
        // Enable after every field exists so `equal-to` can find its target.
        for id in created {
            form.enable_field(id);
        }

        info!(
            "Validify bound to '{}' with {} field(s), {} response target(s)",
            form.container,
            form.fields.len(),
            form.responses.len()
        );
        Ok(form)
    }

    /// Build a form by scanning the container's annotated controls.
    pub fn scan(
        document: Document,
        container: impl Into<String>,
        registry: Arc<Registry>,
        config: ValidifyConfig,
    ) -> Result<Self, FormError> {
        let container = container.into();
        let descriptors = scan::discover(&document, &container, &config)?;
        Self::new(document, container, descriptors, registry, config)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the host document, e.g. to change values
    /// programmatically. Does not trigger validation.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ValidifyConfig {
        &self.config
    }

    pub fn fields(&self) -> &[FieldController] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldController> {
        self.fields.iter().find(|f| f.id() == id)
    }

    /// The field owning an element.
    pub fn field_for(&self, element_id: &str) -> Option<&FieldController> {
        self.fields.iter().find(|f| f.owns(element_id))
    }

    /// Handle for per-field operations.
    pub fn field_mut(&mut self, id: FieldId) -> Option<FieldHandle<'_>> {
        self.index_of(id).map(|_| FieldHandle::new(self, id))
    }

    /// Handle for the field owning an element.
    pub fn field_mut_for(&mut self, element_id: &str) -> Option<FieldHandle<'_>> {
        let id = self.field_for(element_id)?.id();
        Some(FieldHandle::new(self, id))
    }

    pub fn responses(&self) -> &[ResponseAggregator] {
        &self.responses
    }

    /// The aggregator painting a given element.
    pub fn response_for(&self, target: &str) -> Option<&ResponseAggregator> {
        self.responses.iter().find(|r| r.target() == target)
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn index_of(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id() == id)
    }

    // -------------------------------------------------------------------------
    // Bulk operations
    // -------------------------------------------------------------------------

    /// Validate every field. True iff all of them end up valid.
    pub fn validate(&mut self) -> bool {
        let ids: Vec<FieldId> = self.fields.iter().map(FieldController::id).collect();
        for id in &ids {
            self.validate_field(*id);
        }
        let valid = self.fields.iter().all(FieldController::is_valid);
        debug!("Form '{}' validated: {}", self.container, valid);
        valid
    }

    /// Reset every field to neutral.
    ///
    /// Fields compared through `equal-to` are not re-validated when their
    /// target resets, so every field ends neutral whatever the field order.
    pub fn reset(&mut self) {
        let ids: Vec<FieldId> = self.fields.iter().map(FieldController::id).collect();
        self.bulk_reset = true;
        for id in ids {
            self.reset_field(id);
        }
        self.bulk_reset = false;
    }

    /// Tear down every field and aggregator. The form is empty afterwards.
    pub fn destroy(&mut self) {
        let ids: Vec<FieldId> = self.fields.iter().map(FieldController::id).collect();
        for id in ids {
            self.destroy_field(id);
        }
        self.timers.clear();
        self.listeners.clear();
        info!("Validify unbound from '{}'", self.container);
    }

    /// Add a field after construction. It starts enabled and neutral.
    pub fn add_field(&mut self, descriptor: FieldDescriptor) -> Result<FieldId, FormError> {
        let id = self.insert_field(descriptor)?;
        self.enable_field(id);
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Events and timers
    // -------------------------------------------------------------------------

    /// Route a host event.
    ///
    /// Text fields re-validate once `input`/`blur` events have been quiet for
    /// the debounce delay; other kinds re-validate on `change`. A `reset` of
    /// the bound form schedules a form reset after the reset delay.
    pub fn dispatch(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Reset { target } => {
                if self.binds_reset && *target == self.container {
                    debug!("Form '{}' reset, deferring", self.container);
                    self.timers
                        .arm(TimerKey::Reset, now + self.config.reset_duration());
                }
            }
            Event::Input { target } | Event::Blur { target } => {
                if let Some(field) = self.field_for(target)
                    && field.is_enabled()
                    && field.kind().is_debounced()
                {
                    let key = TimerKey::Validate(field.id());
                    self.timers
                        .arm(key, now + self.config.debounce_duration());
                }
            }
            Event::Change { target } => {
                if let Some(field) = self.field_for(target)
                    && field.is_enabled()
                    && !field.kind().is_debounced()
                {
                    let id = field.id();
                    self.validate_field(id);
                }
            }
        }
    }

    /// Fire every timer due at `now`. Returns how many fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.timers.take_due(now);
        let fired = due.len();
        for key in due {
            match key {
                TimerKey::Validate(id) => {
                    self.validate_field(id);
                }
                TimerKey::Reset => self.reset(),
            }
        }
        fired
    }

    /// Type into a text control and route the resulting event.
    pub fn type_text(&mut self, id: &str, text: impl Into<String>, now: Instant) {
        if let Some(event) = self.document.type_text(id, text) {
            self.dispatch(&event, now);
        }
    }

    /// Click a checkbox/radio and route the resulting event.
    pub fn click(&mut self, id: &str, now: Instant) {
        if let Some(event) = self.document.click(id) {
            self.dispatch(&event, now);
        }
    }

    /// Pick a dropdown value and route the resulting event.
    pub fn choose(&mut self, id: &str, value: impl Into<String>, now: Instant) {
        if let Some(event) = self.document.choose(id, value) {
            self.dispatch(&event, now);
        }
    }

    pub fn blur(&mut self, id: &str, now: Instant) {
        if let Some(event) = self.document.blur(id) {
            self.dispatch(&event, now);
        }
    }

    /// Restore the form's default values natively and route the `reset`.
    pub fn native_reset(&mut self, now: Instant) {
        let container = self.container.clone();
        if let Some(event) = self.document.reset(&container) {
            self.dispatch(&event, now);
        }
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Listen to a field's validity-changed signal.
    pub fn subscribe(
        &mut self,
        field: FieldId,
        listener: impl FnMut(&FieldController) + 'static,
    ) -> Option<ListenerId> {
        let idx = self.index_of(field)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        let listener: Listener = Box::new(listener);
        self.listeners.push((id, listener));
        self.fields[idx].subscribe(Subscriber::Listener(id));
        Some(id)
    }

    /// Stop a listener. Returns false if it was unknown.
    pub fn unsubscribe(&mut self, listener: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != listener);
        for field in &mut self.fields {
            field.unsubscribe(Subscriber::Listener(listener));
        }
        self.listeners.len() != before
    }

    // -------------------------------------------------------------------------
    // Per-field operations (reached through `FieldHandle`)
    // -------------------------------------------------------------------------

    /// Run a field's chain and emit its signal.
    ///
    /// A field already validating (or resetting) further up the call stack
    /// is skipped and keeps its current validity.
    pub(crate) fn validate_field(&mut self, id: FieldId) -> Option<Validity> {
        let idx = self.index_of(id)?;
        if self.in_flight.contains(&id) {
            debug!("Skipping re-entrant validation of {}", id);
            return Some(self.fields[idx].validity());
        }

        self.in_flight.push(id);
        let validity = self.run_field(idx);
        self.emit(id);
        self.in_flight.retain(|f| *f != id);
        Some(validity)
    }

    /// Run a field's chain without emitting.
    fn run_field(&mut self, idx: usize) -> Validity {
        let outcome = {
            let field = &self.fields[idx];
            let mut cx = FieldContext {
                kind: field.kind(),
                elements: field.elements(),
                document: &mut self.document,
                fields: &self.fields,
                registry: &self.registry,
                classes: &self.config.classes,
            };
            run_chain(self.registry.validators(field.kind()), field.criteria(), &mut cx)
        };

        debug!(
            "{} {:?} -> {} {:?}",
            self.fields[idx].id(),
            self.fields[idx].elements(),
            outcome.validity,
            outcome.failed_keys
        );
        self.fields[idx].apply(outcome);
        self.fields[idx].validity()
    }

    pub(crate) fn reset_field(&mut self, id: FieldId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        if self.in_flight.contains(&id) {
            return;
        }

        self.in_flight.push(id);
        // Re-run silently so side effects (re-enabling boxes disabled by
        // `maxchecked`) follow the restored values.
        self.run_field(idx);
        self.timers.cancel(TimerKey::Validate(id));
        self.fields[idx].force(Validity::Neutral, Vec::new());
        self.emit(id);
        self.in_flight.retain(|f| *f != id);
    }

    pub(crate) fn set_validity(
        &mut self,
        id: FieldId,
        validity: Validity,
        failed_keys: Vec<String>,
    ) {
        if let Some(idx) = self.index_of(id) {
            self.fields[idx].force(validity, failed_keys);
            self.emit(id);
        }
    }

    pub(crate) fn set_criteria(&mut self, id: FieldId, update: CriteriaUpdate) {
        if let Some(idx) = self.index_of(id) {
            self.fields[idx].criteria_mut().apply(update);
            self.rewire(id);
        }
    }

    pub(crate) fn remove_criteria(&mut self, id: FieldId, removal: CriteriaRemoval) {
        if let Some(idx) = self.index_of(id) {
            self.fields[idx].criteria_mut().apply_removal(removal);
            self.rewire(id);
        }
    }

    /// Refresh `equal-to` wiring after the criteria changed.
    fn rewire(&mut self, id: FieldId) {
        if self.field(id).is_some_and(FieldController::is_enabled) {
            self.disable_field(id);
            self.enable_field(id);
        }
    }

    /// Start reacting to host events.
    pub(crate) fn enable_field(&mut self, id: FieldId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        self.fields[idx].set_enabled(true);

        let field = &self.fields[idx];
        if field.kind() != FieldKind::TextField {
            return;
        }
        let Some(reference) = field.criteria().get("equal-to").filter(|r| !r.is_empty()) else {
            return;
        };

        let reference = reference.to_string();
        let mut targets = self.document.select(&reference);
        if targets.is_empty() && self.document.contains(&reference) {
            targets.push(reference.clone());
        }
        let Some(comparee) = targets
            .first()
            .and_then(|t| self.field_for(t))
            .map(FieldController::id)
            .filter(|c| *c != id)
        else {
            debug!("{}: equal-to '{}' has no field to watch", id, reference);
            return;
        };

        if let Some(cidx) = self.index_of(comparee) {
            self.fields[cidx].subscribe(Subscriber::Field(id));
        }
        if !self.fields[idx].watching.contains(&comparee) {
            self.fields[idx].watching.push(comparee);
        }
        debug!("{} watches {} through equal-to", id, comparee);
    }

    /// Stop reacting to host events.
    pub(crate) fn disable_field(&mut self, id: FieldId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        self.fields[idx].set_enabled(false);
        self.timers.cancel(TimerKey::Validate(id));

        let watching = std::mem::take(&mut self.fields[idx].watching);
        for comparee in watching {
            if let Some(cidx) = self.index_of(comparee) {
                self.fields[cidx].unsubscribe(Subscriber::Field(id));
            }
        }
    }

    /// Detach a field from everything and drop it.
    pub(crate) fn destroy_field(&mut self, id: FieldId) {
        self.disable_field(id);
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let field = self.fields.remove(idx);

        // Aggregators: unbind, and drop those left without inputs.
        for rid in field.responses() {
            let Some(ridx) = self.responses.iter().position(|r| r.id() == *rid) else {
                continue;
            };
            self.responses[ridx].remove_input(id);
            if self.responses[ridx].inputs().is_empty() {
                let response = self.responses.remove(ridx);
                response.clear(&mut self.document, &self.config.classes);
            } else {
                self.responses[ridx].refresh(
                    None,
                    &self.fields,
                    &mut self.document,
                    &self.config.classes,
                );
            }
        }

        // Fields watching this one lose their target.
        for other in &mut self.fields {
            other.watching.retain(|w| *w != id);
        }

        // Listeners on this field go with it.
        let listeners: HashSet<ListenerId> = field
            .subscribers
            .iter()
            .filter_map(|s| match s {
                Subscriber::Listener(l) => Some(*l),
                _ => None,
            })
            .collect();
        self.listeners.retain(|(l, _)| !listeners.contains(l));

        for element in field.elements() {
            self.document
                .remove_class(element, &self.config.classes.valid);
            self.document
                .remove_class(element, &self.config.classes.invalid);
        }
        debug!("{} destroyed", id);
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn insert_field(&mut self, descriptor: FieldDescriptor) -> Result<FieldId, FormError> {
        let FieldDescriptor {
            kind,
            elements,
            mut criteria,
            response,
        } = descriptor;

        if elements.is_empty() {
            return Err(FormError::EmptyDescriptor);
        }
        for element in &elements {
            if !self.document.contains(element) {
                return Err(FormError::ElementNotFound(element.clone()));
            }
            if self.field_for(element).is_some() {
                return Err(FormError::DuplicateElement(element.clone()));
            }
        }

        // Typed inputs imply a pattern unless one is given.
        if kind == FieldKind::TextField && !criteria.contains_key("pattern") {
            let implied = self
                .document
                .get(&elements[0])
                .and_then(|el| el.input_type())
                .filter(|t| matches!(t, InputType::Number | InputType::Email | InputType::Tel));
            if let Some(input_type) = implied {
                criteria.insert("pattern", input_type.as_str());
            }
        }

        let id = FieldId(self.next_field);
        self.next_field += 1;
        self.fields
            .push(FieldController::new(id, kind, elements, criteria));

        if let Some(target) = response {
            self.attach_response(id, &target);
        }
        Ok(id)
    }

    /// Bind a field to the aggregator of every element the target resolves
    /// to, creating aggregators on first use.
    fn attach_response(&mut self, id: FieldId, target: &ResponseTarget) {
        let targets = match target {
            ResponseTarget::Selector(selector) => self.document.select(selector),
            ResponseTarget::Element(element) if self.document.contains(element) => {
                vec![element.clone()]
            }
            ResponseTarget::Element(element) => {
                warn!("{}: response element '{}' not found", id, element);
                Vec::new()
            }
        };

        for target in targets {
            let rid = match self.responses.iter().position(|r| r.target() == target) {
                Some(ridx) => self.responses[ridx].id(),
                None => {
                    let rid = ResponseId(self.next_response);
                    self.next_response += 1;
                    self.responses.push(ResponseAggregator::new(
                        rid,
                        target.clone(),
                        self.config.multiple_errors,
                    ));
                    debug!("Response target '{}' created", target);
                    rid
                }
            };

            if let Some(response) = self.responses.iter_mut().find(|r| r.id() == rid) {
                response.add_input(id);
            }
            if let Some(idx) = self.index_of(id) {
                let field = &mut self.fields[idx];
                if !field.responses.contains(&rid) {
                    field.responses.push(rid);
                }
                field.subscribe(Subscriber::Response(rid));
            }
        }
    }

    /// Paint the field's own elements and notify its subscribers.
    fn emit(&mut self, id: FieldId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };

        let validity = self.fields[idx].validity();
        let classes = &self.config.classes;
        for element in self.fields[idx].elements() {
            self.document
                .toggle_class(element, &classes.valid, validity.is_valid());
            self.document
                .toggle_class(element, &classes.invalid, validity.is_invalid());
        }

        let subscribers = self.fields[idx].subscribers.clone();
        for subscriber in subscribers {
            match subscriber {
                Subscriber::Response(rid) => {
                    if let Some(response) = self.responses.iter_mut().find(|r| r.id() == rid) {
                        response.refresh(
                            Some(id),
                            &self.fields,
                            &mut self.document,
                            &self.config.classes,
                        );
                    }
                }
                Subscriber::Field(dependent) => {
                    if !self.bulk_reset
                        && self.field(dependent).is_some_and(FieldController::is_enabled)
                    {
                        self.validate_field(dependent);
                    }
                }
                Subscriber::Listener(lid) => {
                    let Some(idx) = self.index_of(id) else {
                        continue;
                    };
                    let field = &self.fields[idx];
                    if let Some((_, listener)) =
                        self.listeners.iter_mut().find(|(l, _)| *l == lid)
                    {
                        listener(field);
                    }
                }
            }
        }
    }
}
