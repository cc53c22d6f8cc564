//! The host document: an element tree plus the operations a browser would
//! offer on it (lookup, class manipulation, user interaction, form reset).

use log::{debug, warn};

use crate::element::{
    Element, InputType, Tag, find_element, find_element_mut, path_to, walk, walk_mut,
};
use crate::event::Event;
use crate::selector::Selector;

#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All descendants of the element with the given ID, in document order.
    pub fn descendants(&self, id: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        if let Some(el) = self.get(id) {
            walk(el, &mut out);
        }
        out
    }

    /// The closest `<form>` containing the element (the element itself
    /// included).
    pub fn form_of(&self, id: &str) -> Option<&Element> {
        let mut path = Vec::new();
        if !path_to(&self.root, id, &mut path) {
            return None;
        }
        path.into_iter().rev().find(|el| el.is_form())
    }

    /// IDs of every element matching `selector`, in document order.
    ///
    /// An unparsable selector matches nothing.
    pub fn select(&self, selector: &str) -> Vec<String> {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(e) => {
                warn!("Ignoring selector {:?}: {}", selector, e);
                return Vec::new();
            }
        };

        let mut all = vec![&self.root];
        walk(&self.root, &mut all);
        all.into_iter()
            .filter(|el| selector.matches(el))
            .map(|el| el.id.clone())
            .collect()
    }

    /// IDs of the labels bound to a control through `for`.
    pub fn labels_for(&self, id: &str) -> Vec<String> {
        let mut all = Vec::new();
        walk(&self.root, &mut all);
        all.into_iter()
            .filter(|el| el.tag == Tag::Label && el.label_for.as_deref() == Some(id))
            .map(|el| el.id.clone())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Control state
    // -------------------------------------------------------------------------

    pub fn value(&self, id: &str) -> Option<&str> {
        self.get(id).map(|el| el.value.as_str())
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.get(id).is_some_and(|el| el.checked)
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.get(id).is_some_and(|el| el.disabled)
    }

    /// Set a value programmatically. Returns false if the element is missing.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Set the checked state programmatically, ignoring `disabled`.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                el.disabled = disabled;
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.get(id).is_some_and(|el| el.has_class(class))
    }

    pub fn classes(&self, id: &str) -> &[String] {
        self.get(id).map(|el| el.classes.as_slice()).unwrap_or(&[])
    }

    pub fn add_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.get_mut(id)
            && !el.has_class(class)
        {
            el.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.get_mut(id) {
            el.classes.retain(|c| c != class);
        }
    }

    /// Add the class when `on` is true, remove it otherwise.
    pub fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// Remove every class for which `pred` returns true.
    pub fn remove_classes_where(&mut self, id: &str, pred: impl Fn(&str) -> bool) {
        if let Some(el) = self.get_mut(id) {
            el.classes.retain(|c| !pred(c));
        }
    }

    // -------------------------------------------------------------------------
    // User interaction
    // -------------------------------------------------------------------------

    /// Replace the value of a text control as if the user typed it.
    ///
    /// Returns the resulting `input` event, or None when the element is
    /// missing, disabled or not a typeable control.
    pub fn type_text(&mut self, id: &str, text: impl Into<String>) -> Option<Event> {
        let el = self.get_mut(id)?;
        let typeable = matches!(el.tag, Tag::Textarea)
            || el.input_type().is_some_and(|t| !t.is_checkable());
        if el.disabled || !typeable {
            debug!("type_text ignored on {}", id);
            return None;
        }
        el.value = text.into();
        Some(Event::Input {
            target: id.to_string(),
        })
    }

    /// Click a checkbox or radio.
    ///
    /// Checkboxes toggle; radios become checked and uncheck every other radio
    /// of the same name inside the same form. Disabled controls ignore the
    /// click.
    pub fn click(&mut self, id: &str) -> Option<Event> {
        let el = self.get(id)?;
        if el.disabled {
            debug!("click ignored on disabled {}", id);
            return None;
        }

        match el.input_type() {
            Some(InputType::Checkbox) => {
                let checked = !el.checked;
                self.set_checked(id, checked);
            }
            Some(InputType::Radio) => {
                let name = el.name.clone();
                let scope = self.form_of(id).map(|f| f.id.clone());
                if let Some(name) = name {
                    let siblings: Vec<String> = match &scope {
                        Some(form) => self.descendants(form),
                        None => {
                            let mut all = Vec::new();
                            walk(&self.root, &mut all);
                            all
                        }
                    }
                    .into_iter()
                    .filter(|e| {
                        e.input_type() == Some(InputType::Radio)
                            && e.name.as_deref() == Some(name.as_str())
                    })
                    .map(|e| e.id.clone())
                    .collect();
                    for sibling in siblings {
                        self.set_checked(&sibling, false);
                    }
                }
                self.set_checked(id, true);
            }
            _ => return None,
        }

        Some(Event::Change {
            target: id.to_string(),
        })
    }

    /// Pick a value in a `<select>`.
    pub fn choose(&mut self, id: &str, value: impl Into<String>) -> Option<Event> {
        let el = self.get_mut(id)?;
        if el.disabled || el.tag != Tag::Select {
            return None;
        }
        el.value = value.into();
        Some(Event::Change {
            target: id.to_string(),
        })
    }

    /// Move focus away from a control.
    pub fn blur(&self, id: &str) -> Option<Event> {
        self.get(id).map(|_| Event::Blur {
            target: id.to_string(),
        })
    }

    /// Restore every control in the form to its default value and checked
    /// state, the way a native reset button does.
    pub fn reset(&mut self, form_id: &str) -> Option<Event> {
        let form = self.get_mut(form_id)?;
        if !form.is_form() {
            return None;
        }
        walk_mut(form, &mut |el| {
            if el.is_control() {
                el.value = el.default_value.clone();
                el.checked = el.default_checked;
            }
        });
        Some(Event::Reset {
            target: form_id.to_string(),
        })
    }
}
