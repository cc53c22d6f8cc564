use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// The `type` of an `<input>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Email,
    Password,
    Date,
    Number,
    Tel,
    Checkbox,
    Radio,
    Hidden,
    Search,
    Url,
    Submit,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Date => "date",
            InputType::Number => "number",
            InputType::Tel => "tel",
            InputType::Checkbox => "checkbox",
            InputType::Radio => "radio",
            InputType::Hidden => "hidden",
            InputType::Search => "search",
            InputType::Url => "url",
            InputType::Submit => "submit",
        }
    }

    /// Parse an input type name. Unknown names fall back to `Text`, the way
    /// browsers treat them.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "email" => InputType::Email,
            "password" => InputType::Password,
            "date" => InputType::Date,
            "number" => InputType::Number,
            "tel" => InputType::Tel,
            "checkbox" => InputType::Checkbox,
            "radio" => InputType::Radio,
            "hidden" => InputType::Hidden,
            "search" => InputType::Search,
            "url" => InputType::Url,
            "submit" => InputType::Submit,
            _ => InputType::Text,
        }
    }

    /// Whether the control holds a checked state rather than a typed value.
    pub fn is_checkable(self) -> bool {
        matches!(self, InputType::Checkbox | InputType::Radio)
    }
}

/// Element tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Form,
    Input(InputType),
    Textarea,
    Select,
    Label,
    Div,
    Span,
    Other(String),
}

impl Tag {
    pub fn name(&self) -> &str {
        match self {
            Tag::Form => "form",
            Tag::Input(_) => "input",
            Tag::Textarea => "textarea",
            Tag::Select => "select",
            Tag::Label => "label",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,
    pub name: Option<String>,

    // Control state
    pub value: String,
    pub default_value: String,
    pub checked: bool,
    pub default_checked: bool,
    /// Disabled controls ignore user interaction.
    pub disabled: bool,

    // Presentation
    pub classes: Vec<String>,
    /// Text shown by labels and other content elements.
    pub text: String,

    /// Target control id of a `<label for="...">`.
    pub label_for: Option<String>,

    /// Free-form attributes (`data-*` and friends).
    pub attributes: HashMap<String, String>,

    pub children: Vec<Element>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: Tag::Div,
            name: None,
            value: String::new(),
            default_value: String::new(),
            checked: false,
            default_checked: false,
            disabled: false,
            classes: Vec::new(),
            text: String::new(),
            label_for: None,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            id: generate_id(tag.name()),
            tag,
            ..Default::default()
        }
    }

    pub fn form() -> Self {
        Self::new(Tag::Form)
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn span() -> Self {
        Self::new(Tag::Span)
    }

    pub fn input(input_type: InputType) -> Self {
        Self::new(Tag::Input(input_type))
    }

    pub fn text_input() -> Self {
        Self::input(InputType::Text)
    }

    pub fn checkbox() -> Self {
        Self::input(InputType::Checkbox)
    }

    pub fn radio() -> Self {
        Self::input(InputType::Radio)
    }

    pub fn textarea() -> Self {
        Self::new(Tag::Textarea)
    }

    pub fn select() -> Self {
        Self::new(Tag::Select)
    }

    /// Create a `<label for="...">` pointing at a control.
    pub fn label(for_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label_for: Some(for_id.into()),
            text: text.into(),
            ..Self::new(Tag::Label)
        }
    }

    // Builders

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set both the current and the default value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.default_value = value.clone();
        self.value = value;
        self
    }

    /// Set both the current and the default checked state.
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self.default_checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }

    // Queries

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn input_type(&self) -> Option<InputType> {
        match self.tag {
            Tag::Input(input_type) => Some(input_type),
            _ => None,
        }
    }

    pub fn is_form(&self) -> bool {
        self.tag == Tag::Form
    }

    /// Whether this element is a form control (input, textarea or select).
    pub fn is_control(&self) -> bool {
        matches!(self.tag, Tag::Input(_) | Tag::Textarea | Tag::Select)
    }

    pub fn is_checkable(&self) -> bool {
        self.input_type().is_some_and(InputType::is_checkable)
    }

    /// Resolve an attribute the way a selector sees it: `id`, `name`, `type`,
    /// `for` and `class` map onto element state, everything else reads the
    /// free-form attributes.
    pub fn attribute_value(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "id" => Some(Cow::Borrowed(self.id.as_str())),
            "name" => self.name.as_deref().map(Cow::Borrowed),
            "type" => self.input_type().map(|t| Cow::Borrowed(t.as_str())),
            "for" => self.label_for.as_deref().map(Cow::Borrowed),
            "class" if !self.classes.is_empty() => Some(Cow::Owned(self.classes.join(" "))),
            _ => self.get_attr(key).map(Cow::Borrowed),
        }
    }
}
