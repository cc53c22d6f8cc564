use formdom::{Document, Element, Event, InputType};

fn signup() -> Document {
    Document::new(
        Element::form()
            .id("signup")
            .child(Element::text_input().id("user").value("ada"))
            .child(Element::input(InputType::Email).id("email"))
            .child(Element::checkbox().id("news").name("news").checked(true))
            .child(Element::label("news", "Newsletter").id("news-label"))
            .child(Element::radio().id("plan-a").name("plan").checked(true))
            .child(Element::radio().id("plan-b").name("plan"))
            .child(Element::select().id("country").value(""))
            .child(Element::div().id("feedback").class("hint")),
    )
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_get_and_descendants() {
    let doc = signup();
    assert_eq!(doc.value("user"), Some("ada"));
    assert!(doc.contains("feedback"));
    assert!(!doc.contains("missing"));

    let ids: Vec<&str> = doc.descendants("signup").iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"user"));
    assert_eq!(ids.last(), Some(&"feedback"));
    assert_eq!(ids.len(), 8);
}

#[test]
fn test_form_of() {
    let doc = signup();
    assert_eq!(doc.form_of("email").map(|f| f.id.as_str()), Some("signup"));
    assert_eq!(doc.form_of("signup").map(|f| f.id.as_str()), Some("signup"));
    assert!(doc.form_of("missing").is_none());
}

#[test]
fn test_labels_for() {
    let doc = signup();
    assert_eq!(doc.labels_for("news"), vec!["news-label".to_string()]);
    assert!(doc.labels_for("user").is_empty());
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_class_manipulation() {
    let mut doc = signup();
    doc.add_class("feedback", "is-valid");
    doc.add_class("feedback", "is-valid");
    assert_eq!(doc.classes("feedback"), ["hint", "is-valid"]);

    doc.toggle_class("feedback", "is-valid", false);
    doc.toggle_class("feedback", "is-invalid", true);
    doc.add_class("feedback", "is-invalid-required");
    doc.remove_classes_where("feedback", |c| c.starts_with("is-invalid"));
    assert_eq!(doc.classes("feedback"), ["hint"]);
}

// ============================================================================
// Interaction
// ============================================================================

#[test]
fn test_type_text_emits_input() {
    let mut doc = signup();
    let event = doc.type_text("email", "a@b.co");
    assert_eq!(
        event,
        Some(Event::Input {
            target: "email".into()
        })
    );
    assert_eq!(doc.value("email"), Some("a@b.co"));

    // Checkboxes are not typeable
    assert_eq!(doc.type_text("news", "x"), None);
}

#[test]
fn test_click_checkbox_toggles() {
    let mut doc = signup();
    assert_eq!(doc.click("news").map(|e| e.name()), Some("change"));
    assert!(!doc.is_checked("news"));
    doc.click("news");
    assert!(doc.is_checked("news"));
}

#[test]
fn test_click_disabled_is_ignored() {
    let mut doc = signup();
    doc.set_disabled("news", true);
    assert_eq!(doc.click("news"), None);
    assert!(doc.is_checked("news"));
}

#[test]
fn test_click_radio_is_exclusive() {
    let mut doc = signup();
    doc.click("plan-b");
    assert!(doc.is_checked("plan-b"));
    assert!(!doc.is_checked("plan-a"));
}

#[test]
fn test_reset_restores_defaults() {
    let mut doc = signup();
    doc.type_text("user", "grace");
    doc.click("news");
    doc.click("plan-b");
    doc.choose("country", "nl");

    let event = doc.reset("signup");
    assert_eq!(event.as_ref().map(Event::target), Some("signup"));
    assert_eq!(doc.value("user"), Some("ada"));
    assert_eq!(doc.value("country"), Some(""));
    assert!(doc.is_checked("news"));
    assert!(doc.is_checked("plan-a"));
    assert!(!doc.is_checked("plan-b"));

    // Only forms can be reset
    assert_eq!(doc.reset("feedback"), None);
}
