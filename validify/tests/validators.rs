use std::sync::Arc;
use std::time::Instant;

use formdom::{Document, Element, InputType};
use validify::validators::parse_int;
use validify::{
    FieldDescriptor, FieldKind, FormController, Registry, Validity, ValidifyConfig,
};

fn form_with(children: Vec<Element>, descriptors: Vec<FieldDescriptor>) -> FormController {
    let document = Document::new(Element::form().id("form").children(children));
    FormController::new(
        document,
        "form",
        descriptors,
        Arc::new(Registry::new()),
        ValidifyConfig::default(),
    )
    .expect("form builds")
}

fn text(id: &str, rules: &str) -> FieldDescriptor {
    FieldDescriptor::new(FieldKind::TextField, id).rules(rules)
}

fn validate(form: &mut FormController, element: &str) -> Validity {
    form.field_mut_for(element)
        .expect("field exists")
        .validate()
}

fn failed_keys(form: &FormController, element: &str) -> Vec<String> {
    form.field_for(element)
        .map(|f| f.failed_keys().to_vec())
        .unwrap_or_default()
}

// ============================================================================
// parse_int
// ============================================================================

#[test]
fn test_parse_int_leading_digits() {
    assert_eq!(parse_int("6"), Some(6));
    assert_eq!(parse_int(" 6px"), Some(6));
    assert_eq!(parse_int("-3"), Some(-3));
    assert_eq!(parse_int("+12abc"), Some(12));
    assert_eq!(parse_int("px"), None);
    assert_eq!(parse_int(""), None);
    assert_eq!(parse_int("-"), None);
}

#[test]
fn test_parse_int_saturates_on_overflow() {
    assert_eq!(parse_int("99999999999999999999"), Some(i64::MAX));
    assert_eq!(parse_int("-99999999999999999999px"), Some(-i64::MAX));
    assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
}

#[test]
fn test_minlength_oversized_limit_still_applies() {
    let mut form = form_with(
        vec![Element::text_input().id("user").value("ada")],
        vec![text("user", "minlength: 99999999999999999999")],
    );
    assert_eq!(validate(&mut form, "user"), Validity::Invalid);
    assert_eq!(failed_keys(&form, "user"), ["minlength"]);
}

// ============================================================================
// Text fields
// ============================================================================

#[test]
fn test_required_and_minlength_collect_every_failure() {
    let mut form = form_with(
        vec![Element::text_input().id("user")],
        vec![text("user", "required: true; minlength: 3")],
    );

    assert_eq!(validate(&mut form, "user"), Validity::Invalid);
    assert_eq!(failed_keys(&form, "user"), ["required", "minlength"]);

    form.document_mut().set_value("user", "ad");
    assert_eq!(validate(&mut form, "user"), Validity::Invalid);
    assert_eq!(failed_keys(&form, "user"), ["minlength"]);

    form.document_mut().set_value("user", "ada");
    assert_eq!(validate(&mut form, "user"), Validity::Valid);
    assert!(failed_keys(&form, "user").is_empty());
}

#[test]
fn test_validation_is_idempotent() {
    let mut form = form_with(
        vec![Element::text_input().id("user").value("a")],
        vec![text("user", "required: true; minlength: 3")],
    );

    let first = validate(&mut form, "user");
    let first_keys = failed_keys(&form, "user");
    let second = validate(&mut form, "user");
    assert_eq!(first, second);
    assert_eq!(first_keys, failed_keys(&form, "user"));
}

#[test]
fn test_required_false_switches_rule_off() {
    let mut form = form_with(
        vec![Element::text_input().id("nick")],
        vec![text("nick", "required: false")],
    );
    assert_eq!(validate(&mut form, "nick"), Validity::Valid);

    form.field_mut_for("nick")
        .expect("field")
        .set_criteria(("required", "FALSE"));
    assert_eq!(validate(&mut form, "nick"), Validity::Valid);

    form.field_mut_for("nick")
        .expect("field")
        .set_criteria(("required", "no"));
    assert_eq!(validate(&mut form, "nick"), Validity::Invalid);
}

#[test]
fn test_group_required_false_switches_rule_off() {
    let mut form = topics("required: false");
    assert!(form.validate());
    assert!(failed_keys(&form, "t1").is_empty());
}

#[test]
fn test_empty_criterion_value_is_absent() {
    let mut form = form_with(
        vec![Element::text_input().id("nick")],
        vec![text("nick", "required; minlength:")],
    );
    assert_eq!(validate(&mut form, "nick"), Validity::Valid);
}

#[test]
fn test_minlength_non_numeric_passes() {
    let mut form = form_with(
        vec![Element::text_input().id("user").value("a")],
        vec![text("user", "minlength: lots")],
    );
    assert_eq!(validate(&mut form, "user"), Validity::Valid);

    form.field_mut_for("user")
        .expect("field")
        .set_criteria(("minlength", "6px"));
    assert_eq!(validate(&mut form, "user"), Validity::Invalid);
}

#[test]
fn test_named_patterns() {
    let mut form = form_with(
        vec![
            Element::text_input().id("code").value("abc123"),
            Element::text_input().id("qty").value("12.5"),
            Element::text_input().id("phone").value("+31 6-1234"),
        ],
        vec![
            text("code", "pattern: alphanumerical"),
            text("qty", "pattern: number"),
            text("phone", "pattern: tel"),
        ],
    );
    assert!(form.validate());

    form.document_mut().set_value("code", "abc 123");
    form.document_mut().set_value("qty", "12e3");
    form.document_mut().set_value("phone", "call me");
    assert!(!form.validate());
    for id in ["code", "qty", "phone"] {
        assert_eq!(failed_keys(&form, id), ["pattern"], "{id}");
    }
}

#[test]
fn test_literal_pattern_keeps_separator_in_value() {
    let mut form = form_with(
        vec![Element::text_input().id("slot").value("room:42")],
        vec![text("slot", r"pattern: ^[a-z]+:[0-9]+$")],
    );
    assert_eq!(
        form.field_for("slot").and_then(|f| f.criteria().get("pattern")),
        Some("^[a-z]+:[0-9]+$")
    );
    assert_eq!(validate(&mut form, "slot"), Validity::Valid);

    form.document_mut().set_value("slot", "room");
    assert_eq!(validate(&mut form, "slot"), Validity::Invalid);
}

#[test]
fn test_malformed_literal_pattern_passes() {
    let mut form = form_with(
        vec![Element::text_input().id("odd").value("anything")],
        vec![text("odd", "pattern: ([")],
    );
    assert_eq!(validate(&mut form, "odd"), Validity::Valid);
}

#[test]
fn test_input_type_implies_pattern() {
    let mut form = form_with(
        vec![
            Element::input(InputType::Email).id("email").value("nope"),
            Element::input(InputType::Number).id("age").value("12"),
            Element::input(InputType::Tel).id("tel").value("x"),
            Element::input(InputType::Email).id("custom").value("nope"),
        ],
        vec![
            text("email", "required: true"),
            text("age", ""),
            text("tel", ""),
            text("custom", "pattern: alphanumerical"),
        ],
    );

    let pattern = |form: &FormController, id: &str| {
        form.field_for(id)
            .and_then(|f| f.criteria().get("pattern").map(String::from))
    };
    assert_eq!(pattern(&form, "email").as_deref(), Some("email"));
    assert_eq!(pattern(&form, "age").as_deref(), Some("number"));
    assert_eq!(pattern(&form, "tel").as_deref(), Some("tel"));
    assert_eq!(pattern(&form, "custom").as_deref(), Some("alphanumerical"));

    assert_eq!(validate(&mut form, "email"), Validity::Invalid);
    assert_eq!(failed_keys(&form, "email"), ["pattern"]);
    assert_eq!(validate(&mut form, "age"), Validity::Valid);
    assert_eq!(validate(&mut form, "tel"), Validity::Invalid);
}

// ============================================================================
// equal-to
// ============================================================================

fn passwords() -> FormController {
    form_with(
        vec![
            Element::input(InputType::Password).id("password"),
            Element::input(InputType::Password).id("confirm"),
        ],
        vec![
            text("password", "required: true; minlength: 6"),
            text("confirm", "equal-to: #password"),
        ],
    )
}

#[test]
fn test_equal_to_is_neutral_while_target_unresolved() {
    let mut form = passwords();
    form.document_mut().set_value("confirm", "secret1");

    assert_eq!(validate(&mut form, "confirm"), Validity::Neutral);
    assert!(failed_keys(&form, "confirm").is_empty());

    // An invalid target keeps the comparison undecided too.
    form.document_mut().set_value("password", "short");
    validate(&mut form, "password");
    assert_eq!(
        form.field_for("confirm").map(|f| f.validity()),
        Some(Validity::Neutral)
    );
}

#[test]
fn test_equal_to_follows_the_compared_field() {
    let mut form = passwords();
    let now = Instant::now();

    form.document_mut().set_value("confirm", "secret1");
    form.document_mut().set_value("password", "secret1");

    // Validating the password re-validates the confirmation.
    validate(&mut form, "password");
    assert_eq!(
        form.field_for("confirm").map(|f| f.validity()),
        Some(Validity::Valid)
    );

    form.type_text("password", "secret2", now);
    form.tick(now + form.config().debounce_duration());
    assert_eq!(
        form.field_for("confirm").map(|f| f.validity()),
        Some(Validity::Invalid)
    );
    assert_eq!(failed_keys(&form, "confirm"), ["equal-to"]);
}

#[test]
fn test_equal_to_missing_target_is_no_constraint() {
    let mut form = form_with(
        vec![Element::text_input().id("confirm").value("x")],
        vec![text("confirm", "equal-to: #nowhere")],
    );
    assert_eq!(validate(&mut form, "confirm"), Validity::Valid);
}

#[test]
fn test_equal_to_unmanaged_target_compares_directly() {
    let mut form = form_with(
        vec![
            Element::new(formdom::Tag::Input(InputType::Hidden))
                .id("token")
                .value("abc"),
            Element::text_input().id("repeat").value("abc"),
        ],
        vec![text("repeat", "equal-to: token")],
    );
    assert_eq!(validate(&mut form, "repeat"), Validity::Valid);

    form.document_mut().set_value("repeat", "abd");
    assert_eq!(validate(&mut form, "repeat"), Validity::Invalid);
}

#[test]
fn test_mutual_equal_to_terminates() {
    let mut form = form_with(
        vec![
            Element::text_input().id("a").value("x"),
            Element::text_input().id("b").value("x"),
        ],
        vec![text("a", "equal-to: #b"), text("b", "equal-to: #a")],
    );

    assert!(!form.validate());
    for id in ["a", "b"] {
        assert_eq!(
            form.field_for(id).map(|f| f.validity()),
            Some(Validity::Neutral)
        );
    }
}

// ============================================================================
// Checkboxes
// ============================================================================

fn topics(rules: &str) -> FormController {
    let boxes = ["t1", "t2", "t3"];
    let mut children: Vec<Element> = Vec::new();
    for id in boxes {
        children.push(Element::checkbox().id(id).name("topics"));
        children.push(Element::label(id, id).id(format!("{id}-label")));
    }
    form_with(
        children,
        vec![FieldDescriptor::group(FieldKind::Checkboxes, boxes).rules(rules)],
    )
}

#[test]
fn test_checkbox_required() {
    let mut form = topics("required: true");
    let now = Instant::now();

    assert!(!form.validate());
    assert_eq!(failed_keys(&form, "t1"), ["required"]);

    form.click("t2", now);
    assert!(form.field_for("t1").is_some_and(|f| f.is_valid()));
}

#[test]
fn test_minchecked_all_means_group_size() {
    let mut form = topics("minchecked: all");
    let now = Instant::now();

    form.click("t1", now);
    form.click("t2", now);
    assert_eq!(failed_keys(&form, "t1"), ["minchecked"]);

    form.click("t3", now);
    assert!(form.field_for("t1").is_some_and(|f| f.is_valid()));
}

#[test]
fn test_maxchecked_disables_the_rest() {
    let mut form = topics("maxchecked: 2");
    let now = Instant::now();

    form.click("t1", now);
    assert!(!form.document().is_disabled("t3"));

    form.click("t2", now);
    assert!(form.field_for("t1").is_some_and(|f| f.is_valid()));
    assert!(form.document().is_disabled("t3"));
    assert!(form.document().has_class("t3-label", "is-disabled"));
    assert!(!form.document().is_disabled("t1"));
    assert!(!form.document().has_class("t1-label", "is-disabled"));

    // A disabled box cannot be checked.
    form.click("t3", now);
    assert!(!form.document().is_checked("t3"));

    form.click("t1", now);
    assert!(!form.document().is_disabled("t3"));
    assert!(!form.document().has_class("t3-label", "is-disabled"));
}

#[test]
fn test_maxchecked_over_limit_is_invalid() {
    let mut form = topics("maxchecked: 1");
    for id in ["t1", "t2", "t3"] {
        form.document_mut().set_checked(id, true);
    }
    assert!(!form.validate());
    assert_eq!(failed_keys(&form, "t1"), ["maxchecked"]);
}

// ============================================================================
// Radios and dropdowns
// ============================================================================

#[test]
fn test_radio_group_required() {
    let mut form = form_with(
        vec![
            Element::radio().id("plan-a").name("plan"),
            Element::radio().id("plan-b").name("plan"),
        ],
        vec![
            FieldDescriptor::group(FieldKind::Radios, ["plan-a", "plan-b"])
                .rules("required: true"),
        ],
    );
    let now = Instant::now();

    assert!(!form.validate());
    form.click("plan-b", now);
    assert!(form.field_for("plan-a").is_some_and(|f| f.is_valid()));

    form.click("plan-a", now);
    assert!(!form.document().is_checked("plan-b"));
    assert!(form.field_for("plan-a").is_some_and(|f| f.is_valid()));
}

#[test]
fn test_dropdown_required() {
    let mut form = form_with(
        vec![Element::select().id("country")],
        vec![FieldDescriptor::new(FieldKind::Dropdown, "country").rules("required: true")],
    );
    let now = Instant::now();

    assert!(!form.validate());
    assert!(form.document().has_class("country", "is-invalid"));

    form.choose("country", "nl", now);
    assert!(form.field_for("country").is_some_and(|f| f.is_valid()));
    assert!(form.document().has_class("country", "is-valid"));
    assert!(!form.document().has_class("country", "is-invalid"));
}
