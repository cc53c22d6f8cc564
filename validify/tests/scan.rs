use std::sync::Arc;

use formdom::{Document, Element, InputType};
use validify::group::{GroupCandidate, resolve_groups};
use validify::scan::discover;
use validify::{
    Attributes, FieldKind, FormController, FormError, Registry, ResponseTarget, ValidifyConfig,
};

fn candidate(
    element: &str,
    name: Option<&str>,
    criteria: Option<&str>,
    response: Option<&str>,
) -> GroupCandidate {
    GroupCandidate {
        element: element.into(),
        name: name.map(String::from),
        criteria: criteria.map(String::from),
        response: response.map(String::from),
    }
}

fn plans_document() -> Document {
    Document::new(
        Element::form()
            .id("signup")
            .child(
                Element::text_input()
                    .id("user")
                    .attr("data-validify", "required: true; minlength: 3")
                    .attr("data-validify-response", "#user-feedback"),
            )
            .child(Element::div().id("user-feedback"))
            .child(Element::text_input().id("nickname"))
            .child(Element::radio().id("plan-a").name("plan"))
            .child(
                Element::radio()
                    .id("plan-b")
                    .name("plan")
                    .attr("data-validify", "required: true"),
            )
            .child(
                Element::radio()
                    .id("plan-c")
                    .name("plan")
                    .attr("data-validify-response", "#plan-feedback"),
            )
            .child(Element::div().id("plan-feedback"))
            .child(Element::checkbox().id("terms").attr("data-validify", "required: true"))
            .child(Element::checkbox().id("extra"))
            .child(Element::checkbox().id("spam").name("spam"))
            .child(
                Element::select()
                    .id("country")
                    .attr("data-validify", "required: true"),
            )
            .child(
                Element::input(InputType::Submit)
                    .id("go")
                    .attr("data-validify", "required: true"),
            ),
    )
}

// ============================================================================
// Group resolution
// ============================================================================

#[test]
fn test_groups_by_first_occurrence() {
    let groups = resolve_groups(&[
        candidate("plan-a", Some("plan"), None, None),
        candidate("color", Some("color"), Some("required: true"), None),
        candidate("plan-b", Some("plan"), Some("required: true"), None),
        candidate("plan-c", Some("plan"), Some("minchecked: 1"), Some("#plan-feedback")),
        candidate("lonely", None, Some("required: true"), None),
    ]);

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].name.as_deref(), Some("plan"));
    assert_eq!(groups[0].elements, ["plan-a", "plan-b", "plan-c"]);
    assert_eq!(groups[0].criteria.as_deref(), Some("required: true"));
    assert_eq!(groups[0].response.as_deref(), Some("#plan-feedback"));

    assert_eq!(groups[1].elements, ["color"]);
    assert_eq!(groups[2].name, None);
    assert_eq!(groups[2].elements, ["lonely"]);
}

#[test]
fn test_unnamed_candidates_stay_separate() {
    let groups = resolve_groups(&[
        candidate("a", None, Some("required: true"), None),
        candidate("b", None, Some("required: true"), None),
    ]);
    assert_eq!(groups.len(), 2);
}

#[test]
fn test_blank_declarations_do_not_win() {
    let groups = resolve_groups(&[
        candidate("a", Some("g"), Some("  "), Some("")),
        candidate("b", Some("g"), Some("required: true"), Some("#r")),
    ]);
    assert_eq!(groups[0].criteria.as_deref(), Some("required: true"));
    assert_eq!(groups[0].response.as_deref(), Some("#r"));
}

// ============================================================================
// Scanning
// ============================================================================

#[test]
fn test_discover_annotated_controls() {
    let document = plans_document();
    let descriptors =
        discover(&document, "signup", &ValidifyConfig::default()).expect("container exists");

    let summary: Vec<(FieldKind, Vec<&str>)> = descriptors
        .iter()
        .map(|d| (d.kind, d.elements.iter().map(String::as_str).collect()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (FieldKind::TextField, vec!["user"]),
            (FieldKind::Radios, vec!["plan-a", "plan-b", "plan-c"]),
            (FieldKind::Checkboxes, vec!["terms"]),
            (FieldKind::Dropdown, vec!["country"]),
        ]
    );

    assert_eq!(descriptors[0].criteria.get("minlength"), Some("3"));
    assert_eq!(
        descriptors[0].response,
        Some(ResponseTarget::Selector("#user-feedback".into()))
    );
    assert_eq!(descriptors[1].criteria.get("required"), Some("true"));
    assert_eq!(
        descriptors[1].response,
        Some(ResponseTarget::Selector("#plan-feedback".into()))
    );
    assert_eq!(descriptors[2].response, None);
}

#[test]
fn test_discover_missing_container() {
    assert_eq!(
        discover(&plans_document(), "nope", &ValidifyConfig::default()),
        Err(FormError::ContainerNotFound("nope".into()))
    );
}

#[test]
fn test_discover_custom_attributes() {
    let document = Document::new(
        Element::div()
            .id("box")
            .child(Element::text_input().id("a").attr("data-rules", "required=true|minlength=2"))
            .child(Element::text_input().id("b").attr("data-validify", "required: true")),
    );
    let config = ValidifyConfig::default()
        .separators('|', '=')
        .attributes(Attributes {
            criteria: "data-rules".into(),
            response: "data-feedback".into(),
        });

    let descriptors = discover(&document, "box", &config).expect("container exists");
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].elements, ["a"]);
    assert_eq!(descriptors[0].criteria.get("minlength"), Some("2"));
}

#[test]
fn test_scanned_form_validates() {
    let mut form = FormController::scan(
        plans_document(),
        "signup",
        Arc::new(Registry::new()),
        ValidifyConfig::default(),
    )
    .expect("form builds");
    let now = std::time::Instant::now();

    assert_eq!(form.fields().len(), 4);
    assert!(!form.validate());
    assert!(form.document().has_class("plan-feedback", "is-invalid-required"));

    form.type_text("user", "ada", now);
    form.click("plan-c", now);
    form.click("terms", now);
    form.choose("country", "nl", now);
    form.tick(now + form.config().debounce_duration());

    assert!(form.validate());
    assert!(form.document().has_class("plan-feedback", "is-valid"));
    assert!(form.document().has_class("user-feedback", "is-valid"));
}
