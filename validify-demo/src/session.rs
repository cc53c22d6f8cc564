//! A scripted sign-up session.
//!
//! Steps are replayed against a live form on a tokio clock. Between steps
//! the loop sleeps until whichever comes first, the next step or the form's
//! next timer, the same way a render loop sleeps until its next deadline.

use std::time::{Duration, Instant};

use formdom::{Document, Element, InputType};
use log::{debug, error, info};
use tokio::time::sleep_until;
use validify::{FieldKind, FormController, Registry, Validator};

/// One simulated user action.
#[derive(Debug, Clone)]
pub enum Action {
    Type(&'static str, &'static str),
    Click(&'static str),
    Choose(&'static str, &'static str),
    Blur(&'static str),
    Reset,
    Submit,
}

/// An action and how long after the previous one it happens.
#[derive(Debug, Clone)]
pub struct Step {
    pub after: Duration,
    pub action: Action,
}

fn step(after_ms: u64, action: Action) -> Step {
    Step {
        after: Duration::from_millis(after_ms),
        action,
    }
}

pub fn signup_document() -> Document {
    let criteria = "data-validify";
    let response = "data-validify-response";

    let topics = ["rust", "web", "games"].into_iter().flat_map(|topic| {
        let id = format!("topic-{topic}");
        [
            Element::checkbox()
                .id(id.clone())
                .name("topics")
                .value(topic)
                .attr(criteria, "minchecked: 1; maxchecked: 2")
                .attr(response, "#topics-feedback"),
            Element::label(id.clone(), topic).id(format!("{id}-label")),
        ]
    });

    Document::new(
        Element::form()
            .id("signup")
            .child(
                Element::text_input()
                    .id("username")
                    .attr(criteria, "required: true; minlength: 3; pattern: slug; not: admin")
                    .attr(response, "#username-feedback"),
            )
            .child(Element::div().id("username-feedback"))
            .child(
                Element::input(InputType::Email)
                    .id("email")
                    .attr(criteria, "required: true")
                    .attr(response, "#email-feedback"),
            )
            .child(Element::div().id("email-feedback"))
            .child(
                Element::input(InputType::Password)
                    .id("password")
                    .attr(criteria, "required: true; minlength: 8")
                    .attr(response, "#password-feedback"),
            )
            .child(
                Element::input(InputType::Password)
                    .id("confirm")
                    .attr(criteria, "required: true; equal-to: #password")
                    .attr(response, "#password-feedback"),
            )
            .child(Element::div().id("password-feedback"))
            .children(topics)
            .child(Element::div().id("topics-feedback"))
            .child(Element::radio().id("plan-free").name("plan").value("free"))
            .child(
                Element::radio()
                    .id("plan-pro")
                    .name("plan")
                    .value("pro")
                    .attr(criteria, "required: true"),
            )
            .child(
                Element::select()
                    .id("country")
                    .attr(criteria, "required: true"),
            ),
    )
}

/// Built-ins plus the site-specific rules.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.add_validator(
        FieldKind::TextField,
        Validator::new("not", |value, cx| {
            let mut forbidden = value.split(',').map(str::trim);
            let taken = forbidden.any(|word| cx.value().eq_ignore_ascii_case(word));
            (!taken).into()
        }),
    );
    if let Err(e) = registry.add_regex("slug", "^[a-z0-9_-]+$") {
        error!("{}", e);
    }
    registry
}

pub fn script() -> Vec<Step> {
    use Action::*;

    vec![
        step(0, Submit),
        step(100, Type("username", "a")),
        step(80, Type("username", "ad")),
        step(80, Type("username", "admin")),
        step(400, Type("username", "ada_l")),
        step(400, Type("email", "ada@example")),
        step(50, Blur("email")),
        step(400, Type("email", "ada@example.com")),
        step(300, Type("password", "engines1843")),
        step(300, Type("confirm", "engines1842")),
        step(400, Type("confirm", "engines1843")),
        step(300, Click("topic-rust")),
        step(50, Click("topic-web")),
        step(50, Click("topic-games")),
        step(50, Click("plan-pro")),
        step(50, Choose("country", "uk")),
        step(50, Submit),
        step(100, Reset),
        step(100, Submit),
    ]
}

async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}

/// Replay `steps` against `form`, firing the form's timers in between.
pub async fn run(form: &mut FormController, steps: Vec<Step>) {
    let mut steps = steps.into_iter();
    let mut last = Instant::now();
    let mut pending = steps.next();

    loop {
        let next_step = pending.as_ref().map(|s| last + s.after);
        let next_timer = form.next_deadline();
        if next_step.is_none() && next_timer.is_none() {
            break;
        }

        tokio::select! {
            _ = sleep_until_optional(next_timer) => {
                let fired = form.tick(Instant::now());
                debug!("SELECT: {} timer(s) fired", fired);
            }
            _ = sleep_until_optional(next_step) => {
                let now = Instant::now();
                if let Some(step) = pending.take() {
                    apply(form, &step.action, now);
                }
                last = now;
                pending = steps.next();
            }
        }
    }
    info!("Session finished");
}

fn apply(form: &mut FormController, action: &Action, now: Instant) {
    println!("> {:?}", action);
    match action {
        Action::Type(id, text) => form.type_text(id, *text, now),
        Action::Click(id) => form.click(id, now),
        Action::Choose(id, value) => form.choose(id, *value, now),
        Action::Blur(id) => form.blur(id, now),
        Action::Reset => form.native_reset(now),
        Action::Submit => {
            let valid = form.validate();
            println!("  submit: {}", if valid { "accepted" } else { "rejected" });
            report(form);
        }
    }
}

/// Print every field and feedback target.
pub fn report(form: &FormController) {
    for field in form.fields() {
        let keys = field.failed_keys();
        if keys.is_empty() {
            println!("  {:<28} {}", field.elements().join(","), field.validity());
        } else {
            println!(
                "  {:<28} {} [{}]",
                field.elements().join(","),
                field.validity(),
                keys.join(", ")
            );
        }
    }
    for response in form.responses() {
        println!(
            "  #{:<27} {}",
            response.target(),
            form.document().classes(response.target()).join(" ")
        );
    }
}
