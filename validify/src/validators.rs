//! Built-in validators and patterns.

use log::{trace, warn};
use regex::Regex;

use crate::context::FieldContext;
use crate::registry::Validator;
use crate::validity::Validity;

/// Named patterns available to the `pattern` criterion out of the box.
pub const PATTERNS: [(&str, &str); 4] = [
    ("alphanumerical", r"^[a-zA-Z0-9]+$"),
    ("email", r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
    ("number", r"^[\d.]+$"),
    ("tel", r"^[\+\-0-9 ]*$"),
];

/// Leading-integer parse: optional sign followed by digits, anything after
/// the digits is ignored. `"6px"` is 6, `"px"` is None.
///
/// Digits too large for an `i64` saturate to `i64::MAX` (or its negation), so
/// an oversized limit still constrains instead of dropping the rule.
pub fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    match digits.parse::<i64>() {
        Ok(n) => Some(sign * n),
        Err(_) if !digits.is_empty() => Some(sign * i64::MAX),
        Err(_) => None,
    }
}

/// `required: false` (any case) switches the rule off. Every other value,
/// `true` or otherwise, makes the field mandatory.
fn switched_off(value: &str) -> bool {
    value.eq_ignore_ascii_case("false")
}

// -----------------------------------------------------------------------------
// Text fields
// -----------------------------------------------------------------------------

/// Validators every field kind starts from.
///
/// `required` fails on an empty value unless its criterion is `false`, which
/// disables the check so a field can opt out without dropping the key.
fn base() -> Vec<Validator> {
    vec![Validator::new("required", |value, cx| {
        if switched_off(value) {
            return Validity::Valid;
        }
        (!cx.value().is_empty()).into()
    })]
}

pub fn text_field() -> Vec<Validator> {
    let mut validators = base();
    validators.push(Validator::new("minlength", min_length));
    validators.push(Validator::new("pattern", pattern));
    validators.push(Validator::new("equal-to", equal_to));
    validators
}

fn min_length(value: &str, cx: &mut FieldContext<'_>) -> Validity {
    let Some(min) = parse_int(value) else {
        return Validity::Valid;
    };
    (cx.value().chars().count() as i64 >= min).into()
}

fn pattern(value: &str, cx: &mut FieldContext<'_>) -> Validity {
    if let Some(regex) = cx.pattern(value) {
        return regex.is_match(cx.value()).into();
    }

    match Regex::new(&format!("(?m){value}")) {
        Ok(regex) => regex.is_match(cx.value()).into(),
        Err(e) => {
            warn!("pattern '{}' does not compile, ignoring: {}", value, e);
            Validity::Valid
        }
    }
}

/// Compare against another element's value.
///
/// No target means no constraint. While the target's own field is not valid
/// the comparison is undecided.
fn equal_to(value: &str, cx: &mut FieldContext<'_>) -> Validity {
    let targets = cx.resolve(value);
    let Some(target) = targets.first() else {
        trace!("equal-to target '{}' not found", value);
        return Validity::Valid;
    };

    if let Some(validity) = cx.validity_of(target)
        && !validity.is_valid()
    {
        return Validity::Neutral;
    }

    let other = cx.document().value(target).unwrap_or_default();
    (cx.value() == other).into()
}

// -----------------------------------------------------------------------------
// Checkboxes and radios
// -----------------------------------------------------------------------------

/// At least one control checked, unless switched off with `required: false`.
fn group_required(value: &str, cx: &mut FieldContext<'_>) -> Validity {
    if switched_off(value) {
        return Validity::Valid;
    }
    cx.any_checked().into()
}

pub fn checkboxes() -> Vec<Validator> {
    vec![
        Validator::new("required", group_required),
        Validator::new("minchecked", min_checked),
        Validator::new("maxchecked", max_checked),
    ]
}

fn min_checked(value: &str, cx: &mut FieldContext<'_>) -> Validity {
    let min = if value.trim().eq_ignore_ascii_case("all") {
        cx.group_len() as i64
    } else {
        match parse_int(value) {
            Some(min) => min,
            None => return Validity::Valid,
        }
    };
    (cx.checked_count() as i64 >= min).into()
}

/// Once the limit is reached the unchecked boxes are disabled so no more can
/// be picked; dropping under it enables the group again.
fn max_checked(value: &str, cx: &mut FieldContext<'_>) -> Validity {
    let Some(max) = parse_int(value) else {
        return Validity::Valid;
    };

    let elements = cx.elements().to_vec();
    if cx.checked_count() as i64 >= max {
        for id in &elements {
            if !cx.document().is_checked(id) {
                cx.set_disabled(id, true);
            }
        }
    } else {
        for id in &elements {
            if cx.document().is_disabled(id) {
                cx.set_disabled(id, false);
            }
        }
    }

    (max >= cx.checked_count() as i64).into()
}

pub fn radios() -> Vec<Validator> {
    vec![Validator::new("required", group_required)]
}

// -----------------------------------------------------------------------------
// Dropdowns
// -----------------------------------------------------------------------------

pub fn dropdown() -> Vec<Validator> {
    base()
}
