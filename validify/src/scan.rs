//! Attribute scanning: turn annotated markup into field descriptors.
//!
//! A control joins validation when it carries the criteria attribute
//! (`data-validify` by default). For checkboxes and radios the whole
//! same-named group joins as soon as one member is annotated.

use std::collections::HashSet;

use formdom::{Document, Element};
use log::debug;

use crate::config::ValidifyConfig;
use crate::descriptor::{FieldDescriptor, ResponseTarget};
use crate::error::FormError;
use crate::group::{GroupCandidate, resolve_groups};
use crate::registry::FieldKind;

/// Build descriptors for every annotated control inside `container`, ordered
/// by the document position of each field's first element.
pub fn discover(
    document: &Document,
    container: &str,
    config: &ValidifyConfig,
) -> Result<Vec<FieldDescriptor>, FormError> {
    if !document.contains(container) {
        return Err(FormError::ContainerNotFound(container.to_string()));
    }

    let criteria_attr = config.attributes.criteria.as_str();
    let response_attr = config.attributes.response.as_str();
    let parser = config.parser();
    let controls = document.descendants(container);

    let mut found: Vec<(usize, FieldDescriptor)> = Vec::new();

    // Single-element fields
    for (position, el) in controls.iter().enumerate() {
        let Some(kind) = FieldKind::classify(el) else {
            continue;
        };
        if kind.is_grouped() {
            continue;
        }
        let Some(rules) = el.get_attr(criteria_attr) else {
            continue;
        };

        let mut descriptor =
            FieldDescriptor::new(kind, el.id.clone()).criteria(parser.parse(rules));
        descriptor.response = response_of(el, response_attr);
        found.push((position, descriptor));
    }

    // Grouped fields
    for kind in [FieldKind::Checkboxes, FieldKind::Radios] {
        let members: Vec<(usize, &Element)> = controls
            .iter()
            .enumerate()
            .filter(|(_, el)| FieldKind::classify(el) == Some(kind))
            .map(|(position, el)| (position, *el))
            .collect();

        let annotated: HashSet<&str> = members
            .iter()
            .filter(|(_, el)| el.get_attr(criteria_attr).is_some())
            .filter_map(|(_, el)| el.name.as_deref())
            .collect();

        let candidates: Vec<GroupCandidate> = members
            .iter()
            .filter(|(_, el)| match el.name.as_deref() {
                Some(name) if !name.is_empty() => annotated.contains(name),
                _ => el.get_attr(criteria_attr).is_some(),
            })
            .map(|(_, el)| GroupCandidate::from_element(el, criteria_attr, response_attr))
            .collect();

        for group in resolve_groups(&candidates) {
            let Some(position) = group
                .elements
                .first()
                .and_then(|first| members.iter().find(|(_, el)| el.id == *first))
                .map(|(position, _)| *position)
            else {
                continue;
            };

            debug!(
                "Grouped {} {:?} -> {:?}",
                kind, group.name, group.elements
            );

            let criteria = group
                .criteria
                .as_deref()
                .map(|rules| parser.parse(rules))
                .unwrap_or_default();
            let mut descriptor = FieldDescriptor::group(kind, group.elements).criteria(criteria);
            descriptor.response = group.response.map(ResponseTarget::Selector);
            found.push((position, descriptor));
        }
    }

    found.sort_by_key(|(position, _)| *position);
    Ok(found.into_iter().map(|(_, descriptor)| descriptor).collect())
}

fn response_of(el: &Element, response_attr: &str) -> Option<ResponseTarget> {
    el.get_attr(response_attr)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| ResponseTarget::Selector(r.to_string()))
}
