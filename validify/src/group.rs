//! Collapsing same-named checkboxes/radios into groups.

use formdom::Element;

/// One checkbox or radio as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCandidate {
    pub element: String,
    pub name: Option<String>,
    /// Raw criteria attribute, if declared.
    pub criteria: Option<String>,
    /// Raw response attribute, if declared.
    pub response: Option<String>,
}

impl GroupCandidate {
    /// Read a candidate off a host element using the given attribute names.
    pub fn from_element(element: &Element, criteria_attr: &str, response_attr: &str) -> Self {
        Self {
            element: element.id.clone(),
            name: element.name.clone().filter(|n| !n.is_empty()),
            criteria: element.get_attr(criteria_attr).map(String::from),
            response: element.get_attr(response_attr).map(String::from),
        }
    }
}

/// A resolved group: its elements plus the winning criteria and response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub name: Option<String>,
    pub elements: Vec<String>,
    pub criteria: Option<String>,
    pub response: Option<String>,
}

/// Partition candidates into groups by name, in order of first occurrence.
///
/// Unnamed candidates each form their own group. The group's criteria come
/// from the first member declaring a non-empty criteria attribute, and its
/// response from the first member declaring a non-empty response attribute;
/// the two may be different members.
pub fn resolve_groups(candidates: &[GroupCandidate]) -> Vec<ResolvedGroup> {
    let mut groups: Vec<ResolvedGroup> = Vec::new();

    for candidate in candidates {
        let group = match &candidate.name {
            Some(name) => {
                match groups.iter().position(|g| g.name.as_deref() == Some(name.as_str())) {
                    Some(idx) => &mut groups[idx],
                    None => {
                        groups.push(ResolvedGroup {
                            name: Some(name.clone()),
                            ..Default::default()
                        });
                        let last = groups.len() - 1;
                        &mut groups[last]
                    }
                }
            }
            None => {
                groups.push(ResolvedGroup::default());
                let last = groups.len() - 1;
                &mut groups[last]
            }
        };

        group.elements.push(candidate.element.clone());
        if group.criteria.is_none() {
            group.criteria = declared(candidate.criteria.as_deref());
        }
        if group.response.is_none() {
            group.response = declared(candidate.response.as_deref());
        }
    }

    groups
}

fn declared(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
