//! A small selector language for looking up elements.
//!
//! Supports what form markup actually references: tag names, `#id`,
//! `.class`, `[attr]` and `[attr="value"]`, combined into compound selectors
//! and separated by commas, e.g. `input[type="checkbox"], #terms`.
//! Descendant combinators are not supported.

use thiserror::Error;

use crate::element::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character '{found}' at position {position} in selector")]
    Unexpected { found: char, position: usize },
    #[error("unterminated attribute in selector")]
    Unterminated,
    #[error("descendant combinators are not supported")]
    Combinator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag
            && tag != "*"
            && !tag.eq_ignore_ascii_case(element.tag.name())
        {
            return false;
        }
        if let Some(id) = &self.id
            && *id != element.id
        {
            return false;
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|attr| match element.attribute_value(&attr.name) {
            None => false,
            Some(actual) => attr.value.as_deref().is_none_or(|v| v == actual),
        })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let compounds = input
            .split(',')
            .map(parse_compound)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { compounds })
    }

    pub fn matches(&self, element: &Element) -> bool {
        self.compounds.iter().any(|c| c.matches(element))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*'
}

fn parse_compound(input: &str) -> Result<Compound, SelectorError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SelectorError::Empty);
    }
    if trimmed.contains(char::is_whitespace) && !within_brackets_only(trimmed) {
        return Err(SelectorError::Combinator);
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut compound = Compound::default();
    let mut pos = 0;

    let ident = |pos: &mut usize| -> String {
        let start = *pos;
        while *pos < chars.len() && is_ident_char(chars[*pos]) {
            *pos += 1;
        }
        chars[start..*pos].iter().collect()
    };

    if is_ident_char(chars[0]) {
        compound.tag = Some(ident(&mut pos));
    }

    while pos < chars.len() {
        match chars[pos] {
            '#' => {
                pos += 1;
                compound.id = Some(ident(&mut pos));
            }
            '.' => {
                pos += 1;
                compound.classes.push(ident(&mut pos));
            }
            '[' => {
                let close = chars[pos..]
                    .iter()
                    .position(|&c| c == ']')
                    .ok_or(SelectorError::Unterminated)?;
                let body: String = chars[pos + 1..pos + close].iter().collect();
                compound.attrs.push(parse_attr(&body));
                pos += close + 1;
            }
            found => return Err(SelectorError::Unexpected { found, position: pos }),
        }
    }

    Ok(compound)
}

fn parse_attr(body: &str) -> AttrMatch {
    match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            AttrMatch {
                name: name.trim().to_string(),
                value: Some(value.to_string()),
            }
        }
        None => AttrMatch {
            name: body.trim().to_string(),
            value: None,
        },
    }
}

/// True when every whitespace character sits inside a `[...]` block.
fn within_brackets_only(input: &str) -> bool {
    let mut depth = 0usize;
    for c in input.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => return false,
            _ => {}
        }
    }
    true
}
