//! Facet filter clauses and their rendering into the Typesense `filter_by` grammar.
//!
//! A filter expression is an ordered list of clauses joined with `&&`. Facet
//! toggles operate on the parsed clauses and only the [`FilterClause`]
//! renderer knows about quoting, so values with special characters survive a
//! round trip through the URL.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::search_const::{BOOLEAN_FACET_FIELDS, NUMERIC_FACET_FIELDS};

pub const CLAUSE_SEPARATOR: &str = " && ";

/// How a selected facet value is turned into a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Boolean,
    NumericRange,
    Categorical,
}

impl FieldKind {
    /// Unknown fields are treated as categorical.
    pub fn of_field(field_name: &str) -> Self {
        if BOOLEAN_FACET_FIELDS.contains(&field_name) {
            FieldKind::Boolean
        } else if NUMERIC_FACET_FIELDS.contains(&field_name) {
            FieldKind::NumericRange
        } else {
            FieldKind::Categorical
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterClause {
    /// `field:=value`
    Equals { field: String, value: String },
    /// `field:[min..max]`, both ends inclusive
    Range { field: String, min: String, max: String },
    /// ``field:[`a`,`b`]``
    OneOf { field: String, values: Vec<String> },
    /// `field:value`, the bare form, kept as written
    Matches { field: String, value: String },
    /// Anything the parser does not model, kept verbatim.
    Opaque { field: String, text: String },
}

impl FilterClause {
    /// Builds the clause selecting exactly `value` on `field`.
    pub fn for_facet_value(field: &str, value: &str) -> Self {
        let field = field.to_string();
        let value = value.to_string();
        match FieldKind::of_field(&field) {
            FieldKind::Boolean => FilterClause::Equals { field, value },
            FieldKind::NumericRange => FilterClause::Range {
                field,
                min: value.clone(),
                max: value,
            },
            FieldKind::Categorical => FilterClause::OneOf { field, values: vec![value] },
        }
    }

    /// Classifies one clause of a `filter_by` string.
    pub fn parse(clause: &str) -> Self {
        let clause = clause.trim();
        let opaque = |field: &str| FilterClause::Opaque {
            field: field.to_string(),
            text: clause.to_string(),
        };

        let Some((field, rest)) = clause.split_once(':') else {
            return opaque("");
        };
        let field = field.trim();
        if field.is_empty() || !field.chars().all(is_field_char) {
            return opaque("");
        }
        let rest = rest.trim();

        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim();
            if value.is_empty() || value.starts_with(['[', '`', '=']) {
                return opaque(field);
            }
            return FilterClause::Equals {
                field: field.to_string(),
                value: value.to_string(),
            };
        }

        if is_bare_value(rest) {
            return FilterClause::Matches {
                field: field.to_string(),
                value: rest.to_string(),
            };
        }

        let Some(inner) = rest.strip_prefix('[').and_then(|r| r.strip_suffix(']')) else {
            return opaque(field);
        };

        if !inner.contains('`') && !inner.contains(',') {
            if let Some((min, max)) = inner.split_once("..") {
                let (min, max) = (min.trim(), max.trim());
                if min.is_empty() || max.is_empty() || max.contains("..") {
                    return opaque(field);
                }
                return FilterClause::Range {
                    field: field.to_string(),
                    min: min.to_string(),
                    max: max.to_string(),
                };
            }
        }
        if inner.contains("..") && !inner.contains('`') {
            return opaque(field);
        }

        match parse_value_list(inner) {
            Some(values) => FilterClause::OneOf {
                field: field.to_string(),
                values,
            },
            None => opaque(field),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FilterClause::Equals { field, .. }
            | FilterClause::Range { field, .. }
            | FilterClause::OneOf { field, .. }
            | FilterClause::Matches { field, .. }
            | FilterClause::Opaque { field, .. } => field,
        }
    }

    /// Whether this clause is the selection of `value` for its field.
    /// Opaque clauses never count as a facet selection.
    pub fn selects(&self, value: &str) -> bool {
        match self {
            FilterClause::Equals { value: selected, .. }
            | FilterClause::Matches { value: selected, .. } => selected == value,
            FilterClause::Range { min, max, .. } => min == value && max == value,
            FilterClause::OneOf { values, .. } => values.iter().any(|v| v == value),
            FilterClause::Opaque { .. } => false,
        }
    }

    pub fn to_filter_by(&self) -> String {
        match self {
            FilterClause::Equals { field, value } => format!("{field}:={value}"),
            FilterClause::Range { field, min, max } => format!("{field}:[{min}..{max}]"),
            FilterClause::OneOf { field, values } => {
                let values = values.iter().map(|v| quote_value(v)).collect::<Vec<_>>().join(",");
                format!("{field}:[{values}]")
            }
            FilterClause::Matches { field, value } => format!("{field}:{value}"),
            FilterClause::Opaque { text, .. } => text.clone(),
        }
    }
}

impl Display for FilterClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_filter_by())
    }
}

/// One facet value and whether the current filter selects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacetSelection {
    pub field_name: String,
    pub value: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterExpression {
    clauses: Vec<FilterClause>,
}

impl FilterExpression {
    pub fn new(clauses: Vec<FilterClause>) -> Self {
        Self { clauses }
    }

    pub fn parse(filter_by: &str) -> Self {
        let clauses = split_clauses(filter_by)
            .into_iter()
            .map(FilterClause::parse)
            .collect();
        Self { clauses }
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses_for<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a FilterClause> + 'a {
        self.clauses.iter().filter(move |clause| clause.field() == field)
    }

    pub fn is_selected(&self, field: &str, value: &str) -> bool {
        self.clauses_for(field).any(|clause| clause.selects(value))
    }

    pub fn selection(&self, field: &str, value: &str) -> FacetSelection {
        FacetSelection {
            field_name: field.to_string(),
            value: value.to_string(),
            active: self.is_selected(field, value),
        }
    }

    /// Every facet value selected by the modelled clauses, in clause order.
    pub fn active_selections(&self) -> Vec<FacetSelection> {
        let mut selections = Vec::new();
        for clause in &self.clauses {
            let values = match clause {
                FilterClause::Equals { value, .. } | FilterClause::Matches { value, .. } => {
                    vec![value.clone()]
                }
                FilterClause::Range { min, max, .. } if min == max => vec![min.clone()],
                FilterClause::Range { min, max, .. } => vec![format!("{min}..{max}")],
                FilterClause::OneOf { values, .. } => values.clone(),
                FilterClause::Opaque { .. } => continue,
            };
            for value in values {
                selections.push(FacetSelection {
                    field_name: clause.field().to_string(),
                    value,
                    active: true,
                });
            }
        }
        selections
    }

    /// Selecting a value that is already selected removes the whole clause for
    /// the field; otherwise the field's clauses are replaced by a single clause
    /// for `value`, appended after the other fields.
    pub fn toggle(&self, field: &str, value: &str) -> Self {
        let deselect = self.is_selected(field, value);
        let mut clauses = self
            .clauses
            .iter()
            .filter(|clause| clause.field() != field)
            .cloned()
            .collect::<Vec<_>>();
        if !deselect {
            clauses.push(FilterClause::for_facet_value(field, value));
        }
        Self { clauses }
    }

    pub fn to_filter_by(&self) -> String {
        self.clauses
            .iter()
            .map(FilterClause::to_filter_by)
            .collect::<Vec<_>>()
            .join(CLAUSE_SEPARATOR)
    }
}

impl Display for FilterExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_filter_by())
    }
}

/// Next `filter_by` string after toggling `value` on `field`.
pub fn toggle_facet_filter(filter_by: &str, field: &str, value: &str) -> String {
    FilterExpression::parse(filter_by).toggle(field, value).to_filter_by()
}

fn is_field_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == '-'
}

/// An unquoted value with no list, grouping or comparison syntax.
fn is_bare_value(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with(['=', '<', '>', '!'])
        && !value.contains(['`', '[', ']', '(', ')', ',', '|', '&', '\\'])
}

/// Backticks and backslashes inside the value are escaped with a backslash.
fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('`');
    for c in value.chars() {
        if c == '`' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('`');
    quoted
}

/// Splits on top-level `&&`, ignoring separators inside backticks, brackets
/// and parentheses.
fn split_clauses(filter_by: &str) -> Vec<&str> {
    let bytes = filter_by.as_bytes();
    let mut clauses = Vec::new();
    let mut start = 0;
    let mut depth: usize = 0;
    let mut in_backticks = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_backticks {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'`' {
                in_backticks = false;
            }
        } else {
            match b {
                b'`' => in_backticks = true,
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth = depth.saturating_sub(1),
                b'&' if depth == 0 && bytes.get(i + 1) == Some(&b'&') => {
                    clauses.push(&filter_by[start..i]);
                    i += 2;
                    start = i;
                    continue;
                }
                _ => {}
            }
        }
        i += 1;
    }
    clauses.push(&filter_by[start..]);

    clauses
        .into_iter()
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .collect()
}

fn parse_value_list(inner: &str) -> Option<Vec<String>> {
    let mut values = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        if chars.peek() == Some(&'`') {
            chars.next();
            let mut value = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' if chars.peek().is_some_and(|next| *next == '`' || *next == '\\') => {
                        value.extend(chars.next());
                    }
                    '`' => {
                        closed = true;
                        break;
                    }
                    _ => value.push(c),
                }
            }
            if !closed {
                return None;
            }
            values.push(value);
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            match chars.next() {
                None => break,
                Some(',') => continue,
                Some(_) => return None,
            }
        }

        let mut value = String::new();
        let mut more = false;
        for c in chars.by_ref() {
            match c {
                ',' => {
                    more = true;
                    break;
                }
                '`' | '<' | '>' | '!' | '=' => return None,
                _ => value.push(c),
            }
        }
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        values.push(value.to_string());
        if !more {
            break;
        }
    }

    if values.is_empty() { None } else { Some(values) }
}
