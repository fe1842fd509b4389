//! List marker parsing.
//!
//! Unordered items are marked by a sole `-`, `*`, or em-dash. Ordered
//! items are a digit or letter run followed by `.` or `)`; the marker
//! shape selects the list's numbering style. Roman numerals win over the
//! single-letter reading, so `i.` starts a lower-roman list.

use crate::tokenizer::{Token, trim_leading};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderedStyle {
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

impl OrderedStyle {
    /// Value for the `type` attribute on the `<ol>`.
    pub(crate) fn type_attr(&self) -> &'static str {
        match self {
            OrderedStyle::Decimal => "1",
            OrderedStyle::LowerAlpha => "a",
            OrderedStyle::UpperAlpha => "A",
            OrderedStyle::LowerRoman => "i",
            OrderedStyle::UpperRoman => "I",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Unordered,
    Ordered(OrderedStyle),
}

impl ListKind {
    pub(crate) fn same_family(&self, other: &ListKind) -> bool {
        matches!(
            (self, other),
            (ListKind::Unordered, ListKind::Unordered)
                | (ListKind::Ordered(_), ListKind::Ordered(_))
        )
    }
}

/// Classify an ordered-list marker label.
fn classify_ordered(label: &str) -> Option<OrderedStyle> {
    if label.is_empty() {
        return None;
    }
    let mut chars = label.chars();
    let first = chars.next().unwrap();

    if label.chars().all(|c| c.is_ascii_digit()) {
        return Some(OrderedStyle::Decimal);
    }
    if label.chars().all(|c| "ivxlcdm".contains(c)) {
        return Some(OrderedStyle::LowerRoman);
    }
    if label.chars().all(|c| "IVXLCDM".contains(c)) {
        return Some(OrderedStyle::UpperRoman);
    }
    if label.len() == 1 && first.is_ascii_lowercase() {
        return Some(OrderedStyle::LowerAlpha);
    }
    if label.len() == 1 && first.is_ascii_uppercase() {
        return Some(OrderedStyle::UpperAlpha);
    }
    None
}

/// The marker must stand alone: either the line ends after it or the next
/// token is text beginning with whitespace.
fn marker_is_isolated(tokens: &[Token], consumed: usize) -> bool {
    match tokens.get(consumed) {
        None => true,
        Some(Token::Text(s)) => s.starts_with(char::is_whitespace),
        Some(_) => false,
    }
}

/// Try to parse a list marker from a line's significant tokens. Returns
/// the kind and the item's content tokens.
pub(crate) fn try_parse_marker(tokens: &[Token]) -> Option<(ListKind, Vec<Token>)> {
    match tokens.first()? {
        Token::Run { ch, len: 1 } if matches!(ch, '-' | '*' | '\u{2014}') => {
            if !marker_is_isolated(tokens, 1) {
                return None;
            }
            Some((ListKind::Unordered, trim_leading(&tokens[1..])))
        }
        Token::Text(label) => {
            let style = classify_ordered(label)?;
            match tokens.get(1)?.run() {
                Some(('.', 1)) | Some((')', 1)) => {}
                _ => return None,
            }
            if !marker_is_isolated(tokens, 2) {
                return None;
            }
            Some((ListKind::Ordered(style), trim_leading(&tokens[2..])))
        }
        _ => None,
    }
}
