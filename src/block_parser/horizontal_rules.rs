//! Horizontal rule parsing.

use crate::entity::{Attributes, MarkupEntity};
use crate::tokenizer::Token;

/// A rule line is a single run of three or more dashes (or em-dashes),
/// with nothing else but whitespace around it.
pub(crate) fn is_rule_line(tokens: &[Token]) -> bool {
    let mut seen_rule = false;
    for token in tokens {
        match token {
            Token::Run { ch, len } if matches!(ch, '-' | '\u{2014}') && *len >= 3 => {
                if seen_rule {
                    return false;
                }
                seen_rule = true;
            }
            t if t.is_blank_text() => {}
            _ => return false,
        }
    }
    seen_rule
}

pub(crate) fn build_rule() -> MarkupEntity {
    MarkupEntity::void("hr", Attributes::new())
}
