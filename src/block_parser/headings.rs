//! Heading parsing.

use crate::config::HEADING_CAP;
use crate::entity::Container;
use crate::entity::MarkupEntity;
use crate::inline_parser::format_line;
use crate::tokenizer::{Token, trim_leading};

/// Try to parse a heading from a line's significant tokens. The heading
/// level is the `#` run length, capped at six.
pub(crate) fn try_parse_heading(tokens: &[Token]) -> Option<(usize, &[Token])> {
    match tokens.first()?.run() {
        Some(('#', len)) => Some((len.min(HEADING_CAP), &tokens[1..])),
        _ => None,
    }
}

/// Build the heading element, inline-formatting the remainder of the line.
pub(crate) fn build_heading(level: usize, rest: &[Token]) -> MarkupEntity {
    let content = trim_leading(rest);
    let mut heading = Container::new(format!("h{level}"));
    heading.add_child(MarkupEntity::text(format_line(&content)));
    MarkupEntity::Container(heading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_levels() {
        for level in 1..=6 {
            let line = format!("{} title", "#".repeat(level));
            let tokens = tokenize(&line);
            let (parsed, _) = try_parse_heading(&tokens).unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_level_caps_at_six() {
        let tokens = tokenize("######## deep");
        let (level, _) = try_parse_heading(&tokens).unwrap();
        assert_eq!(level, 6);
    }

    #[test]
    fn test_non_heading() {
        assert_eq!(try_parse_heading(&tokenize("plain text")), None);
    }

    #[test]
    fn test_build_trims_marker_space() {
        let tokens = tokenize("## Title *em*");
        let (level, rest) = try_parse_heading(&tokens).unwrap();
        let html = build_heading(level, rest).render();
        assert_eq!(html, "<h2>Title <i>em</i></h2>");
    }
}
