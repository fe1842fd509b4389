//! Multi-line blockquotes with optional trailing attribution.
//!
//! A `>` line opens or continues a quote. While the quote is open, a line
//! whose content is a lone `--` or em-dash run ends the quote body; the
//! remaining quote lines form an attribution region. With an attribution
//! the quote renders as a figure wrapping a blockquote and a figcaption;
//! without one, as a bare blockquote.

use crate::config::Config;
use crate::entity::{Container, MarkupEntity};
use crate::ids::IdProvider;
use crate::tokenizer::{Token, trim_leading};

/// Strip the leading `>` run (any length) and at most one space of the
/// content that follows.
pub(crate) fn quote_content(tokens: &[Token]) -> Vec<Token> {
    let rest = match tokens.first().and_then(Token::run) {
        Some(('>', _)) => &tokens[1..],
        _ => tokens,
    };
    let mut content = rest.to_vec();
    if let Some(Token::Text(s)) = content.first() {
        let stripped = s.strip_prefix(' ').unwrap_or(s).to_string();
        if stripped.is_empty() {
            content.remove(0);
        } else {
            content[0] = Token::Text(stripped);
        }
    }
    content
}

/// A lone `--` or em-dash run flips the quote from body to attribution.
pub(crate) fn is_attribution_divider(content: &[Token]) -> bool {
    let significant = trim_leading(content);
    matches!(
        significant.as_slice(),
        [Token::Run { ch: '-', len: 2 }] | [Token::Run { ch: '\u{2014}', .. }]
    )
}

pub(crate) struct QuoteBuilder {
    body: Vec<String>,
    attribution: Option<Vec<String>>,
}

impl QuoteBuilder {
    pub(crate) fn new() -> Self {
        Self {
            body: Vec::new(),
            attribution: None,
        }
    }

    pub(crate) fn push_line(&mut self, formatted: String) {
        match &mut self.attribution {
            Some(lines) => lines.push(formatted),
            None => self.body.push(formatted),
        }
    }

    pub(crate) fn begin_attribution(&mut self) {
        if self.attribution.is_none() {
            self.attribution = Some(Vec::new());
        }
    }

    pub(crate) fn finish(self, config: &Config, ids: &mut dyn IdProvider) -> MarkupEntity {
        let mut quote = Container::new("blockquote");
        quote.add_child(MarkupEntity::text(self.body.join("\n")));

        match self.attribution {
            Some(lines) => {
                let mut caption = Container::new("figcaption");
                if config.collapsible_attributions {
                    caption.attributes.set("id", ids.next_id());
                }
                caption.add_child(MarkupEntity::text(lines.join("\n")));

                let mut figure = Container::new("figure");
                figure.add_child(MarkupEntity::Container(quote));
                figure.add_child(MarkupEntity::Container(caption));
                MarkupEntity::Container(figure)
            }
            None => MarkupEntity::Container(quote),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_quote_content_strips_marker_and_one_space() {
        assert_eq!(quote_content(&tokenize("> quoted")), tokenize("quoted"));
        assert_eq!(quote_content(&tokenize(">  two")), tokenize(" two"));
        assert_eq!(quote_content(&tokenize(">bare")), tokenize("bare"));
    }

    #[test]
    fn test_attribution_divider() {
        assert!(is_attribution_divider(&tokenize("--")));
        assert!(is_attribution_divider(&tokenize("—")));
        assert!(!is_attribution_divider(&tokenize("- x")));
        assert!(!is_attribution_divider(&tokenize("-- x")));
        assert!(!is_attribution_divider(&tokenize("text")));
    }

    #[test]
    fn test_plain_quote_renders_blockquote() {
        let mut builder = QuoteBuilder::new();
        builder.push_line("line one".into());
        builder.push_line("line two".into());
        let html = builder
            .finish(&Config::default(), &mut SequentialIds::default())
            .render();
        assert_eq!(html, "<blockquote>line one\nline two</blockquote>");
    }

    #[test]
    fn test_quote_with_attribution_renders_figure() {
        let mut builder = QuoteBuilder::new();
        builder.push_line("wise words".into());
        builder.begin_attribution();
        builder.push_line("Author".into());
        let html = builder
            .finish(&Config::default(), &mut SequentialIds::default())
            .render();
        assert_eq!(
            html,
            "<figure><blockquote>wise words</blockquote>\
             <figcaption id=\"attribution-1\">Author</figcaption></figure>"
        );
    }

    #[test]
    fn test_attribution_id_can_be_disabled() {
        let config = crate::config::ConfigBuilder::default()
            .collapsible_attributions(false)
            .build();
        let mut builder = QuoteBuilder::new();
        builder.push_line("q".into());
        builder.begin_attribution();
        builder.push_line("a".into());
        let html = builder.finish(&config, &mut SequentialIds::default()).render();
        assert_eq!(
            html,
            "<figure><blockquote>q</blockquote><figcaption>a</figcaption></figure>"
        );
    }
}
