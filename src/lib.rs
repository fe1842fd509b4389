pub mod block_parser;
pub mod config;
pub mod entity;
pub mod ids;
pub mod inline_parser;
pub mod schema;
pub mod tokenizer;

pub use block_parser::BlockParser;
pub use config::Config;
pub use config::ConfigBuilder;
pub use entity::{Attributes, Container, MarkupEntity};
pub use ids::{IdProvider, SequentialIds};
pub use schema::Schema;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn detect_line_ending(input: &str) -> &str {
    // Check for first occurrence of \r\n or \n
    let rn_pos = input.find("\r\n");
    let n_pos = input.find('\n');

    if let (Some(rn), Some(n)) = (rn_pos, n_pos) {
        if rn < n {
            return "\r\n";
        }
    } else if rn_pos.is_some() {
        return "\r\n";
    }

    "\n"
}

/// Parses a markdown document into a markup entity tree.
///
/// Line endings are normalized before parsing, so schema line targets
/// count logical lines regardless of the input's line ending style.
///
/// # Arguments
///
/// * `input` - The markdown content to parse
/// * `config` - Optional configuration (defaults to default config)
pub fn parse(input: &str, config: Option<Config>) -> MarkupEntity {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let normalized_input = input.replace("\r\n", "\n");
    let config = config.unwrap_or_default();
    BlockParser::new(&normalized_input, &config).parse()
}

/// Parses a markdown document with a schema overlay. Wrappers from the
/// schema open and close around generated blocks as their line targets
/// come into coverage.
pub fn parse_with_schema(input: &str, config: Option<Config>, schema: &Schema) -> MarkupEntity {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let normalized_input = input.replace("\r\n", "\n");
    let config = config.unwrap_or_default();
    BlockParser::new(&normalized_input, &config)
        .with_schema(schema)
        .parse()
}

/// Renders a markdown document to markup text.
///
/// # Examples
///
/// ```no_run
/// let html = cardstock::render("# Hello", None);
/// assert!(html.contains("<h1>Hello</h1>"));
/// ```
pub fn render(input: &str, config: Option<Config>) -> String {
    let line_ending = detect_line_ending(input);
    let out = parse(input, config).render();

    if line_ending == "\r\n" {
        out.replace("\n", "\r\n")
    } else {
        out
    }
}

/// Renders a markdown document to markup text with a schema overlay.
pub fn render_with_schema(input: &str, config: Option<Config>, schema: &Schema) -> String {
    let line_ending = detect_line_ending(input);
    let out = parse_with_schema(input, config, schema).render();

    if line_ending == "\r\n" {
        out.replace("\n", "\r\n")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_wraps_in_root() {
        assert_eq!(
            render("# Hi", None),
            "<div class=\"markdown\"><h1>Hi</h1></div>"
        );
    }

    #[test]
    fn test_crlf_input_renders_crlf_output() {
        let html = render("one\r\ntwo", None);
        assert_eq!(html, "<div class=\"markdown\"><p>one\r\ntwo</p></div>");
    }

    #[test]
    fn test_crlf_does_not_confuse_schema_lines() {
        let schema = Schema::new().wrap("2", || Container::new("aside"));
        let html = render_with_schema("a\r\nb\r\nc", None, &schema);
        assert!(html.contains("<aside><p>b</p></aside>"));
    }
}
