use crate::block_parser::BlockParser;
use crate::config::{Config, ConfigBuilder};
use crate::entity::Container;
use crate::schema::Schema;

fn render(input: &str) -> String {
    let config = Config::default();
    BlockParser::new(input, &config).parse().render()
}

fn wrapped(inner: &str) -> String {
    format!("<div class=\"markdown\">{inner}</div>")
}

#[test]
fn test_empty_document_is_just_the_root() {
    assert_eq!(render(""), wrapped(""));
}

#[test]
fn test_root_tag_and_class_come_from_config() {
    let config = ConfigBuilder::default().root_tag("article").no_root_class().build();
    let html = BlockParser::new("hi", &config).parse().render();
    assert_eq!(html, "<article><p>hi</p></article>");
}

#[test]
fn test_heading() {
    assert_eq!(render("# Title"), wrapped("<h1>Title</h1>"));
    assert_eq!(render("### Sub"), wrapped("<h3>Sub</h3>"));
}

#[test]
fn test_heading_level_caps_at_six() {
    assert_eq!(render("####### deep"), wrapped("<h6>deep</h6>"));
}

#[test]
fn test_heading_interrupts_paragraph() {
    assert_eq!(
        render("text\n# H"),
        wrapped("<p>text</p><h1>H</h1>")
    );
}

#[test]
fn test_paragraph_lines_join_with_soft_break() {
    assert_eq!(render("one\ntwo"), wrapped("<p>one\ntwo</p>"));
}

#[test]
fn test_blank_line_separates_paragraphs() {
    assert_eq!(
        render("one\n\nthree"),
        wrapped("<p>one</p><p>three</p>")
    );
}

#[test]
fn test_paragraph_gets_inline_formatting() {
    assert_eq!(
        render("some *bold* text"),
        wrapped("<p>some <i>bold</i> text</p>")
    );
}

#[test]
fn test_horizontal_rule() {
    assert_eq!(render("---"), wrapped("<hr />"));
}

#[test]
fn test_unordered_list() {
    assert_eq!(
        render("- a\n- b"),
        wrapped("<ul><li>a</li><li>b</li></ul>")
    );
}

#[test]
fn test_nested_list_lands_in_parent_item() {
    assert_eq!(
        render("- a\n  - b\n- c"),
        wrapped("<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>")
    );
}

#[test]
fn test_ordered_list_styles() {
    assert_eq!(
        render("1. one\n2. two"),
        wrapped("<ol type=\"1\"><li>one</li><li>two</li></ol>")
    );
    assert_eq!(
        render("a. first"),
        wrapped("<ol type=\"a\"><li>first</li></ol>")
    );
    assert_eq!(
        render("i. intro"),
        wrapped("<ol type=\"i\"><li>intro</li></ol>")
    );
}

#[test]
fn test_marker_family_switch_starts_a_new_list() {
    assert_eq!(
        render("- a\n1. b"),
        wrapped("<ul><li>a</li></ul><ol type=\"1\"><li>b</li></ol>")
    );
}

#[test]
fn test_plain_line_ends_list() {
    assert_eq!(
        render("- a\nafter"),
        wrapped("<ul><li>a</li></ul><p>after</p>")
    );
}

#[test]
fn test_table() {
    assert_eq!(
        render("|h1|h2|\n|:-|-:|\n|a|b|"),
        wrapped(
            "<table><thead><tr>\
             <th align=\"left\">h1</th><th align=\"right\">h2</th>\
             </tr></thead><tbody><tr>\
             <td align=\"left\">a</td><td align=\"right\">b</td>\
             </tr></tbody></table>"
        )
    );
}

#[test]
fn test_table_without_alignment_row_is_a_paragraph() {
    assert_eq!(
        render("|a|b|\nplain"),
        wrapped("<p>|a|b|\nplain</p>")
    );
}

#[test]
fn test_table_closes_on_non_cell_line() {
    assert_eq!(
        render("|h|\n|-|\n|a|\ndone"),
        wrapped(
            "<table><thead><tr><th align=\"center\">h</th></tr></thead>\
             <tbody><tr><td align=\"center\">a</td></tr></tbody></table>\
             <p>done</p>"
        )
    );
}

#[test]
fn test_blockquote() {
    assert_eq!(
        render("> a\n> b"),
        wrapped("<blockquote>a\nb</blockquote>")
    );
}

#[test]
fn test_blockquote_with_attribution() {
    assert_eq!(
        render("> quote\n> --\n> Author"),
        wrapped(
            "<figure><blockquote>quote</blockquote>\
             <figcaption id=\"attribution-1\">Author</figcaption></figure>"
        )
    );
}

#[test]
fn test_blank_line_splits_quotes() {
    assert_eq!(
        render("> a\n\n> b"),
        wrapped("<blockquote>a</blockquote><blockquote>b</blockquote>")
    );
}

#[test]
fn test_image_title_falls_back_to_alt() {
    assert_eq!(
        render("![pic](img.png)"),
        wrapped("<img src=\"img.png\" alt=\"pic\" title=\"pic\" />")
    );
}

#[test]
fn test_image_explicit_title_wins() {
    assert_eq!(
        render("![pic](img.png \"A picture\")"),
        wrapped("<img src=\"img.png\" alt=\"pic\" title=\"A picture\" />")
    );
}

#[test]
fn test_image_without_src_falls_back_to_paragraph() {
    assert_eq!(render("![pic]"), wrapped("<p>![pic]</p>"));
}

#[test]
fn test_image_with_trailing_text_falls_back_to_paragraph() {
    assert_eq!(
        render("![p](u) tail"),
        wrapped("<p>![p](u) tail</p>")
    );
}

#[test]
fn test_image_alt_is_attribute_escaped_once() {
    assert_eq!(
        render("![a&b](u)"),
        wrapped("<img src=\"u\" alt=\"a&amp;b\" title=\"a&amp;b\" />")
    );
}

#[test]
fn test_schema_wrapper_spans_its_lines() {
    let config = Config::default();
    let schema = Schema::new().wrap("2:3", || Container::new("section").with_class("card"));
    let html = BlockParser::new("one\ntwo\nthree\nfour", &config)
        .with_schema(&schema)
        .parse()
        .render();
    assert_eq!(
        html,
        wrapped("<p>one</p><section class=\"card\"><p>two\nthree</p></section><p>four</p>")
    );
}

#[test]
fn test_schema_wrappers_nest_in_insertion_order() {
    let config = Config::default();
    let schema = Schema::new()
        .wrap("1:", || Container::new("div").with_class("outer"))
        .wrap("1:", || Container::new("div").with_class("inner"));
    let html = BlockParser::new("x", &config)
        .with_schema(&schema)
        .parse()
        .render();
    assert_eq!(
        html,
        wrapped("<div class=\"outer\"><div class=\"inner\"><p>x</p></div></div>")
    );
}

#[test]
fn test_stale_outer_wrapper_reopens_covered_inner_one() {
    let config = Config::default();
    let schema = Schema::new()
        .wrap("1:2", || Container::new("div").with_class("outer"))
        .wrap("1:3", || Container::new("div").with_class("inner"));
    let html = BlockParser::new("a\n\nc", &config)
        .with_schema(&schema)
        .parse()
        .render();
    // When the outer wrapper ends at line 2 the inner one closes with it
    // and a fresh inner wrapper opens for line 3.
    assert_eq!(
        html,
        wrapped(
            "<div class=\"outer\"><div class=\"inner\"><p>a</p></div></div>\
             <div class=\"inner\"><p>c</p></div>"
        )
    );
}

#[test]
fn test_schema_child_attributes_style_generated_blocks() {
    let config = Config::default();
    let schema = Schema::new().wrap("1:", || {
        let mut rules = crate::entity::Attributes::new();
        rules.set("class", "card-text");
        Container::new("div")
            .with_class("card")
            .with_child_attributes("p", rules)
    });
    let html = BlockParser::new("hello", &config)
        .with_schema(&schema)
        .parse()
        .render();
    assert_eq!(
        html,
        wrapped("<div class=\"card\"><p class=\"card-text\">hello</p></div>")
    );
}

#[test]
fn test_inert_rule_wraps_nothing() {
    let config = Config::default();
    let schema = Schema::new().wrap(">2", || Container::new("section"));
    let html = BlockParser::new("a\nb", &config)
        .with_schema(&schema)
        .parse()
        .render();
    assert_eq!(html, wrapped("<p>a\nb</p>"));
}

#[test]
fn test_schema_boundary_closes_open_paragraph() {
    let config = Config::default();
    let schema = Schema::new().wrap("2", || Container::new("aside"));
    let html = BlockParser::new("a\nb\nc", &config)
        .with_schema(&schema)
        .parse()
        .render();
    assert_eq!(
        html,
        wrapped("<p>a</p><aside><p>b</p></aside><p>c</p>")
    );
}

#[test]
fn test_custom_id_provider() {
    let config = Config::default();
    let html = BlockParser::new("> q\n> --\n> A", &config)
        .with_id_provider(Box::new(crate::ids::SequentialIds::new("note")))
        .parse()
        .render();
    assert!(html.contains("id=\"note-1\""));
}

#[test]
fn test_mixed_document() {
    let input = "\
# Title

intro text

- one
- two

> quoted
";
    assert_eq!(
        render(input),
        wrapped(
            "<h1>Title</h1><p>intro text</p>\
             <ul><li>one</li><li>two</li></ul>\
             <blockquote>quoted</blockquote>"
        )
    );
}
