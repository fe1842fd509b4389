//! End-to-end rendering tests over whole documents.

use cardstock::{Config, ConfigBuilder, Container, Schema, render, render_with_schema};
use similar_asserts::assert_eq;

fn html(inner: &str) -> String {
    format!("<div class=\"markdown\">{inner}</div>")
}

#[test]
fn test_full_document() {
    let input = "\
# Release notes

Cardstock now renders *tables* and ~~quotes~~.

## Changes

- faster parsing
- stable output
  - byte for byte

|flag|default|
|:---|------:|
|`root_tag`|div|

> Ship it.
> --
> The Team

---

![logo](logo.png)
";
    let expected = html(
        "<h1>Release notes</h1>\
         <p>Cardstock now renders <i>tables</i> and <s>quotes</s>.</p>\
         <h2>Changes</h2>\
         <ul><li>faster parsing</li><li>stable output\
         <ul><li>byte for byte</li></ul></li></ul>\
         <table><thead><tr>\
         <th align=\"left\">flag</th><th align=\"right\">default</th>\
         </tr></thead><tbody><tr>\
         <td align=\"left\"><code>root_tag</code></td><td align=\"right\">div</td>\
         </tr></tbody></table>\
         <figure><blockquote>Ship it.</blockquote>\
         <figcaption id=\"attribution-1\">The Team</figcaption></figure>\
         <hr />\
         <img src=\"logo.png\" alt=\"logo\" title=\"logo\" />",
    );
    assert_eq!(render(input, None), expected);
}

#[test]
fn test_rendering_is_deterministic() {
    let input = "# A\n\n*b* and [c](d)\n\n- e\n- f\n";
    let first = render(input, None);
    for _ in 0..10 {
        assert_eq!(render(input, None), first);
    }
}

#[test]
fn test_escaped_markup_stays_literal() {
    assert_eq!(
        render(r"not \*bold\* at all", None),
        html("<p>not &#42;bold&#42; at all</p>")
    );
}

#[test]
fn test_html_in_source_is_escaped() {
    assert_eq!(
        render("a <script> tag & more", None),
        html("<p>a &lt;script&gt; tag &amp; more</p>")
    );
}

#[test]
fn test_triple_delimiters_nest_cleanly() {
    assert_eq!(
        render("***loud***", None),
        html("<p><b><i>loud</i></b></p>")
    );
}

#[test]
fn test_link_title_fallbacks() {
    assert_eq!(
        render("[docs](https://example.com)", None),
        html("<p><a href=\"https://example.com\" title=\"https://example.com\">docs</a></p>")
    );
    assert_eq!(
        render("[docs]", None),
        html("<p><a href=\"docs\" title=\"docs\">docs</a></p>")
    );
}

#[test]
fn test_heading_cap() {
    assert_eq!(render("######## deep", None), html("<h6>deep</h6>"));
}

#[test]
fn test_table_candidate_without_alignment_row_degrades() {
    assert_eq!(
        render("|a|b|\n|c|d|", None),
        html("<p>|a|b|\n|c|d|</p>")
    );
}

#[test]
fn test_schema_builds_card_layout() {
    let schema = Schema::new()
        .wrap("1:", || Container::new("div").with_class("card"))
        .wrap("2:3", || Container::new("div").with_class("card-body"));
    let input = "# Title\nbody text\nmore body\ntail";
    let expected = html(
        "<div class=\"card\"><h1>Title</h1>\
         <div class=\"card-body\"><p>body text\nmore body</p></div>\
         <p>tail</p></div>",
    );
    assert_eq!(render_with_schema(input, None, &schema), expected);
}

#[test]
fn test_schema_open_range_runs_to_document_end() {
    let schema = Schema::new().wrap("3:", || Container::new("footer"));
    let input = "a\n\nb\n\nc";
    let expected = html("<p>a</p><footer><p>b</p><p>c</p></footer>");
    assert_eq!(render_with_schema(input, None, &schema), expected);
}

#[test]
fn test_config_controls_root_element() {
    let config = ConfigBuilder::default()
        .root_tag("main")
        .root_class("content")
        .build();
    assert_eq!(
        render("hi", Some(config)),
        "<main class=\"content\"><p>hi</p></main>"
    );
}

#[test]
fn test_default_config_from_toml() {
    let config: Config = toml::from_str("collapsible_attributions = false").unwrap();
    let out = render("> q\n> --\n> A", Some(config));
    assert_eq!(
        out,
        html("<figure><blockquote>q</blockquote><figcaption>A</figcaption></figure>")
    );
}
