//! The block-level state machine.
//!
//! The parser walks the document line by line, dispatching each line to a
//! block handler. Multi-line blocks (paragraphs, lists, tables, quotes)
//! stay open across lines and close when a blank line, an incompatible
//! line, or a schema boundary arrives. Schema wrappers open and close
//! around the blocks as their line targets come in and out of coverage,
//! forming a scope stack above the document root; finished blocks always
//! attach to the innermost open scope.

use crate::config::Config;
use crate::entity::{Attributes, Container, MarkupEntity};
use crate::ids::{IdProvider, SequentialIds};
use crate::inline_parser::{Frag, format_line, parse_resource};
use crate::schema::Schema;
use crate::tokenizer::{
    Token, is_blank_line, split_lines, strip_indent, tokenize, trim_trailing,
};

pub(crate) mod blockquotes;
pub(crate) mod headings;
pub(crate) mod horizontal_rules;
pub(crate) mod lists;
pub(crate) mod tables;
#[cfg(test)]
mod tests;

use blockquotes::{QuoteBuilder, is_attribution_divider, quote_content};
use headings::{build_heading, try_parse_heading};
use horizontal_rules::{build_rule, is_rule_line};
use lists::{ListKind, try_parse_marker};
use tables::{TableBuilder, is_cell_line, try_parse_alignment_row};

/// One open wrapper on the scope stack. The bottom entry is the document
/// root and has no target; every other entry belongs to a schema rule.
struct Scope {
    target: Option<usize>,
    entity: Container,
}

/// A list still accepting items, with the indent column it opened at.
struct OpenList {
    indent: usize,
    kind: ListKind,
    container: Container,
}

pub struct BlockParser<'a> {
    lines: Vec<Vec<Token>>,
    pos: usize,
    config: &'a Config,
    schema: Option<&'a Schema>,
    ids: Box<dyn IdProvider>,
    scopes: Vec<Scope>,
    paragraph: Vec<String>,
    lists: Vec<OpenList>,
    table: Option<TableBuilder>,
    quote: Option<QuoteBuilder>,
}

impl<'a> BlockParser<'a> {
    pub fn new(input: &str, config: &'a Config) -> Self {
        let mut root = Container::new(config.root_tag.clone());
        if let Some(class) = &config.root_class {
            root = root.with_class(class.clone());
        }
        Self {
            lines: split_lines(tokenize(input)),
            pos: 0,
            config,
            schema: None,
            ids: Box::new(SequentialIds::default()),
            scopes: vec![Scope {
                target: None,
                entity: root,
            }],
            paragraph: Vec::new(),
            lists: Vec::new(),
            table: None,
            quote: None,
        }
    }

    pub fn with_schema(mut self, schema: &'a Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_id_provider(mut self, ids: Box<dyn IdProvider>) -> Self {
        self.ids = ids;
        self
    }

    /// Consume the parser and produce the document tree.
    pub fn parse(mut self) -> MarkupEntity {
        while self.pos < self.lines.len() {
            let line_no = self.pos + 1;
            let tokens = self.lines[self.pos].clone();
            self.sync_schema(line_no);

            // Continuations of open multi-line blocks come first; a line
            // that does not continue the block closes it and is then
            // classified from scratch.
            if self.table.is_some() {
                if is_cell_line(&tokens) {
                    if let Some(table) = &mut self.table {
                        table.push_row(&tokens);
                    }
                    self.pos += 1;
                    continue;
                }
                self.close_table();
            }
            if self.quote.is_some() {
                let significant = strip_indent(&tokens).1;
                if matches!(significant.first().and_then(Token::run), Some(('>', _))) {
                    self.quote_line(&significant);
                    self.pos += 1;
                    continue;
                }
                self.close_quote();
            }

            if is_blank_line(&tokens) {
                self.close_blocks();
                self.pos += 1;
                continue;
            }

            let (indent, significant) = strip_indent(&tokens);
            self.classify(indent, significant);
            self.pos += 1;
        }

        self.close_blocks();
        while self.scopes.len() > 1 {
            self.close_scope();
        }
        let root = self.scopes.pop().map(|scope| scope.entity).unwrap_or_default();
        MarkupEntity::Container(root)
    }

    fn classify(&mut self, indent: usize, significant: Vec<Token>) {
        if let Some((level, rest)) = try_parse_heading(&significant) {
            log::trace!("Heading level {level} at line {}", self.pos + 1);
            self.close_blocks();
            let heading = build_heading(level, rest);
            self.current().add_child(heading);
        } else if is_rule_line(&significant) {
            self.close_blocks();
            self.current().add_child(build_rule());
        } else if let Some(image) = try_parse_image(&significant) {
            self.close_blocks();
            self.current().add_child(image);
        } else if matches!(significant.first().and_then(Token::run), Some(('>', _))) {
            self.close_blocks();
            self.quote = Some(QuoteBuilder::new());
            self.quote_line(&significant);
        } else if let Some((kind, content)) = try_parse_marker(&significant) {
            self.handle_list_item(indent, kind, content);
        } else if is_cell_line(&significant)
            && let Some(alignments) = self
                .lines
                .get(self.pos + 1)
                .and_then(|next| try_parse_alignment_row(next))
        {
            log::trace!("Table opens at line {}", self.pos + 1);
            self.close_blocks();
            self.table = Some(TableBuilder::new(&significant, alignments));
            // The alignment row is consumed along with the header.
            self.pos += 1;
        } else {
            // A plain line ends any open lists and joins the paragraph.
            while !self.lists.is_empty() {
                self.close_one_list();
            }
            self.paragraph
                .push(format_line(&trim_trailing(significant)));
        }
    }

    /// Innermost open scope; the root scope is always present.
    fn current(&mut self) -> &mut Container {
        &mut self
            .scopes
            .last_mut()
            .expect("the root scope never closes")
            .entity
    }

    /// Bring the scope stack in line with the rules covering this line.
    ///
    /// Open wrappers must nest in schema order. When an outer wrapper goes
    /// stale, everything above it closes with it; still-covered inner
    /// wrappers then reopen fresh. Open blocks close before any scope
    /// changes so they land inside the wrapper they started in.
    fn sync_schema(&mut self, line: usize) {
        let Some(schema) = self.schema else {
            return;
        };
        let desired: Vec<usize> = (0..schema.len())
            .filter(|&index| schema.covers(index, line))
            .collect();
        let open: Vec<usize> = self.scopes.iter().filter_map(|scope| scope.target).collect();
        let keep = open
            .iter()
            .zip(&desired)
            .take_while(|(a, b)| a == b)
            .count();

        if open.len() > keep {
            self.close_blocks();
            for _ in keep..open.len() {
                self.close_scope();
            }
        }
        if desired.len() > keep {
            self.close_blocks();
            for &index in &desired[keep..] {
                log::debug!("Schema wrapper {index} opens at line {line}");
                self.scopes.push(Scope {
                    target: Some(index),
                    entity: schema.make_wrapper(index),
                });
            }
        }
    }

    fn close_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            log::debug!("Schema wrapper {:?} closes", scope.target);
            self.current().add_child(MarkupEntity::Container(scope.entity));
        }
    }

    /// Close every open block, innermost content first.
    fn close_blocks(&mut self) {
        self.close_paragraph();
        while !self.lists.is_empty() {
            self.close_one_list();
        }
        self.close_table();
        self.close_quote();
    }

    fn close_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join("\n");
        self.paragraph.clear();
        let mut p = Container::new("p");
        p.add_child(MarkupEntity::text(text));
        self.current().add_child(MarkupEntity::Container(p));
    }

    fn handle_list_item(&mut self, indent: usize, kind: ListKind, content: Vec<Token>) {
        self.close_paragraph();

        // Unwind lists that this marker cannot extend: anything deeper
        // than the marker, and a same-indent list of the other family.
        while self.lists.last().is_some_and(|open| {
            indent < open.indent || (indent == open.indent && !open.kind.same_family(&kind))
        }) {
            self.close_one_list();
        }

        let needs_new = self.lists.last().is_none_or(|open| indent > open.indent);
        if needs_new {
            let container = match kind {
                ListKind::Unordered => Container::new("ul"),
                ListKind::Ordered(style) => {
                    Container::new("ol").with_attribute("type", style.type_attr())
                }
            };
            self.lists.push(OpenList {
                indent,
                kind,
                container,
            });
        }

        let mut item = Container::new("li");
        item.add_child(MarkupEntity::text(format_line(&content)));
        if let Some(open) = self.lists.last_mut() {
            open.container.add_child(MarkupEntity::Container(item));
        }
    }

    /// Close the innermost list. A nested list becomes part of its parent
    /// list's last item.
    fn close_one_list(&mut self) {
        let Some(open) = self.lists.pop() else {
            return;
        };
        let entity = MarkupEntity::Container(open.container);
        match self.lists.last_mut() {
            Some(parent) => {
                match parent
                    .container
                    .last_child_mut()
                    .and_then(MarkupEntity::as_container_mut)
                {
                    Some(item) => item.add_child(entity),
                    None => parent.container.add_child(entity),
                }
            }
            None => self.current().add_child(entity),
        }
    }

    fn close_table(&mut self) {
        if let Some(table) = self.table.take() {
            let entity = table.finish();
            self.current().add_child(entity);
        }
    }

    fn quote_line(&mut self, significant: &[Token]) {
        let Some(quote) = self.quote.as_mut() else {
            return;
        };
        let content = quote_content(significant);
        if is_attribution_divider(&content) {
            quote.begin_attribution();
        } else {
            quote.push_line(format_line(&trim_trailing(content)));
        }
    }

    fn close_quote(&mut self) {
        if let Some(quote) = self.quote.take() {
            let entity = quote.finish(self.config, self.ids.as_mut());
            self.current().add_child(entity);
        }
    }
}

/// Fragments with text left unescaped, for fields that feed attribute
/// values. The attribute serializer escapes them exactly once.
fn raw_frags(tokens: &[Token]) -> Vec<Frag> {
    tokens
        .iter()
        .map(|token| match token {
            Token::Run { ch, len } => Frag::Run { ch: *ch, len: *len },
            Token::Text(s) => Frag::Text(s.clone()),
            Token::Escaped(c) => Frag::Text(c.to_string()),
            Token::Newline => Frag::Text("\n".to_string()),
        })
        .collect()
}

/// An image line is `![alt](src)` with nothing but whitespace after it.
/// Both alt and src are required; anything else leaves the line to be
/// treated as an ordinary paragraph, where the `!` renders literally.
fn try_parse_image(tokens: &[Token]) -> Option<MarkupEntity> {
    match tokens.first()?.run() {
        Some(('!', 1)) => {}
        _ => return None,
    }
    let frags = raw_frags(&tokens[1..]);
    let resource = parse_resource(&frags)?;
    let (Some(alt), Some(src)) = (resource.alt, resource.src) else {
        return None;
    };
    let tail_is_blank = frags[resource.offset..]
        .iter()
        .all(|frag| matches!(frag, Frag::Text(s) if s.trim().is_empty()));
    if !tail_is_blank {
        return None;
    }

    let mut attributes = Attributes::new();
    attributes.set("src", src);
    attributes.set("alt", alt.clone());
    attributes.set("title", resource.title.unwrap_or(alt));
    Some(MarkupEntity::void("img", attributes))
}
