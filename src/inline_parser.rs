//! Inline formatting for a single logical line.
//!
//! Works through the line's tokens with an explicit fragment stack. When a
//! delimiter run finds its earlier partner on the stack, the whole span
//! between them is committed as one finished text fragment; finished spans
//! are never reopened, so a backward scan only ever walks fragments that
//! are still candidates. Anything left unmatched at the end of the line
//! renders as literal text.

use std::borrow::Cow;

use crate::tokenizer::Token;

pub mod resource;

pub(crate) use resource::parse_resource;

/// A slot on the inline parse stack: either an unresolved delimiter run or
/// committed text (escaped input or finished markup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frag {
    Run { ch: char, len: usize },
    Text(String),
}

impl Frag {
    pub(crate) fn rendered(&self) -> String {
        match self {
            Frag::Run { ch, len } => ch.to_string().repeat(*len),
            Frag::Text(s) => s.clone(),
        }
    }

    pub(crate) fn is_run(&self, ch: char, len: usize) -> bool {
        matches!(self, Frag::Run { ch: c, len: l } if *c == ch && *l == len)
    }

    fn run_char(&self) -> Option<char> {
        match self {
            Frag::Run { ch, .. } => Some(*ch),
            Frag::Text(_) => None,
        }
    }
}

pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Convert raw tokens to stack fragments without delimiter matching.
/// Used where a caller needs resource parsing over an unformatted span.
pub(crate) fn frags_from_tokens(tokens: &[Token]) -> Vec<Frag> {
    tokens
        .iter()
        .map(|token| match token {
            Token::Run { ch, len } => Frag::Run {
                ch: *ch,
                len: *len,
            },
            other => Frag::Text(match other {
                Token::Text(s) => escape_text(s).into_owned(),
                _ => other.rendered(),
            }),
        })
        .collect()
}

/// The canonical delimiter width for an inline style, if the character is
/// a matchable delimiter at all.
fn canonical_width(ch: char) -> Option<usize> {
    match ch {
        '*' | '_' | '~' => Some(2),
        '`' | '^' => Some(1),
        _ => None,
    }
}

/// Open/close tag pair selected by delimiter character and run length.
fn tags_for(ch: char, len: usize) -> Option<(&'static str, &'static str)> {
    match (ch, len) {
        ('*', 2) => Some(("<b>", "</b>")),
        ('*', 1) => Some(("<i>", "</i>")),
        ('_', 2) => Some(("<u>", "</u>")),
        ('_', 1) => Some(("<sub>", "</sub>")),
        ('~', 2) => Some(("<s>", "</s>")),
        ('`', 1) => Some(("<code>", "</code>")),
        ('^', 1) => Some(("<sup>", "</sup>")),
        _ => None,
    }
}

/// Backward scan for the nearest unresolved run of this exact shape.
fn rfind_run(stack: &[Frag], ch: char, len: usize) -> Option<usize> {
    stack.iter().rposition(|frag| frag.is_run(ch, len))
}

/// Commit the span from the matched opener to the top of the stack as one
/// finished text fragment.
fn reduce(stack: &mut Vec<Frag>, index: usize, open: &str, close: &str) {
    let mut joined = String::from(open);
    for frag in &stack[index + 1..] {
        joined.push_str(&frag.rendered());
    }
    joined.push_str(close);
    stack.truncate(index);
    stack.push(Frag::Text(joined));
}

/// Match a canonical-width chunk against the stack, or push it unresolved.
fn push_or_match(stack: &mut Vec<Frag>, ch: char, len: usize) {
    let Some((open, close)) = tags_for(ch, len) else {
        // No style at this width (a lone `~`); render literally.
        stack.push(Frag::Run { ch, len });
        return;
    };
    match rfind_run(stack, ch, len) {
        Some(index) => reduce(stack, index, open, close),
        None => stack.push(Frag::Run { ch, len }),
    }
}

/// Handle a delimiter run, splitting over-long runs into canonical-width
/// chunks first.
///
/// When the split leaves a remainder chunk of a different width, the
/// processing order is chosen by comparing which chunk's partner sits
/// nearer the top of the stack, so that `***text***` closes the inner
/// span before the outer one instead of producing overlapping tags.
fn handle_delimiter(stack: &mut Vec<Frag>, ch: char, len: usize) {
    let width = canonical_width(ch).expect("caller checked delimiter class");

    if len <= width {
        push_or_match(stack, ch, len);
        return;
    }

    let full_chunks = len / width;
    let remainder = len % width;

    if remainder == 0 {
        for _ in 0..full_chunks {
            push_or_match(stack, ch, width);
        }
        return;
    }

    let full_match = rfind_run(stack, ch, width);
    let remainder_match = rfind_run(stack, ch, remainder);
    let remainder_first = match (full_match, remainder_match) {
        (Some(full), Some(rem)) => rem > full,
        (None, Some(_)) => true,
        _ => false,
    };

    if remainder_first {
        push_or_match(stack, ch, remainder);
        for _ in 0..full_chunks {
            push_or_match(stack, ch, width);
        }
    } else {
        for _ in 0..full_chunks {
            push_or_match(stack, ch, width);
        }
        push_or_match(stack, ch, remainder);
    }
}

/// Resolve a just-pushed `]` or `)` into a link if an opening `[` is on
/// the stack and the span parses as a valid resource. Images (a `[`
/// preceded by `!`) are a block-level concern and are left untouched, as
/// are invalid resources.
fn resolve_bracket(stack: &mut Vec<Frag>) {
    let Some(open) = rfind_run(stack, '[', 1) else {
        return;
    };
    if open > 0 && stack[open - 1].run_char() == Some('!') {
        return;
    }
    let Some(res) = parse_resource(&stack[open..]) else {
        return;
    };
    if res.src.is_none() && res.alt.is_none() {
        return;
    }

    // Field text comes from rendered fragments and is already
    // entity-escaped for text content; quote runs pass through as-is.
    let href = res.src.clone().or_else(|| res.alt.clone()).unwrap_or_default();
    let title = res
        .title
        .clone()
        .or_else(|| res.src.clone())
        .or_else(|| res.alt.clone())
        .unwrap_or_default();
    let text = res.alt.unwrap_or_default();
    let html = format!("<a href=\"{href}\" title=\"{title}\">{text}</a>");

    stack.splice(open..open + res.offset, std::iter::once(Frag::Text(html)));
}

/// Inline-format the tokens of one logical line into markup text.
pub fn format_line(tokens: &[Token]) -> String {
    let mut stack: Vec<Frag> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Text(text) => stack.push(Frag::Text(escape_text(text).into_owned())),
            Token::Escaped(c) => stack.push(Frag::Text(format!("&#{};", *c as u32))),
            Token::Newline => {}
            Token::Run { ch, len } => {
                let (ch, len) = (*ch, *len);
                if canonical_width(ch).is_some() {
                    handle_delimiter(&mut stack, ch, len);
                } else if (ch == ']' || ch == ')') && len == 1 {
                    stack.push(Frag::Run { ch, len });
                    // A `]` directly followed by `(` is the long form; it
                    // resolves when the closing paren arrives.
                    let deferred = ch == ']'
                        && matches!(tokens.get(i + 1), Some(Token::Run { ch: '(', .. }));
                    if !deferred {
                        resolve_bracket(&mut stack);
                    }
                } else if ch == '>' {
                    // Literal angle brackets must not survive into markup.
                    stack.push(Frag::Text("&gt;".repeat(len)));
                } else {
                    stack.push(Frag::Run { ch, len });
                }
            }
        }
        i += 1;
    }

    stack.iter().map(Frag::rendered).collect()
}
