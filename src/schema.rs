//! The schema overlay sub-language.
//!
//! A schema maps small textual targeting rules to wrapper factories. While
//! the block parser walks the document, every wrapper whose rule covers the
//! current source line is held open, and generated blocks land in the
//! innermost open wrapper. This is how callers build card-like layouts
//! around chosen line ranges without post-processing the finished tree.
//!
//! Rule grammar, applied to 1-based source line numbers:
//!
//! - `4`     — line 4 only
//! - `2:5`   — lines 2 through 5 inclusive
//! - `7:`    — line 7 through end of document
//! - `3>`    — the line immediately after 3 (so line 4)
//! - `3<`    — the line immediately before 3 (so line 2)
//! - `1,4:6` — comma-separated targets combine
//!
//! Malformed rules (a marker with no preceding number, adjacent markers)
//! never match; they are not reported as errors.

use crate::entity::Container;

/// One resolved span of lines. `end` of `None` means end-of-document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineSpan {
    start: usize,
    end: Option<usize>,
}

impl LineSpan {
    fn single(line: usize) -> Self {
        Self {
            start: line,
            end: Some(line),
        }
    }

    fn covers(&self, line: usize) -> bool {
        line >= self.start && self.end.is_none_or(|end| line <= end)
    }
}

/// A parsed targeting rule.
///
/// Parsing never fails; a malformed rule yields a target with no spans,
/// which covers nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTarget {
    spans: Vec<LineSpan>,
}

impl SchemaTarget {
    pub fn parse(rule: &str) -> Self {
        match try_parse_rule(rule) {
            Some(spans) => Self { spans },
            None => {
                log::debug!("Ignoring malformed schema rule: {rule:?}");
                Self { spans: Vec::new() }
            }
        }
    }

    pub fn covers(&self, line: usize) -> bool {
        self.spans.iter().any(|span| span.covers(line))
    }

    pub fn is_inert(&self) -> bool {
        self.spans.is_empty()
    }
}

fn try_parse_rule(rule: &str) -> Option<Vec<LineSpan>> {
    let mut spans = Vec::new();
    let mut current: Option<usize> = None;
    let mut range_start: Option<usize> = None;

    let mut chars = rule.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '0'..='9' => {
                let mut n = ch.to_digit(10).unwrap() as usize;
                while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                    n = n * 10 + d as usize;
                    chars.next();
                }
                match range_start.take() {
                    Some(start) => spans.push(LineSpan {
                        start,
                        end: Some(n),
                    }),
                    None => current = Some(n),
                }
            }
            ':' => {
                // Range marker needs a left-hand number and must not
                // follow another marker.
                range_start = Some(current.take()?);
            }
            '>' => {
                let n = current.take()?;
                spans.push(LineSpan::single(n + 1));
            }
            '<' => {
                let n = current.take()?;
                if n > 1 {
                    spans.push(LineSpan::single(n - 1));
                }
                // "1<" targets line 0, which no content line ever is.
            }
            ',' => {
                if range_start.is_some() {
                    return None;
                }
                if let Some(n) = current.take() {
                    spans.push(LineSpan::single(n));
                }
            }
            c if c.is_whitespace() => {}
            _ => return None,
        }
    }

    if let Some(start) = range_start {
        spans.push(LineSpan { start, end: None });
    } else if let Some(n) = current {
        spans.push(LineSpan::single(n));
    }

    Some(spans)
}

/// Factory invoked each time a rule newly covers a line range.
pub type WrapperFactory = Box<dyn Fn() -> Container>;

/// An ordered mapping from targeting rules to wrapper factories.
#[derive(Default)]
pub struct Schema {
    targets: Vec<(SchemaTarget, WrapperFactory)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a targeting rule to a wrapper factory. Rules are evaluated in
    /// insertion order, so earlier rules wrap outside later ones when both
    /// cover the same line.
    pub fn wrap<F>(mut self, rule: &str, factory: F) -> Self
    where
        F: Fn() -> Container + 'static,
    {
        self.targets
            .push((SchemaTarget::parse(rule), Box::new(factory)));
        self
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn covers(&self, index: usize, line: usize) -> bool {
        self.targets[index].0.covers(line)
    }

    pub fn make_wrapper(&self, index: usize) -> Container {
        (self.targets[index].1)()
    }
}
