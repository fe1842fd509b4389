//! Pipe-table parsing: cell rows and the alignment delimiter row.

use std::sync::LazyLock;

use regex::Regex;

use crate::entity::{Container, MarkupEntity};
use crate::inline_parser::format_line;
use crate::tokenizer::{Token, line_text, trim_tokens};

/// A candidate cell row starts and ends with a pipe.
static CELL_ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|.*\|$").unwrap());

pub(crate) fn is_cell_row(line: &str) -> bool {
    CELL_ROW.is_match(line.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Per-column scan state for the alignment row.
#[derive(Default)]
struct ColumnScan {
    colon_before: bool,
    dashes: usize,
    colon_after: bool,
    seen_any: bool,
}

impl ColumnScan {
    fn commit(&mut self) -> Option<Alignment> {
        if self.dashes == 0 {
            return None;
        }
        let alignment = match (self.colon_before, self.colon_after) {
            (true, false) => Alignment::Left,
            (false, true) => Alignment::Right,
            // Colons on both sides, or a bare dash run, center.
            _ => Alignment::Center,
        };
        *self = ColumnScan::default();
        Some(alignment)
    }
}

/// Try to parse a `|---|:---:|---:|` alignment row.
///
/// The row must begin with a pipe and contain nothing but pipes, colons,
/// and dashes (surrounding whitespace aside); every column needs at least
/// one dash. Any violation rejects the row and the candidate table
/// reverts to a paragraph.
pub(crate) fn try_parse_alignment_row(tokens: &[Token]) -> Option<Vec<Alignment>> {
    let tokens = trim_tokens(tokens);
    let mut iter = tokens.iter();

    match iter.next()?.run() {
        Some(('|', _)) => {}
        _ => return None,
    }
    // The opening pipe may carry extra separators (`||---|`), which would
    // mean an empty leading column.
    let mut pending_separators = match tokens[0].run() {
        Some((_, len)) => len - 1,
        None => 0,
    };

    let mut alignments = Vec::new();
    let mut column = ColumnScan::default();

    for token in iter {
        while pending_separators > 0 {
            if column.seen_any {
                alignments.push(column.commit()?);
            } else {
                return None; // empty column
            }
            pending_separators -= 1;
        }
        match token.run() {
            Some(('|', len)) => {
                alignments.push(column.commit()?);
                pending_separators = len - 1;
            }
            Some((':', len)) => {
                column.seen_any = true;
                if len != 1 {
                    return None;
                }
                if column.dashes == 0 {
                    if column.colon_before {
                        return None;
                    }
                    column.colon_before = true;
                } else {
                    if column.colon_after {
                        return None;
                    }
                    column.colon_after = true;
                }
            }
            Some(('-', len)) => {
                column.seen_any = true;
                if column.colon_after {
                    return None;
                }
                column.dashes += len;
            }
            _ => return None,
        }
    }

    // Content after the final pipe forms a last, unterminated column.
    if column.seen_any {
        alignments.push(column.commit()?);
    }

    if alignments.is_empty() {
        return None;
    }
    Some(alignments)
}

/// Split a cell row into per-cell token slices, trimming each cell.
pub(crate) fn split_cells(tokens: &[Token]) -> Vec<Vec<Token>> {
    let tokens = trim_tokens(tokens);
    let mut cells = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut started = false;

    for token in tokens {
        match token.run() {
            Some(('|', len)) => {
                for _ in 0..len {
                    if started {
                        cells.push(trim_tokens(&std::mem::take(&mut current)));
                    }
                    started = true;
                }
            }
            _ => current.push(token),
        }
    }
    // A trailing pipe leaves `current` empty; anything else was not a
    // cell row to begin with.
    cells
}

/// A table under construction: the header is fixed when the alignment row
/// validates, body rows accumulate until a line stops matching.
pub(crate) struct TableBuilder {
    alignments: Vec<Alignment>,
    table: Container,
    body: Container,
}

impl TableBuilder {
    pub(crate) fn new(header: &[Token], alignments: Vec<Alignment>) -> Self {
        let mut table = Container::new("table");
        let mut head = Container::new("thead");
        head.add_child(build_row(header, &alignments, "th"));
        table.add_child(MarkupEntity::Container(head));
        Self {
            alignments,
            table,
            body: Container::new("tbody"),
        }
    }

    pub(crate) fn push_row(&mut self, tokens: &[Token]) {
        self.body.add_child(build_row(tokens, &self.alignments, "td"));
    }

    pub(crate) fn finish(mut self) -> MarkupEntity {
        self.table.add_child(MarkupEntity::Container(self.body));
        MarkupEntity::Container(self.table)
    }
}

fn build_row(tokens: &[Token], alignments: &[Alignment], cell_tag: &str) -> MarkupEntity {
    let mut row = Container::new("tr");
    for (index, cell) in split_cells(tokens).iter().enumerate() {
        let alignment = alignments.get(index).copied().unwrap_or(Alignment::Center);
        let mut element = Container::new(cell_tag).with_attribute("align", alignment.as_str());
        element.add_child(MarkupEntity::text(format_line(cell)));
        row.add_child(MarkupEntity::Container(element));
    }
    MarkupEntity::Container(row)
}

/// Check a raw line for the cell pattern before committing to a table.
pub(crate) fn is_cell_line(tokens: &[Token]) -> bool {
    is_cell_row(&line_text(tokens))
}
