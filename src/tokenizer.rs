//! Splits raw markdown text into a flat token sequence.
//!
//! A character is "special" if it can start or delimit markup: heading
//! markers, emphasis markers, list/quote/rule markers, brackets, pipes and
//! so on. Consecutive identical special characters merge into a single run
//! token, so `**` and `***` stay distinguishable from `*`. Ordinary
//! characters accumulate into text tokens. Newlines never merge; each one
//! becomes its own token so that no token spans a logical line break.

/// Characters that break an ordinary text run and form run tokens.
const SPECIAL_CHARS: &[char] = &[
    '#', '*', '_', '~', '`', '^', '!', '[', ']', '(', ')', '"', '|', ':', '>', '.', '-', '\u{2014}',
];

pub fn is_special(ch: char) -> bool {
    SPECIAL_CHARS.contains(&ch)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A maximal run of one repeated special character.
    Run { ch: char, len: usize },
    /// A run of ordinary text.
    Text(String),
    /// A single embedded newline.
    Newline,
    /// A backslash-escaped character, rendered as a numeric character
    /// reference so it can never act as markup.
    Escaped(char),
}

impl Token {
    /// The literal output form of this token when it ends up as plain text.
    pub fn rendered(&self) -> String {
        match self {
            Token::Run { ch, len } => ch.to_string().repeat(*len),
            Token::Text(s) => s.clone(),
            Token::Newline => "\n".to_string(),
            Token::Escaped(c) => format!("&#{};", *c as u32),
        }
    }

    pub fn run(&self) -> Option<(char, usize)> {
        match self {
            Token::Run { ch, len } => Some((*ch, *len)),
            _ => None,
        }
    }

    /// True for a run token of exactly this character and length.
    pub fn is_run(&self, ch: char, len: usize) -> bool {
        self.run() == Some((ch, len))
    }

    /// True for text tokens that contain only whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Token::Text(s) if s.trim().is_empty())
    }
}

/// Tokenize raw markdown into a flat token sequence.
///
/// The only lookahead is the escape pair: a backslash consumes the
/// following character and starts a fresh token afterwards. A trailing
/// backslash with nothing to escape degrades to literal text.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut run: Option<(char, usize)> = None;

    fn flush(tokens: &mut Vec<Token>, text: &mut String, run: &mut Option<(char, usize)>) {
        if let Some((ch, len)) = run.take() {
            tokens.push(Token::Run { ch, len });
        }
        if !text.is_empty() {
            tokens.push(Token::Text(std::mem::take(text)));
        }
    }

    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\n' {
            flush(&mut tokens, &mut text, &mut run);
            tokens.push(Token::Newline);
        } else if ch == '\\' {
            flush(&mut tokens, &mut text, &mut run);
            match chars.next() {
                Some(escaped) => tokens.push(Token::Escaped(escaped)),
                None => text.push('\\'),
            }
        } else if is_special(ch) {
            match run {
                Some((prev, ref mut len)) if prev == ch => *len += 1,
                _ => {
                    flush(&mut tokens, &mut text, &mut run);
                    run = Some((ch, 1));
                }
            }
        } else {
            if run.is_some() {
                flush(&mut tokens, &mut text, &mut run);
            }
            text.push(ch);
        }
    }
    flush(&mut tokens, &mut text, &mut run);

    tokens
}

/// Split a token stream into lines, dropping the newline markers.
pub fn split_lines(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    for token in tokens {
        if token == Token::Newline {
            lines.push(std::mem::take(&mut current));
        } else {
            current.push(token);
        }
    }
    lines.push(current);
    lines
}

/// Reassemble the literal text of a line for pattern checks.
pub fn line_text(tokens: &[Token]) -> String {
    tokens.iter().map(Token::rendered).collect()
}

/// Strip leading whitespace from a token slice, returning the stripped
/// tokens along with the indentation width (tabs count four columns).
pub fn strip_indent(tokens: &[Token]) -> (usize, Vec<Token>) {
    let mut rest = tokens.to_vec();
    let mut indent = 0;
    if let Some(Token::Text(s)) = rest.first() {
        let trimmed = s.trim_start();
        for ch in s[..s.len() - trimmed.len()].chars() {
            indent += if ch == '\t' { 4 } else { 1 };
        }
        if trimmed.is_empty() {
            rest.remove(0);
        } else {
            rest[0] = Token::Text(trimmed.to_string());
        }
    }
    (indent, rest)
}

/// Trim leading whitespace from the first text token of a slice.
pub fn trim_leading(tokens: &[Token]) -> Vec<Token> {
    strip_indent(tokens).1
}

/// Trim trailing whitespace from the last text token of a slice.
pub fn trim_trailing(mut tokens: Vec<Token>) -> Vec<Token> {
    if let Some(Token::Text(s)) = tokens.last() {
        let trimmed = s.trim_end();
        if trimmed.is_empty() {
            tokens.pop();
        } else {
            let t = trimmed.to_string();
            *tokens.last_mut().unwrap() = Token::Text(t);
        }
    }
    tokens
}

/// Trim whitespace from both ends of a token slice.
pub fn trim_tokens(tokens: &[Token]) -> Vec<Token> {
    trim_trailing(trim_leading(tokens))
}

/// True when a line holds no visible content at all.
pub fn is_blank_line(tokens: &[Token]) -> bool {
    tokens.iter().all(Token::is_blank_text)
}
