//! Unique identifiers for generated markup.
//!
//! The parser only consumes ids; where they come from is the host's
//! concern. Hosts that need document-wide uniqueness across several parses
//! plug in their own provider.

pub trait IdProvider {
    fn next_id(&mut self) -> String;
}

/// Counter-backed provider, unique within a single parse.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    counter: usize,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("attribution")
    }
}

impl IdProvider for SequentialIds {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }
}
