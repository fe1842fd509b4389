//! The markup element tree and its HTML serialization.
//!
//! Entities form a closed set: literal text, self-closing void elements,
//! and containers with ordered children. Containers can carry a
//! child-attribute map whose entries are applied automatically to children
//! with a matching tag, which is how card-layout wrapper factories style
//! the blocks that land inside them.

use std::fmt::Write;

/// An insertion-ordered attribute map.
///
/// `None` values render as bare boolean attributes (`<input checked>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = Some(value),
            None => self.entries.push((key, Some(value))),
        }
    }

    /// Set a boolean attribute. Has no effect if the attribute already
    /// carries a value.
    pub fn set_bare(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.entries.iter().any(|(k, _)| *k == key) {
            self.entries.push((key, None));
        }
    }

    /// Merge a value into an attribute, space-separating it from any
    /// existing value. Used when container child-attribute rules apply
    /// classes to children that already have some.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, Some(existing))) => {
                existing.push(' ');
                existing.push_str(&value);
            }
            Some(entry) => entry.1 = Some(value),
            None => self.entries.push((key, Some(value))),
        }
    }

    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn render(&self, out: &mut String) {
        for (key, value) in &self.entries {
            match value {
                Some(value) => {
                    let _ = write!(
                        out,
                        " {}=\"{}\"",
                        key,
                        html_escape::encode_double_quoted_attribute(value)
                    );
                }
                None => {
                    let _ = write!(out, " {}", key);
                }
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, Option<V>)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        }
    }
}

/// A container element with a tag, attributes, and ordered children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub tag: String,
    pub attributes: Attributes,
    child_attributes: Vec<(String, Attributes)>,
    children: Vec<MarkupEntity>,
}

impl Container {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(key, value);
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attribute("class", class)
    }

    /// Register attributes that are merged into every appended child with
    /// the given tag.
    pub fn with_child_attributes(mut self, tag: impl Into<String>, attributes: Attributes) -> Self {
        self.child_attributes.push((tag.into(), attributes));
        self
    }

    /// Append a child, applying any matching child-attribute rules.
    pub fn add_child(&mut self, mut child: MarkupEntity) {
        if let Some(tag) = child.tag().map(str::to_string) {
            for (rule_tag, rules) in &self.child_attributes {
                if *rule_tag != tag {
                    continue;
                }
                if let Some(attributes) = child.attributes_mut() {
                    for (key, value) in &rules.entries {
                        match value {
                            Some(value) => attributes.append(key.clone(), value.clone()),
                            None => attributes.set_bare(key.clone()),
                        }
                    }
                }
            }
        }
        self.children.push(child);
    }

    pub fn children(&self) -> &[MarkupEntity] {
        &self.children
    }

    pub fn last_child(&self) -> Option<&MarkupEntity> {
        self.children.last()
    }

    pub fn last_child_mut(&mut self) -> Option<&mut MarkupEntity> {
        self.children.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn render(&self) -> String {
        MarkupEntity::Container(self.clone()).render()
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        self.attributes.render(out);
        out.push('>');
        for child in &self.children {
            child.render_into(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupEntity {
    /// Literal content, escaped at construction time. Never has children.
    Text(String),
    /// A self-closing element such as `img` or `hr`.
    Void { tag: String, attributes: Attributes },
    Container(Container),
}

impl MarkupEntity {
    /// A text node. The content is emitted verbatim, so markup-significant
    /// characters must already be escaped.
    pub fn text(content: impl Into<String>) -> Self {
        MarkupEntity::Text(content.into())
    }

    pub fn void(tag: impl Into<String>, attributes: Attributes) -> Self {
        MarkupEntity::Void {
            tag: tag.into(),
            attributes,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            MarkupEntity::Text(_) => None,
            MarkupEntity::Void { tag, .. } => Some(tag),
            MarkupEntity::Container(c) => Some(&c.tag),
        }
    }

    pub fn attributes_mut(&mut self) -> Option<&mut Attributes> {
        match self {
            MarkupEntity::Text(_) => None,
            MarkupEntity::Void { attributes, .. } => Some(attributes),
            MarkupEntity::Container(c) => Some(&mut c.attributes),
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            MarkupEntity::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            MarkupEntity::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Serialize the tree depth-first into markup text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            MarkupEntity::Text(content) => out.push_str(content),
            MarkupEntity::Void { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                attributes.render(out);
                out.push_str(" />");
            }
            MarkupEntity::Container(container) => container.render_into(out),
        }
    }
}
