//! Note Metadata
//!
//! Authored notes carry tags of the form `<key:value>` or a bare `<key>`.
//! A later tag with the same key replaces an earlier one.

use std::collections::HashMap;

/// Value of a single note tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    /// `<key>` with no colon
    Flag,
    /// `<key:value>`, value kept verbatim (may be empty)
    Text(String),
}

/// Tags extracted from a note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    tags: HashMap<String, MetaValue>,
}

impl Metadata {
    /// Extract every tag from a note.
    pub fn parse(note: &str) -> Self {
        let mut tags = HashMap::new();
        let mut rest = note;

        while let Some(open) = rest.find('<') {
            let candidate = &rest[open + 1..];
            match parse_tag(candidate) {
                Some((key, value, consumed)) => {
                    tags.insert(key.to_string(), value);
                    rest = &candidate[consumed..];
                }
                None => rest = candidate,
            }
        }

        Self { tags }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.tags.get(key)
    }

    /// Text value of a tag. Bare flags have no text.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.tags.get(key) {
            Some(MetaValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Parse one tag body following a `<`. Returns the key, its value and the
/// number of bytes consumed including the closing `>`.
///
/// The key ends at the first `<`, `>` or `:`. Without a colon, anything up
/// to the closing `>` is discarded and the tag is a flag, so `<a<b:c>` sets
/// `a` and never `b`.
fn parse_tag(input: &str) -> Option<(&str, MetaValue, usize)> {
    let key_len = input
        .find(|c: char| c == '<' || c == '>' || c == ':')
        .unwrap_or(input.len());
    if key_len == 0 {
        return None;
    }
    let key = &input[..key_len];
    let after_key = &input[key_len..];

    match after_key.strip_prefix(':') {
        Some(value_part) => {
            let close = value_part.find('>')?;
            let value = &value_part[..close];
            Some((key, MetaValue::Text(value.to_string()), key_len + 1 + close + 1))
        }
        None => {
            let close = after_key.find('>')?;
            Some((key, MetaValue::Flag, key_len + close + 1))
        }
    }
}
