//! Stock Resolver
//!
//! Reads a product's maximum stock from its catalog note.

use crate::data::ProductDefinition;

/// Resolves configured max stock from a product's `<stock:N>` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockResolver<'a> {
    note_name: &'a str,
}

impl<'a> StockResolver<'a> {
    pub fn new(note_name: &'a str) -> Self {
        Self { note_name }
    }

    /// Max stock, or `None` for unlimited. A missing, bare, negative or
    /// non-integer tag counts as unlimited.
    pub fn max_stock(&self, product: &ProductDefinition) -> Option<u32> {
        product
            .meta
            .text(self.note_name)
            .and_then(|value| value.trim().parse::<u32>().ok())
    }
}
