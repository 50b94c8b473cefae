use serde::{Deserialize, Serialize};

use super::notes::Metadata;

// ============================================================================
// Product Kinds
// ============================================================================

/// Catalog a product belongs to. Ids are only unique within one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Consumable item
    Item,
    Weapon,
    Armor,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [ProductKind::Item, ProductKind::Weapon, ProductKind::Armor];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Item => "item",
            ProductKind::Weapon => "weapon",
            ProductKind::Armor => "armor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "item" => Some(ProductKind::Item),
            "weapon" => Some(ProductKind::Weapon),
            "armor" => Some(ProductKind::Armor),
            _ => None,
        }
    }

    /// Data subdirectory holding this kind's catalog files
    pub fn dir_name(&self) -> &'static str {
        match self {
            ProductKind::Item => "items",
            ProductKind::Weapon => "weapons",
            ProductKind::Armor => "armors",
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Raw Product Definition (direct from TOML)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawProductDefinition {
    pub name: Option<String>,
    pub price: Option<u32>,
    #[serde(default)]
    pub note: String,
}

// ============================================================================
// Resolved Product Definition
// ============================================================================

#[derive(Debug, Clone)]
pub struct ProductDefinition {
    pub kind: ProductKind,
    pub id: u32,
    pub name: String,
    pub price: u32,
    pub note: String,
    pub meta: Metadata,
}

impl ProductDefinition {
    pub fn new(kind: ProductKind, id: u32, name: &str, note: &str) -> Self {
        Self {
            kind,
            id,
            name: name.to_string(),
            price: 0,
            note: note.to_string(),
            meta: Metadata::parse(note),
        }
    }

    pub fn from_raw(kind: ProductKind, id: u32, raw: &RawProductDefinition) -> Self {
        Self {
            kind,
            id,
            name: raw.name.clone()
                .unwrap_or_else(|| format!("{}_{}", kind, id)),
            price: raw.price.unwrap_or(0),
            note: raw.note.clone(),
            meta: Metadata::parse(&raw.note),
        }
    }
}
