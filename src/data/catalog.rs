use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

use super::product_def::{ProductDefinition, ProductKind, RawProductDefinition};
use crate::error::DataError;

/// Item, weapon and armor tables, each indexed by id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<u32, ProductDefinition>,
    weapons: BTreeMap<u32, ProductDefinition>,
    armors: BTreeMap<u32, ProductDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all three product tables from `data_dir/{items,weapons,armors}`
    pub fn load_from_directory(&mut self, data_dir: &Path) -> Result<(), DataError> {
        for kind in ProductKind::ALL {
            let dir = data_dir.join(kind.dir_name());

            if !dir.exists() {
                warn!("Catalog directory does not exist: {:?}", dir);
                continue;
            }

            for (path, table) in super::load_toml_tables::<RawProductDefinition>(&dir)? {
                for (key, raw) in table {
                    let id = match key.trim().parse::<u32>() {
                        Ok(id) => id,
                        Err(_) => {
                            warn!("Skipping {} '{}' in {:?}: id is not a number", kind, key, path);
                            continue;
                        }
                    };
                    if self.contains(kind, id) {
                        warn!("Duplicate {} ID {} in {:?}, overwriting", kind, id, path);
                    }
                    self.insert(ProductDefinition::from_raw(kind, id, &raw));
                }
            }
        }

        info!(
            "Loaded {} items, {} weapons, {} armors",
            self.items.len(),
            self.weapons.len(),
            self.armors.len()
        );

        Ok(())
    }

    /// Add or replace a product
    pub fn insert(&mut self, product: ProductDefinition) {
        self.table_mut(product.kind).insert(product.id, product);
    }

    /// Get a product by kind and id
    pub fn get(&self, kind: ProductKind, id: u32) -> Option<&ProductDefinition> {
        self.table(kind).get(&id)
    }

    pub fn contains(&self, kind: ProductKind, id: u32) -> bool {
        self.table(kind).contains_key(&id)
    }

    /// All products of one kind, ordered by id
    pub fn all(&self, kind: ProductKind) -> impl Iterator<Item = &ProductDefinition> {
        self.table(kind).values()
    }

    /// Total number of products across all kinds
    pub fn len(&self) -> usize {
        self.items.len() + self.weapons.len() + self.armors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self, kind: ProductKind) -> &BTreeMap<u32, ProductDefinition> {
        match kind {
            ProductKind::Item => &self.items,
            ProductKind::Weapon => &self.weapons,
            ProductKind::Armor => &self.armors,
        }
    }

    fn table_mut(&mut self, kind: ProductKind) -> &mut BTreeMap<u32, ProductDefinition> {
        match kind {
            ProductKind::Item => &mut self.items,
            ProductKind::Weapon => &mut self.weapons,
            ProductKind::Armor => &mut self.armors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        std::fs::create_dir_all(dir).unwrap();
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_catalog_from_directory() {
        let temp_dir = TempDir::new().unwrap();

        write_file(&temp_dir.path().join("items"), "potions.toml", r#"
[1]
name = "Potion"
price = 50
note = "<stock:10>"

[2]
name = "Ether"

[elixir]
name = "Not an id"
"#);
        write_file(&temp_dir.path().join("weapons"), "swords.toml", r#"
[2]
name = "Sword"
price = 300
"#);

        let mut catalog = Catalog::new();
        catalog.load_from_directory(temp_dir.path()).unwrap();

        assert_eq!(catalog.len(), 3);

        let potion = catalog.get(ProductKind::Item, 1).unwrap();
        assert_eq!(potion.name, "Potion");
        assert_eq!(potion.price, 50);
        assert_eq!(potion.meta.text("stock"), Some("10"));

        let ether = catalog.get(ProductKind::Item, 2).unwrap();
        assert_eq!(ether.price, 0);
        assert!(ether.meta.is_empty());

        // Same id, different kind
        let sword = catalog.get(ProductKind::Weapon, 2).unwrap();
        assert_eq!(sword.name, "Sword");
        assert!(catalog.get(ProductKind::Armor, 2).is_none());
    }

    #[test]
    fn test_missing_directories_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = Catalog::new();
        catalog.load_from_directory(temp_dir.path()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp_dir = TempDir::new().unwrap();
        write_file(&temp_dir.path().join("armors"), "broken.toml", "[1\nname = ");

        let mut catalog = Catalog::new();
        let err = catalog.load_from_directory(temp_dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
