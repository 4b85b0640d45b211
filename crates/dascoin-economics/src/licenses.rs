// crates/dascoin-economics/src/licenses.rs
//
// In-memory license catalogue.
//
// The default catalogue carries six license tiers, each as a regular and a
// chartered template. A chartered template grants eleven times the regular
// tier's cycles (standard: 100, standard-charter: 1100).

use std::collections::BTreeMap;

use dascoin_core::license::{LicenseKind, LicenseType};
use dascoin_core::traits::LicenseCatalog;
use dascoin_core::types::{LicenseTypeId, ShareType, DEFAULT_FREQUENCY};

const DEFAULT_TIERS: [(&str, ShareType); 6] = [
    ("standard", 100),
    ("manager", 500),
    ("pro", 2_000),
    ("executive", 5_000),
    ("vice-president", 15_000),
    ("president", 50_000),
];

const CHARTER_MULTIPLIER: ShareType = 11;

/// License templates indexed by id and by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLicenseCatalog {
    by_id: BTreeMap<LicenseTypeId, LicenseType>,
    by_name: BTreeMap<String, LicenseTypeId>,
}

impl InMemoryLicenseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalogue from explicit templates. Later duplicates of a name
    /// or id replace earlier ones.
    pub fn from_templates(templates: impl IntoIterator<Item = LicenseType>) -> Self {
        let mut catalog = Self::new();
        for template in templates {
            catalog.insert(template);
        }
        catalog
    }

    /// The catalogue every chain starts with.
    pub fn with_defaults() -> Self {
        let mut templates = Vec::with_capacity(DEFAULT_TIERS.len() * 2);
        let mut next_id = 0u64;
        for (name, amount) in DEFAULT_TIERS {
            templates.push(LicenseType {
                id: LicenseTypeId(next_id),
                name: name.to_string(),
                kind: LicenseKind::Regular,
                amount,
                bonus_percentage: 0,
                frequency_lock: DEFAULT_FREQUENCY,
            });
            templates.push(LicenseType {
                id: LicenseTypeId(next_id + 1),
                name: format!("{}-charter", name),
                kind: LicenseKind::Chartered,
                amount: amount * CHARTER_MULTIPLIER,
                bonus_percentage: 0,
                frequency_lock: DEFAULT_FREQUENCY,
            });
            next_id += 2;
        }
        Self::from_templates(templates)
    }

    pub fn insert(&mut self, template: LicenseType) {
        if let Some(old) = self.by_id.get(&template.id) {
            self.by_name.remove(&old.name);
        }
        self.by_name.insert(template.name.clone(), template.id);
        self.by_id.insert(template.id, template);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl LicenseCatalog for InMemoryLicenseCatalog {
    fn lookup(&self, name: &str) -> Option<&LicenseType> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = InMemoryLicenseCatalog::with_defaults();
        assert_eq!(catalog.len(), 12);

        let charter = catalog.lookup("standard-charter").unwrap();
        assert_eq!(charter.amount, 1_100);
        assert_eq!(charter.kind, LicenseKind::Chartered);
        assert_eq!(charter.name, "standard-charter");

        let standard = catalog.lookup("standard").unwrap();
        assert_eq!(standard.amount, 100);
        assert_eq!(standard.kind, LicenseKind::Regular);
    }

    #[test]
    fn test_unknown_name() {
        let catalog = InMemoryLicenseCatalog::with_defaults();
        assert!(catalog.lookup("platinum").is_none());
    }

    #[test]
    fn test_insert_replaces_by_id() {
        let mut catalog = InMemoryLicenseCatalog::new();
        let mut template = LicenseType {
            id: LicenseTypeId(1),
            name: "old".to_string(),
            kind: LicenseKind::Regular,
            amount: 10,
            bonus_percentage: 0,
            frequency_lock: 200,
        };
        catalog.insert(template.clone());
        template.name = "new".to_string();
        catalog.insert(template);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup("old").is_none());
        assert!(catalog.lookup("new").is_some());
    }
}
