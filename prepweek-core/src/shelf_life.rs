//! Ingredient shelf-life reference data.

use serde::{Deserialize, Serialize};

/// Coarse freshness class of an ingredient category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Short,
    Medium,
    Long,
}

impl Freshness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Short => "short",
            Freshness::Medium => "medium",
            Freshness::Long => "long",
        }
    }

    /// Short and medium categories constrain when groceries should be bought.
    pub fn is_perishable(&self) -> bool {
        matches!(self, Freshness::Short | Freshness::Medium)
    }
}

/// Days an ingredient stays usable after purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLifeEntry {
    #[serde(rename = "category")]
    pub freshness: Freshness,
    pub min_days: u32,
    pub max_days: u32,
}

impl ShelfLifeEntry {
    const fn new(freshness: Freshness, min_days: u32, max_days: u32) -> Self {
        Self {
            freshness,
            min_days,
            max_days,
        }
    }
}

/// Fallback for categories not present in the table.
pub const DEFAULT_SHELF_LIFE: ShelfLifeEntry = ShelfLifeEntry::new(Freshness::Medium, 4, 6);

const STANDARD_ENTRIES: &[(&str, ShelfLifeEntry)] = &[
    ("Seafood", ShelfLifeEntry::new(Freshness::Short, 1, 2)),
    ("Poultry", ShelfLifeEntry::new(Freshness::Short, 1, 2)),
    ("Meat", ShelfLifeEntry::new(Freshness::Short, 2, 3)),
    ("Fresh Herbs", ShelfLifeEntry::new(Freshness::Short, 3, 5)),
    ("Produce", ShelfLifeEntry::new(Freshness::Short, 3, 7)),
    ("Bakery", ShelfLifeEntry::new(Freshness::Short, 2, 4)),
    ("Deli", ShelfLifeEntry::new(Freshness::Medium, 3, 5)),
    ("Dairy", ShelfLifeEntry::new(Freshness::Medium, 5, 10)),
    ("Refrigerated", ShelfLifeEntry::new(Freshness::Medium, 5, 10)),
    ("Eggs", ShelfLifeEntry::new(Freshness::Long, 21, 35)),
    ("Frozen", ShelfLifeEntry::new(Freshness::Long, 30, 180)),
    ("Condiments", ShelfLifeEntry::new(Freshness::Long, 30, 180)),
    ("Beverages", ShelfLifeEntry::new(Freshness::Long, 30, 180)),
    ("Baking", ShelfLifeEntry::new(Freshness::Long, 90, 365)),
    ("Grains", ShelfLifeEntry::new(Freshness::Long, 180, 365)),
    ("Pantry", ShelfLifeEntry::new(Freshness::Long, 180, 365)),
    ("Canned Goods", ShelfLifeEntry::new(Freshness::Long, 365, 730)),
    ("Spices", ShelfLifeEntry::new(Freshness::Long, 365, 730)),
];

/// Immutable category -> shelf life table.
#[derive(Debug, Clone, Copy)]
pub struct ShelfLifeTable {
    entries: &'static [(&'static str, ShelfLifeEntry)],
}

impl ShelfLifeTable {
    pub const STANDARD: ShelfLifeTable = ShelfLifeTable {
        entries: STANDARD_ENTRIES,
    };

    pub const fn new(entries: &'static [(&'static str, ShelfLifeEntry)]) -> Self {
        Self { entries }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, category: &str) -> Option<ShelfLifeEntry> {
        self.entries
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, entry)| *entry)
    }

    /// Lookup with the medium 4-6 day fallback.
    pub fn get(&self, category: &str) -> ShelfLifeEntry {
        self.lookup(category).unwrap_or(DEFAULT_SHELF_LIFE)
    }

    pub fn categories(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

impl Default for ShelfLifeTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Look up a category in the standard table.
pub fn get_shelf_life(category: &str) -> ShelfLifeEntry {
    ShelfLifeTable::STANDARD.get(category)
}
