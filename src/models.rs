//! Core data models for the seed tables.
//!
//! A [`Category`] is declared by a header line in the outline; every
//! [`Item`] points back at the category that owned it when it was read.

use chrono::NaiveDateTime;

/// Column header of `categories.csv`.
pub const CATEGORY_COLUMNS: [&str; 2] = ["id", "name"];

/// Column header of `items.csv`.
pub const ITEM_COLUMNS: [&str; 7] = [
    "id",
    "code",
    "name",
    "description",
    "categoryId",
    "createdAt",
    "updatedAt",
];

/// A category row, created once per header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// An item row attributed to the most recently declared category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub category_id: u64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Both tables produced by a single pass over the outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedTables {
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
}

impl Category {
    pub fn to_record(&self) -> [String; 2] {
        [self.id.to_string(), self.name.clone()]
    }
}

impl Item {
    pub fn to_record(&self) -> [String; 7] {
        [
            self.id.to_string(),
            self.code.clone(),
            self.name.clone(),
            self.description.clone(),
            self.category_id.to_string(),
            render_timestamp(&self.created_at),
            render_timestamp(&self.updated_at),
        ]
    }
}

/// ISO-8601 local date-time with second precision and no offset,
/// e.g. `2024-06-01T14:32:07`.
pub fn render_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}
