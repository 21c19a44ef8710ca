//! Single-pass table builder.
//!
//! Walks classified outline lines once and produces the category and item
//! tables. All mutable state lives in [`ScanState`]; the timestamp is passed
//! in so output is deterministic under test.

use chrono::NaiveDateTime;

use crate::classify::Line;
use crate::code::item_code;
use crate::models::{Category, Item, SeedTables};

/// Where a classified line lands in the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A new category row with this id.
    Header(u64),
    /// An item row with its assigned id, owned by `category_id`.
    ItemFor { category_id: u64, item_id: u64 },
    /// An item line seen before any header; dropped.
    Orphan,
}

/// Counters and the current-category pointer threaded through the scan.
#[derive(Debug, Clone)]
pub struct ScanState {
    next_category_id: u64,
    next_item_id: u64,
    current: Option<Category>,
}

impl Default for ScanState {
    fn default() -> Self {
        Self {
            next_category_id: 1,
            next_item_id: 1,
            current: None,
        }
    }
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide where `line` goes and advance the counters accordingly.
    ///
    /// Headers always get the next category id and become current. Items
    /// take the next item id only when a category is current, so orphans
    /// never consume an id.
    pub fn classify(&mut self, line: &Line) -> Slot {
        match line {
            Line::Header(name) => {
                let id = self.next_category_id;
                self.next_category_id += 1;
                self.current = Some(Category {
                    id,
                    name: name.clone(),
                });
                Slot::Header(id)
            }
            Line::Item(_) => match self.current.as_ref().map(|c| c.id) {
                Some(category_id) => {
                    let item_id = self.next_item_id;
                    self.next_item_id += 1;
                    Slot::ItemFor {
                        category_id,
                        item_id,
                    }
                }
                None => Slot::Orphan,
            },
        }
    }

    pub fn current(&self) -> Option<&Category> {
        self.current.as_ref()
    }
}

/// Counts gathered while building, for progress output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub categories: usize,
    pub items: usize,
    pub orphans_dropped: usize,
}

/// Build both tables from classified lines, stamping every item with `now`.
pub fn build_tables(lines: &[Line], now: NaiveDateTime) -> (SeedTables, BuildReport) {
    let mut state = ScanState::new();
    let mut tables = SeedTables::default();
    let mut report = BuildReport::default();

    for line in lines {
        match state.classify(line) {
            Slot::Header(_) => tables.categories.extend(state.current().cloned()),
            Slot::ItemFor {
                category_id,
                item_id: id,
            } => {
                let owner = state.current().map(|c| c.name.as_str()).unwrap_or_default();
                tables.items.push(Item {
                    id,
                    code: item_code(owner, id),
                    name: line.text().to_string(),
                    description: String::new(),
                    category_id,
                    created_at: now,
                    updated_at: now,
                });
            }
            Slot::Orphan => report.orphans_dropped += 1,
        }
    }

    report.categories = tables.categories.len();
    report.items = tables.items.len();
    (tables, report)
}
