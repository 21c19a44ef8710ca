//! # Inventory Seed
//!
//! Converts a flat text outline of categories and items into two relational
//! CSV tables and bundles them into a zip archive for seeding a database.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────┐   ┌─────────┐   ┌──────────┐
//! │ outline.txt  │──▶│ classify │──▶│ tables  │──▶│ CSV+zip  │
//! │ "* " headers │   │ per line │   │ 1 pass  │   │ BOM, CRLF│
//! └──────────────┘   └──────────┘   └─────────┘   └──────────┘
//! ```
//!
//! ## Input format
//!
//! ```text
//! * Electronics
//! Laptop
//! Mouse
//! * Books
//! Novel
//! ```
//!
//! yields categories `(1, Electronics)`, `(2, Books)` and items
//! `EL001 Laptop`, `EL002 Mouse`, `BO003 Novel`.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`classify`] | Header/item line classification |
//! | [`code`] | Item code derivation |
//! | [`tables`] | Single-pass table builder |
//! | [`models`] | Row types and column headers |
//! | [`export`] | CSV serialization |
//! | [`archive`] | Zip packaging |
//! | [`convert`] | End-to-end pipeline |
//! | [`config`] | TOML configuration |
//! | [`progress`] | Stderr progress reporting |

pub mod archive;
pub mod classify;
pub mod code;
pub mod config;
pub mod convert;
pub mod export;
pub mod models;
pub mod progress;
pub mod tables;
