//! CSV serialization of the seed tables.
//!
//! Each file starts with a UTF-8 byte-order mark so spreadsheet tools detect
//! the encoding, then a fixed header row, then one record per row. Quoting is
//! minimal and records end in CRLF.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::{SeedTables, CATEGORY_COLUMNS, ITEM_COLUMNS};

/// UTF-8 byte-order mark written at the start of every CSV.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write one table (BOM, header, rows) to any writer.
pub fn write_table_to<W, R, I>(mut writer: W, header: &[&str], rows: I) -> Result<W>
where
    W: Write,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
    I: IntoIterator<Item = R>,
{
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;

    csv_writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e.error()))
}

/// Write one table to `path`, replacing any existing file.
pub fn write_table<R, I>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
    I: IntoIterator<Item = R>,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = write_table_to(BufWriter::new(file), header, rows)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}

/// `categories.csv` contents as bytes.
pub fn render_categories_csv(tables: &SeedTables) -> Result<Vec<u8>> {
    write_table_to(
        Vec::new(),
        &CATEGORY_COLUMNS,
        tables.categories.iter().map(|c| c.to_record()),
    )
}

/// `items.csv` contents as bytes.
pub fn render_items_csv(tables: &SeedTables) -> Result<Vec<u8>> {
    write_table_to(
        Vec::new(),
        &ITEM_COLUMNS,
        tables.items.iter().map(|i| i.to_record()),
    )
}

/// Write both tables into `dir` under the given file names.
///
/// Returns the paths written, categories first.
pub fn write_tables(
    dir: &Path,
    categories_file: &str,
    items_file: &str,
    tables: &SeedTables,
) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let categories_path = dir.join(categories_file);
    write_table(
        &categories_path,
        &CATEGORY_COLUMNS,
        tables.categories.iter().map(|c| c.to_record()),
    )?;

    let items_path = dir.join(items_file);
    write_table(
        &items_path,
        &ITEM_COLUMNS,
        tables.items.iter().map(|i| i.to_record()),
    )?;

    Ok((categories_path, items_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Item};
    use chrono::NaiveDate;

    fn tables() -> SeedTables {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(14, 32, 7)
            .unwrap();
        SeedTables {
            categories: vec![Category {
                id: 1,
                name: "Books, Comics & \"Zines\"".to_string(),
            }],
            items: vec![Item {
                id: 1,
                code: "BC001".to_string(),
                name: "Café au lait, 2nd ed.".to_string(),
                description: String::new(),
                category_id: 1,
                created_at: now,
                updated_at: now,
            }],
        }
    }

    #[test]
    fn categories_csv_has_bom_header_and_quoting() {
        let bytes = render_categories_csv(&tables()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, "id,name\r\n1,\"Books, Comics & \"\"Zines\"\"\"\r\n");
    }

    #[test]
    fn items_csv_keeps_empty_description() {
        let bytes = render_items_csv(&tables()).unwrap();
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(
            text,
            "id,code,name,description,categoryId,createdAt,updatedAt\r\n\
             1,BC001,\"Café au lait, 2nd ed.\",,1,2024-06-01T14:32:07,2024-06-01T14:32:07\r\n"
        );
    }

    #[test]
    fn empty_tables_still_get_headers() {
        let bytes = render_items_csv(&SeedTables::default()).unwrap();
        assert_eq!(
            &bytes[UTF8_BOM.len()..],
            b"id,code,name,description,categoryId,createdAt,updatedAt\r\n"
        );
    }

    #[test]
    fn every_record_ends_in_crlf() {
        let bytes = render_categories_csv(&SeedTables {
            categories: vec![
                Category {
                    id: 1,
                    name: "Electronics".to_string(),
                },
                Category {
                    id: 2,
                    name: "Books".to_string(),
                },
            ],
            items: Vec::new(),
        })
        .unwrap();
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, "id,name\r\n1,Electronics\r\n2,Books\r\n");
        assert_eq!(text.matches('\n').count(), text.matches("\r\n").count());
    }

    #[test]
    fn files_match_rendered_bytes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let data = tables();
        let (cat_path, item_path) =
            write_tables(tmp.path(), "categories.csv", "items.csv", &data).unwrap();
        assert_eq!(
            std::fs::read(cat_path).unwrap(),
            render_categories_csv(&data).unwrap()
        );
        assert_eq!(
            std::fs::read(item_path).unwrap(),
            render_items_csv(&data).unwrap()
        );
    }
}
