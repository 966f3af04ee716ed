//! Read new items from tab-separated text
//!
//! Rows are pasted straight from a spreadsheet, one item per line, without a
//! header. Columns, in order: name, maker, description, item number, link,
//! GTIN, details, comment, categories (comma-separated). Trailing columns may
//! be omitted.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

use crate::models::Item;

pub const COLUMNS: &[&str] = &[
    "name",
    "maker",
    "description",
    "itemNumber",
    "link",
    "gtin",
    "details",
    "comment",
    "categories",
];

/// Parse every non-empty row of `reader` into an uncreated item
pub fn parse_items<R: Read>(reader: R) -> Result<Vec<Item>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let row = idx + 1;
        let record = record.with_context(|| format!("Failed to read row {}", row))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() > COLUMNS.len() {
            bail!(
                "Row {} has {} columns, expected at most {}",
                row,
                record.len(),
                COLUMNS.len()
            );
        }
        items.push(item_from_record(&record).with_context(|| format!("Invalid row {}", row))?);
    }

    Ok(items)
}

fn item_from_record(record: &StringRecord) -> Result<Item> {
    let column = |idx: usize| {
        record
            .get(idx)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let Some(name) = column(0) else {
        bail!("Item name is required");
    };

    let categories: Vec<String> = column(8)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(Item {
        maker: column(1),
        description: column(2),
        item_number: column(3),
        link: column(4),
        gtin: column(5),
        details: column(6),
        comment: column(7),
        ..Item::new(name)
    }
    .with_categories(categories))
}
