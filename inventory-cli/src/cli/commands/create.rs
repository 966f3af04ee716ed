use anyhow::{Context, Result, bail};
use colored::*;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::api::ItemsBackend;
use crate::cli::output;
use crate::import;
use crate::store::ItemStore;

pub async fn handle<B: ItemsBackend>(store: &ItemStore<B>, file: &Path) -> Result<()> {
    let items = if file == Path::new("-") {
        import::parse_items(io::stdin().lock()).context("Failed to read items from stdin")?
    } else {
        let reader = File::open(file)
            .with_context(|| format!("Failed to open item file: {}", file.display()))?;
        import::parse_items(reader)
            .with_context(|| format!("Failed to read items from {}", file.display()))?
    };

    if items.is_empty() {
        bail!("No items to create");
    }

    let results = store.create_items(items).await;
    for item in &results {
        println!("{}", output::status_line(item));
    }

    let failed = results
        .iter()
        .filter(|item| item.syncstatus.as_ref().is_some_and(|s| s.is_error()))
        .count();
    let summary = format!("Created {} of {} items", results.len() - failed, results.len());
    if failed == 0 {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }
    Ok(())
}
