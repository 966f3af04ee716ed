//! Terminal rendering for items

use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::models::{Instance, Item, SyncState};

const MAX_COLUMN_WIDTH: usize = 40;

const HEADERS: [&str; 5] = ["ID", "Name", "Maker", "Categories", "Comment"];

fn row(item: &Item) -> [String; 5] {
    [
        item.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        item.name.clone(),
        item.maker.clone().unwrap_or_default(),
        item.category_names().collect::<Vec<_>>().join(", "),
        item.comment.clone().unwrap_or_default(),
    ]
}

/// Cut `text` to at most `width` display columns, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.to_string().width();
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Render items as an aligned table
pub fn render_table<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a Item>,
{
    let rows: Vec<[String; 5]> = items
        .into_iter()
        .map(|item| row(item).map(|cell| truncate(&cell, MAX_COLUMN_WIDTH)))
        .collect();

    let mut widths = HEADERS.map(|h| h.width());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad(h, w).bold().to_string())
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for cells in &rows {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (cell, w))| {
                let padded = pad(cell, w);
                if idx == 0 {
                    padded.cyan().to_string()
                } else {
                    padded
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    out
}

pub fn print_items<'a, I>(items: I)
where
    I: IntoIterator<Item = &'a Item>,
{
    print!("{}", render_table(items));
}

/// One `label: value` line per populated field
pub fn print_details(item: &Item) {
    let id = item.id.as_ref().map(ToString::to_string).unwrap_or_default();
    println!("{} {}", item.name.bold(), format!("#{}", id).dimmed());

    let fields = [
        ("Maker", item.maker.as_deref()),
        ("Description", item.description.as_deref()),
        ("Item number", item.item_number.as_deref()),
        ("Link", item.link.as_deref()),
        ("GTIN", item.gtin.as_deref()),
        ("Details", item.details.as_deref()),
        ("Comment", item.comment.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            println!("  {:<12} {}", format!("{}:", label).dimmed(), value);
        }
    }

    if !item.categories.is_empty() {
        let names: Vec<&str> = item.category_names().collect();
        println!("  {:<12} {}", "Categories:".dimmed(), names.join(", "));
    }

    for instance in &item.instances {
        println!("  {:<12} {}", "Instance:".dimmed(), instance_line(instance));
    }
}

/// `count x place`, followed by the vendor when known
pub fn instance_line(instance: &Instance) -> String {
    let count = instance.count.as_deref().unwrap_or("?");
    let place = instance
        .place
        .as_ref()
        .map(|place| place.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("-");
    match instance.vendor.as_deref().filter(|v| !v.is_empty()) {
        Some(vendor) => format!("{} x {} (from {})", count, place, vendor),
        None => format!("{} x {}", count, place),
    }
}

/// Outcome line for a create attempt
pub fn status_line(item: &Item) -> String {
    match &item.syncstatus {
        Some(status) if status.state == SyncState::Created => {
            format!("{} {}  {}", "✓".green(), item.name, status.message.dimmed())
        }
        Some(status) => format!("{} {}  {}", "✗".red(), item.name, status.message.red()),
        None => format!("  {}", item.name),
    }
}
