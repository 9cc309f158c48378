//! Command: search the catalog and print a results table.
use anyhow::Result;

use crate::catalog::{Catalog, SearchHit, SideSupport};
use crate::logging::{Log, terminal_columns};

const HEADERS: [&str; 8] = [
    "Slug",
    "Name",
    "Author",
    "Description",
    "Downloads",
    "Follows",
    "Client",
    "Server",
];

/// Index of the column that shrinks to fit the terminal.
const DESCRIPTION: usize = 3;

/// Search the catalog for `query` and print the matching mods.
///
/// # Errors
///
/// Returns the catalog error if the request fails.
pub fn run(catalog: &dyn Catalog, query: &str, log: &dyn Log) -> Result<Vec<SearchHit>> {
    log.debug(&format!("searching for '{query}'"));
    let hits = catalog.search(query)?;
    if hits.is_empty() {
        log.info(&format!("no mods found for '{query}'"));
        return Ok(hits);
    }
    for line in render_table(&hits, terminal_columns()).lines() {
        log.info(line);
    }
    Ok(hits)
}

fn side(support: Option<SideSupport>) -> &'static str {
    support.map_or("?", SideSupport::symbol)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}", segments.join(&mid.to_string()))
}

fn row(cells: &[String], widths: &[usize], numeric: bool) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &w))| {
            if numeric && (i == 4 || i == 5) {
                format!("{cell:>w$}")
            } else {
                format!("{cell:<w$}")
            }
        })
        .collect();
    format!("│ {} │", padded.join(" │ "))
}

/// Render `hits` as a box-drawn table no wider than `width` columns.
///
/// Only the description column shrinks; it never drops below its header.
#[must_use]
pub fn render_table(hits: &[SearchHit], width: usize) -> String {
    let rows: Vec<Vec<String>> = hits
        .iter()
        .map(|hit| {
            vec![
                hit.slug.clone(),
                hit.title.clone(),
                hit.author.clone(),
                hit.description.clone(),
                hit.downloads.to_string(),
                hit.follows.to_string(),
                side(hit.client_side).to_string(),
                side(hit.server_side).to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for cells in &rows {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let overhead = 3 * HEADERS.len() + 1;
    let fixed: usize = widths
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != DESCRIPTION)
        .map(|(_, w)| w)
        .sum();
    let min_description = HEADERS[DESCRIPTION].len();
    if let Some(w) = widths.get_mut(DESCRIPTION) {
        let available = width.saturating_sub(fixed + overhead);
        *w = (*w).min(available).max(min_description);
    }
    let description_width = widths.get(DESCRIPTION).copied().unwrap_or(min_description);

    let headers: Vec<String> = HEADERS.iter().map(ToString::to_string).collect();
    let mut lines = vec![
        border(&widths, '┌', '┬', '┐'),
        row(&headers, &widths, false),
        border(&widths, '├', '┼', '┤'),
    ];
    for mut cells in rows {
        if let Some(cell) = cells.get_mut(DESCRIPTION) {
            *cell = truncate(cell, description_width);
        }
        lines.push(row(&cells, &widths, true));
    }
    lines.push(border(&widths, '└', '┴', '┘'));
    lines.join("\n")
}
