//! Output formatting helpers for human-readable and JSON output.

use comicstore::{Comic, User};
use serde_json::{Value, json};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .take(col_count)
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
}

/// JSON view of a user. The password hash is never printed.
pub fn user_json(user: &User) -> Value {
    json!({
        "username": user.username(),
        "variant": user.kind().tag(),
        "email": user.email(),
    })
}

pub fn comic_json(comic: &Comic) -> Value {
    json!({
        "uri": comic.uri(),
        "canonicalUri": comic.canonical_uri(),
        "name": comic.name(),
        "description": comic.description(),
        "creator": comic.creator(),
        "viewlist": comic.viewlist(),
        "editlist": comic.editlist(),
        "adminlist": comic.adminlist(),
        "pages": comic.pages(),
        "panelMap": comic.panel_map(),
    })
}

pub fn print_user(user: &User, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            println!("Username:  {}", user.username());
            println!("Variant:   {}", user.kind());
            println!("Email:     {}", user.email());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&user_json(user))?),
    }
    Ok(())
}

pub fn print_comic(comic: &Comic, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            println!("Name:        {}", comic.name());
            println!("Uri:         {}", comic.canonical_uri());
            println!("Creator:     {}", comic.creator());
            if !comic.description().is_empty() {
                println!("Description: {}", comic.description());
            }
            println!("Viewers:     {}", comic.viewlist().join(", "));
            println!("Editors:     {}", comic.editlist().join(", "));
            println!("Admins:      {}", comic.adminlist().join(", "));
            println!("Pages:       {}", comic.page_count());

            let mut rows = Vec::new();
            for page_number in 1..=comic.page_count() {
                for (position, id) in comic.pages()[page_number - 1].iter().enumerate() {
                    rows.push(vec![
                        page_number.to_string(),
                        (position + 1).to_string(),
                        id.to_string(),
                        comic.panel(*id).unwrap_or("?").to_string(),
                    ]);
                }
            }
            if !rows.is_empty() {
                println!();
                print_table(&["PAGE", "POS", "PANEL", "LOCATOR"], &rows);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&comic_json(comic))?),
    }
    Ok(())
}
