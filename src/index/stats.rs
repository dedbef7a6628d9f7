use crate::index::doc_index::DocIndex;
use anyhow::Result;
use std::path::Path;

/// Display index statistics
pub fn show_stats(index: &DocIndex, source: &Path) -> Result<()> {
    let stats = index.stats();

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Source:           {}", source.display());
    if let Ok(metadata) = std::fs::metadata(source) {
        println!("Source size:      {}", format_size(metadata.len()));
    }
    println!("Records:          {}", stats.records);
    println!("Pages:            {}", stats.pages);
    println!("Sections:         {}", stats.sections);
    println!("Empty text:       {}", stats.empty_text);
    println!("Text volume:      {}", format_size(stats.text_bytes as u64));

    let sorted = text_by_page(index);
    if !sorted.is_empty() {
        println!();
        println!("Text by page:");
        for (page, bytes) in sorted.iter().take(15) {
            println!("  {:40} {}", page, format_size(*bytes as u64));
        }

        if sorted.len() > 15 {
            println!("  ... and {} more", sorted.len() - 15);
        }
    }

    Ok(())
}

/// Text bytes per page name, largest first; ties keep load order
fn text_by_page(index: &DocIndex) -> Vec<(&str, usize)> {
    let mut totals: Vec<(&str, usize)> = Vec::new();
    for record in index {
        match totals.iter_mut().find(|(page, _)| *page == record.page) {
            Some((_, bytes)) => *bytes += record.text.len(),
            None => totals.push((record.page.as_str(), record.text.len())),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
