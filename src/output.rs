//! Output formatting for search results and records

use crate::index::doc_index::DocIndex;
use crate::index::types::DocumentRecord;
use crate::query::executor::{SearchMatch, SearchResults};
use crate::query::snippet::Snippet;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print search results, one block per match
pub fn print_matches(results: &SearchResults<'_>, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_matches(&mut stdout, results)
}

/// Write search results to any color-capable writer
pub fn write_matches<W: WriteColor>(out: &mut W, results: &SearchResults<'_>) -> io::Result<()> {
    for (i, m) in results.matches.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_match(out, m)?;
    }

    if results.is_truncated() {
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        writeln!(
            out,
            "-- showing {} of {} matches",
            results.matches.len(),
            results.total
        )?;
        out.reset()?;
    }

    Ok(())
}

fn write_match<W: WriteColor>(out: &mut W, m: &SearchMatch<'_>) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    writeln!(out, "{}", m.record.location)?;
    out.reset()?;

    write_heading(out, m.record)?;

    if let Some(snippet) = &m.snippet {
        write!(out, "    ")?;
        write_snippet(out, snippet)?;
        writeln!(out)?;
    }

    Ok(())
}

fn write_heading<W: WriteColor>(out: &mut W, record: &DocumentRecord) -> io::Result<()> {
    write!(out, "  ")?;
    out.set_color(ColorSpec::new().set_bold(true))?;
    if record.is_page() || record.page == record.title {
        write!(out, "{}", record.title)?;
    } else {
        write!(out, "{} › {}", record.page, record.title)?;
    }
    out.reset()?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, " [{}]", record.category)?;
    out.reset()
}

/// Write a snippet with its match highlighted
fn write_snippet<W: WriteColor>(out: &mut W, snippet: &Snippet) -> io::Result<()> {
    let text = &snippet.text;
    let start = snippet.match_start.min(text.len());
    let end = snippet.match_end.min(text.len());

    // Text before match
    if start > 0 {
        write!(out, "{}", &text[..start])?;
    }

    // The match itself (highlighted)
    if end > start {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", &text[start..end])?;
        out.reset()?;
    }

    // Text after match
    if end < text.len() {
        write!(out, "{}", &text[end.max(start)..])?;
    }

    Ok(())
}

/// Print search results as one JSON document
pub fn print_matches_json(results: &SearchResults<'_>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, results)?;
    writeln!(lock)
}

/// Print a full record
pub fn print_record(record: &DocumentRecord, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_record(&mut stdout, record)
}

pub fn write_record<W: WriteColor>(out: &mut W, record: &DocumentRecord) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    writeln!(out, "{}", record.location)?;
    out.reset()?;

    write_heading(out, record)?;

    if !record.text.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", record.text)?;
    }

    Ok(())
}

/// Print the page/section tree in load order
pub fn print_outline(index: &DocIndex, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_outline(&mut stdout, index)
}

pub fn write_outline<W: WriteColor>(out: &mut W, index: &DocIndex) -> io::Result<()> {
    let mut current_page: Option<&str> = None;

    for record in index {
        if current_page != Some(record.page.as_str()) {
            out.set_color(ColorSpec::new().set_bold(true))?;
            writeln!(out, "{}", record.page)?;
            out.reset()?;
            current_page = Some(record.page.as_str());
        }

        if record.is_section() && record.title != record.page {
            write!(out, "  {} ", record.title)?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            writeln!(out, "{}", record.location)?;
            out.reset()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::Category;
    use crate::query::{parse_query, QueryExecutor};
    use termcolor::{Buffer, NoColor};

    fn index() -> DocIndex {
        DocIndex::load(vec![
            DocumentRecord::new("#", "Home", "Home", Category::Page, ""),
            DocumentRecord::new("setup/#", "Setup", "Setup", Category::Page, ""),
            DocumentRecord::new("setup/#Setup-1", "Setup", "Setup", Category::Section, "Overview"),
            DocumentRecord::new(
                "setup/#Drivers-1",
                "Setup",
                "Drivers",
                Category::Section,
                "install the CUDA drivers",
            ),
        ])
        .unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>,
    {
        let mut out = NoColor::new(Vec::new());
        f(&mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_write_matches_plain() {
        let index = index();
        let results = QueryExecutor::new(&index).execute(&parse_query("cuda"));
        let text = render(|out| write_matches(out, &results));

        assert_eq!(
            text,
            "setup/#Drivers-1\n  Setup › Drivers [section]\n    install the CUDA drivers\n"
        );
    }

    #[test]
    fn test_write_matches_truncated_footer() {
        let index = index();
        let results = QueryExecutor::new(&index).execute(&parse_query("top:1 setup"));
        let text = render(|out| write_matches(out, &results));

        assert!(text.starts_with("setup/#\n  Setup [page]\n"));
        assert!(text.ends_with("-- showing 1 of 2 matches\n"));
    }

    #[test]
    fn test_write_matches_colored_highlight() {
        let index = index();
        let results = QueryExecutor::new(&index).execute(&parse_query("cuda"));
        let mut buffer = Buffer::ansi();
        write_matches(&mut buffer, &results).unwrap();
        let text = String::from_utf8(buffer.into_inner()).unwrap();

        assert!(text.contains("\x1b["));
        assert!(text.contains("CUDA"));
    }

    #[test]
    fn test_write_record() {
        let index = index();
        let record = index.get("setup/#Drivers-1").unwrap();
        let text = render(|out| write_record(out, record));
        assert_eq!(
            text,
            "setup/#Drivers-1\n  Setup › Drivers [section]\n\ninstall the CUDA drivers\n"
        );
    }

    #[test]
    fn test_write_outline() {
        let index = index();
        let text = render(|out| write_outline(out, &index));
        assert_eq!(text, "Home\nSetup\n  Drivers setup/#Drivers-1\n");
    }
}
