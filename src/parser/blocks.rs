use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[\s:|-]*-[\s:|-]*$").unwrap());

pub const ARCH_TOKENS: &[&str] = &["x64", "x86", "ARM64"];

/// A single line of section content, classified for table extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `|:---|:---|` style rule under a table header.
    Separator,
    /// Table header row, first cell `Language`.
    Header,
    /// Pipe row mentioning one of the architecture tokens. Cells are trimmed, empties dropped.
    Row(Vec<String>),
    Text(String),
    Empty,
}

/// Classify every line of `content`. Accepts LF and CRLF.
pub fn classify_lines(content: &str) -> Vec<Block> {
    content.lines().map(classify_line).collect()
}

fn classify_line(raw: &str) -> Block {
    let line = raw.trim();

    if line.is_empty() {
        return Block::Empty;
    }

    if SEPARATOR_RE.is_match(line) {
        return Block::Separator;
    }

    if line.contains('|') {
        let cells = split_cells(line);
        if cells.first().is_some_and(|c| c == "Language") {
            return Block::Header;
        }
        if ARCH_TOKENS.iter().any(|arch| line.contains(arch)) {
            return Block::Row(cells);
        }
    }

    Block::Text(line.to_string())
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}
