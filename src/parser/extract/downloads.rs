use std::sync::LazyLock;

use regex::Regex;

use crate::models::DownloadRecord;
use crate::parser::blocks::Block;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Turn table rows into download records, in row order.
///
/// Rows with fewer than three cells or no `[file](url)` link in the third cell are skipped.
pub fn extract(blocks: &[Block]) -> Vec<DownloadRecord> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Row(cells) if cells.len() >= 3 => {
                let caps = LINK_RE.captures(&cells[2])?;
                Some(DownloadRecord {
                    language: cells[0].clone(),
                    architecture: cells[1].clone(),
                    filename: caps[1].to_string(),
                    url: caps[2].to_string(),
                })
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::classify_lines;

    fn downloads(md: &str) -> Vec<DownloadRecord> {
        extract(&classify_lines(md))
    }

    #[test]
    fn rows_in_order() {
        let md = "\
| Language | Arch | Link |
|:---|:---|:---|
| English | x64 | [Win11_English_x64.iso](https://example.com/en.iso) |
| Arabic | x64 | [Win11_Arabic_x64.iso](https://example.com/ar.iso) |
| English | ARM64 | [Win11_English_Arm64.iso](https://example.com/en-arm.iso) |
";
        let d = downloads(md);
        assert_eq!(d.len(), 3);
        assert_eq!(d[0].language, "English");
        assert_eq!(d[0].architecture, "x64");
        assert_eq!(d[0].filename, "Win11_English_x64.iso");
        assert_eq!(d[0].url, "https://example.com/en.iso");
        assert_eq!(d[1].language, "Arabic");
        assert_eq!(d[2].architecture, "ARM64");
    }

    #[test]
    fn rows_without_link_or_arch_skipped() {
        let md = "\
| English | x64 | not available |
| English | ia64 | [a.iso](https://example.com/a.iso) |
| English | x86 |
| French | x86 | [fr.iso](https://example.com/fr.iso) |
";
        let d = downloads(md);
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].language, "French");
    }

    #[test]
    fn url_taken_as_is() {
        let d = downloads("| English | x64 | [weird](not a url at all) |");
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].url, "not a url at all");
    }

    #[test]
    fn extra_cells_ignored() {
        let d = downloads("| English | x64 | [a.iso](https://e.com/a.iso) | 5.4 GB | sha1 |");
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].filename, "a.iso");
    }

    #[test]
    fn no_table() {
        assert!(downloads("Just some prose mentioning x64.").is_empty());
    }
}
