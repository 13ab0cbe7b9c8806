use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static TAB_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<TabItem\b([^>]*)>(.*?)</TabItem>").unwrap());
static VALUE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bvalue="([^"]+)""#).unwrap());
static LABEL_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\blabel="([^"]+)""#).unwrap());
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mR)^## (.+)$").unwrap());
static OFFICE_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^## (Office \d{4})[ \t]*$").unwrap());

/// Tabs with this marker in their value or label are index tabs, not versions.
const OTHER_VERSIONS: &str = "Other Versions";

/// A named slice of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub name: String,
    pub label: String,
    pub body: &'a str,
}

/// Split on `<TabItem value="…" label="…">…</TabItem>` blocks.
///
/// Tags missing either attribute are skipped, as are "Other Versions" tabs.
pub fn tab_sections(content: &str) -> Vec<Section<'_>> {
    TAB_ITEM_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let attrs = caps.get(1)?.as_str();
            let body = caps.get(2)?.as_str();
            let name = VALUE_ATTR_RE.captures(attrs)?.get(1)?.as_str().trim();
            let label = LABEL_ATTR_RE.captures(attrs)?.get(1)?.as_str().trim();
            if is_other_versions(attrs) {
                return None;
            }
            Some(Section {
                name: name.to_string(),
                label: label.to_string(),
                body,
            })
        })
        .collect()
}

/// Remove "Other Versions" tab blocks so no other strategy can pick up their tables.
pub fn without_excluded_tabs(content: &str) -> Cow<'_, str> {
    TAB_ITEM_RE.replace_all(content, |caps: &regex::Captures| {
        if is_other_versions(&caps[1]) {
            String::new()
        } else {
            caps[0].to_string()
        }
    })
}

fn is_other_versions(attrs: &str) -> bool {
    [&*VALUE_ATTR_RE, &*LABEL_ATTR_RE].iter().any(|re| {
        re.captures(attrs)
            .is_some_and(|caps| caps[1].contains(OTHER_VERSIONS))
    })
}

/// Split on level-2 headings. Heading text is both name and label.
pub fn heading_sections(content: &str) -> Vec<Section<'_>> {
    split_at_headings(content, &HEADING_RE)
}

/// Split on `## Office YYYY` headings only; other headings stay inside the section.
pub fn office_sections(content: &str) -> Vec<Section<'_>> {
    split_at_headings(content, &OFFICE_HEADING_RE)
}

fn split_at_headings<'a>(content: &'a str, heading: &Regex) -> Vec<Section<'a>> {
    // Blank headings still end the previous section; they just never become one.
    let headings: Vec<(&str, usize, usize)> = heading
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let title = caps.get(1)?.as_str().trim();
            Some((title, whole.start(), whole.end()))
        })
        .collect();

    headings
        .iter()
        .enumerate()
        .filter(|(_, (title, _, _))| !title.is_empty())
        .map(|(i, (title, _, body_start))| {
            let body_end = headings
                .get(i + 1)
                .map(|(_, next_start, _)| *next_start)
                .unwrap_or(content.len());
            Section {
                name: title.to_string(),
                label: title.to_string(),
                body: &content[*body_start..body_end],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sections: &[Section]) -> Vec<String> {
        sections.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn tab_blocks_multiline() {
        let md = "<Tabs>\n<TabItem value=\"24H2\" label=\"24H2 (Build 26100)\" default>\n\nBuild - 26100.1742\n\n</TabItem>\n<TabItem value=\"23H2\" label=\"23H2\">\nbody\n</TabItem>\n</Tabs>";
        let sections = tab_sections(md);
        assert_eq!(names(&sections), vec!["24H2", "23H2"]);
        assert_eq!(sections[0].label, "24H2 (Build 26100)");
        assert!(sections[0].body.contains("Build - 26100.1742"));
        assert_eq!(sections[1].body, "\nbody\n");
    }

    #[test]
    fn tab_attributes_any_order() {
        let md = "<TabItem label=\"Pro\" value=\"pro\">x</TabItem>";
        let sections = tab_sections(md);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "pro");
        assert_eq!(sections[0].label, "Pro");
    }

    #[test]
    fn tab_without_label_skipped() {
        let md = "<TabItem value=\"a\">x</TabItem><TabItem value=\"b\" label=\"B\">y</TabItem>";
        assert_eq!(names(&tab_sections(md)), vec!["b"]);
    }

    #[test]
    fn other_versions_excluded() {
        let md = "<TabItem value=\"Other Versions - Misc\" label=\"Misc\">t</TabItem>\
                  <TabItem value=\"misc\" label=\"Other Versions\">t</TabItem>\
                  <TabItem value=\"22H2\" label=\"22H2\">t</TabItem>";
        assert_eq!(names(&tab_sections(md)), vec!["22H2"]);
    }

    #[test]
    fn headings_level_two_only() {
        let md = "# Title\nintro\n## First\na\n### Sub\nb\n## Second\nc\n";
        let sections = heading_sections(md);
        assert_eq!(names(&sections), vec!["First", "Second"]);
        assert!(sections[0].body.contains("### Sub"));
        assert!(!sections[0].body.contains("intro"));
        assert_eq!(sections[1].body, "\nc\n");
    }

    #[test]
    fn headings_crlf() {
        let md = "## Windows 7 SP1\r\nrow\r\n## Windows 7 RTM\r\nrow2\r\n";
        let sections = heading_sections(md);
        assert_eq!(names(&sections), vec!["Windows 7 SP1", "Windows 7 RTM"]);
        assert_eq!(sections[0].label, "Windows 7 SP1");
    }

    #[test]
    fn office_headings_ignore_other_headings() {
        let md = "## Intro\n## Office 2016\na\n## Notes\nb\n## Office 2019 \nc\n## Office 365\nd\n";
        let sections = office_sections(md);
        assert_eq!(names(&sections), vec!["Office 2016", "Office 2019"]);
        assert!(sections[0].body.contains("## Notes"));
        assert!(sections[1].body.contains("## Office 365"));
    }

    #[test]
    fn blank_heading_still_ends_section() {
        let md = "## A\n| English | x64 | [a](u1) |\n##   \n| English | x64 | [b](u2) |\n";
        let sections = heading_sections(md);
        assert_eq!(names(&sections), vec!["A"]);
        assert!(sections[0].body.contains("[a](u1)"));
        assert!(!sections[0].body.contains("[b](u2)"));
    }

    #[test]
    fn excluded_tabs_removed_from_content() {
        let md = "## Older\n<TabItem value=\"Other Versions - Misc\" label=\"Misc\">old</TabItem>\n\
                  <TabItem value=\"22H2\" label=\"22H2\">keep</TabItem>\n";
        let cleaned = without_excluded_tabs(md);
        assert!(!cleaned.contains("old"));
        assert!(cleaned.contains("<TabItem value=\"22H2\" label=\"22H2\">keep</TabItem>"));
        assert!(cleaned.starts_with("## Older\n"));
    }

    #[test]
    fn no_structure() {
        assert!(tab_sections("plain text").is_empty());
        assert!(heading_sections("plain text").is_empty());
        assert!(office_sections("plain text").is_empty());
    }
}
