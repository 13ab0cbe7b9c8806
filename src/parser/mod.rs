pub mod blocks;
pub mod extract;
pub mod sections;

use tracing::debug;

use crate::models::{CategoryMap, VersionRecord};

/// Windows documents: tab blocks first, level-2 headings when tabs yield nothing.
///
/// Each section goes markdown → blocks → version record; sections without
/// downloads are dropped.
pub fn parse_windows_versions(content: &str) -> Vec<VersionRecord> {
    let versions = extract::extract_all(&sections::tab_sections(content));
    if !versions.is_empty() {
        return versions;
    }

    debug!("No versions in tab blocks, falling back to headings");
    let content = sections::without_excluded_tabs(content);
    extract::extract_all(&sections::heading_sections(&content))
}

/// Office documents: one category per `## Office YYYY` heading, tab blocks inside it.
pub fn parse_office_versions(content: &str) -> CategoryMap {
    let mut categories = CategoryMap::new();
    for section in sections::office_sections(content) {
        let versions = extract::extract_all(&sections::tab_sections(section.body));
        if versions.is_empty() {
            debug!(category = %section.name, "Office section has no versions");
            continue;
        }
        categories.insert(section.name, versions);
    }
    categories
}

// ── Tests ──
