pub mod build;
pub mod downloads;

use super::blocks::classify_lines;
use super::sections::Section;
use crate::models::VersionRecord;

/// Build a version record from one section. Sections without downloads yield `None`.
pub fn extract_version(section: &Section) -> Option<VersionRecord> {
    let blocks = classify_lines(section.body);
    let downloads = downloads::extract(&blocks);
    if downloads.is_empty() {
        return None;
    }

    Some(VersionRecord {
        version_name: section.name.clone(),
        version_label: section.label.clone(),
        build: build::extract(section.body),
        downloads,
    })
}

pub fn extract_all(sections: &[Section]) -> Vec<VersionRecord> {
    sections.iter().filter_map(extract_version).collect()
}
