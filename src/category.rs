use serde::Deserialize;

/// Filename marker and the category label it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryMarker {
    pub marker: String,
    pub label: String,
}

impl CategoryMarker {
    pub fn new(marker: &str, label: &str) -> Self {
        CategoryMarker {
            marker: marker.to_string(),
            label: label.to_string(),
        }
    }
}

pub fn default_markers() -> Vec<CategoryMarker> {
    [
        ("windows_11", "Windows 11"),
        ("windows_10", "Windows 10"),
        ("windows_7", "Windows 7"),
        ("windows_8.1", "Windows 8.1"),
        ("windows_arm", "Windows ARM"),
        ("windows_ltsc", "Windows LTSC"),
        ("windows_vista", "Windows Vista"),
        ("windows_xp", "Windows XP"),
    ]
    .into_iter()
    .map(|(marker, label)| CategoryMarker::new(marker, label))
    .collect()
}

/// Category label for a document filename. First marker contained in the name wins.
pub fn category_for(filename: &str, markers: &[CategoryMarker]) -> String {
    markers
        .iter()
        .find(|m| filename.contains(&m.marker))
        .map(|m| m.label.clone())
        .unwrap_or_else(|| derive_label(filename))
}

/// Best-effort label for unknown filenames, e.g. `windows_server_links.md` → `Windows Server`.
/// Output is not a stable contract.
fn derive_label(filename: &str) -> String {
    let stem = filename
        .strip_suffix("_links.md")
        .or_else(|| filename.strip_suffix(".md"))
        .unwrap_or(filename);

    stem.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
