use std::sync::LazyLock;

use regex::Regex;

use crate::models::UNKNOWN_BUILD;

static BUILD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Build\s*-\s*(\d+(?:\.\d+)*)").unwrap());

/// First `Build - 26100.1742` style token in `content`, or `"Unknown"`.
pub fn extract(content: &str) -> String {
    BUILD_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_BUILD.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_build() {
        assert_eq!(extract("Windows 11 25H2 - Build - 26200.6584"), "26200.6584");
    }

    #[test]
    fn case_and_spacing() {
        assert_eq!(extract("build-7601.17514"), "7601.17514");
        assert_eq!(extract("BUILD  -  2600"), "2600");
    }

    #[test]
    fn first_match_wins() {
        let text = "Build - 19045.2965\n\nOlder: Build - 19044.1288";
        assert_eq!(extract(text), "19045.2965");
    }

    #[test]
    fn missing_build() {
        assert_eq!(extract("| English | x64 | [a](b) |"), UNKNOWN_BUILD);
        assert_eq!(extract("Build number not listed"), UNKNOWN_BUILD);
    }
}
