use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::category::{default_markers, CategoryMarker};

const BASE_RAW_URL: &str =
    "https://raw.githubusercontent.com/massgravel/massgrave.dev/refs/heads/main/docs/";
const SOURCE_URL: &str = "https://github.com/massgravel/massgrave.dev";
const OUTPUT_FILE: &str = "windows_iso_links.json";
const CONFIG_FILE: &str = "iso_links";
const ENV_PREFIX: &str = "ISO_LINKS";

const WINDOWS_DOCUMENTS: &[&str] = &[
    "windows_11_links.md",
    "windows_10_links.md",
    "windows_7_links.md",
    "windows_8.1_links.md",
    "windows_arm_links.md",
    "windows_ltsc_links.md",
    "windows_vista_links.md",
    "windows_xp_links.md",
];
const OFFICE_DOCUMENT: &str = "office_msi_links.md";

/// Everything the pipeline needs to know about where documents live and where output goes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    /// Recorded verbatim in the catalog's `source` field.
    pub source: String,
    pub output: PathBuf,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub windows_documents: Vec<String>,
    pub office_document: Option<String>,
    pub category_markers: Vec<CategoryMarker>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: BASE_RAW_URL.to_string(),
            source: SOURCE_URL.to_string(),
            output: PathBuf::from(OUTPUT_FILE),
            timeout_secs: 30,
            user_agent: concat!("iso_links/", env!("CARGO_PKG_VERSION")).to_string(),
            windows_documents: WINDOWS_DOCUMENTS.iter().map(|s| s.to_string()).collect(),
            office_document: Some(OFFICE_DOCUMENT.to_string()),
            category_markers: default_markers(),
        }
    }
}

impl Settings {
    /// Defaults, then `iso_links.toml` (optional), then `ISO_LINKS_*` environment variables.
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("windows_documents"),
            );
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let mut settings: Settings = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        // An empty office document (e.g. `ISO_LINKS_OFFICE_DOCUMENT=""`) disables it.
        settings.office_document = settings
            .office_document
            .filter(|name| !name.trim().is_empty());
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `base_url` joined with `filename`, tolerating a missing trailing slash.
    pub fn document_url(&self, filename: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, filename)
        } else {
            format!("{}/{}", self.base_url, filename)
        }
    }
}
