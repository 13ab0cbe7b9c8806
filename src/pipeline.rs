use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::category::category_for;
use crate::fetcher::Fetcher;
use crate::models::{Catalog, CategoryMap, VersionRecord};
use crate::parser;
use crate::settings::Settings;

/// What happened to one document during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome<T> {
    Parsed(T),
    /// Fetched fine, nothing recognisable inside.
    Empty,
    /// Fetch failed; the document contributes nothing this run.
    Skipped { reason: String },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DocumentCounts {
    pub parsed: usize,
    pub empty: usize,
    pub skipped: usize,
}

impl DocumentCounts {
    fn record<T>(&mut self, outcome: &DocumentOutcome<T>) {
        match outcome {
            DocumentOutcome::Parsed(_) => self.parsed += 1,
            DocumentOutcome::Empty => self.empty += 1,
            DocumentOutcome::Skipped { .. } => self.skipped += 1,
        }
    }

    pub fn print(&self) {
        println!(
            "Documents: {} parsed, {} empty, {} skipped.",
            self.parsed, self.empty, self.skipped
        );
    }
}

/// Sequential fetch → parse → collect over the configured documents.
pub struct Pipeline {
    settings: Settings,
    fetcher: Fetcher,
    progress: ProgressBar,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Result<Self> {
        let fetcher = Fetcher::new(&settings).context("Failed to build HTTP client")?;
        Ok(Pipeline {
            settings,
            fetcher,
            progress: ProgressBar::hidden(),
        })
    }

    /// Build the catalog from every configured document. Document failures never abort the run.
    pub async fn collect(&mut self) -> Result<(Catalog, DocumentCounts)> {
        let total = self.settings.windows_documents.len()
            + usize::from(self.settings.office_document.is_some());
        self.progress = ProgressBar::new(total as u64);
        self.progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );

        let mut catalog = Catalog::new(&self.settings.source);
        let mut counts = DocumentCounts::default();

        for filename in &self.settings.windows_documents {
            let category = category_for(filename, &self.settings.category_markers);
            let outcome = self.process_windows_document(filename).await;
            counts.record(&outcome);
            if let DocumentOutcome::Parsed(versions) = outcome {
                catalog.windows_versions.insert(category, versions);
            }
            self.progress.inc(1);
        }

        if let Some(filename) = &self.settings.office_document {
            let outcome = self.process_office_document(filename).await;
            counts.record(&outcome);
            if let DocumentOutcome::Parsed(categories) = outcome {
                catalog.office_versions.extend(categories);
            }
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        info!(
            "Collected {} categories ({} parsed, {} empty, {} skipped)",
            catalog.category_count(),
            counts.parsed,
            counts.empty,
            counts.skipped
        );
        Ok((catalog, counts))
    }

    /// Collect, then write the catalog to the configured output path.
    pub async fn run(&mut self) -> Result<(Catalog, DocumentCounts)> {
        let (catalog, counts) = self.collect().await?;
        write_catalog(&catalog, &self.settings.output)?;
        Ok((catalog, counts))
    }

    pub async fn process_windows_document(
        &self,
        filename: &str,
    ) -> DocumentOutcome<Vec<VersionRecord>> {
        let outcome = self
            .process_document(filename, parser::parse_windows_versions, |versions: &Vec<VersionRecord>| {
                versions.is_empty()
            })
            .await;
        if let DocumentOutcome::Parsed(versions) = &outcome {
            self.say(format!("✓ Found {} version(s) in {}", versions.len(), filename));
            for v in versions {
                self.say(format!(
                    "  - {} (Build: {}, {} downloads)",
                    v.version_name,
                    v.build,
                    v.download_count()
                ));
            }
        }
        outcome
    }

    pub async fn process_office_document(&self, filename: &str) -> DocumentOutcome<CategoryMap> {
        let outcome = self
            .process_document(filename, parser::parse_office_versions, CategoryMap::is_empty)
            .await;
        if let DocumentOutcome::Parsed(categories) = &outcome {
            self.say(format!("✓ Found {} Office release(s) in {}", categories.len(), filename));
            for (category, versions) in categories.iter() {
                self.say(format!("  - {}: {} version(s)", category, versions.len()));
            }
        }
        outcome
    }

    async fn process_document<T>(
        &self,
        filename: &str,
        parse: impl Fn(&str) -> T,
        is_empty: impl Fn(&T) -> bool,
    ) -> DocumentOutcome<T> {
        self.progress.set_message(filename.to_string());
        self.say(format!("\n{}", "=".repeat(60)));
        self.say(format!("Processing: {}", filename));
        self.say("=".repeat(60));

        let content = match self.fetcher.fetch(filename).await {
            Ok(content) => content,
            Err(e) => {
                debug!("Skipping {}: {}", filename, e);
                self.say(format!("✗ Error processing {}: {}", filename, e));
                return DocumentOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        let parsed = parse(&content);
        if is_empty(&parsed) {
            debug!("No versions found in {}", filename);
            self.say(format!("✗ No versions found in {}", filename));
            return DocumentOutcome::Empty;
        }
        DocumentOutcome::Parsed(parsed)
    }

    /// Print above the progress bar without tearing it.
    fn say(&self, line: impl AsRef<str>) {
        self.progress.suspend(|| println!("{}", line.as_ref()));
    }
}

/// Overwrite `path` with the pretty-printed catalog.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    let json = catalog.to_json().context("Failed to serialize catalog")?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved catalog to {}", path.display());
    Ok(())
}

pub fn print_summary(catalog: &Catalog, output: &Path) {
    println!("\n{}", "=".repeat(60));
    println!("✓ Successfully saved data to {}", output.display());
    println!("✓ Total categories: {}", catalog.category_count());
    println!("✓ Last updated: {}", catalog.last_updated);
    println!("{}", "=".repeat(60));

    println!("\nSummary:");
    for map in [&catalog.windows_versions, &catalog.office_versions] {
        for (category, versions) in map.iter() {
            let downloads: usize = versions.iter().map(VersionRecord::download_count).sum();
            println!(
                "  {}: {} version(s), {} download(s)",
                category,
                versions.len(),
                downloads
            );
        }
    }
}

// ── Tests ──
