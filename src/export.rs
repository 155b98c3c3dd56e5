/*!
 * Archive export of translated page content.
 *
 * Each locale's translated nodes are written as a pretty-printed JSON file
 * named `translation_{tag}.json` inside a ZIP archive. Export works from the
 * translations already produced by a run; nothing is translated again.
 */

use log::{debug, info};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{Seek, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

use crate::app_controller::LocaleStatus;
use crate::content::TranslatedNode;
use crate::errors::ExportError;

/// Translated content of one locale, ready for export
#[derive(Debug, Clone)]
pub struct ExportEntry {
    /// Locale tag the content was translated into
    pub tag: String,
    /// Translated nodes
    pub nodes: Vec<TranslatedNode>,
}

impl ExportEntry {
    pub fn new(tag: impl Into<String>, nodes: Vec<TranslatedNode>) -> Self {
        Self {
            tag: tag.into(),
            nodes,
        }
    }

    /// Collect every locale of a run that produced a translation
    ///
    /// Locales whose write failed still export their translation.
    pub fn from_statuses(statuses: &[LocaleStatus]) -> Vec<Self> {
        statuses
            .iter()
            .filter_map(|status| {
                status
                    .translated
                    .as_ref()
                    .map(|nodes| Self::new(status.locale.tag.clone(), nodes.clone()))
            })
            .collect()
    }
}

/// Archive file name for a locale tag
///
/// Characters outside `[A-Za-z0-9_-]` become `_`.
pub fn entry_file_name(tag: &str) -> String {
    let sanitized: String = tag
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let sanitized = if sanitized.is_empty() { "unknown".to_string() } else { sanitized };
    format!("translation_{}.json", sanitized)
}

fn unique_name(base: String, used: &mut HashSet<String>) -> String {
    if used.insert(base.clone()) {
        return base;
    }

    let stem = base.trim_end_matches(".json");
    let mut counter = 2;
    loop {
        let candidate = format!("{}_{}.json", stem, counter);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

/// Write entries into a ZIP archive, returning the file names used
pub fn write_archive<W: Write + Seek>(
    entries: &[ExportEntry],
    writer: W,
) -> Result<Vec<String>, ExportError> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::<()>::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut used = HashSet::new();
    let mut names = Vec::with_capacity(entries.len());

    for entry in entries {
        let name = unique_name(entry_file_name(&entry.tag), &mut used);
        let body = serde_json::to_vec_pretty(&entry.nodes)?;

        zip.start_file(name.as_str(), options.clone())?;
        zip.write_all(&body)?;
        debug!("Archived {} ({} bytes)", name, body.len());

        names.push(name);
    }

    zip.finish()?;
    Ok(names)
}

/// Write entries into a ZIP archive at `path`, creating parent directories
pub fn export_to_file(path: &Path, entries: &[ExportEntry]) -> Result<Vec<String>, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let names = write_archive(entries, file)?;
    info!("Exported {} translation(s) to {}", names.len(), path.display());
    Ok(names)
}
