//! Container inventory extraction.
//!
//! Every service yields up to two [`ContainerRecord`]s: a `hub` record when
//! it names an `image`, then a `build` record when it has a `build` section.
//! Services with neither are pure overrides and yield nothing. Each record is
//! built independently, so a `build` record never carries the repository or
//! tag of the `hub` record emitted before it.

use std::path::Path;

use stackpilot_common::constants::UNKNOWN;
use stackpilot_common::error::Result;
use stackpilot_common::fs::FileSystem;
use stackpilot_common::types::ContainerRecord;

use crate::document::{ComposeDocument, ServiceDefinition};

/// Splits an image reference on its first `:` into `(repository, tag)`.
///
/// Missing or empty parts become `unknown`.
#[must_use]
pub fn split_image(reference: &str) -> (String, String) {
    let (repository, tag) = reference.split_once(':').unwrap_or((reference, ""));
    (or_unknown(repository), or_unknown(tag))
}

fn or_unknown(part: &str) -> String {
    if part.is_empty() {
        UNKNOWN.to_owned()
    } else {
        part.to_owned()
    }
}

/// Derives the records for one service.
#[must_use]
pub fn service_records(name: &str, definition: &ServiceDefinition) -> Vec<ContainerRecord> {
    let mut records = Vec::new();

    if let Some(reference) = &definition.image {
        let (image, version) = split_image(reference);
        records.push(ContainerRecord::hub(
            name,
            image,
            version,
            definition.ports_or_empty(),
        ));
    }

    if definition.is_built() {
        records.push(ContainerRecord::build(name, definition.ports_or_empty()));
    }

    records
}

/// Derives the records for every service of a document, in document order.
#[must_use]
pub fn document_records(document: &ComposeDocument) -> Vec<ContainerRecord> {
    document
        .services
        .iter()
        .flat_map(|(name, definition)| service_records(name, definition))
        .collect()
}

/// Loads `file` (relative to `root`) and derives its records.
///
/// # Errors
///
/// Returns `NotFound` when the file is missing and `MalformedDocument` when
/// it is not a compose document.
pub fn extract(fs: &impl FileSystem, file: &str, root: &Path) -> Result<Vec<ContainerRecord>> {
    let path = root.join(file);
    let document = ComposeDocument::load(fs, &path)?;
    let records = document_records(&document);
    tracing::debug!(
        path = %path.display(),
        services = document.services.len(),
        records = records.len(),
        "extracted inventory"
    );
    Ok(records)
}

/// Concatenates [`extract`] over `files` in order.
///
/// Stops at the first file that fails; no partial inventory is returned.
///
/// # Errors
///
/// Returns the first error produced by [`extract`].
pub fn extract_all(
    fs: &impl FileSystem,
    files: &[String],
    root: &Path,
) -> Result<Vec<ContainerRecord>> {
    let mut records = Vec::new();
    for file in files {
        records.extend(extract(fs, file, root)?);
    }
    tracing::info!(files = files.len(), records = records.len(), "built inventory");
    Ok(records)
}
