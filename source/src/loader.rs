//! Snapshot loading.
//!
//! A snapshot is the raw metadata of a Directus instance saved to disk,
//! either as one bundle file or as a directory with one file per endpoint.
//!
//! # Loading patterns
//!
//! ```no_run
//! use directus_typegen_source::{SnapshotSource, load_bundle, load_dir};
//!
//! // One JSON file with `collections`, `fields` and `relations` arrays
//! let model = load_bundle("snapshot.json").unwrap();
//!
//! // A directory holding collections.json, fields.json and relations.json
//! let model = load_dir("snapshot/").unwrap();
//!
//! // Pick by path kind
//! let model = SnapshotSource::detect("snapshot/").load().unwrap();
//! ```
//!
//! Each array may be bare or wrapped in the REST envelope `{ "data": [...] }`
//! exactly as the `/collections`, `/fields` and `/relations` endpoints return
//! it.

use std::path::{Path, PathBuf};

use directus_typegen_core::DataModel;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, SourceError};

/// File names of a snapshot directory.
pub const COLLECTIONS_FILE: &str = "collections.json";
pub const FIELDS_FILE: &str = "fields.json";
pub const RELATIONS_FILE: &str = "relations.json";

/// Describes where a snapshot is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    /// A single JSON file holding all three arrays.
    Bundle(PathBuf),
    /// A directory with one JSON file per endpoint.
    Directory(PathBuf),
}

impl SnapshotSource {
    /// Chooses [`Directory`](Self::Directory) for directories and
    /// [`Bundle`](Self::Bundle) for anything else.
    pub fn detect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            Self::Directory(path)
        } else {
            Self::Bundle(path)
        }
    }

    /// Loads the data model from this source.
    pub fn load(&self) -> Result<DataModel> {
        match self {
            Self::Bundle(path) => load_bundle(path),
            Self::Directory(path) => load_dir(path),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Bundle(path) | Self::Directory(path) => path,
        }
    }
}

/// A JSON array, bare or inside the REST `data` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Bare(Vec<T>),
    Envelope { data: Vec<T> },
}

impl<T> Payload<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(data) | Self::Envelope { data } => data,
        }
    }
}

#[derive(Deserialize)]
struct Bundle {
    collections: Payload<directus_typegen_core::Collection>,
    fields: Payload<directus_typegen_core::FieldSpec>,
    relations: Payload<directus_typegen_core::RelationSpec>,
}

/// Loads a snapshot from a single bundle file.
///
/// # Errors
///
/// Returns [`SourceError::IoError`] if the file cannot be read, or
/// [`SourceError::JsonError`] if it is not a valid bundle.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<DataModel> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let bundle: Bundle = serde_json::from_reader(reader)?;

    let model = DataModel {
        collections: bundle.collections.into_vec(),
        fields: bundle.fields.into_vec(),
        relations: bundle.relations.into_vec(),
    };
    log_loaded(path, &model);
    Ok(model)
}

/// Loads a snapshot from a directory of per-endpoint files.
///
/// # Errors
///
/// Returns [`SourceError::MissingPart`] if one of the three files is
/// absent, [`SourceError::IoError`] if a file cannot be read, or
/// [`SourceError::JsonError`] if a file cannot be parsed.
pub fn load_dir(path: impl AsRef<Path>) -> Result<DataModel> {
    let path = path.as_ref();
    let model = DataModel {
        collections: read_part(&path.join(COLLECTIONS_FILE))?,
        fields: read_part(&path.join(FIELDS_FILE))?,
        relations: read_part(&path.join(RELATIONS_FILE))?,
    };
    log_loaded(path, &model);
    Ok(model)
}

fn read_part<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(SourceError::MissingPart(path.to_path_buf()));
    }
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let payload: Payload<T> = serde_json::from_reader(reader)?;
    Ok(payload.into_vec())
}

fn log_loaded(path: &Path, model: &DataModel) {
    debug!(
        path = %path.display(),
        collections = model.collections.len(),
        fields = model.fields.len(),
        relations = model.relations.len(),
        "Loaded snapshot"
    );
}
