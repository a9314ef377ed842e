//! Snapshot loading and configuration for the Directus type generator.
//!
//! This crate reads the raw metadata the core crate consumes from files on
//! disk and holds the YAML configuration of a generation run. Fetching the
//! metadata from a live instance is left to the caller; a snapshot is just
//! the saved responses of the `/collections`, `/fields` and `/relations`
//! endpoints.
//!
//! # Quick start
//!
//! ```no_run
//! use directus_typegen_core::{build_schema, render_schema};
//! use directus_typegen_source::{SnapshotSource, TypegenConfig};
//!
//! let config = TypegenConfig::load("directus-typegen.yml").unwrap();
//! let model = SnapshotSource::detect("snapshot/").load().unwrap();
//!
//! let schema = build_schema(&model, &config.builder_options());
//! let output = render_schema(&schema, &config.render_options());
//! println!("{output}");
//! ```

mod config;
mod error;
mod loader;

pub use config::TypegenConfig;
pub use error::{Result, SourceError};
pub use loader::{
    COLLECTIONS_FILE, FIELDS_FILE, RELATIONS_FILE, SnapshotSource, load_bundle, load_dir,
};
