//! Generator configuration.
//!
//! Defines the YAML-serializable configuration for a generation run. Every
//! key is optional; missing keys take the defaults of the builder and
//! renderer options.
//!
//! # Example YAML
//!
//! ```yaml
//! naming: pascalcase
//! root_name: DirectusSchema
//! module_name: "#app"
//! indent:
//!   amount: 2
//!   char: " "
//! output: types/directus.d.ts
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use directus_typegen_core::{BuilderOptions, Indent, NameTransform, RenderOptions};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level generator configuration.
///
/// Loaded from a YAML file (typically `directus-typegen.yml`) and
/// overridden field by field by command-line flags.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::NameTransform;
/// use directus_typegen_source::TypegenConfig;
///
/// let config: TypegenConfig = serde_yaml::from_str("naming: camelcase").unwrap();
/// assert_eq!(config.naming, NameTransform::CamelCase);
/// assert_eq!(config.render_options().root_name, "DirectusSchema");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypegenConfig {
    /// Collection naming strategy.
    pub naming: NameTransform,
    /// Name of the root interface listing the user collections.
    pub root_name: String,
    /// Module augmented by the first declaration block.
    pub module_name: String,
    /// Indentation of the rendered output.
    pub indent: Indent,
    /// Default output path for `generate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Default for TypegenConfig {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            naming: NameTransform::default(),
            root_name: render.root_name,
            module_name: render.module_name,
            indent: render.indent,
            output: None,
        }
    }
}

impl TypegenConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::SourceError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::SourceError::YamlError) if parsing
    /// fails, including an unknown `naming` selector.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::SourceError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::SourceError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Sets the naming strategy from its selector string.
    ///
    /// # Errors
    ///
    /// Returns [`Naming`](crate::SourceError::Naming) for an unknown
    /// selector.
    pub fn set_naming(&mut self, selector: &str) -> Result<()> {
        self.naming = selector.parse()?;
        Ok(())
    }

    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions::new(self.naming)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            indent: self.indent,
            root_name: self.root_name.clone(),
            module_name: self.module_name.clone(),
        }
    }
}
