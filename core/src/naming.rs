//! Collection naming strategies.
//!
//! Non-system collection identifiers are passed through a [`NameTransform`]
//! to obtain the interface name used in the rendered declarations. The
//! strategy is selected once, up front; an unknown selector is rejected by
//! [`NameTransform::from_str`] before any schema is built.

use std::fmt;
use std::str::FromStr;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a naming selector is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("unknown naming strategy '{0}' (expected database, camelcase or pascalcase)")]
    Unknown(String),
}

/// String transform applied to collection identifiers.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::NameTransform;
///
/// assert_eq!(NameTransform::Database.apply("blog_posts"), "blog_posts");
/// assert_eq!(NameTransform::CamelCase.apply("blog_posts"), "blogPosts");
/// assert_eq!(NameTransform::PascalCase.apply("blog_posts"), "BlogPosts");
///
/// let parsed: NameTransform = "pascalcase".parse().unwrap();
/// assert_eq!(parsed, NameTransform::PascalCase);
/// assert!("kebab".parse::<NameTransform>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NameTransform {
    /// Identity: keep the database identifier.
    #[default]
    Database,
    CamelCase,
    PascalCase,
}

impl NameTransform {
    /// All recognized strategies, in selector order.
    pub const ALL: [NameTransform; 3] = [Self::Database, Self::CamelCase, Self::PascalCase];

    /// The selector string for this strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::CamelCase => "camelcase",
            Self::PascalCase => "pascalcase",
        }
    }

    /// Applies the transform to an identifier.
    pub fn apply(self, identifier: &str) -> String {
        match self {
            Self::Database => identifier.to_string(),
            Self::CamelCase => identifier.to_case(Case::Camel),
            Self::PascalCase => identifier.to_case(Case::Pascal),
        }
    }
}

impl FromStr for NameTransform {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|transform| transform.as_str() == s)
            .ok_or_else(|| NamingError::Unknown(s.to_string()))
    }
}

impl TryFrom<String> for NameTransform {
    type Error = NamingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NameTransform> for String {
    fn from(transform: NameTransform) -> Self {
        transform.as_str().to_string()
    }
}

impl fmt::Display for NameTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_round_trip() {
        for transform in NameTransform::ALL {
            assert_eq!(transform.as_str().parse::<NameTransform>(), Ok(transform));
        }
    }

    #[test]
    fn test_unknown_selector_is_rejected() {
        assert_eq!(
            "snakecase".parse::<NameTransform>(),
            Err(NamingError::Unknown("snakecase".to_string()))
        );
        assert!("PascalCase".parse::<NameTransform>().is_err());
    }

    #[test]
    fn test_system_style_identifier_to_pascal() {
        assert_eq!(NameTransform::PascalCase.apply("directus_users"), "DirectusUsers");
        assert_eq!(NameTransform::PascalCase.apply("articles"), "Articles");
    }

    #[test]
    fn test_serde_uses_selector_strings() {
        let json = serde_json::to_string(&NameTransform::CamelCase).unwrap();
        assert_eq!(json, "\"camelcase\"");

        let err = serde_json::from_str::<NameTransform>("\"upper\"");
        assert!(err.is_err());
    }
}
