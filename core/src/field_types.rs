//! Fixed mapping from Directus primitive type tags to TypeScript types.

use crate::TypeExpr;

/// Maps a Directus field type tag to its TypeScript type.
///
/// Returns `None` for tags with no static representation; the builder drops
/// such fields unless a relation rule supplies a type.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::primitive_type;
///
/// assert_eq!(primitive_type("uuid").unwrap().to_string(), "string");
/// assert_eq!(primitive_type("bigInteger").unwrap().to_string(), "number");
/// assert_eq!(primitive_type("csv").unwrap().to_string(), "string[]");
/// assert!(primitive_type("alias").is_none());
/// ```
pub fn primitive_type(tag: &str) -> Option<TypeExpr> {
    let name = match tag {
        "bigInteger" | "integer" | "float" | "decimal" => "number",
        "boolean" => "boolean",
        "string" | "text" | "uuid" | "hash" => "string",
        "date" | "dateTime" | "time" | "timestamp" => "string",
        "json" | "geometry" => "unknown",
        "csv" => return Some(TypeExpr::named("string").array()),
        _ if tag.starts_with("geometry.") => "unknown",
        _ => return None,
    };
    Some(TypeExpr::named(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_like_types_are_strings() {
        for tag in ["date", "dateTime", "time", "timestamp"] {
            assert_eq!(primitive_type(tag), Some(TypeExpr::named("string")), "{tag}");
        }
    }

    #[test]
    fn test_geometry_variants() {
        assert_eq!(primitive_type("geometry.Point"), Some(TypeExpr::named("unknown")));
        assert_eq!(primitive_type("geometry"), Some(TypeExpr::named("unknown")));
    }

    #[test]
    fn test_unmapped_tags() {
        assert_eq!(primitive_type("alias"), None);
        assert_eq!(primitive_type("binary"), None);
        assert_eq!(primitive_type(""), None);
    }
}
