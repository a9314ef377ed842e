//! Raw metadata types as returned by the Directus REST API.
//!
//! These types mirror the JSON payloads of the `/collections`, `/fields` and
//! `/relations` endpoints. Only the keys the schema builder reads are
//! modeled; everything else in the payload is ignored during
//! deserialization. Every nested object is optional because Directus omits
//! `meta` and `schema` for folders, aliases and system-managed entries.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier prefix reserved for platform-owned collections.
pub const SYSTEM_PREFIX: &str = "directus_";

/// Returns `true` if `collection` is a reserved system collection.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::is_system_collection;
///
/// assert!(is_system_collection("directus_users"));
/// assert!(!is_system_collection("articles"));
/// ```
pub fn is_system_collection(collection: &str) -> bool {
    collection.starts_with(SYSTEM_PREFIX)
}

/// Collection metadata record.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::Collection;
///
/// let settings = Collection::new("settings").singleton();
/// assert!(settings.is_singleton());
/// assert!(!Collection::new("articles").is_singleton());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection identifier (table name).
    pub collection: String,
    /// Directus-managed metadata; absent for unmanaged tables.
    #[serde(default)]
    pub meta: Option<CollectionMeta>,
}

/// Directus-managed collection metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMeta {
    /// Whether the collection holds exactly one record.
    #[serde(default, deserialize_with = "null_as_default")]
    pub singleton: bool,
}

impl Collection {
    /// Creates a collection record with no metadata.
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            meta: None,
        }
    }

    /// Marks the collection as a singleton.
    pub fn singleton(mut self) -> Self {
        self.meta = Some(CollectionMeta { singleton: true });
        self
    }

    /// Returns the singleton flag, treating missing metadata as `false`.
    pub fn is_singleton(&self) -> bool {
        self.meta.as_ref().is_some_and(|meta| meta.singleton)
    }
}

/// Field metadata record.
///
/// Use [`FieldSpec::new`] and the chained builder methods to assemble
/// fixtures; real payloads come from `serde_json`.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::FieldSpec;
///
/// let id = FieldSpec::new("articles", "id", "uuid").primary_key();
/// assert!(id.is_primary_key());
/// assert!(!id.is_nullable());
///
/// let links = FieldSpec::new("articles", "tags", "alias").with_special(&["m2m"]);
/// assert!(links.has_special("m2m"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Owning collection identifier.
    pub collection: String,
    /// Field identifier (column name).
    pub field: String,
    /// Primitive type tag (e.g. `"uuid"`, `"string"`, `"alias"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Database column metadata; absent for alias fields.
    #[serde(default)]
    pub schema: Option<FieldSchemaMeta>,
    /// Directus-managed field metadata.
    #[serde(default)]
    pub meta: Option<FieldMeta>,
}

/// Column-level metadata of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchemaMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_primary_key: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_nullable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_generated: bool,
}

/// Directus-managed field metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// Special tags such as `o2m`, `m2m`, `m2a`, `uuid`, `date-created`.
    ///
    /// Directus stores these either as an array or as a comma-separated
    /// string depending on the version; both shapes are accepted.
    #[serde(default, deserialize_with = "special_tags")]
    pub special: Vec<String>,
    /// Allowed target collections as reported on the field record.
    ///
    /// Carried through unchanged. Relation classification reads the list on
    /// the [`RelationSpec`] instead, see [`RelationSpec::allowed_collections`].
    #[serde(default)]
    pub one_allowed_collections: Option<Vec<String>>,
}

impl FieldSpec {
    /// Creates a field record with no metadata.
    pub fn new(collection: &str, field: &str, kind: &str) -> Self {
        Self {
            collection: collection.to_string(),
            field: field.to_string(),
            kind: kind.to_string(),
            schema: None,
            meta: None,
        }
    }

    /// Marks the field as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.schema.get_or_insert_with(Default::default).is_primary_key = true;
        self
    }

    /// Marks the field as nullable.
    pub fn nullable(mut self) -> Self {
        self.schema.get_or_insert_with(Default::default).is_nullable = true;
        self
    }

    /// Marks the field as generated by the database.
    pub fn generated(mut self) -> Self {
        self.schema.get_or_insert_with(Default::default).is_generated = true;
        self
    }

    /// Replaces the special tags.
    pub fn with_special(mut self, tags: &[&str]) -> Self {
        self.meta.get_or_insert_with(Default::default).special =
            tags.iter().map(|tag| tag.to_string()).collect();
        self
    }

    pub fn is_primary_key(&self) -> bool {
        self.schema.as_ref().is_some_and(|s| s.is_primary_key)
    }

    pub fn is_nullable(&self) -> bool {
        self.schema.as_ref().is_some_and(|s| s.is_nullable)
    }

    pub fn is_generated(&self) -> bool {
        self.schema.as_ref().is_some_and(|s| s.is_generated)
    }

    /// Returns `true` if the field carries the given special tag.
    pub fn has_special(&self, tag: &str) -> bool {
        self.meta
            .as_ref()
            .is_some_and(|meta| meta.special.iter().any(|t| t == tag))
    }
}

/// Relation metadata record.
///
/// One record describes one foreign-key column (`collection`.`field`). The
/// reverse side of a one-to-many lives in `meta.one_collection` /
/// `meta.one_field`; many-to-any relations list their targets in
/// `meta.one_allowed_collections` instead of `related_collection`.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::RelationSpec;
///
/// let author = RelationSpec::many_to_one("articles", "author", "directus_users");
/// assert_eq!(author.related_collection.as_deref(), Some("directus_users"));
///
/// let item = RelationSpec::new("pages_blocks", "item")
///     .with_allowed_collections(&["hero", "gallery"]);
/// assert_eq!(item.allowed_collections().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSpec {
    /// Collection holding the foreign-key column.
    pub collection: String,
    /// Foreign-key column.
    pub field: String,
    /// Target of a many-to-one relation.
    #[serde(default)]
    pub related_collection: Option<String>,
    #[serde(default)]
    pub meta: Option<RelationMeta>,
}

/// Directus-managed relation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMeta {
    /// Collection exposing the one-to-many alias field.
    #[serde(default)]
    pub one_collection: Option<String>,
    /// The one-to-many alias field.
    #[serde(default)]
    pub one_field: Option<String>,
    /// Targets of a many-to-any relation.
    #[serde(default)]
    pub one_allowed_collections: Option<Vec<String>>,
}

impl RelationSpec {
    /// Creates a relation record with no target and no metadata.
    pub fn new(collection: &str, field: &str) -> Self {
        Self {
            collection: collection.to_string(),
            field: field.to_string(),
            related_collection: None,
            meta: None,
        }
    }

    /// Creates a many-to-one relation record.
    pub fn many_to_one(collection: &str, field: &str, related: &str) -> Self {
        Self {
            related_collection: Some(related.to_string()),
            ..Self::new(collection, field)
        }
    }

    /// Sets the reverse (one-to-many) side of the relation.
    pub fn with_one_field(mut self, one_collection: &str, one_field: &str) -> Self {
        let meta = self.meta.get_or_insert_with(Default::default);
        meta.one_collection = Some(one_collection.to_string());
        meta.one_field = Some(one_field.to_string());
        self
    }

    /// Sets the many-to-any target list.
    pub fn with_allowed_collections(mut self, collections: &[&str]) -> Self {
        self.meta
            .get_or_insert_with(Default::default)
            .one_allowed_collections = Some(collections.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Returns `true` if the reverse side points at `collection`.`field`.
    pub fn points_back_to(&self, collection: &str, field: &str) -> bool {
        self.meta.as_ref().is_some_and(|meta| {
            meta.one_collection.as_deref() == Some(collection)
                && meta.one_field.as_deref() == Some(field)
        })
    }

    /// Returns the many-to-any target list, if declared.
    pub fn allowed_collections(&self) -> Option<&[String]> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.one_allowed_collections.as_deref())
    }
}

/// The complete raw data model handed to the schema builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModel {
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub relations: Vec<RelationSpec>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn special_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Special {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match Option::<Special>::deserialize(deserializer)? {
        Some(Special::List(tags)) => tags,
        Some(Special::Csv(raw)) => raw
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_deserializes_directus_payload() {
        let raw = serde_json::json!({
            "collection": "articles",
            "field": "id",
            "type": "uuid",
            "schema": {
                "name": "id",
                "is_primary_key": true,
                "is_nullable": false,
                "is_generated": false,
                "data_type": "uuid"
            },
            "meta": { "special": ["uuid"], "interface": "input" }
        });

        let field: FieldSpec = serde_json::from_value(raw).unwrap();
        assert_eq!(field.kind, "uuid");
        assert!(field.is_primary_key());
        assert!(!field.is_nullable());
        assert!(field.has_special("uuid"));
    }

    #[test]
    fn test_special_accepts_csv_string() {
        let raw = serde_json::json!({
            "collection": "articles",
            "field": "tags",
            "type": "alias",
            "schema": null,
            "meta": { "special": "m2m, no-data" }
        });

        let field: FieldSpec = serde_json::from_value(raw).unwrap();
        assert!(field.has_special("m2m"));
        assert!(field.has_special("no-data"));
        assert!(field.schema.is_none());
    }

    #[test]
    fn test_null_flags_default_to_false() {
        let raw = serde_json::json!({
            "collection": "settings",
            "meta": { "singleton": null }
        });

        let collection: Collection = serde_json::from_value(raw).unwrap();
        assert!(!collection.is_singleton());
    }

    #[test]
    fn test_relation_points_back() {
        let relation = RelationSpec::many_to_one("comments", "article", "articles")
            .with_one_field("articles", "comments");

        assert!(relation.points_back_to("articles", "comments"));
        assert!(!relation.points_back_to("articles", "id"));
        assert!(relation.allowed_collections().is_none());
    }

    #[test]
    fn test_field_allowed_collections_are_passed_through() {
        let raw = serde_json::json!({
            "collection": "pages",
            "field": "blocks",
            "type": "alias",
            "meta": { "special": ["m2a"], "one_allowed_collections": ["hero", "gallery"] }
        });

        let field: FieldSpec = serde_json::from_value(raw).unwrap();
        let meta = field.meta.as_ref().unwrap();
        assert_eq!(
            meta.one_allowed_collections.as_deref(),
            Some(["hero".to_string(), "gallery".to_string()].as_slice())
        );
        assert_eq!(crate::classify_relation(&field, &[]), crate::Relation::None);
    }
}
