//! Normalized schema model produced by the builder.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Relation, RelationLink, TypeExpr};

/// A resolved field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Field identifier, never name-transformed.
    pub name: String,
    /// Resolved type: a single type, an array type, or a string-literal set.
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    pub nullable: bool,
    pub primary_key: bool,
    pub relation: Relation,
}

impl FieldDefinition {
    /// Returns the relation edges of this field in declaration order.
    pub fn links(&self) -> Vec<RelationLink> {
        self.relation.links()
    }
}

/// A resolved collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionDefinition {
    /// Display name used for the rendered interface.
    pub name: String,
    pub system: bool,
    pub singleton: bool,
    /// Fields in input order.
    pub fields: Vec<FieldDefinition>,
}

impl CollectionDefinition {
    /// Returns the primary-key field, if any.
    pub fn primary_key(&self) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.primary_key)
    }

    /// Looks up a field by identifier.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Normalized schema keyed by original collection identifier.
///
/// Built once by [`build_schema`](crate::build_schema) and read-only
/// afterwards. Iteration is in identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaDefinition {
    collections: BTreeMap<String, CollectionDefinition>,
}

impl SchemaDefinition {
    pub(crate) fn from_map(collections: BTreeMap<String, CollectionDefinition>) -> Self {
        Self { collections }
    }

    /// Looks up a collection by its original identifier.
    pub fn get(&self, identifier: &str) -> Option<&CollectionDefinition> {
        self.collections.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.collections.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Returns the collection identifiers in code-point order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Iterates over `(identifier, collection)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollectionDefinition)> {
        self.collections
            .iter()
            .map(|(identifier, collection)| (identifier.as_str(), collection))
    }
}
