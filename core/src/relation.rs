//! Relation classification.
//!
//! Directus does not tag relations with a kind. The kind is inferred from
//! where a field shows up in the flat relation list: a one-to-many is found
//! through the reverse side of an alias field, a many-to-one through the
//! forward side of a foreign-key column, and a many-to-any through an
//! allowed-collections list. [`classify_relation`] performs that inference
//! once per field.

use serde::Serialize;

use crate::{FieldSpec, RelationSpec};

/// Special tags that mark an alias field as the reverse side of a relation.
const RELATION_ALIAS_TAGS: [&str; 3] = ["o2m", "m2m", "m2a"];

/// Name of the many-to-any discriminator column.
pub const DISCRIMINATOR_FIELD: &str = "collection";

/// Name of the many-to-any foreign-key column paired with the discriminator.
pub const ITEM_FIELD: &str = "item";

/// One edge from a field to a target collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationLink {
    /// Target collection identifier.
    pub collection: String,
    /// Whether this is a to-many edge.
    pub multiple: bool,
}

/// The relation kind of a single field.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::{Relation, RelationLink};
///
/// let relation = Relation::ManyToOne("directus_users".into());
/// assert_eq!(
///     relation.links(),
///     vec![RelationLink { collection: "directus_users".into(), multiple: false }]
/// );
/// assert!(Relation::None.links().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Relation {
    #[default]
    None,
    /// Alias field listing the rows of another collection.
    OneToMany(String),
    /// Foreign-key column referencing one row of another collection.
    ManyToOne(String),
    /// Foreign-key column referencing a row in any of several collections.
    ManyToAny(Vec<String>),
}

impl Relation {
    /// Returns the edges of this relation in declaration order.
    pub fn links(&self) -> Vec<RelationLink> {
        match self {
            Self::None => Vec::new(),
            Self::OneToMany(target) => vec![RelationLink {
                collection: target.clone(),
                multiple: true,
            }],
            Self::ManyToOne(target) => vec![RelationLink {
                collection: target.clone(),
                multiple: false,
            }],
            Self::ManyToAny(targets) => targets
                .iter()
                .map(|target| RelationLink {
                    collection: target.clone(),
                    multiple: false,
                })
                .collect(),
        }
    }
}

/// Returns `true` if `field` is an alias carrying a relation special tag.
pub fn is_relation_alias(field: &FieldSpec) -> bool {
    field.kind == "alias" && RELATION_ALIAS_TAGS.iter().any(|tag| field.has_special(tag))
}

/// Classifies the relation carried by `field`.
///
/// The reverse lookup applies only to relation aliases that are also the
/// primary key. Otherwise the relation keyed by the field itself decides:
/// a direct `related_collection` wins over an allowed-collections list.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::{FieldSpec, Relation, RelationSpec, classify_relation};
///
/// let relations = vec![RelationSpec::many_to_one("articles", "author", "directus_users")];
/// let author = FieldSpec::new("articles", "author", "uuid");
///
/// assert_eq!(
///     classify_relation(&author, &relations),
///     Relation::ManyToOne("directus_users".into())
/// );
/// ```
pub fn classify_relation(field: &FieldSpec, relations: &[RelationSpec]) -> Relation {
    if is_relation_alias(field) && field.is_primary_key() {
        if let Some(reverse) = relations
            .iter()
            .find(|rel| rel.points_back_to(&field.collection, &field.field))
        {
            return Relation::OneToMany(reverse.collection.clone());
        }
    }

    let Some(forward) = relations
        .iter()
        .find(|rel| rel.collection == field.collection && rel.field == field.field)
    else {
        return Relation::None;
    };

    if let Some(target) = &forward.related_collection {
        Relation::ManyToOne(target.clone())
    } else if let Some(targets) = forward.allowed_collections() {
        Relation::ManyToAny(targets.to_vec())
    } else {
        Relation::None
    }
}

/// Returns the allowed collections of the many-to-any relation paired with
/// a discriminator column, if `field` is one.
pub fn discriminator_targets<'a>(
    field: &FieldSpec,
    relations: &'a [RelationSpec],
) -> Option<&'a [String]> {
    if field.field != DISCRIMINATOR_FIELD {
        return None;
    }

    relations
        .iter()
        .find(|rel| rel.collection == field.collection && rel.field == ITEM_FIELD)
        .and_then(RelationSpec::allowed_collections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_requires_relation_tag() {
        let plain =
            FieldSpec::new("articles", "divider", "alias").with_special(&["alias", "no-data"]);
        let o2m = FieldSpec::new("articles", "comments", "alias").with_special(&["o2m"]);
        let not_alias = FieldSpec::new("articles", "comments", "string").with_special(&["o2m"]);

        assert!(!is_relation_alias(&plain));
        assert!(is_relation_alias(&o2m));
        assert!(!is_relation_alias(&not_alias));
    }

    #[test]
    fn test_reverse_lookup_needs_primary_key() {
        let relations = vec![
            RelationSpec::many_to_one("comments", "article", "articles")
                .with_one_field("articles", "comments"),
        ];

        let field = FieldSpec::new("articles", "comments", "alias").with_special(&["o2m"]);
        assert_eq!(classify_relation(&field, &relations), Relation::None);

        let pk_alias = field.primary_key();
        assert_eq!(
            classify_relation(&pk_alias, &relations),
            Relation::OneToMany("comments".into())
        );
    }

    #[test]
    fn test_forward_many_to_any() {
        let relations = vec![
            RelationSpec::new("pages_blocks", "item")
                .with_allowed_collections(&["hero", "gallery"]),
        ];
        let item = FieldSpec::new("pages_blocks", "item", "string");

        let relation = classify_relation(&item, &relations);
        assert_eq!(relation, Relation::ManyToAny(vec!["hero".into(), "gallery".into()]));
        assert!(relation.links().iter().all(|link| !link.multiple));
    }

    #[test]
    fn test_related_collection_wins_over_allowed_list() {
        let relations = vec![
            RelationSpec::many_to_one("pages_blocks", "item", "hero")
                .with_allowed_collections(&["hero", "gallery"]),
        ];
        let item = FieldSpec::new("pages_blocks", "item", "string");

        assert_eq!(classify_relation(&item, &relations), Relation::ManyToOne("hero".into()));
    }

    #[test]
    fn test_forward_relation_without_target_is_none() {
        let relations = vec![RelationSpec::new("articles", "author")];
        let author = FieldSpec::new("articles", "author", "uuid");

        assert_eq!(classify_relation(&author, &relations), Relation::None);
    }

    #[test]
    fn test_discriminator_targets() {
        let relations =
            vec![RelationSpec::new("pages_blocks", "item").with_allowed_collections(&["hero"])];
        let discriminator = FieldSpec::new("pages_blocks", "collection", "string");
        let other = FieldSpec::new("pages_blocks", "sort", "integer");

        assert_eq!(
            discriminator_targets(&discriminator, &relations),
            Some(["hero".to_string()].as_slice())
        );
        assert!(discriminator_targets(&other, &relations).is_none());
    }
}
