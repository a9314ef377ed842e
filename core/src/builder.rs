//! Schema normalization.
//!
//! [`build_schema`] turns the raw [`DataModel`] into a [`SchemaDefinition`].
//! Nothing here fails: fields whose type cannot be resolved, generated
//! columns of system collections, and collections left without fields are
//! dropped and reported through `tracing` at debug level.
//!
//! # Example
//!
//! ```
//! use directus_typegen_core::*;
//!
//! let model = DataModel {
//!     collections: vec![Collection::new("articles")],
//!     fields: vec![
//!         FieldSpec::new("articles", "id", "uuid").primary_key(),
//!         FieldSpec::new("articles", "title", "string").nullable(),
//!     ],
//!     relations: vec![],
//! };
//!
//! let schema = build_schema(&model, &BuilderOptions::new(NameTransform::PascalCase));
//! let articles = schema.get("articles").unwrap();
//! assert_eq!(articles.name, "Articles");
//! assert_eq!(articles.fields.len(), 2);
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::relation::{classify_relation, discriminator_targets};
use crate::{
    CollectionDefinition, DataModel, FieldDefinition, FieldSpec, NameTransform, Relation,
    RelationSpec, SchemaDefinition, TypeExpr, is_system_collection, primitive_type,
};

/// Options for [`build_schema`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderOptions {
    /// Transform applied to non-system collection identifiers.
    pub naming: NameTransform,
}

impl BuilderOptions {
    pub fn new(naming: NameTransform) -> Self {
        Self { naming }
    }
}

/// Builds the normalized schema from the raw data model.
///
/// The first record for a collection identifier wins; later duplicates are
/// skipped. Collection keys are the original identifiers, only
/// [`CollectionDefinition::name`] carries the transformed name.
pub fn build_schema(model: &DataModel, options: &BuilderOptions) -> SchemaDefinition {
    let mut collections: BTreeMap<String, CollectionDefinition> = BTreeMap::new();

    for collection in &model.collections {
        let identifier = collection.collection.as_str();
        let Entry::Vacant(slot) = collections.entry(identifier.to_string()) else {
            debug!(collection = identifier, "Skipping duplicate collection");
            continue;
        };

        let system = is_system_collection(identifier);
        let name = if system {
            identifier.to_string()
        } else {
            options.naming.apply(identifier)
        };

        let fields = model
            .fields
            .iter()
            .filter(|field| field.collection == identifier)
            .filter_map(|field| resolve_field(field, system, &model.relations))
            .collect();

        slot.insert(CollectionDefinition {
            name,
            system,
            singleton: collection.is_singleton(),
            fields,
        });
    }

    collections.retain(|identifier, collection| {
        let keep = !collection.fields.is_empty();
        if !keep {
            debug!(collection = identifier.as_str(), "Dropping empty collection");
        }
        keep
    });

    info!(collections = collections.len(), "Built schema");
    SchemaDefinition::from_map(collections)
}

fn resolve_field(
    field: &FieldSpec,
    system: bool,
    relations: &[RelationSpec],
) -> Option<FieldDefinition> {
    if system && field.is_generated() {
        drop_field(field, "generated system column");
        return None;
    }

    let mut ty = primitive_type(&field.kind);
    let relation = classify_relation(field, relations);

    // Aliases have no storage type; the reverse side still lists rows.
    if let Relation::OneToMany(_) = relation {
        ty = Some(ty.unwrap_or_else(|| TypeExpr::named("unknown")).array());
    }

    if let Some(targets) = discriminator_targets(field, relations) {
        ty = Some(TypeExpr::StringLiterals(targets.to_vec()));
    }

    let Some(ty) = ty else {
        drop_field(field, "unmapped type");
        return None;
    };

    Some(FieldDefinition {
        name: field.field.clone(),
        ty,
        nullable: field.is_nullable(),
        primary_key: field.is_primary_key(),
        relation,
    })
}

fn drop_field(field: &FieldSpec, reason: &str) {
    debug!(
        collection = field.collection.as_str(),
        field = field.field.as_str(),
        kind = field.kind.as_str(),
        reason,
        "Dropping field"
    );
}
