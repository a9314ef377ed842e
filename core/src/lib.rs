//! Directus schema normalization and TypeScript declaration rendering.
//!
//! The crate runs two pure stages over the metadata a Directus instance
//! exposes:
//!
//! - [`build_schema`] turns the raw [`DataModel`] (collections, fields,
//!   relations) into a normalized [`SchemaDefinition`], resolving relation
//!   kinds with [`classify_relation`], mapping primitive types with
//!   [`primitive_type`] and dropping whatever cannot be resolved.
//! - [`render_schema`] turns a [`SchemaDefinition`] into a `.d.ts`
//!   document with deterministic ordering.
//!
//! Collection interface names come from a [`NameTransform`]; it is the only
//! fallible input ([`NamingError`]) and is validated before building.
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
//!         FieldSpec::new("articles", "author", "uuid"),
//!     ],
//!     relations: vec![RelationSpec::many_to_one("articles", "author", "directus_users")],
//! };
//!
//! let naming: NameTransform = "pascalcase".parse().unwrap();
//! let schema = build_schema(&model, &BuilderOptions::new(naming));
//! let output = render_schema(&schema, &RenderOptions::default());
//!
//! assert!(output.starts_with("import { DirectusUsers } from '@directus/sdk';"));
//! assert!(output.contains("author: DirectusUsers<AllDirectusCollections> | string;"));
//! ```

mod builder;
mod field_types;
mod naming;
mod relation;
mod render;
mod schema;
mod type_expr;
mod types;

pub use builder::{BuilderOptions, build_schema};
pub use field_types::primitive_type;
pub use naming::{NameTransform, NamingError};
pub use relation::{
    DISCRIMINATOR_FIELD, ITEM_FIELD, Relation, RelationLink, classify_relation,
    discriminator_targets, is_relation_alias,
};
pub use render::{
    ALL_COLLECTIONS_ROOT, Indent, RenderOptions, SDK_MODULE, SystemImports, field_type,
    render_schema,
};
pub use schema::{CollectionDefinition, FieldDefinition, SchemaDefinition};
pub use type_expr::TypeExpr;
pub use types::*;
