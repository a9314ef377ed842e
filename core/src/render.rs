//! Declaration rendering.
//!
//! [`render_schema`] emits a TypeScript declaration file for a
//! [`SchemaDefinition`]. The same body is declared twice, once as an
//! augmentation of the application module and once in global scope, so the
//! types resolve whether or not the consumer imports the module.
//!
//! Output is fully deterministic: collections are enumerated in identifier
//! order, the primary key comes first in each interface and the remaining
//! fields follow in identifier order.

use serde::{Deserialize, Serialize};

use crate::{
    CollectionDefinition, FieldDefinition, NameTransform, RelationLink, SchemaDefinition,
    TypeExpr, is_system_collection,
};

/// Name of the root interface listing every collection, system ones included.
pub const ALL_COLLECTIONS_ROOT: &str = "AllDirectusCollections";

/// Module the system collection types are imported from.
pub const SDK_MODULE: &str = "@directus/sdk";

/// Literal indentation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Indent {
    pub amount: usize,
    #[serde(rename = "char")]
    pub character: char,
}

impl Default for Indent {
    fn default() -> Self {
        Self {
            amount: 4,
            character: ' ',
        }
    }
}

impl Indent {
    /// Returns one indentation unit as a string.
    pub fn unit(&self) -> String {
        self.character.to_string().repeat(self.amount)
    }
}

/// Options for [`render_schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub indent: Indent,
    /// Name of the root interface listing the user collections.
    pub root_name: String,
    /// Module augmented by the first declaration block.
    pub module_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            root_name: "DirectusSchema".to_string(),
            module_name: "#app".to_string(),
        }
    }
}

/// System collection types referenced by rendered fields.
///
/// Names are kept once each, in order of first reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemImports {
    names: Vec<String>,
}

impl SystemImports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Imported type names in order of first reference.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn insert(&mut self, name: String) {
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    fn statement(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(format!(
            "import {{ {} }} from '{SDK_MODULE}';\n\n",
            self.names.join(", ")
        ))
    }
}

/// Renders the declaration file for `schema`.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::*;
///
/// let model = DataModel {
///     collections: vec![Collection::new("articles")],
///     fields: vec![
///         FieldSpec::new("articles", "id", "uuid").primary_key(),
///         FieldSpec::new("articles", "title", "string").nullable(),
///     ],
///     relations: vec![],
/// };
/// let schema = build_schema(&model, &BuilderOptions::new(NameTransform::PascalCase));
/// let output = render_schema(&schema, &RenderOptions::default());
///
/// assert!(output.contains("interface Articles {"));
/// assert!(output.contains("title: string | null;"));
/// assert!(output.contains("articles: Articles[];"));
/// assert!(output.trim_end().ends_with("export {};"));
/// ```
pub fn render_schema(schema: &SchemaDefinition, options: &RenderOptions) -> String {
    let indent = options.indent.unit();
    let mut imports = SystemImports::new();
    let mut body: Vec<String> = Vec::new();

    for (_, collection) in schema.iter() {
        body.extend(render_collection(schema, collection, &indent, &mut imports));
        body.push(String::new());
    }

    body.extend(render_root(schema, &options.root_name, &indent, false));
    body.push(String::new());
    body.extend(render_root(schema, ALL_COLLECTIONS_ROOT, &indent, true));

    let mut out = String::new();
    if let Some(statement) = imports.statement() {
        out.push_str(&statement);
    }

    out.push_str(&declare_block(
        &format!("declare module '{}'", options.module_name),
        &body,
        &indent,
    ));
    out.push('\n');
    out.push_str(&declare_block("declare global", &body, &indent));
    out.push('\n');
    out.push_str("export {};\n");
    out
}

/// Composes the rendered type of a non-primary field.
///
/// Relation tokens are prepended one by one, so the last link ends up
/// first; the field's own type follows and `null` closes nullable fields.
/// System targets are recorded in `imports` on first sight.
pub fn field_type(
    schema: &SchemaDefinition,
    field: &FieldDefinition,
    imports: &mut SystemImports,
) -> TypeExpr {
    let mut members = field.ty.members();

    for link in field.links() {
        let token = relation_token(schema, &link, imports).array_if(link.multiple);
        members.insert(0, token);
    }

    if field.nullable {
        members.push(TypeExpr::null());
    }

    TypeExpr::union(members)
}

fn relation_token(
    schema: &SchemaDefinition,
    link: &RelationLink,
    imports: &mut SystemImports,
) -> TypeExpr {
    if is_system_collection(&link.collection) {
        let system_name = NameTransform::PascalCase.apply(&link.collection);
        let token = TypeExpr::named(format!("{system_name}<{ALL_COLLECTIONS_ROOT}>"));
        imports.insert(system_name);
        return token;
    }

    // Dangling targets degrade to an empty name.
    let name = schema
        .get(&link.collection)
        .map(|collection| collection.name.clone())
        .unwrap_or_default();
    TypeExpr::named(name)
}

fn render_collection(
    schema: &SchemaDefinition,
    collection: &CollectionDefinition,
    indent: &str,
    imports: &mut SystemImports,
) -> Vec<String> {
    let mut lines = vec![format!("interface {} {{", collection.name)];

    if let Some(pk) = collection.primary_key() {
        lines.push(format!("{indent}{}: {};", pk.name, pk.ty));
    }

    let mut fields: Vec<&FieldDefinition> = collection
        .fields
        .iter()
        .filter(|field| !field.primary_key)
        .collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    for field in fields {
        let ty = field_type(schema, field, imports);
        lines.push(format!("{indent}{}: {ty};", field.name));
    }

    lines.push("}".to_string());
    lines
}

fn render_root(
    schema: &SchemaDefinition,
    root_name: &str,
    indent: &str,
    include_system: bool,
) -> Vec<String> {
    let mut lines = vec![format!("export interface {root_name} {{")];

    for (identifier, collection) in schema.iter() {
        if !include_system && is_system_collection(identifier) {
            continue;
        }
        let value = TypeExpr::named(collection.name.clone()).array_if(!collection.singleton);
        lines.push(format!("{indent}{identifier}: {value};"));
    }

    lines.push("}".to_string());
    lines
}

fn declare_block(header: &str, body: &[String], indent: &str) -> String {
    let mut out = format!("{header} {{\n");
    for line in body {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(indent);
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BuilderOptions, Collection, DataModel, FieldSpec, RelationSpec, build_schema,
    };

    fn articles_model() -> DataModel {
        DataModel {
            collections: vec![
                Collection::new("articles"),
                Collection::new("directus_users"),
                Collection::new("settings").singleton(),
            ],
            fields: vec![
                FieldSpec::new("articles", "title", "string").nullable(),
                FieldSpec::new("articles", "author", "uuid"),
                FieldSpec::new("articles", "editor", "uuid").nullable(),
                FieldSpec::new("articles", "id", "uuid").primary_key(),
                FieldSpec::new("directus_users", "id", "uuid").primary_key(),
                FieldSpec::new("settings", "id", "integer").primary_key(),
            ],
            relations: vec![
                RelationSpec::many_to_one("articles", "author", "directus_users"),
                RelationSpec::many_to_one("articles", "editor", "directus_users"),
            ],
        }
    }

    fn render(model: &DataModel, naming: NameTransform) -> String {
        let schema = build_schema(model, &BuilderOptions::new(naming));
        render_schema(&schema, &RenderOptions::default())
    }

    fn member_lines<'a>(output: &'a str, interface: &str) -> Vec<&'a str> {
        output
            .lines()
            .skip_while(|line| line.trim() != format!("interface {interface} {{"))
            .skip(1)
            .take_while(|line| line.trim() != "}")
            .map(str::trim)
            .collect()
    }

    #[test]
    fn test_primary_key_first_then_sorted() {
        let output = render(&articles_model(), NameTransform::PascalCase);
        let members = member_lines(&output, "Articles");

        assert_eq!(
            members,
            vec![
                "id: string;",
                "author: DirectusUsers<AllDirectusCollections> | string;",
                "editor: DirectusUsers<AllDirectusCollections> | string | null;",
                "title: string | null;",
            ]
        );
    }

    #[test]
    fn test_system_import_emitted_once() {
        let output = render(&articles_model(), NameTransform::PascalCase);

        assert!(output.starts_with("import { DirectusUsers } from '@directus/sdk';\n\n"));
        assert_eq!(output.matches("import {").count(), 1);
    }

    #[test]
    fn test_field_type_records_system_imports() {
        let schema = build_schema(&articles_model(), &BuilderOptions::default());
        let articles = schema.get("articles").unwrap();
        let mut imports = SystemImports::new();

        let author = field_type(&schema, articles.field("author").unwrap(), &mut imports);
        let editor = field_type(&schema, articles.field("editor").unwrap(), &mut imports);
        field_type(&schema, articles.field("title").unwrap(), &mut imports);

        assert_eq!(author.to_string(), "DirectusUsers<AllDirectusCollections> | string");
        assert_eq!(
            editor.to_string(),
            "DirectusUsers<AllDirectusCollections> | string | null"
        );
        assert_eq!(imports.names(), ["DirectusUsers".to_string()]);
    }

    #[test]
    fn test_no_import_without_system_references() {
        let mut model = articles_model();
        model.relations.clear();

        let output = render(&model, NameTransform::Database);
        assert!(!output.contains("import"));
        assert!(output.starts_with("declare module '#app' {"));
    }

    #[test]
    fn test_roots_split_user_and_system() {
        let output = render(&articles_model(), NameTransform::PascalCase);

        let user_root: Vec<_> = member_lines_root(&output, "DirectusSchema");
        assert_eq!(user_root, vec!["articles: Articles[];", "settings: Settings;"]);

        let all_root: Vec<_> = member_lines_root(&output, ALL_COLLECTIONS_ROOT);
        assert_eq!(
            all_root,
            vec![
                "articles: Articles[];",
                "directus_users: directus_users[];",
                "settings: Settings;",
            ]
        );
    }

    fn member_lines_root<'a>(output: &'a str, root: &str) -> Vec<&'a str> {
        output
            .lines()
            .skip_while(|line| line.trim() != format!("export interface {root} {{"))
            .skip(1)
            .take_while(|line| line.trim() != "}")
            .map(str::trim)
            .collect()
    }

    #[test]
    fn test_both_declaration_blocks_are_identical() {
        let output = render(&articles_model(), NameTransform::PascalCase);
        let (_, rest) = output.split_once("declare module '#app' {\n").unwrap();
        let (module_body, global) = rest.split_once("}\n\ndeclare global {\n").unwrap();
        let (global_body, tail) = global.rsplit_once("}\n\nexport {};").unwrap();

        assert_eq!(module_body, global_body);
        assert_eq!(tail, "\n");
    }

    #[test]
    fn test_relation_tokens_prepend_in_reverse_link_order() {
        let model = DataModel {
            collections: vec![
                Collection::new("pages_blocks"),
                Collection::new("hero"),
                Collection::new("gallery"),
            ],
            fields: vec![
                FieldSpec::new("pages_blocks", "id", "integer").primary_key(),
                FieldSpec::new("pages_blocks", "item", "string").nullable(),
                FieldSpec::new("pages_blocks", "collection", "string"),
                FieldSpec::new("hero", "id", "integer").primary_key(),
                FieldSpec::new("gallery", "id", "integer").primary_key(),
            ],
            relations: vec![
                RelationSpec::new("pages_blocks", "item")
                    .with_allowed_collections(&["hero", "gallery"]),
            ],
        };

        let output = render(&model, NameTransform::PascalCase);
        let members = member_lines(&output, "PagesBlocks");
        assert_eq!(
            members,
            vec![
                "id: number;",
                "collection: 'hero' | 'gallery';",
                "item: Gallery | Hero | string | null;",
            ]
        );
    }

    #[test]
    fn test_dangling_target_renders_empty_name() {
        let model = DataModel {
            collections: vec![Collection::new("articles")],
            fields: vec![
                FieldSpec::new("articles", "id", "integer").primary_key(),
                FieldSpec::new("articles", "category", "integer"),
            ],
            relations: vec![RelationSpec::many_to_one("articles", "category", "categories")],
        };

        let output = render(&model, NameTransform::Database);
        assert!(output.contains("category:  | number;"));
    }

    #[test]
    fn test_custom_indent_and_names() {
        let schema = build_schema(&articles_model(), &BuilderOptions::default());
        let options = RenderOptions {
            indent: Indent {
                amount: 1,
                character: '\t',
            },
            root_name: "Schema".to_string(),
            module_name: "my-app".to_string(),
        };

        let output = render_schema(&schema, &options);
        assert!(
            output.contains("declare module 'my-app' {\n\tinterface articles {\n\t\tid: string;")
        );
        assert!(output.contains("\texport interface Schema {"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let model = articles_model();
        let first = render(&model, NameTransform::CamelCase);
        let second = render(&model, NameTransform::CamelCase);
        assert_eq!(first, second);
    }
}
