//! TypeScript type expressions.
//!
//! Field types are composed as a small closed tree and serialized in one
//! place, so token ordering is decided by how the tree is assembled rather
//! than by string splicing.

use std::fmt;

use serde::Serialize;

/// A TypeScript type expression.
///
/// # Examples
///
/// ```
/// use directus_typegen_core::TypeExpr;
///
/// let expr = TypeExpr::union(vec![
///     TypeExpr::named("Articles").array(),
///     TypeExpr::named("string"),
///     TypeExpr::null(),
/// ]);
/// assert_eq!(expr.to_string(), "Articles[] | string | null");
///
/// let kinds = TypeExpr::StringLiterals(vec!["hero".into(), "gallery".into()]);
/// assert_eq!(kinds.to_string(), "'hero' | 'gallery'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A type reference (`string`, `Articles`, `DirectusUsers<AllDirectusCollections>`).
    Named(String),
    /// `T[]`.
    Array(Box<TypeExpr>),
    /// `A | B | C`.
    Union(Vec<TypeExpr>),
    /// `'a' | 'b'`.
    StringLiterals(Vec<String>),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn null() -> Self {
        Self::Named("null".to_string())
    }

    /// Wraps this expression in an array.
    pub fn array(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// Wraps this expression in an array when `multiple` is set.
    pub fn array_if(self, multiple: bool) -> Self {
        if multiple { self.array() } else { self }
    }

    /// Builds a union, flattening nested unions. A single member is
    /// returned unwrapped.
    pub fn union(members: Vec<TypeExpr>) -> Self {
        let mut flat = Vec::with_capacity(members.len());
        for member in members {
            match member {
                Self::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Self::Union(flat)
        }
    }

    /// Returns the top-level union members of this expression.
    ///
    /// A string-literal set contributes one member per literal; any other
    /// non-union expression is its own single member.
    pub fn members(&self) -> Vec<TypeExpr> {
        match self {
            Self::Union(members) => members.clone(),
            Self::StringLiterals(values) => values
                .iter()
                .map(|value| Self::StringLiterals(vec![value.clone()]))
                .collect(),
            other => vec![other.clone()],
        }
    }

    fn needs_parens_in_array(&self) -> bool {
        match self {
            Self::Union(members) => members.len() > 1,
            Self::StringLiterals(values) => values.len() > 1,
            _ => false,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Array(inner) if inner.needs_parens_in_array() => write!(f, "({inner})[]"),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            Self::StringLiterals(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "'{value}'")?;
                }
                Ok(())
            }
        }
    }
}
