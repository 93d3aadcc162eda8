//! Declaration pool and field resolution across inheritance chains.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::error::GenerateError;
use crate::parser::ast::{CompilationUnit, TypeDecl, TypeRef};

/// Matches a well-formed type reference: a qualified name with optional
/// generics and array suffixes.
static TYPE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][\w$]*(\.[A-Za-z_$][\w$]*)*(<.*>)?(\[\])*$").expect("a valid regex")
});

/// A resolved field: its name and the raw text of its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeRef,
}

/// The flat, name-indexed set of type declarations parsed from the companion
/// text. No namespacing: a reference resolves to the first declaration with a
/// matching simple name, or stays unresolved.
#[derive(Debug, Default)]
pub struct DeclarationPool {
    types: IndexMap<String, TypeDecl>,
}

impl DeclarationPool {
    pub fn from_unit(unit: CompilationUnit) -> Self {
        let mut types = IndexMap::new();
        for decl in unit.types {
            types.entry(decl.name.clone()).or_insert(decl);
        }
        Self { types }
    }

    fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    /// Resolves `name` to its ordered field list, or `None` when the pool
    /// has no declaration with that simple name. Collection order: own (or
    /// interface-synthesized) fields, then each `extends` target, then each
    /// `implements` target, each fully recursively expanded before merging.
    pub fn resolve(&self, name: &str) -> Result<Option<Vec<FieldDescriptor>>, GenerateError> {
        let Some(decl) = self.get(name) else {
            debug!(name, "type not found in declaration pool");
            return Ok(None);
        };
        self.fields_of(decl).map(Some)
    }

    /// Like [`resolve`](Self::resolve) but with an unresolved name
    /// contributing an empty field list.
    pub fn collect_fields(&self, name: &str) -> Result<Vec<FieldDescriptor>, GenerateError> {
        Ok(self.resolve(name)?.unwrap_or_default())
    }

    fn fields_of(&self, decl: &TypeDecl) -> Result<Vec<FieldDescriptor>, GenerateError> {
        let mut fields = if decl.is_interface {
            synthesize_accessor_fields(decl)?
        } else {
            decl.fields
                .iter()
                .map(|field| FieldDescriptor {
                    name: field.name.clone(),
                    ty: field.ty.clone(),
                })
                .collect()
        };
        for parent in decl.extends.iter().chain(&decl.implements) {
            match self.get(parent) {
                Some(parent_decl) => fields.extend(self.fields_of(parent_decl)?),
                None => debug!(name = parent.as_str(), "supertype not in declaration pool"),
            }
        }
        Ok(fields)
    }
}

/// Derives field-like entries from an interface's zero-argument `get...`
/// accessors: `String getName()` contributes a `name: String` field. The
/// declared return type must be a usable type reference.
fn synthesize_accessor_fields(decl: &TypeDecl) -> Result<Vec<FieldDescriptor>, GenerateError> {
    let mut fields = Vec::new();
    for method in &decl.methods {
        if !method.params.is_empty() {
            continue;
        }
        let Some(rest) = method.name.strip_prefix("get") else {
            continue;
        };
        let Some(first) = rest.chars().next() else {
            continue;
        };
        if !TYPE_REF_RE.is_match(&method.return_type.raw) {
            return Err(GenerateError::TypeSynthesis {
                accessor: method.name.clone(),
                type_name: method.return_type.raw.clone(),
            });
        }
        let mut name: String = first.to_lowercase().collect();
        name.push_str(&rest[first.len_utf8()..]);
        fields.push(FieldDescriptor {
            name,
            ty: method.return_type.clone(),
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_declarations;

    fn pool_of(source: &str) -> DeclarationPool {
        DeclarationPool::from_unit(parse_declarations(source).expect("a unit"))
    }

    fn field_names(pool: &DeclarationPool, name: &str) -> Vec<String> {
        pool.collect_fields(name)
            .expect("fields")
            .into_iter()
            .map(|field| field.name)
            .collect()
    }

    #[test]
    fn unresolved_name_is_not_an_error() {
        let pool = pool_of("");
        assert_eq!(pool.resolve("Ghost").expect("resolved"), None);
        assert!(field_names(&pool, "Ghost").is_empty());
    }

    #[test]
    fn own_fields_come_before_inherited_ones() {
        let pool = pool_of(
            "public class BaseUser { private String email; } \
             public class ExtendedUser extends BaseUser { private String username; }",
        );
        assert_eq!(field_names(&pool, "ExtendedUser"), ["username", "email"]);
    }

    #[test]
    fn extends_targets_precede_implements_targets() {
        let pool = pool_of(
            "class Base { private String base; } \
             interface Named { String getName(); } \
             class Thing extends Base implements Named { private String own; }",
        );
        assert_eq!(field_names(&pool, "Thing"), ["own", "base", "name"]);
    }

    #[test]
    fn interface_accessors_synthesize_fields() {
        let pool = pool_of(
            "public interface Event { String getName(); int getAge(); void fire(); String get(); String describe(); }",
        );
        let fields = pool.collect_fields("Event").expect("fields");
        assert_eq!(
            fields,
            vec![
                FieldDescriptor {
                    name: "name".to_string(),
                    ty: TypeRef::new("String"),
                },
                FieldDescriptor {
                    name: "age".to_string(),
                    ty: TypeRef::new("int"),
                },
            ]
        );
    }

    #[test]
    fn accessors_with_parameters_do_not_synthesize() {
        let pool = pool_of("interface Lookup { String getValue(String key); }");
        assert!(field_names(&pool, "Lookup").is_empty());
    }

    #[test]
    fn interface_inheritance_collects_recursively() {
        let pool = pool_of(
            "interface Base { String getId(); } \
             interface Child extends Base { String getLabel(); }",
        );
        assert_eq!(field_names(&pool, "Child"), ["label", "id"]);
    }

    #[test]
    fn first_declaration_with_a_name_wins() {
        let pool = pool_of(
            "class Dup { private String first; } class Dup { private String second; }",
        );
        assert_eq!(field_names(&pool, "Dup"), ["first"]);
    }

    #[test]
    fn missing_supertype_contributes_nothing() {
        let pool = pool_of("class A extends Missing { private String own; }");
        assert_eq!(field_names(&pool, "A"), ["own"]);
    }
}
