//! Syntax tree for the declaration subset the engine understands.
//!
//! Only what the downstream resolvers consume is kept: type declarations
//! with their inheritance clauses, field declarators, method signatures, and
//! annotations. Bodies, initializers, and modifiers are parsed past and
//! dropped.

/// A parsed companion-declarations block: the flat list of type declarations
/// found in it, nested declarations lifted to the top.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    pub types: Vec<TypeDecl>,
}

/// A `class` or `interface` declaration.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub is_interface: bool,
    /// Simple names of `extends` targets, in declaration order.
    pub extends: Vec<String>,
    /// Simple names of `implements` targets, in declaration order.
    pub implements: Vec<String>,
    /// One entry per declarator: `private String a, b;` yields two.
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

/// A single field declarator.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
}

/// A method signature; the body is discarded during parsing.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub return_type: TypeRef,
    pub annotations: Vec<Annotation>,
    pub params: Vec<ParamDecl>,
}

impl MethodDecl {
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        find_annotation(&self.annotations, name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }
}

/// A formal method parameter.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeRef,
    pub annotations: Vec<Annotation>,
}

impl ParamDecl {
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        find_annotation(&self.annotations, name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }
}

fn find_annotation<'a>(annotations: &'a [Annotation], name: &str) -> Option<&'a Annotation> {
    annotations.iter().find(|annotation| annotation.name == name)
}

/// A type reference as written in source, normalized to a spaceless raw form
/// (`int`, `Map<String,Object>`, `List<User>`).
///
/// The raw text is what downstream resolution keys on: pool lookups match it
/// against declared simple names, the primitive table matches it exactly,
/// and the map-marker check is a substring test on it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{raw}")]
pub struct TypeRef {
    pub raw: String,
}

impl TypeRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The base simple name: generics, array suffixes, and qualifier
    /// segments stripped (`foo.Bar<T>[]` → `Bar`).
    pub fn simple_name(&self) -> &str {
        let base = self.raw.split(['<', '[']).next().unwrap_or(&self.raw);
        base.rsplit('.').next().unwrap_or(base)
    }
}

/// `@Name`, `@Name("v")`, or `@Name(a = x, b = "y")`.
///
/// Qualified annotation names are reduced to their simple name, which is
/// what classification matches on.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub name: String,
    pub args: Vec<AnnotationArg>,
}

impl Annotation {
    /// The single positional argument of a single-member annotation
    /// (`@RequestHeader("Authorization")`).
    pub fn single_value(&self) -> Option<&AnnotationValue> {
        match self.args.as_slice() {
            [AnnotationArg { name: None, value }] => Some(value),
            _ => None,
        }
    }

    /// The first argument carrying the given attribute name.
    pub fn attr(&self, name: &str) -> Option<&AnnotationValue> {
        self.args
            .iter()
            .find(|arg| arg.name.as_deref() == Some(name))
            .map(|arg| &arg.value)
    }

    /// The first string literal among the arguments, positional or named.
    pub fn first_string(&self) -> Option<&str> {
        self.args.iter().find_map(|arg| match &arg.value {
            AnnotationValue::Str(text) => Some(text.as_str()),
            AnnotationValue::Raw(_) => None,
        })
    }
}

/// One annotation argument, optionally named (`value = "/xml"`).
#[derive(Debug, Clone)]
pub struct AnnotationArg {
    pub name: Option<String>,
    pub value: AnnotationValue,
}

/// A string literal keeps its unquoted content; any other expression keeps
/// its raw source text (`RequestMethod.POST`, `{"a","b"}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    Str(String),
    Raw(String),
}

impl AnnotationValue {
    /// The literal text used for substring checks; string literals without
    /// their quotes.
    pub fn text(&self) -> &str {
        match self {
            Self::Str(text) | Self::Raw(text) => text,
        }
    }
}
