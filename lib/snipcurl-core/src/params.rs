//! Parameter classification and request-part assembly.
//!
//! Each formal parameter is assigned exactly one of the five request-part
//! roles, in declaration order; the assembled parts are then consumed
//! uniformly by the renderer.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::GenerateError;
use crate::mapping::RouteMapping;
use crate::model::DeclarationPool;
use crate::parser::ast::{Annotation, MethodDecl, ParamDecl, TypeRef};
use crate::payload::{self, BodyFormat};

/// Placeholder substituted for every path, query, and header value.
pub(crate) const PLACEHOLDER: &str = "val";

/// Fixed stub for map-like body types. Always emitted as JSON, even when the
/// method declares an XML consumes type.
const MAP_STUB: &str = r#"{"key":"value"}"#;

/// The request-part role assigned to one method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamRole {
    Path,
    Query,
    /// Header with its resolved display name.
    Header(String),
    /// The parameter's type expands field-by-field into the query set.
    Attribute,
    Body,
}

/// One classified method parameter.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub declared_name: String,
    /// The declared name, suffixed with its occurrence count when an earlier
    /// parameter already used it (`id`, `id2`, `id3`, ...).
    pub rendered_name: String,
    pub ty: TypeRef,
    pub role: ParamRole,
}

/// Classifies the method's parameters in declaration order.
pub fn classify(method: &MethodDecl) -> Vec<ParameterDescriptor> {
    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut descriptors = Vec::with_capacity(method.params.len());
    for param in &method.params {
        let declared = param.name.clone();
        let count = seen
            .entry(declared.clone())
            .and_modify(|count| *count += 1)
            .or_insert(1);
        let rendered = if *count > 1 {
            format!("{declared}{count}")
        } else {
            declared.clone()
        };
        let role = role_of(param, &rendered);
        let descriptor = ParameterDescriptor {
            declared_name: declared,
            rendered_name: rendered,
            ty: param.ty.clone(),
            role,
        };
        debug!(
            declared = descriptor.declared_name.as_str(),
            rendered = descriptor.rendered_name.as_str(),
            role = ?descriptor.role,
            "classified parameter"
        );
        descriptors.push(descriptor);
    }
    descriptors
}

/// First matching annotation wins; an unannotated parameter is the body.
fn role_of(param: &ParamDecl, rendered_name: &str) -> ParamRole {
    if param.has_annotation("PathVariable") {
        ParamRole::Path
    } else if param.has_annotation("RequestParam") {
        ParamRole::Query
    } else if let Some(annotation) = param.annotation("RequestHeader") {
        let name =
            header_name(annotation).unwrap_or_else(|| rendered_name.to_string());
        ParamRole::Header(name)
    } else if param.has_annotation("ModelAttribute") {
        ParamRole::Attribute
    } else {
        ParamRole::Body
    }
}

/// Header display name from the annotation's single value or its `value`/
/// `name` attribute.
fn header_name(annotation: &Annotation) -> Option<String> {
    annotation
        .single_value()
        .or_else(|| annotation.attr("value"))
        .or_else(|| annotation.attr("name"))
        .map(|value| value.text().to_string())
}

/// The assembled request parts, ready for rendering. All maps preserve
/// insertion order.
#[derive(Debug, Default)]
pub struct RequestParts {
    pub path_params: IndexMap<String, String>,
    pub query_params: IndexMap<String, String>,
    pub headers: IndexMap<String, String>,
    pub body: Option<RequestBody>,
}

/// A synthesized body and the content type it is emitted with.
#[derive(Debug)]
pub struct RequestBody {
    pub content_type: &'static str,
    pub payload: String,
}

/// Folds classified parameters into request parts, synthesizing the body
/// payload when one is present.
pub fn assemble(
    descriptors: &[ParameterDescriptor],
    mapping: &RouteMapping,
    pool: &DeclarationPool,
) -> Result<RequestParts, GenerateError> {
    let mut parts = RequestParts::default();
    for descriptor in descriptors {
        match &descriptor.role {
            ParamRole::Path => {
                parts
                    .path_params
                    .insert(descriptor.rendered_name.clone(), PLACEHOLDER.to_string());
            }
            ParamRole::Query => {
                parts
                    .query_params
                    .insert(descriptor.rendered_name.clone(), PLACEHOLDER.to_string());
            }
            ParamRole::Header(name) => {
                parts.headers.insert(name.clone(), PLACEHOLDER.to_string());
            }
            ParamRole::Attribute => {
                // the target type's fields expand directly into the query
                // set, bypassing the parameter's own name
                for field in pool.collect_fields(&descriptor.ty.raw)? {
                    parts.query_params.insert(field.name, PLACEHOLDER.to_string());
                }
            }
            ParamRole::Body => {
                parts.body = Some(synthesize_body(descriptor, mapping, pool)?);
            }
        }
    }
    Ok(parts)
}

fn synthesize_body(
    descriptor: &ParameterDescriptor,
    mapping: &RouteMapping,
    pool: &DeclarationPool,
) -> Result<RequestBody, GenerateError> {
    if descriptor.ty.raw.contains("Map") {
        return Ok(RequestBody {
            content_type: BodyFormat::Json.content_type(),
            payload: MAP_STUB.to_string(),
        });
    }
    let format = if mapping.consumes_xml {
        BodyFormat::Xml
    } else {
        BodyFormat::Json
    };
    // visited set is scoped to this one body parameter's descent
    let mut visited = HashSet::new();
    let payload = payload::synthesize(&descriptor.ty.raw, pool, &mut visited, format)?;
    Ok(RequestBody {
        content_type: format.content_type(),
        payload,
    })
}
