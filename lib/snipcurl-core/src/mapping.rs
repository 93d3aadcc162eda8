//! HTTP verb, route, and media-type extraction from route-mapping
//! annotations.

use http::Method;

use crate::parser::ast::MethodDecl;

/// The HTTP method descriptor derived once per invocation from the method's
/// route-mapping annotations.
#[derive(Debug, Clone)]
pub struct RouteMapping {
    pub method: Method,
    /// Route template, possibly containing `{name}` placeholders.
    pub route: String,
    /// Whether the declared `consumes` media type is an XML type.
    pub consumes_xml: bool,
}

impl RouteMapping {
    pub fn from_method(method: &MethodDecl) -> Self {
        Self {
            method: extract_verb(method),
            route: extract_route(method),
            consumes_xml: extract_consumes_xml(method),
        }
    }
}

fn shorthand_verb(name: &str) -> Option<Method> {
    let verb = match name {
        "PostMapping" => Method::POST,
        "GetMapping" => Method::GET,
        "PutMapping" => Method::PUT,
        "DeleteMapping" => Method::DELETE,
        _ => return None,
    };
    Some(verb)
}

/// Shorthand annotations win; otherwise the generic mapping's `method`
/// attribute decides, with GET as the default.
fn extract_verb(method: &MethodDecl) -> Method {
    for name in ["PostMapping", "GetMapping", "PutMapping", "DeleteMapping"] {
        if method.has_annotation(name) {
            if let Some(verb) = shorthand_verb(name) {
                return verb;
            }
        }
    }
    method
        .annotation("RequestMapping")
        .and_then(|annotation| annotation.attr("method"))
        .and_then(|value| {
            let token = value.text().replace("RequestMethod.", "");
            Method::from_bytes(token.as_bytes()).ok()
        })
        .unwrap_or(Method::GET)
}

/// Shorthand annotations supply the route as their first string literal;
/// the generic mapping uses `value`/`path`. Falls back to `/`.
fn extract_route(method: &MethodDecl) -> String {
    for name in ["GetMapping", "PostMapping", "PutMapping", "DeleteMapping"] {
        if let Some(annotation) = method.annotation(name) {
            return annotation
                .first_string()
                .map(str::to_owned)
                .unwrap_or_else(|| "/".to_string());
        }
    }
    method
        .annotation("RequestMapping")
        .and_then(|annotation| annotation.attr("value").or_else(|| annotation.attr("path")))
        .map(|value| value.text().to_string())
        .unwrap_or_else(|| "/".to_string())
}

/// Only the shorthand POST/PUT and the generic mapping annotations carry a
/// `consumes` attribute worth inspecting; an XML media type anywhere in its
/// literal toggles the markup body form.
fn extract_consumes_xml(method: &MethodDecl) -> bool {
    ["PostMapping", "PutMapping", "RequestMapping"]
        .iter()
        .filter_map(|name| method.annotation(name))
        .flat_map(|annotation| &annotation.args)
        .any(|arg| arg.name.as_deref() == Some("consumes") && arg.value.text().contains("xml"))
}
