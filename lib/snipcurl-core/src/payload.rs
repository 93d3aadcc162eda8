//! Recursive placeholder-payload synthesis for body types.
//!
//! Primitive leaves get literal placeholder values; anything else recurses
//! into the declaration pool. The visited set is shared across the whole
//! descent of one body parameter, which bounds self-referential and mutually
//! referential type graphs to a single unrolling per distinct type.

use std::collections::HashSet;

use crate::error::GenerateError;
use crate::model::DeclarationPool;

/// Output form for a synthesized body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Xml,
}

impl BodyFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }
}

fn is_primitive(ty: &str) -> bool {
    matches!(
        ty,
        "int" | "Integer"
            | "long"
            | "Long"
            | "float"
            | "Float"
            | "double"
            | "Double"
            | "boolean"
            | "Boolean"
            | "String"
    )
}

fn primitive_json(ty: &str) -> &'static str {
    match ty {
        "String" => "\"example\"",
        "boolean" | "Boolean" => "true",
        _ => "1",
    }
}

fn primitive_xml(ty: &str) -> &'static str {
    match ty {
        "String" => "example",
        "boolean" | "Boolean" => "true",
        _ => "1",
    }
}

/// Builds a representative payload for `type_name` in the requested format.
pub fn synthesize(
    type_name: &str,
    pool: &DeclarationPool,
    visited: &mut HashSet<String>,
    format: BodyFormat,
) -> Result<String, GenerateError> {
    match format {
        BodyFormat::Json => json(type_name, pool, visited),
        BodyFormat::Xml => xml(type_name, pool, visited),
    }
}

fn json(
    type_name: &str,
    pool: &DeclarationPool,
    visited: &mut HashSet<String>,
) -> Result<String, GenerateError> {
    if !visited.insert(type_name.to_string()) {
        return Ok("\"...\"".to_string());
    }
    let Some(fields) = pool.resolve(type_name)? else {
        return Ok("{}".to_string());
    };

    let mut out = String::from("{");
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push('"');
        out.push_str(&field.name);
        out.push_str("\":");
        if is_primitive(&field.ty.raw) {
            out.push_str(primitive_json(&field.ty.raw));
        } else {
            out.push_str(&json(&field.ty.raw, pool, visited)?);
        }
    }
    out.push('}');
    Ok(out)
}

fn xml(
    type_name: &str,
    pool: &DeclarationPool,
    visited: &mut HashSet<String>,
) -> Result<String, GenerateError> {
    if !visited.insert(type_name.to_string()) {
        return Ok("<!--...-->".to_string());
    }
    let Some(fields) = pool.resolve(type_name)? else {
        return Ok(format!("<{type_name}/>"));
    };

    let mut out = format!("<{type_name}>");
    for field in fields {
        out.push('<');
        out.push_str(&field.name);
        out.push('>');
        if is_primitive(&field.ty.raw) {
            out.push_str(primitive_xml(&field.ty.raw));
        } else {
            out.push_str(&xml(&field.ty.raw, pool, visited)?);
        }
        out.push_str("</");
        out.push_str(&field.name);
        out.push('>');
    }
    out.push_str("</");
    out.push_str(type_name);
    out.push('>');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_declarations;

    fn pool_of(source: &str) -> DeclarationPool {
        DeclarationPool::from_unit(parse_declarations(source).expect("a unit"))
    }

    fn synth(type_name: &str, pool: &DeclarationPool, format: BodyFormat) -> String {
        let mut visited = HashSet::new();
        synthesize(type_name, pool, &mut visited, format).expect("a payload")
    }

    #[test]
    fn nested_json_with_primitive_placeholders() {
        let pool = pool_of(
            "public class User { private String name; private int age; private Address address; } \
             public class Address { private String city; }",
        );
        let payload = synth("User", &pool, BodyFormat::Json);
        assert_eq!(
            payload,
            r#"{"name":"example","age":1,"address":{"city":"example"}}"#
        );
        // the payload is well-formed JSON
        let value: serde_json::Value = serde_json::from_str(&payload).expect("valid JSON");
        assert_eq!(value["address"]["city"], "example");
    }

    #[test]
    fn boolean_like_fields_become_true() {
        let pool = pool_of("class Flags { private boolean on; private Boolean boxed; }");
        assert_eq!(
            synth("Flags", &pool, BodyFormat::Json),
            r#"{"on":true,"boxed":true}"#
        );
    }

    #[test]
    fn unresolved_type_degrades_gracefully() {
        let pool = pool_of("");
        assert_eq!(synth("Ghost", &pool, BodyFormat::Json), "{}");
        assert_eq!(synth("Ghost", &pool, BodyFormat::Xml), "<Ghost/>");
    }

    #[test]
    fn self_referential_type_unrolls_once() {
        let pool = pool_of("class Node { private String label; private Node next; }");
        assert_eq!(
            synth("Node", &pool, BodyFormat::Json),
            r#"{"label":"example","next":"..."}"#
        );
        assert_eq!(
            synth("Node", &pool, BodyFormat::Xml),
            "<Node><label>example</label><next><!--...--></next></Node>"
        );
    }

    #[test]
    fn mutually_referential_types_terminate() {
        let pool = pool_of(
            "class A { private B b; } class B { private A a; }",
        );
        assert_eq!(
            synth("A", &pool, BodyFormat::Json),
            r#"{"b":{"a":"..."}}"#
        );
    }

    #[test]
    fn xml_nests_field_and_type_elements() {
        let pool = pool_of("public class X { private String name; }");
        assert_eq!(
            synth("X", &pool, BodyFormat::Xml),
            "<X><name>example</name></X>"
        );
    }

    #[test]
    fn xml_primitive_leaves_are_unquoted() {
        let pool = pool_of("class P { private String s; private int n; private boolean b; }");
        assert_eq!(
            synth("P", &pool, BodyFormat::Xml),
            "<P><s>example</s><n>1</n><b>true</b></P>"
        );
    }

    #[test]
    fn unresolved_field_type_becomes_an_empty_object() {
        let pool = pool_of("class Holder { private Mystery m; }");
        assert_eq!(synth("Holder", &pool, BodyFormat::Json), r#"{"m":{}}"#);
        assert_eq!(
            synth("Holder", &pool, BodyFormat::Xml),
            "<Holder><m><Mystery/></m></Holder>"
        );
    }
}
