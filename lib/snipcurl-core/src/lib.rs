//! # snipcurl core
//!
//! Turn a selected Spring-annotated method (plus an optional pasted block of
//! class/interface declarations) into a ready-to-edit curl command template.
//!
//! The engine is a pure, synchronous text-to-text transform: two UTF-8
//! strings in, one rendered command out. It parses the snippet, reads the
//! route-mapping annotations, classifies every parameter into a request-part
//! role, resolves referenced types across `extends`/`implements` chains
//! within the pasted declarations, and synthesizes a representative JSON or
//! XML payload for the body with placeholder values at the leaves.
//!
//! ## Quick start
//!
//! ```rust
//! use snipcurl_core::generate_curl;
//!
//! let snippet = r#"@GetMapping("/hello") public String sayHello(@RequestParam String name) {}"#;
//! let command = generate_curl(snippet, "")?;
//!
//! assert!(command.contains("curl -X GET"));
//! assert!(command.contains("/hello?name=val"));
//! # Ok::<(), snipcurl_core::GenerateError>(())
//! ```
//!
//! ## Body synthesis
//!
//! Types referenced by the body parameter are resolved against the companion
//! declarations; a name that is not declared there degrades to an empty
//! object rather than failing:
//!
//! ```rust
//! use snipcurl_core::generate_curl;
//!
//! let snippet = r#"@PostMapping("/users") public void create(@RequestBody User u) {}"#;
//! let declarations = r#"
//!     public class User { private String name; private int age; private Address address; }
//!     public class Address { private String city; }
//! "#;
//! let command = generate_curl(snippet, declarations)?;
//!
//! assert!(command.contains(r#"-d '{"name":"example","age":1,"address":{"city":"example"}}'"#));
//! # Ok::<(), snipcurl_core::GenerateError>(())
//! ```
//!
//! Every invocation is independent: no state is cached or shared, so the
//! function can be called concurrently from multiple callers.

mod error;
mod mapping;
mod model;
mod params;
mod parser;
mod payload;
mod render;

pub use self::error::GenerateError;

/// Renders a curl command template for one annotated method snippet.
///
/// `method_snippet` must contain exactly one annotated method declaration;
/// `companion_declarations` holds zero or more type declarations and may be
/// empty. Any failure is reported as a [`GenerateError`]; unresolved type
/// *names* are not failures and degrade to empty payloads.
pub fn generate_curl(
    method_snippet: &str,
    companion_declarations: &str,
) -> Result<String, GenerateError> {
    let method = parser::parse_method_snippet(method_snippet)?;
    let unit = parser::parse_declarations(companion_declarations)?;
    let pool = model::DeclarationPool::from_unit(unit);

    let mapping = mapping::RouteMapping::from_method(&method);
    let descriptors = params::classify(&method);
    let parts = params::assemble(&descriptors, &mapping, &pool)?;
    Ok(render::render(&mapping, &parts))
}
