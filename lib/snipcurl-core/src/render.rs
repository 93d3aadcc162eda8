//! Final curl command assembly.

use std::fmt::Write;

use tracing::warn;

use crate::mapping::RouteMapping;
use crate::params::RequestParts;

/// Scheme and host baked into every rendered command.
const BASE_URL: &str = "http://localhost:8080";

/// Renders the multi-line curl command for the given mapping and parts.
pub fn render(mapping: &RouteMapping, parts: &RequestParts) -> String {
    let mut route = mapping.route.clone();
    for (name, value) in &parts.path_params {
        let pattern = ["{", name, "}"].concat();
        route = route.replace(&pattern, value);
    }
    if route.contains('{') {
        warn!(route = route.as_str(), "route template has unmatched placeholders");
    }

    if !parts.query_params.is_empty() {
        let query = parts
            .query_params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        route.push('?');
        route.push_str(&query);
    }

    let mut command = format!("curl -X {} \\\n\"{BASE_URL}{route}\"", mapping.method);
    for (name, value) in &parts.headers {
        let _ = write!(command, " \\\n  -H \"{name}: {value}\"");
    }
    if let Some(body) = &parts.body {
        let _ = write!(command, " \\\n  -H \"Content-Type: {}\"", body.content_type);
        let _ = write!(command, " \\\n  -d '{}'", body.payload);
    }
    command
}
