//! End-to-end coverage of the snippet → curl transform.

use snipcurl_core::{GenerateError, generate_curl};

#[test]
fn get_with_query_parameter() {
    let command = generate_curl(
        r#"@GetMapping("/hello") public String sayHello(@RequestParam String name) {}"#,
        "",
    )
    .expect("a command");
    assert_eq!(
        command,
        "curl -X GET \\\n\"http://localhost:8080/hello?name=val\""
    );
}

#[test]
fn post_with_nested_json_body() {
    let command = generate_curl(
        r#"@PostMapping("/users") public void create(@RequestBody User u) {}"#,
        "public class User { private String name; private int age; private Address address; }\
         public class Address { private String city; }",
    )
    .expect("a command");
    assert_eq!(
        command,
        "curl -X POST \\\n\"http://localhost:8080/users\" \\\n  -H \"Content-Type: application/json\" \\\n  -d '{\"name\":\"example\",\"age\":1,\"address\":{\"city\":\"example\"}}'"
    );

    let payload = command
        .split("-d '")
        .nth(1)
        .and_then(|rest| rest.strip_suffix('\''))
        .expect("a -d payload");
    let value: serde_json::Value = serde_json::from_str(payload).expect("valid JSON");
    assert_eq!(value["age"], 1);
    assert_eq!(value["address"]["city"], "example");
}

#[test]
fn header_annotation_value_becomes_the_display_name() {
    let command = generate_curl(
        r#"@GetMapping("/auth") public void a(@RequestHeader("Authorization") String tok) {}"#,
        "",
    )
    .expect("a command");
    assert_eq!(
        command,
        "curl -X GET \\\n\"http://localhost:8080/auth\" \\\n  -H \"Authorization: val\""
    );
}

#[test]
fn model_attribute_expands_into_query_parameters() {
    let command = generate_curl(
        r#"@PutMapping("/update") public void update(@ModelAttribute Req r) {}"#,
        "public class Req { private String id; private String val; }",
    )
    .expect("a command");
    assert!(command.contains("curl -X PUT"));
    assert!(command.contains("/update?id=val&val=val"));
    assert!(!command.contains("-d "));
}

#[test]
fn map_body_renders_the_fixed_stub() {
    let command = generate_curl(
        r#"@PostMapping("/dynamic") public void d(@RequestBody Map<String, Object> m) {}"#,
        "",
    )
    .expect("a command");
    assert!(command.contains(r#"-d '{"key":"value"}'"#));
    assert!(command.contains("Content-Type: application/json"));
}

#[test]
fn map_body_overrides_an_xml_consumes_type() {
    let command = generate_curl(
        r#"@PostMapping(value = "/dynamic", consumes = "application/xml") public void d(@RequestBody Map<String, Object> m) {}"#,
        "",
    )
    .expect("a command");
    assert!(command.contains(r#"-d '{"key":"value"}'"#));
    assert!(command.contains("Content-Type: application/json"));
    assert!(!command.contains("application/xml"));
}

#[test]
fn xml_consumes_renders_a_markup_body() {
    let command = generate_curl(
        r#"@PostMapping(value = "/xml", consumes = "application/xml") public void x(@RequestBody X u) {}"#,
        "public class X { private String name; }",
    )
    .expect("a command");
    assert_eq!(
        command,
        "curl -X POST \\\n\"http://localhost:8080/xml\" \\\n  -H \"Content-Type: application/xml\" \\\n  -d '<X><name>example</name></X>'"
    );
}

#[test]
fn inherited_fields_follow_own_fields() {
    let command = generate_curl(
        r#"@PostMapping("/create") public void create(@RequestBody ExtendedUser user) {}"#,
        "public class BaseUser { private String email; } \
         public class ExtendedUser extends BaseUser { private String username; }",
    )
    .expect("a command");
    assert!(command.contains(r#"-d '{"username":"example","email":"example"}'"#));
}

#[test]
fn interface_body_uses_synthesized_accessor_fields() {
    let command = generate_curl(
        r#"@PostMapping("/event") public void handle(@RequestBody Event event) {}"#,
        "public interface Event { String getName(); } \
         public class MyEvent implements Event { private String name; }",
    )
    .expect("a command");
    assert!(command.contains(r#""name":"example""#));
}

#[test]
fn generic_mapping_with_request_method_enum() {
    let command = generate_curl(
        r#"@RequestMapping(value = "/complex", method = RequestMethod.POST) public void handle(@RequestBody Complex c) {}"#,
        "public class Complex { private String data; }",
    )
    .expect("a command");
    assert!(command.contains("curl -X POST"));
    assert!(command.contains(r#""data":"example""#));
}

#[test]
fn path_variables_substitute_into_the_route() {
    let command = generate_curl(
        r#"@DeleteMapping("/users/{id}") public void remove(@PathVariable String id) {}"#,
        "",
    )
    .expect("a command");
    assert_eq!(
        command,
        "curl -X DELETE \\\n\"http://localhost:8080/users/val\""
    );
}

#[test]
fn duplicate_parameter_names_are_suffixed_in_order() {
    let command = generate_curl(
        r#"@GetMapping("/items/{id}") public void get(@PathVariable String id, @RequestParam String id) {}"#,
        "",
    )
    .expect("a command");
    assert!(command.contains("/items/val?id2=val"));
}

#[test]
fn cyclic_body_type_unrolls_once_then_stops() {
    let command = generate_curl(
        r#"@PostMapping("/nodes") public void add(@RequestBody Node n) {}"#,
        "public class Node { private String label; private Node next; }",
    )
    .expect("a command");
    assert!(command.contains(r#"-d '{"label":"example","next":"..."}'"#));
}

#[test]
fn body_type_absent_from_the_pool_degrades_to_an_empty_object() {
    let command = generate_curl(
        r#"@PostMapping("/ghosts") public void add(@RequestBody Ghost g) {}"#,
        "",
    )
    .expect("a command");
    assert!(command.contains("-d '{}'"));
}

#[test]
fn no_body_parameter_means_no_data_flag() {
    let command = generate_curl(
        r#"@GetMapping("/ping") public String ping() {}"#,
        "",
    )
    .expect("a command");
    assert_eq!(command, "curl -X GET \\\n\"http://localhost:8080/ping\"");
}

#[test]
fn unparseable_snippet_is_a_parse_error() {
    let error = generate_curl("@GetMapping(\"/x\") void broken( {", "").expect_err("should fail");
    assert!(matches!(error, GenerateError::SnippetParse { .. }));
}

#[test]
fn unparseable_companion_block_is_a_parse_error() {
    let error = generate_curl(
        r#"@GetMapping("/x") void fine() {}"#,
        "class Broken {",
    )
    .expect_err("should fail");
    assert!(matches!(error, GenerateError::SnippetParse { .. }));
}

#[test]
fn snippet_without_a_method_is_rejected() {
    let error = generate_curl("private String notAMethod;", "").expect_err("should fail");
    assert!(matches!(error, GenerateError::MethodNotFound));
}
