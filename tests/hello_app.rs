//! End-to-end checks of the hello application through the local gateway.

use serde_json::{json, Value};

use localgate::{hello, LocalGateway, Response};

fn gateway_factory() -> LocalGateway {
    LocalGateway::new(hello::app().expect("hello app routes are valid"))
}

fn no_headers() -> [(&'static str, &'static str); 0] {
    []
}

fn json_body(response: &Response) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

#[test]
fn test_index() {
    let gateway = gateway_factory();
    let response = gateway.handle_request("GET", "/", no_headers(), "");
    assert_eq!(response.status_code, 200);
    assert_eq!(json_body(&response), json!({"hello": "world"}));
}

#[test]
fn test_hello() {
    let gateway = gateway_factory();
    let response = gateway.handle_request("GET", "/hello/alice", no_headers(), "");
    assert_eq!(response.status_code, 200);
    assert_eq!(json_body(&response), json!({"hello": "alice"}));
}

#[test]
fn test_hello_echoes_any_single_segment() {
    let gateway = gateway_factory();
    for name in ["bob", "james", "x", "Ünïcode", "with%20space", "a.b-c_d"] {
        let response = gateway.handle_request("GET", &format!("/hello/{name}"), no_headers(), "");
        assert_eq!(response.status_code, 200, "name {name:?}");
        assert_eq!(json_body(&response), json!({"hello": name}));
    }
}

#[test]
fn test_users() {
    let gateway = gateway_factory();
    let response = gateway.handle_request(
        "POST",
        "/users",
        [("Content-Type", "application/json")],
        r#"["alice","bob"]"#,
    );
    assert_eq!(response.status_code, 200);
    assert_eq!(json_body(&response), json!({"user": ["alice", "bob"]}));
    assert_eq!(response.body, r#"{"user":["alice","bob"]}"#);
}

#[test]
fn test_users_echo_preserves_key_order() {
    let gateway = gateway_factory();
    let body = r#"{"zeta":1,"alpha":{"b":true,"a":null},"mid":[3,2,1]}"#;
    let response = gateway.handle_request("POST", "/users", [("Content-Type", "application/json")], body);
    assert_eq!(response.body, format!(r#"{{"user":{body}}}"#));
}

#[test]
fn test_users_without_json_content_type_echoes_null() {
    let gateway = gateway_factory();
    let response = gateway.handle_request("POST", "/users", no_headers(), "");
    assert_eq!(response.status_code, 200);
    assert_eq!(json_body(&response), json!({"user": null}));
}

#[test]
fn test_users_malformed_json() {
    let gateway = gateway_factory();
    let response = gateway.handle_request(
        "POST",
        "/users",
        [("Content-Type", "application/json")],
        r#"["alice","#,
    );
    assert_eq!(response.status_code, 400);
    assert_eq!(json_body(&response)["Code"], "BadRequestError");

    // The failure is scoped to that request.
    let response = gateway.handle_request("GET", "/", no_headers(), "");
    assert_eq!(response.status_code, 200);
}

#[test]
fn test_users_empty_json_body() {
    let gateway = gateway_factory();
    let response = gateway.handle_request("POST", "/users", [("Content-Type", "application/json")], "");
    assert_eq!(response.status_code, 400);
    assert_eq!(json_body(&response)["Code"], "BadRequestError");
}

#[test]
fn test_index_post_not_allowed() {
    let gateway = gateway_factory();
    let response = gateway.handle_request("POST", "/", no_headers(), "");
    assert_eq!(response.status_code, 405);
    assert_eq!(response.header("Allow"), Some("GET"));
}

#[test]
fn test_invalid_path() {
    let gateway = gateway_factory();
    let response = gateway.handle_request("GET", "/fake/path", no_headers(), "");
    assert_ne!(response.status_code, 200);
    assert_eq!(response.status_code, 404);
}

#[test]
fn test_repeated_requests_are_byte_identical() {
    let gateway = gateway_factory();
    let requests: [(&str, &str, &str); 5] = [
        ("GET", "/", ""),
        ("GET", "/hello/alice", ""),
        ("POST", "/users", r#"["alice","bob"]"#),
        ("POST", "/", ""),
        ("GET", "/fake/path", ""),
    ];

    for (method, path, body) in requests {
        let headers = [("Content-Type", "application/json")];
        let first = gateway.handle_request(method, path, headers, body);
        let second = gateway.handle_request(method, path, headers, body);
        assert_eq!(first, second);
        assert_eq!(first.to_bytes(), second.to_bytes());
    }
}
