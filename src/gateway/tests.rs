//! Tests for the local gateway.

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::{json, Value};

    use crate::gateway::{App, CurrentRequest, Error, LocalGateway, Request, Response, StatusCode};
    use crate::parser::Method;

    fn gateway() -> LocalGateway {
        let mut app = App::new("gateway-tests");
        app.route("/items/{id}", &[Method::GET, Method::DELETE], |req| {
            Ok(json!({"id": req.uri_param("id")?, "method": req.method.as_str()}).into())
        })
        .unwrap()
        .route("/search", &[Method::GET], |req| {
            Ok(json!({"q": req.query_param("q")}).into())
        })
        .unwrap()
        .route("/created", &[Method::POST], |_req| {
            Ok(Response::new(StatusCode::Created)
                .with_header("Location", "/items/1")
                .with_body("done")
                .into())
        })
        .unwrap()
        .route("/secret", &[Method::GET], |_req| Err(Error::Forbidden("Nope".to_string())))
        .unwrap()
        .route("/broken", &[Method::GET], |req| {
            req.uri_param("missing")?;
            Ok(Value::Null.into())
        })
        .unwrap()
        .route_accepting("/upload", &[Method::PUT], &["text/plain"], |req| {
            Ok(json!({"size": req.raw_body().len(), "json": req.json_body()?}).into())
        })
        .unwrap();
        LocalGateway::new(app)
    }

    fn body(response: &Response) -> Value {
        response.json().unwrap()
    }

    #[test]
    fn test_placeholder_and_method_reach_handler() {
        let response = gateway().handle(&Request::new("DELETE", "/items/42"));
        assert_eq!(response.status_code, 200);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(body(&response), json!({"id": "42", "method": "DELETE"}));
    }

    #[test]
    fn test_query_params() {
        let response = gateway().handle(&Request::new("GET", "/search?q=rust&page=2"));
        assert_eq!(body(&response), json!({"q": "rust"}));

        let response = gateway().handle(&Request::new("GET", "/search"));
        assert_eq!(body(&response), json!({"q": null}));
    }

    #[test]
    fn test_custom_response_passes_through() {
        let response = gateway().handle(&Request::new("POST", "/created"));
        assert_eq!(response.status(), Some(StatusCode::Created));
        assert_eq!(response.header("Location"), Some("/items/1"));
        assert_eq!(response.body, "done");
    }

    #[test]
    fn test_view_error_status_and_body() {
        let response = gateway().handle(&Request::new("GET", "/secret"));
        assert_eq!(response.status_code, 403);
        assert_eq!(body(&response), json!({"Code": "ForbiddenError", "Message": "Nope"}));
    }

    #[test]
    fn test_internal_errors_are_not_described() {
        let response = gateway().handle(&Request::new("GET", "/broken"));
        assert_eq!(response.status_code, 500);
        assert_eq!(
            body(&response),
            json!({"Code": "InternalServerError", "Message": "An internal server error occurred."})
        );
    }

    #[test]
    fn test_not_found() {
        let response = gateway().handle(&Request::new("GET", "/fake/path"));
        assert_eq!(response.status_code, 404);
        assert_eq!(body(&response)["Code"], "NotFoundError");
        assert!(matches!(
            gateway().dispatch(&Request::new("GET", "/fake/path")),
            Err(Error::RouteNotFound(ref p)) if p == "/fake/path"
        ));
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = gateway().handle(&Request::new("PATCH", "/items/1"));
        assert_eq!(response.status_code, 405);
        assert_eq!(response.header("Allow"), Some("GET, DELETE"));
        assert_eq!(
            body(&response),
            json!({"Code": "MethodNotAllowedError", "Message": "Unsupported method: PATCH"})
        );
    }

    #[test]
    fn test_unknown_method_token() {
        let response = gateway().handle(&Request::new("BREW", "/items/1"));
        assert_eq!(response.status_code, 405);

        let response = gateway().handle(&Request::new("BREW", "/nowhere"));
        assert_eq!(response.status_code, 404);
    }

    #[test]
    fn test_content_type_is_checked_per_route() {
        let gateway = gateway();

        // JSON is the default both for requests and routes.
        let response = gateway.handle(&Request::new("PUT", "/upload"));
        assert_eq!(response.status_code, 415);
        assert_eq!(body(&response)["Code"], "UnsupportedMediaType");

        let request = Request::new("PUT", "/upload")
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body("hello");
        let response = gateway.handle(&request);
        assert_eq!(response.status_code, 200);
        assert_eq!(body(&response), json!({"size": 5, "json": null}));

        let request = Request::new("GET", "/search").with_header("Content-Type", "text/html");
        assert_eq!(gateway.handle(&request).status_code, 415);
    }

    #[test]
    fn test_request_helpers() {
        let request = Request::new("GET", "/a?x=1&flag&x=2&")
            .with_header("CONTENT-TYPE", " Application/JSON ; charset=utf-8");
        assert_eq!(request.route_path(), "/a");
        assert_eq!(request.content_type(), "application/json");

        let params = request.query_params();
        assert_eq!(params.get("x").map(String::as_str), Some("2"));
        assert_eq!(params.get("flag").map(String::as_str), Some(""));
        assert_eq!(params.len(), 2);

        assert_eq!(Request::new("GET", "/").content_type(), "application/json");
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NewUser {
        name: String,
    }

    #[test]
    fn test_typed_json_body() {
        let mut app = App::new("typed");
        app.route("/users", &[Method::POST], |req: &CurrentRequest<'_>| {
            let user: NewUser = req.json()?;
            Ok(json!({"name": user.name}).into())
        })
        .unwrap();
        let gateway = LocalGateway::new(app);

        let ok = Request::new("POST", "/users")
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"name":"alice"}"#);
        assert_eq!(body(&gateway.handle(&ok)), json!({"name": "alice"}));

        let wrong_shape = ok.clone().with_body(r#"{"nom":"alice"}"#);
        assert_eq!(gateway.handle(&wrong_shape).status_code, 400);

        let undeclared = Request::new("POST", "/users").with_body(r#"{"name":"alice"}"#);
        let response = gateway.handle(&undeclared);
        assert_eq!(response.status_code, 400);
        assert_eq!(body(&response)["Message"], "Expected a JSON request body");
    }

    #[test]
    fn test_handle_request_from_parts() {
        let response = gateway().handle_request("GET", "/items/7", [("X-Trace", "abc")], "");
        assert_eq!(body(&response)["id"], "7");

        let no_headers: [(&str, &str); 0] = [];
        let response = gateway().handle_request("GET", "/items/8", no_headers, "");
        assert_eq!(body(&response)["id"], "8");
    }

    #[test]
    fn test_status_code_lookup() {
        assert_eq!(StatusCode::from_u16(415), Some(StatusCode::UnsupportedMediaType));
        assert_eq!(StatusCode::from_u16(418), None);
        assert_eq!(Response::with_status_code(418).status(), None);
    }

    #[test]
    fn test_response_to_bytes() {
        let response = Response::new(StatusCode::Ok)
            .with_json(&json!({"hello": "world"}))
            .unwrap();
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert_eq!(
            text,
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 17\r\n\
             Server: localgate\r\n\
             \r\n\
             {\"hello\":\"world\"}"
        );

        let text = String::from_utf8(Response::with_status_code(418).to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 418 Unknown\r\n"));
    }
}
