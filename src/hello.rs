//! The example application: an index route, a path-parameter echo and a
//! JSON-body echo.

use serde_json::{json, Value};

use crate::gateway::{App, CurrentRequest, HandlerResult};
use crate::parser::Method;
use crate::routing;

/// Name the application registers under.
pub const APP_NAME: &str = "hello-gateway";

/// Build the application with its three routes.
pub fn app() -> Result<App, routing::Error> {
    let mut app = App::new(APP_NAME);
    app.route("/", &[Method::GET], index)?
        .route("/hello/{name}", &[Method::GET], hello_name)?
        .route("/users", &[Method::POST], create_user)?;
    Ok(app)
}

/// `GET /` -> `{"hello": "world"}`
pub fn index(_request: &CurrentRequest<'_>) -> HandlerResult {
    Ok(json!({"hello": "world"}).into())
}

/// `GET /hello/alice` -> `{"hello": "alice"}`
pub fn hello_name(request: &CurrentRequest<'_>) -> HandlerResult {
    let name = request.uri_param("name")?;
    Ok(json!({"hello": name}).into())
}

/// `POST /users` echoes the JSON body back under `user`.
pub fn create_user(request: &CurrentRequest<'_>) -> HandlerResult {
    let user = request.json_body()?.unwrap_or(Value::Null);
    Ok(json!({"user": user}).into())
}
