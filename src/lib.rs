//! An in-process HTTP gateway for small serverless-style applications.
//!
//! An [`App`] holds route declarations: a method set, a path pattern with
//! optional `{name}` placeholders, and a handler returning a JSON value. A
//! [`LocalGateway`] resolves requests against those routes and produces a
//! [`Response`] envelope (status code, headers, body), so applications can be
//! tested without any network or cloud runtime.
//!
//! # Examples
//!
//! ```
//! use localgate::{App, LocalGateway, Method};
//! use serde_json::json;
//!
//! let mut app = App::new("demo");
//! app.route("/hello/{name}", &[Method::GET], |req| {
//!     Ok(json!({"hello": req.uri_param("name")?}).into())
//! })
//! .unwrap();
//!
//! let gateway = LocalGateway::new(app);
//! let response = gateway.handle_request("GET", "/hello/alice", [("Accept", "*/*")], "");
//! assert_eq!(response.status_code, 200);
//! assert_eq!(response.body, r#"{"hello":"alice"}"#);
//!
//! // Registered path, wrong method.
//! let response = gateway.handle_request("POST", "/hello/alice", [("Accept", "*/*")], "");
//! assert_eq!(response.status_code, 405);
//! ```
//!
//! The same gateway can be served over TCP with [`LocalServer`]; the
//! `localgate` binary does that for the bundled [`hello`] application.

pub mod gateway;
pub mod hello;
pub mod parser;
pub mod routing;
pub mod server;

pub use gateway::{App, CurrentRequest, LocalGateway, Reply, Request, Response, StatusCode};
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use routing::{PathPattern, RouteTable};
pub use server::{Error as ServerError, LocalServer, ServerConfig};
