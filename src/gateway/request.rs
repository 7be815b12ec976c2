//! Requests entering the gateway and the view handlers get of them.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::gateway::error::Error;
use crate::parser::Method;
use crate::routing::Params;

/// Content type assumed when a request does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A synthetic request as built by a caller or decoded from the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Path, optionally followed by `?query`.
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Header value, ignoring the case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Media type of the body, lower-cased and without parameters such as
    /// `charset`. Defaults to `application/json`.
    pub fn content_type(&self) -> String {
        self.header("Content-Type")
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
    }

    /// Path without the query string.
    pub fn route_path(&self) -> &str {
        self.path.split_once('?').map_or(self.path.as_str(), |(p, _)| p)
    }

    /// Query string parameters. Keys without `=` map to an empty value; on
    /// repeated keys the last one wins.
    pub fn query_params(&self) -> BTreeMap<String, String> {
        let Some((_, query)) = self.path.split_once('?') else {
            return BTreeMap::new();
        };

        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect()
    }
}

/// The request as seen from inside a handler.
#[derive(Debug)]
pub struct CurrentRequest<'a> {
    pub method: Method,
    pub uri_params: Params,
    pub query_params: BTreeMap<String, String>,
    request: &'a Request,
}

impl<'a> CurrentRequest<'a> {
    pub(crate) fn new(method: Method, uri_params: Params, request: &'a Request) -> Self {
        Self {
            method,
            uri_params,
            query_params: request.query_params(),
            request,
        }
    }

    pub fn path(&self) -> &str {
        self.request.route_path()
    }

    /// Value bound to a placeholder of the matched route.
    pub fn uri_param(&self, name: &str) -> Result<&str, Error> {
        self.uri_params
            .get(name)
            .ok_or_else(|| Error::MissingParam(name.to_string()))
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.header(name)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.request.headers
    }

    pub fn raw_body(&self) -> &str {
        &self.request.body
    }

    /// True when the request explicitly declares a JSON body.
    pub fn is_json(&self) -> bool {
        self.request.header("Content-Type").is_some() && self.request.content_type() == "application/json"
    }

    /// The body decoded as JSON, or `None` if the request is not declared as
    /// JSON. A declared but malformed body is a [`Error::BodyParse`].
    pub fn json_body(&self) -> Result<Option<Value>, Error> {
        if !self.is_json() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&self.request.body)?))
    }

    /// Decode a declared JSON body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::BadRequest("Expected a JSON request body".to_string()));
        }
        Ok(serde_json::from_str(&self.request.body)?)
    }
}
