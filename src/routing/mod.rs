//! Route table and path pattern matching.
//!
//! A pattern is a `/`-separated list of literal segments and `{name}`
//! placeholders. Each placeholder matches exactly one non-empty path segment.

mod error;
mod pattern;
mod table;

pub use error::Error;
pub use pattern::{Params, PathPattern};
pub use table::{Resolution, Route, RouteMatch, RouteTable};
pub(crate) use table::join_methods;
