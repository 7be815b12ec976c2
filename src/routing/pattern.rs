//! Path patterns with `{name}` placeholders.

use std::fmt;
use std::str::FromStr;

use crate::routing::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed route pattern such as `/hello/{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

/// Placeholder values bound while matching a path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    bindings: Vec<(String, String)>,
}

impl Params {
    /// Value bound to placeholder `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Split an absolute path into its segments. `/` has none.
fn split_path(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/')?;
    if rest.is_empty() {
        return Some(Vec::new());
    }
    Some(rest.split('/').collect())
}

impl PathPattern {
    /// Parse and validate a route pattern.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let parts = split_path(raw).ok_or_else(|| Error::invalid(raw, "must start with '/'"))?;

        let mut segments = Vec::with_capacity(parts.len());
        for part in parts {
            if part.is_empty() {
                return Err(Error::invalid(raw, "empty path segment"));
            }

            if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                if name.is_empty() {
                    return Err(Error::invalid(raw, "placeholder without a name"));
                }
                if name.contains(['{', '}']) {
                    return Err(Error::invalid(raw, format!("malformed placeholder {part:?}")));
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Placeholder(existing) if existing == name))
                {
                    return Err(Error::invalid(raw, format!("placeholder {name:?} used twice")));
                }
                segments.push(Segment::Placeholder(name.to_string()));
            } else if part.contains(['{', '}']) {
                return Err(Error::invalid(
                    raw,
                    format!("placeholder must span a whole segment, got {part:?}"),
                ));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in the order they appear.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether both patterns accept exactly the same paths, i.e. they differ
    /// at most in placeholder names.
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|pair| match pair {
                (Segment::Literal(a), Segment::Literal(b)) => a == b,
                (Segment::Placeholder(_), Segment::Placeholder(_)) => true,
                _ => false,
            })
    }

    /// Match a concrete path (without query string) and bind placeholders.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts = split_path(path)?;
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Placeholder(_) if part.is_empty() => return None,
                Segment::Placeholder(name) => {
                    params.bindings.push((name.clone(), part.to_string()));
                }
            }
        }

        Some(params)
    }
}

impl FromStr for PathPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
