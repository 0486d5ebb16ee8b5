use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a loadable unit.
///
/// A `Resource` is an opaque name such as `"tpl:header"` or a
/// root-relative path like `"partials/nav.html"`; each loader decides
/// what the name means. Equality and hashing follow the name, so
/// resources work as cache keys, and ordering keeps multi-match results
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource {
    name: String,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Resource {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Resource {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
