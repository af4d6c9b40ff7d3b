use serde::{Deserialize, Serialize};

use super::geometry::Ring;

/// A boundary polygon that scopes matching.
///
/// Only the outer ring takes part in containment; inner rings are kept so
/// they can be written back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub outer: Ring,
    #[serde(default)]
    pub inner: Vec<Ring>,
}

impl Region {
    pub fn new(name: impl Into<String>, outer: impl Into<Ring>) -> Self {
        Self { name: name.into(), outer: outer.into(), inner: Vec::new() }
    }

    pub fn with_inner(mut self, ring: impl Into<Ring>) -> Self {
        self.inner.push(ring.into());
        self
    }
}
