//! Content-addressed identifiers.
//!
//! A [`ContentId`] is a name-based (version 5) UUID: a pure function of a namespace and a byte
//! payload. The same namespace seeds both the artifact names of a request and the cache key of
//! its rendered image.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::foundation::error::{ThumbnailError, ThumbnailResult};

/// Deterministic, hash-derived identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentId(Uuid);

impl ContentId {
    /// Parse a namespace (or any id) from its canonical hyphenated text form.
    pub fn parse(s: &str) -> ThumbnailResult<Self> {
        Uuid::parse_str(s.trim()).map(Self).map_err(|e| {
            ThumbnailError::configuration(format!("invalid content id namespace '{s}': {e}"))
        })
    }

    /// Derive the id of `payload` under `self` as namespace.
    ///
    /// Total: every byte sequence, including the empty one, yields an id.
    pub fn derive(&self, payload: &[u8]) -> ContentId {
        derive(self, payload)
    }

    /// Underlying UUID value.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ContentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ContentId {
    type Err = ThumbnailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Derive a [`ContentId`] from `namespace` and `payload`.
pub fn derive(namespace: &ContentId, payload: &[u8]) -> ContentId {
    ContentId(Uuid::new_v5(&namespace.0, payload))
}

#[cfg(test)]
#[path = "../tests/unit/identity/identity.rs"]
mod tests;
