//! Identifier wrapper for contests.
//!
//! Seed contests carry stable, human-readable ids (`cf_900_div2`).
//! Contests synthesized by the simulator get a `mock_` prefix followed by a
//! UUID whose bytes come from the caller's random source, so seeded runs
//! produce the same ids.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix for identifiers of simulator-generated contests.
pub const GENERATED_PREFIX: &str = "mock_";

/// Unique identifier for a contest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContestId(String);

impl ContestId {
    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build a generated identifier from 16 random bytes.
    pub fn generated(random_bytes: [u8; 16]) -> Self {
        let uuid = uuid::Builder::from_random_bytes(random_bytes).into_uuid();
        Self(format!("{GENERATED_PREFIX}{}", uuid.simple()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier was produced by [`ContestId::generated`].
    pub fn is_generated(&self) -> bool {
        self.0
            .strip_prefix(GENERATED_PREFIX)
            .is_some_and(|rest| Uuid::try_parse(rest).is_ok())
    }
}

impl core::fmt::Display for ContestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContestId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
