//! Strongly-typed migration version.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Ordering key of a migration.
///
/// Wraps an `f64` so versions can be sorted, hashed, and compared for
/// equality. Ordering uses [`f64::total_cmp`], so every value (including NaN)
/// has a defined position. `-0.0` is normalized to `0.0` on construction.
///
/// Whether a version is acceptable in a migration set is a separate question,
/// answered by [`Version::is_legal`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Version(f64);

impl Version {
    /// Create a new `Version`.
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    /// Return the underlying float.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// A legal version is finite and non-negative.
    pub fn is_legal(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl From<f64> for Version {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Version> for f64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
