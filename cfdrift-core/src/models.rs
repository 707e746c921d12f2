//! Domain models.

use std::fmt;

use serde::{Serialize, Serializer};

// ============================================================================
// App Count
// ============================================================================

/// An application count reported by the control plane.
///
/// A count is either fully valid or explicitly unknown; there is no partial
/// state. `Unknown` is the terminal result of an irrecoverable remote-fetch
/// failure and is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCount {
    /// The control plane answered with a count.
    Known(u64),
    /// The remote fetch could not be completed.
    Unknown,
}

impl AppCount {
    /// Returns true when the control plane answered with a count.
    pub fn is_known(self) -> bool {
        matches!(self, AppCount::Known(_))
    }

    /// Returns the count, or `None` when unknown.
    pub fn value(self) -> Option<u64> {
        match self {
            AppCount::Known(count) => Some(count),
            AppCount::Unknown => None,
        }
    }
}

impl fmt::Display for AppCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppCount::Known(count) => write!(f, "{count}"),
            AppCount::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for AppCount {
    /// Serializes as a JSON number, or `null` when unknown.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AppCount::Known(count) => serializer.serialize_u64(*count),
            AppCount::Unknown => serializer.serialize_none(),
        }
    }
}

// ============================================================================
// Client Credentials
// ============================================================================

/// The OAuth2 client id/secret pair used to mint bearer tokens.
///
/// Loaded once from configuration and immutable for the process lifetime.
#[derive(Clone)]
pub struct ClientCredentials {
    /// OAuth2 client identifier.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
}

impl ClientCredentials {
    /// Creates a credentials pair.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for ClientCredentials {
    /// The secret never reaches logs or panic output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_count_displays_as_number() {
        assert_eq!(AppCount::Known(42).to_string(), "42");
    }

    #[test]
    fn unknown_count_displays_as_unknown() {
        assert_eq!(AppCount::Unknown.to_string(), "unknown");
    }

    #[test]
    fn value_accessor() {
        assert_eq!(AppCount::Known(7).value(), Some(7));
        assert_eq!(AppCount::Unknown.value(), None);
        assert!(AppCount::Known(0).is_known());
        assert!(!AppCount::Unknown.is_known());
    }

    #[test]
    fn debug_redacts_client_secret() {
        let credentials = ClientCredentials::new("client_id", "shhhh");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("client_id"));
        assert!(!rendered.contains("shhhh"));
    }
}
