//! Session key value object

use serde::{Deserialize, Serialize};

/// Opaque session identifier (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Key value that clients send when they have no session yet.
    pub const PLACEHOLDER: &'static str = "default";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Interpret a client-supplied key.
    ///
    /// Returns `None` for a missing, blank, or placeholder key, meaning the
    /// caller must generate a fresh one.
    pub fn from_client(key: Option<&str>) -> Option<Self> {
        let key = key?.trim();
        if key.is_empty() || key == Self::PLACEHOLDER {
            None
        } else {
            Some(Self(key.to_string()))
        }
    }

    /// Build a key in the `<unix-millis>_<suffix>` form.
    pub fn generated(unix_millis: i64, suffix: u32) -> Self {
        Self(format!("{}_{}", unix_millis, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client() {
        assert_eq!(SessionKey::from_client(None), None);
        assert_eq!(SessionKey::from_client(Some("")), None);
        assert_eq!(SessionKey::from_client(Some("default")), None);
        assert_eq!(
            SessionKey::from_client(Some(" abc ")),
            Some(SessionKey::new("abc"))
        );
    }

    #[test]
    fn test_generated_format() {
        let key = SessionKey::generated(1_700_000_000_000, 42);
        assert_eq!(key.as_str(), "1700000000000_42");
    }
}
