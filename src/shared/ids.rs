use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub const PATH_SEPARATOR: char = '/';

/// Server-issued identifiers are opaque; only emptiness and the path
/// separator are rejected so `/<id>` stays a single segment.
pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value.contains(PATH_SEPARATOR) {
        return Err(format!("{kind} must not contain '{PATH_SEPARATOR}'"));
    }
    Ok(())
}

/// Identifier of a customer record as issued by the backing API.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        validate_identifier_value("customer id", raw)?;
        Ok(Self(raw.to_string()))
    }

    /// Derives the customer identity from a location path: `/42` -> `42`.
    pub fn from_path(path: &str) -> Result<Self, String> {
        let raw = path.strip_prefix(PATH_SEPARATOR).unwrap_or(path);
        Self::parse(raw).map_err(|err| format!("location `{path}` does not name a customer: {err}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_path(&self) -> String {
        format!("{PATH_SEPARATOR}{}", self.0)
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::borrow::Borrow<str> for CustomerId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for CustomerId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .map_err(|err| D::Error::custom(format!("invalid customer id `{raw}`: {err}")))
    }
}
