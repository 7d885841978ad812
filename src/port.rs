use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value;

/// A port token, kept verbatim as text.
///
/// Accepts either a string (`"8080"`) or an integer (`8080`) when
/// deserialized, and always renders as the string it was given. No range
/// check is made; the consuming server owns that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Port(String);

impl Port {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Port {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Port {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self(port.to_string())
    }
}

impl From<&Port> for Value {
    fn from(port: &Port) -> Self {
        Value::String(port.0.clone())
    }
}

impl Serialize for Port {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Port {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Token {
            Text(String),
            Number(i64),
        }

        Ok(match Token::deserialize(deserializer)? {
            Token::Text(s) => Port(s),
            Token::Number(n) => Port(n.to_string()),
        })
    }
}
