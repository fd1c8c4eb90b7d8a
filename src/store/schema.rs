//! Store request/response schema
//!
//! Wire contract with the remote SQL-execution service. These types do not
//! model domain entities.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters kept from the statement digest
const FINGERPRINT_LEN: usize = 12;

/// A raw SQL statement. Construction happens elsewhere; this type only
/// carries the text to the store.
///
/// `Debug` prints the fingerprint instead of the statement so that payloads
/// cannot leak into logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct SqlQuery {
    statement: String,
}

impl SqlQuery {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
        }
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// Opaque reference to the statement, safe to log
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.statement.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(FINGERPRINT_LEN);
        encoded
    }
}

impl fmt::Debug for SqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlQuery")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Request body sent to `POST {base_url}/execute`
#[derive(Debug, Serialize)]
pub(crate) struct ExecuteRequest<'a> {
    pub sql: &'a str,
}

/// Structured response from the store.
///
/// `success` is whatever the store reported; it is not reinterpreted here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SqlResponse {
    #[serde(default, deserialize_with = "null_as_false")]
    pub success: bool,

    #[serde(default)]
    pub data: Option<serde_json::Value>,

    #[serde(default, deserialize_with = "lenient_message")]
    pub error: Option<String>,
}

/// `null` reads the same as a missing flag
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Non-string error payloads are kept as their JSON text
fn lenient_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(message) => Some(message),
        other => Some(other.to_string()),
    })
}

impl SqlResponse {
    /// Decode `data` into a caller-provided type
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.data
            .clone()
            .map(serde_json::from_value)
            .transpose()
    }
}
