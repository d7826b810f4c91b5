//! Authentication payloads.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(SecretString::new(raw.into()))
}

/// Token payload returned by login, refresh and the OIDC exchange.
///
/// The refresh token itself travels as an HTTP-only cookie and never appears
/// here.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    #[serde(deserialize_with = "deserialize_secret")]
    pub access_token: SecretString,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Login body. The identifier may be an email address or a username.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: SecretString,
}

impl Serialize for LoginRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("LoginRequest", 2)?;
        s.serialize_field("identifier", &self.identifier)?;
        s.serialize_field("password", self.password.expose_secret())?;
        s.end()
    }
}

/// OIDC authorization-code exchange body.
#[derive(Debug, Clone, Serialize)]
pub struct OidcExchange {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

/// Identity returned by `GET /api/v1/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(deserialize_with = "crate::serde_helpers::id_from_string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::null_as_default")]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_superuser: bool,
}
