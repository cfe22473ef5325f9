use crate::address::{Address, Identifier};
use crate::error::{ZkuidError, ZkuidResult};
use crate::proof::ProofHistoryEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pointer into content-addressed storage holding the encrypted profile.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentAddress(String);

impl ContentAddress {
    pub fn new(value: impl Into<String>) -> ZkuidResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ZkuidError::Validation("content address cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn gateway_url(&self, gateway: &str) -> String {
        format!("{}/{}", gateway.trim_end_matches('/'), self.0)
    }
}

impl fmt::Debug for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentAddress({})", self.0)
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw registration form input, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub age: String,
    pub country: String,
    pub twitter: String,
    pub linkedin: String,
}

impl RegistrationForm {
    pub fn into_request(self) -> ZkuidResult<RegistrationRequest> {
        let age_text = self.age.trim();
        if age_text.is_empty() {
            return Err(ZkuidError::Validation("age is required".into()));
        }
        let age: u32 = age_text
            .parse()
            .map_err(|_| ZkuidError::Validation(format!("age must be a whole number, got '{}'", age_text)))?;

        let request = RegistrationRequest {
            name: self.name,
            email: self.email,
            age,
            country: self.country,
            twitter: Some(self.twitter),
            linkedin: Some(self.linkedin),
        };
        request.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl RegistrationRequest {
    pub fn new(name: &str, email: &str, age: u32, country: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            age,
            country: country.to_string(),
            twitter: None,
            linkedin: None,
        }
    }

    pub fn with_twitter(mut self, handle: &str) -> Self {
        self.twitter = Some(handle.to_string());
        self
    }

    pub fn with_linkedin(mut self, url: &str) -> Self {
        self.linkedin = Some(url.to_string());
        self
    }

    /// Trims every field, rejects blank required fields and drops blank
    /// optional ones.
    pub fn validate(self) -> ZkuidResult<Self> {
        fn required(field: &str, value: String) -> ZkuidResult<String> {
            let value = value.trim().to_string();
            if value.is_empty() {
                return Err(ZkuidError::Validation(format!("{} is required", field)));
            }
            Ok(value)
        }

        fn optional(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Ok(Self {
            name: required("name", self.name)?,
            email: required("email", self.email)?,
            age: self.age,
            country: required("country", self.country)?,
            twitter: optional(self.twitter),
            linkedin: optional(self.linkedin),
        })
    }

    /// Every user-entered value, used to check that nothing leaks into a
    /// verification outcome.
    pub fn field_values(&self) -> Vec<String> {
        let mut values = vec![
            self.name.clone(),
            self.email.clone(),
            self.age.to_string(),
            self.country.clone(),
        ];
        values.extend(self.twitter.iter().cloned());
        values.extend(self.linkedin.iter().cloned());
        values
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResult {
    pub uid: Identifier,
    pub content_address: ContentAddress,
}

/// User record as returned by the identity service. Only `uid` is
/// guaranteed; the rest of the schema belongs to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub uid: String,
    #[serde(default)]
    pub content_address: Option<ContentAddress>,
    #[serde(default)]
    pub wallet: Option<Address>,
    #[serde(default)]
    pub registered_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub proof_history: Vec<ProofHistoryEntry>,
}
