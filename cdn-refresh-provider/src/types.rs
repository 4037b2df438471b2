//! Shared types for cache refresh providers.

use serde::{Deserialize, Serialize};

// ============ Provider Kind ============

/// Which acceleration product a refresh targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Content Delivery Network.
    Cdn,
    /// Dynamic Route for CDN (whole-site acceleration).
    Dcdn,
}

impl ProviderKind {
    /// Lowercase identifier, as used in reports and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cdn => "cdn",
            Self::Dcdn => "dcdn",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Object Type ============

/// Granularity of a refresh request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ObjectType {
    /// Refresh individual files (URLs).
    File,
    /// Refresh everything under a directory prefix.
    #[default]
    Directory,
}

impl ObjectType {
    /// Value expected by the vendor `ObjectType` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Directory => "Directory",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "directory" => Ok(Self::Directory),
            other => Err(format!(
                "unsupported object type '{other}', expected 'File' or 'Directory'"
            )),
        }
    }
}

// ============ Credentials ============

/// Credential validation error with the offending field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum CredentialValidationError {
    /// A required field is present but blank.
    EmptyField {
        /// Field key.
        field: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "Field must not be empty: {field}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Access key pair used to sign vendor API requests.
///
/// Deserializes from the `{"accessKeyId": "...", "accessKeySecret": "..."}` shape used
/// by the tag configuration API. Missing fields become empty strings so that
/// [`validate`](Self::validate) can report them per field.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessCredentials {
    /// Access key id.
    #[serde(default)]
    pub access_key_id: String,
    /// Access key secret. Never logged.
    #[serde(default)]
    pub access_key_secret: String,
}

impl AccessCredentials {
    /// Creates a credential pair.
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }

    /// Checks that both fields are non-blank.
    pub fn validate(&self) -> Result<(), CredentialValidationError> {
        for (field, value) in [
            ("accessKeyId", &self.access_key_id),
            ("accessKeySecret", &self.access_key_secret),
        ] {
            if value.trim().is_empty() {
                return Err(CredentialValidationError::EmptyField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

// 手写 Debug，避免 secret 进入日志
impl std::fmt::Debug for AccessCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessCredentials")
            .field(
                "access_key_id",
                &crate::utils::log_sanitizer::mask_secret(&self.access_key_id),
            )
            .field("access_key_secret", &"***")
            .finish()
    }
}

// ============ Refresh Result ============

/// Receipt returned by a successful refresh submission.
///
/// Refresh is asynchronous on the vendor side; the task id can be used to
/// query progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReceipt {
    /// Vendor request id.
    pub request_id: String,
    /// Refresh task id(s), comma separated when the vendor split the request.
    pub refresh_task_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_type_parses_case_insensitively() {
        assert_eq!("File".parse::<ObjectType>(), Ok(ObjectType::File));
        assert_eq!(" directory ".parse::<ObjectType>(), Ok(ObjectType::Directory));
        assert_eq!("DIRECTORY".parse::<ObjectType>(), Ok(ObjectType::Directory));
        assert!("Regex".parse::<ObjectType>().is_err());
    }

    #[test]
    fn object_type_defaults_to_directory() {
        assert_eq!(ObjectType::default(), ObjectType::Directory);
        assert_eq!(ObjectType::default().to_string(), "Directory");
    }

    #[test]
    fn provider_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ProviderKind::Dcdn).unwrap(), "\"dcdn\"");
        assert_eq!(ProviderKind::Cdn.to_string(), "cdn");
    }

    #[test]
    fn credentials_deserialize_from_camel_case() {
        let creds: AccessCredentials =
            serde_json::from_str(r#"{"accessKeyId":"LTAI5t","accessKeySecret":"s3cr3t"}"#)
                .unwrap();
        assert_eq!(creds, AccessCredentials::new("LTAI5t", "s3cr3t"));
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn credentials_validate_reports_blank_field() {
        let creds: AccessCredentials = serde_json::from_str(r#"{"accessKeyId":"LTAI5t"}"#).unwrap();
        assert_eq!(
            creds.validate(),
            Err(CredentialValidationError::EmptyField {
                field: "accessKeySecret".to_string()
            })
        );
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = AccessCredentials::new("LTAI5tAbcdefgh", "very-secret-value");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("very-secret-value"));
        assert!(!debug.contains("LTAI5tAbcdefgh"));
    }
}
