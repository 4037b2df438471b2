//! Run configuration
//!
//! Environment variables are read here and nowhere else; the orchestrator only
//! receives the resolved [`RefreshConfig`].

use cdn_refresh_provider::ObjectType;

use crate::error::ConfigError;

/// Pipe-delimited tag names to refresh (required).
pub const ENV_TAG_NAMES: &str = "CDN_RESOURCE_TAG_NAME";
/// Refresh object type, `File` or `Directory` (optional).
pub const ENV_REFRESH_TYPE: &str = "REFRESH_TYPE";
/// Tag configuration API endpoint (optional).
pub const ENV_API_URL: &str = "API_URL";
/// Provider retry count for transient failures (optional).
pub const ENV_MAX_RETRIES: &str = "REFRESH_MAX_RETRIES";

/// Default tag configuration API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.example.com/cdn-dcdn-config";

/// Separator between tag names.
pub const TAG_SEPARATOR: char = '|';

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Trimmed, non-empty tag names in input order.
    pub tag_names: Vec<String>,
    pub object_type: ObjectType,
    pub api_url: String,
    /// `None` keeps the provider default.
    pub max_retries: Option<u32>,
}

impl RefreshConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_tags = get(ENV_TAG_NAMES).ok_or_else(|| ConfigError::MissingTagNames {
            var: ENV_TAG_NAMES.to_string(),
        })?;
        let tag_names = parse_tag_names(&raw_tags)?;

        let object_type = match get(ENV_REFRESH_TYPE) {
            Some(raw) => raw
                .parse::<ObjectType>()
                .map_err(|detail| ConfigError::InvalidObjectType {
                    var: ENV_REFRESH_TYPE.to_string(),
                    detail,
                })?,
            None => ObjectType::default(),
        };

        let api_url = get(ENV_API_URL).map_or_else(
            || DEFAULT_API_URL.to_string(),
            |v| v.trim().to_string(),
        );
        url::Url::parse(&api_url).map_err(|e| ConfigError::InvalidUrl {
            var: ENV_API_URL.to_string(),
            value: api_url.clone(),
            detail: e.to_string(),
        })?;

        let max_retries = get(ENV_MAX_RETRIES)
            .map(|raw| {
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: ENV_MAX_RETRIES.to_string(),
                        value: raw.clone(),
                    })
            })
            .transpose()?;

        Ok(Self {
            tag_names,
            object_type,
            api_url,
            max_retries,
        })
    }
}

/// Splits a pipe-delimited tag list, trimming entries and dropping empty ones.
///
/// Fails when nothing is left.
pub fn parse_tag_names(raw: &str) -> Result<Vec<String>, ConfigError> {
    let tags: Vec<String> = raw
        .split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    if tags.is_empty() {
        return Err(ConfigError::MalformedTagNames(raw.to_string()));
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parse_tag_names_trims_and_drops_empty() {
        assert_eq!(
            parse_tag_names(" site-a | site-b ||  | site-c").unwrap(),
            vec!["site-a", "site-b", "site-c"]
        );
    }

    #[test]
    fn parse_tag_names_keeps_order_and_duplicates() {
        assert_eq!(
            parse_tag_names("b|a|b").unwrap(),
            vec!["b", "a", "b"]
        );
    }

    #[test]
    fn parse_tag_names_rejects_only_separators() {
        assert_eq!(
            parse_tag_names(" | |"),
            Err(ConfigError::MalformedTagNames(" | |".to_string()))
        );
    }

    #[test]
    fn defaults_apply_when_optional_vars_missing() {
        let config = RefreshConfig::from_lookup(lookup(&[(ENV_TAG_NAMES, "site-a")])).unwrap();
        assert_eq!(config.tag_names, vec!["site-a"]);
        assert_eq!(config.object_type, ObjectType::Directory);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.max_retries, None);
    }

    #[test]
    fn blank_optional_vars_count_as_unset() {
        let config = RefreshConfig::from_lookup(lookup(&[
            (ENV_TAG_NAMES, "site-a"),
            (ENV_REFRESH_TYPE, ""),
            (ENV_API_URL, "  "),
        ]))
        .unwrap();
        assert_eq!(config.object_type, ObjectType::Directory);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn explicit_values_are_used() {
        let config = RefreshConfig::from_lookup(lookup(&[
            (ENV_TAG_NAMES, "site-a|site-b"),
            (ENV_REFRESH_TYPE, "file"),
            (ENV_API_URL, "http://127.0.0.1:8080/api/cdn"),
            (ENV_MAX_RETRIES, "0"),
        ]))
        .unwrap();
        assert_eq!(config.tag_names, vec!["site-a", "site-b"]);
        assert_eq!(config.object_type, ObjectType::File);
        assert_eq!(config.api_url, "http://127.0.0.1:8080/api/cdn");
        assert_eq!(config.max_retries, Some(0));
    }

    #[test]
    fn missing_tag_names_is_error() {
        assert_eq!(
            RefreshConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingTagNames {
                var: ENV_TAG_NAMES.to_string()
            })
        );
        assert!(matches!(
            RefreshConfig::from_lookup(lookup(&[(ENV_TAG_NAMES, "   ")])),
            Err(ConfigError::MissingTagNames { .. })
        ));
    }

    #[test]
    fn invalid_refresh_type_is_error() {
        let result = RefreshConfig::from_lookup(lookup(&[
            (ENV_TAG_NAMES, "site-a"),
            (ENV_REFRESH_TYPE, "Everything"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidObjectType { .. })));
    }

    #[test]
    fn invalid_api_url_is_error() {
        let result = RefreshConfig::from_lookup(lookup(&[
            (ENV_TAG_NAMES, "site-a"),
            (ENV_API_URL, "not a url"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn invalid_retry_count_is_error() {
        let result = RefreshConfig::from_lookup(lookup(&[
            (ENV_TAG_NAMES, "site-a"),
            (ENV_MAX_RETRIES, "-1"),
        ]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidNumber {
                var: ENV_MAX_RETRIES.to_string(),
                value: "-1".to_string()
            })
        );
    }
}
