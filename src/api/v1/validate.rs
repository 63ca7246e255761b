//! API key validation endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::DomainError;

const MISSING_PARAMETERS: &str =
    r#"Missing required query parameters "accountName" and "apiKey"."#;

/// Query parameters of `GET /v1/validate`
#[derive(Debug, Default)]
pub struct ValidateParams {
    pub account_name: Option<String>,
    pub api_key: Option<String>,
}

impl ValidateParams {
    /// Collect the parameters from decoded query pairs
    ///
    /// A repeated parameter keeps its first value; unknown names are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (name, value) in pairs {
            let slot = match name.as_str() {
                "accountName" => &mut params.account_name,
                "apiKey" => &mut params.api_key,
                _ => continue,
            };

            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params
    }

    /// Both parameters, or a validation error when either is missing or empty
    fn credentials(&self) -> Result<(&str, &str), DomainError> {
        match (self.account_name.as_deref(), self.api_key.as_deref()) {
            (Some(account), Some(api_key)) if !account.is_empty() && !api_key.is_empty() => {
                Ok((account, api_key))
            }
            _ => Err(DomainError::validation(MISSING_PARAMETERS)),
        }
    }
}

/// GET /v1/validate
///
/// 204 when the key is valid for the account, 404 otherwise.
pub async fn validate_key(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let Query(pairs) = pairs.map_err(|e| {
        ApiError::bad_request(format!("Unable to parse URL parameters: {}", e.body_text()))
            .with_code("invalid_query")
    })?;
    let params = ValidateParams::from_pairs(pairs);

    let (account, api_key) = params.credentials().map_err(|e| {
        info!("Key validation request missing required query parameters.");
        ApiError::from(e).with_code("missing_parameters")
    })?;

    let result = state.validation_service.validate(account, api_key).await;

    if result.is_valid() {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(account: Option<&str>, api_key: Option<&str>) -> ValidateParams {
        ValidateParams {
            account_name: account.map(str::to_string),
            api_key: api_key.map(str::to_string),
        }
    }

    #[test]
    fn test_credentials_present() {
        let params = params(Some("someone"), Some("ff01ab"));

        assert_eq!(params.credentials().unwrap(), ("someone", "ff01ab"));
    }

    #[test]
    fn test_credentials_missing() {
        assert!(params(None, Some("ff01ab")).credentials().is_err());
        assert!(params(Some("someone"), None).credentials().is_err());
        assert!(ValidateParams::default().credentials().is_err());
    }

    #[test]
    fn test_credentials_empty() {
        let err = params(Some(""), Some("ff01ab")).credentials().unwrap_err();

        assert!(err.to_string().contains("accountName"));
        assert!(params(Some("someone"), Some("")).credentials().is_err());
    }

    fn pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_pairs_uses_camel_case_names() {
        let params = ValidateParams::from_pairs(pairs(&[
            ("accountName", "someone"),
            ("apiKey", "ff01ab"),
            ("account_name", "ignored"),
        ]));

        assert_eq!(params.credentials().unwrap(), ("someone", "ff01ab"));
    }

    #[test]
    fn test_from_pairs_keeps_first_repeated_value() {
        let params = ValidateParams::from_pairs(pairs(&[
            ("accountName", "a"),
            ("accountName", "b"),
            ("apiKey", "k"),
            ("apiKey", "other"),
        ]));

        assert_eq!(params.credentials().unwrap(), ("a", "k"));
    }

    #[test]
    fn test_from_pairs_empty_first_value_is_missing() {
        let params = ValidateParams::from_pairs(pairs(&[
            ("accountName", ""),
            ("accountName", "b"),
            ("apiKey", "k"),
        ]));

        assert!(params.credentials().is_err());
    }
}
