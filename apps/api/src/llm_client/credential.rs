use std::fmt;

use crate::errors::AppError;

/// A caller-supplied completion API key.
///
/// Lives only as long as the request that carried it. `Debug` is redacted so
/// the key never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Picks the request's key, falling back to the server default.
    /// A blank result is `MissingInput`.
    pub fn resolve(request_key: Option<&str>, default_key: Option<&str>) -> Result<Self, AppError> {
        request_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or_else(|| default_key.map(str::trim).filter(|k| !k.is_empty()))
            .map(|k| ApiKey(k.to_string()))
            .ok_or_else(|| AppError::MissingInput("Please provide an OpenAI API key".to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_key_wins_over_default() {
        let key = ApiKey::resolve(Some("sk-request"), Some("sk-default")).unwrap();
        assert_eq!(key.expose(), "sk-request");
    }

    #[test]
    fn test_blank_request_key_falls_back_to_default() {
        let key = ApiKey::resolve(Some("   "), Some("sk-default")).unwrap();
        assert_eq!(key.expose(), "sk-default");
    }

    #[test]
    fn test_no_key_is_missing_input() {
        let err = ApiKey::resolve(None, None).unwrap_err();
        assert!(matches!(err, AppError::MissingInput(_)));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::resolve(Some("sk-secret"), None).unwrap();
        assert!(!format!("{key:?}").contains("sk-secret"));
    }
}
