//! API credentials for authenticating requests.

use std::fmt;

use thiserror::Error;

/// Default environment variable holding the API key.
pub const DEFAULT_ENV_VAR: &str = "KINESCOPE_API_KEY";

/// Errors raised when constructing [`Credentials`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    /// The supplied API key was empty (after trimming).
    #[error("API key cannot be empty")]
    EmptyApiKey,

    /// The environment variable was not set.
    #[error("environment variable {name} is not set")]
    MissingEnvVar {
        /// Name of the variable that was looked up.
        name: String,
    },
}

/// Immutable API credentials.
///
/// Holds the bearer token used to authenticate every API request. The
/// `Debug` representation masks the key so it never leaks into logs.
///
/// # Example
///
/// ```
/// use kinescope_client::Credentials;
///
/// let credentials = Credentials::new("my-api-key").unwrap();
/// assert_eq!(credentials.authorization_header(), "Bearer my-api-key");
/// ```
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Creates credentials from an API key string.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::EmptyApiKey`] if the key is empty after
    /// trimming.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CredentialsError> {
        let trimmed = api_key.into().trim().to_string();

        if trimmed.is_empty() {
            return Err(CredentialsError::EmptyApiKey);
        }

        Ok(Self { api_key: trimmed })
    }

    /// Creates credentials from the `KINESCOPE_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::MissingEnvVar`] if the variable is unset
    /// and [`CredentialsError::EmptyApiKey`] if it is set but blank.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_env_var(DEFAULT_ENV_VAR)
    }

    /// Creates credentials from a named environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::MissingEnvVar`] if the variable is unset
    /// and [`CredentialsError::EmptyApiKey`] if it is set but blank.
    pub fn from_env_var(name: &str) -> Result<Self, CredentialsError> {
        let value = std::env::var(name).map_err(|_| CredentialsError::MissingEnvVar {
            name: name.to_string(),
        })?;

        Self::new(value)
    }

    /// Returns the `Authorization` header value (`Bearer {key}`).
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Returns a masked key for logging: first and last four characters,
    /// the rest replaced with `*`. Keys of eight characters or fewer are
    /// fully masked.
    #[must_use]
    pub fn masked(&self) -> String {
        let len = self.api_key.len();

        if len <= 8 {
            return "*".repeat(len);
        }

        format!(
            "{}{}{}",
            &self.api_key[..4],
            "*".repeat(len - 8),
            &self.api_key[len - 4..]
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.masked())
            .finish()
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.api_key == other.api_key
    }
}

impl Eq for Credentials {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_whitespace() {
        let credentials = Credentials::new("  abc-key  ").unwrap();
        assert_eq!(credentials.authorization_header(), "Bearer abc-key");
    }

    #[test]
    fn test_new_rejects_empty_key() {
        assert_eq!(Credentials::new(""), Err(CredentialsError::EmptyApiKey));
        assert_eq!(Credentials::new("   "), Err(CredentialsError::EmptyApiKey));
    }

    #[test]
    fn test_from_env_var_missing() {
        let result = Credentials::from_env_var("KINESCOPE_TEST_UNSET_VAR");
        assert_eq!(
            result,
            Err(CredentialsError::MissingEnvVar {
                name: "KINESCOPE_TEST_UNSET_VAR".to_string()
            })
        );
    }

    #[test]
    fn test_masked_long_key() {
        let credentials = Credentials::new("abcdefghijklmnop").unwrap();
        assert_eq!(credentials.masked(), "abcd********mnop");
    }

    #[test]
    fn test_masked_short_key() {
        let credentials = Credentials::new("abcd").unwrap();
        assert_eq!(credentials.masked(), "****");
    }

    #[test]
    fn test_debug_never_prints_raw_key() {
        let credentials = Credentials::new("super-secret-api-key").unwrap();
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("super-secret-api-key"), "leaked: {debug}");
        assert!(debug.contains("supe"), "masked prefix missing: {debug}");
    }
}
