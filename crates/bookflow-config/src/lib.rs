//! Context resolution for Bookflow
//!
//! Resolves the tenant scope and credentials a client needs, outside the
//! reconciliation core: explicit values win, then the `ZOHO_*` environment
//! variables, then defaults. The core itself never reads the environment —
//! it receives a fully resolved [`BooksContext`] at construction.

pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};

/// Default API domain when neither parameter nor environment supplies one
pub const DEFAULT_API_DOMAIN: &str = "https://books.zoho.com";

pub const ENV_ORGANIZATION_ID: &str = "ZOHO_ORGANIZATION_ID";
pub const ENV_ACCESS_TOKEN: &str = "ZOHO_ACCESS_TOKEN";
pub const ENV_API_DOMAIN: &str = "ZOHO_API_DOMAIN";

/// Fully resolved caller context handed to the API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooksContext {
    /// Tenant scope added to every request as `organization_id`
    pub organization_id: String,

    /// OAuth access token sent as `Authorization: Zoho-oauthtoken …`
    pub access_token: String,

    /// API domain, e.g. `https://books.zoho.com`
    pub api_domain: String,
}

impl BooksContext {
    pub fn new(
        organization_id: impl Into<String>,
        access_token: impl Into<String>,
        api_domain: impl Into<String>,
    ) -> Self {
        Self {
            organization_id: organization_id.into(),
            access_token: access_token.into(),
            api_domain: api_domain.into(),
        }
    }

    /// Resolve a context from explicit parameters, falling back to the
    /// `ZOHO_*` environment variables.
    ///
    /// An explicitly supplied `api_domain` always wins; otherwise
    /// `ZOHO_API_DOMAIN` is consulted before the default domain.
    pub fn resolve(
        organization_id: Option<String>,
        access_token: Option<String>,
        api_domain: Option<String>,
    ) -> Result<Self> {
        let organization_id = organization_id
            .or_else(|| env_non_empty(ENV_ORGANIZATION_ID))
            .ok_or(ConfigError::MissingOrganizationId)?;

        let access_token = access_token
            .or_else(|| env_non_empty(ENV_ACCESS_TOKEN))
            .ok_or(ConfigError::MissingAccessToken)?;

        let api_domain = api_domain
            .or_else(|| env_non_empty(ENV_API_DOMAIN))
            .unwrap_or_else(|| DEFAULT_API_DOMAIN.to_string());

        Ok(Self {
            organization_id,
            access_token,
            api_domain,
        })
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var(ENV_ORGANIZATION_ID);
            std::env::remove_var(ENV_ACCESS_TOKEN);
            std::env::remove_var(ENV_API_DOMAIN);
        }
    }

    #[test]
    #[serial]
    fn test_explicit_values_win() {
        clear_env();
        unsafe {
            std::env::set_var(ENV_ORGANIZATION_ID, "env-org");
            std::env::set_var(ENV_API_DOMAIN, "https://books.zoho.eu");
        }

        let ctx = BooksContext::resolve(
            Some("param-org".to_string()),
            Some("param-token".to_string()),
            Some("https://books.zoho.in".to_string()),
        )
        .unwrap();

        assert_eq!(ctx.organization_id, "param-org");
        assert_eq!(ctx.access_token, "param-token");
        assert_eq!(ctx.api_domain, "https://books.zoho.in");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_fallback() {
        clear_env();
        unsafe {
            std::env::set_var(ENV_ORGANIZATION_ID, "123456789");
            std::env::set_var(ENV_ACCESS_TOKEN, "secret");
        }

        let ctx = BooksContext::resolve(None, None, None).unwrap();
        assert_eq!(ctx.organization_id, "123456789");
        assert_eq!(ctx.access_token, "secret");
        assert_eq!(ctx.api_domain, DEFAULT_API_DOMAIN);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_credentials() {
        clear_env();

        let result = BooksContext::resolve(None, None, None);
        assert!(matches!(result, Err(ConfigError::MissingOrganizationId)));

        let result = BooksContext::resolve(Some("org".to_string()), None, None);
        assert!(matches!(result, Err(ConfigError::MissingAccessToken)));
    }

    #[test]
    #[serial]
    fn test_empty_env_var_is_ignored() {
        clear_env();
        unsafe {
            std::env::set_var(ENV_ORGANIZATION_ID, "");
        }

        let result = BooksContext::resolve(None, Some("tok".to_string()), None);
        assert!(matches!(result, Err(ConfigError::MissingOrganizationId)));

        clear_env();
    }
}
