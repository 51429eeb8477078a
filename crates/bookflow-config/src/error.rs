use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "organization_id is required either as a parameter or via the \
         ZOHO_ORGANIZATION_ID environment variable"
    )]
    MissingOrganizationId,

    #[error(
        "access_token is required either as a parameter or via the \
         ZOHO_ACCESS_TOKEN environment variable"
    )]
    MissingAccessToken,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
